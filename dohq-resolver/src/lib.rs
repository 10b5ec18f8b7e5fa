//! DNS lookups of A, CNAME, NS and TXT records behind the [`Resolver`] trait,
//! with [`DohResolver`] doing them over DNS-over-HTTPS.
//!
//! ```no_run
//! use dohq_resolver::{DohResolver, Resolver};
//!
//! # async fn run() {
//! let resolver = DohResolver::default();
//! for address in resolver.a("example.org").await {
//!     println!("{address}");
//! }
//! # }
//! ```

pub mod answer;
pub mod doh;
pub mod endpoint;
#[cfg(feature = "mock")]
pub mod mock;
pub mod prelude;
pub mod transport;

pub use doh::{BuilderError, DohResolver, DohResolverBuilder};
pub use endpoint::{Endpoint, EndpointError, Method};
pub use prelude::{RecordType, Resolver, ResolverError};
pub use transport::{HttpTransport, Transport, TransportError};
