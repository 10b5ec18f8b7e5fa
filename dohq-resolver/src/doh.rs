use crate::answer;
use crate::endpoint::{self, Endpoint};
use crate::prelude::{RecordType, Resolver, ResolverError};
use crate::transport::{HttpTransport, Transport};
use dohq_proto::{DnsPacket, ResponseCode};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuilderError {
    #[error("at least one endpoint is required")]
    NoEndpoint,
}

#[derive(Debug, Default)]
pub struct DohResolverBuilder<T = HttpTransport> {
    endpoints: Option<Vec<Endpoint>>,
    transport: T,
}

impl<T> DohResolverBuilder<T> {
    pub fn add_endpoint(&mut self, value: Endpoint) {
        self.endpoints.get_or_insert_with(Vec::new).push(value);
    }

    pub fn with_endpoint(mut self, value: Endpoint) -> Self {
        self.add_endpoint(value);
        self
    }

    /// Replaces the endpoints given so far
    pub fn with_endpoints(mut self, values: Vec<Endpoint>) -> Self {
        self.endpoints = Some(values);
        self
    }

    pub fn with_transport<U>(self, transport: U) -> DohResolverBuilder<U> {
        DohResolverBuilder {
            endpoints: self.endpoints,
            transport,
        }
    }

    /// Falls back on the well known endpoints when none were given. Giving an
    /// empty list is an error.
    pub fn build(self) -> Result<DohResolver<T>, BuilderError> {
        let endpoints = match self.endpoints {
            None => endpoint::well_known(),
            Some(list) if list.is_empty() => return Err(BuilderError::NoEndpoint),
            Some(list) => list,
        };
        Ok(DohResolver {
            endpoints,
            transport: self.transport,
            cursor: AtomicUsize::new(0),
        })
    }
}

impl DohResolverBuilder<HttpTransport> {
    pub fn with_client(self, client: reqwest::Client) -> Self {
        self.with_transport(HttpTransport::new(client))
    }
}

/// Resolves records through DNS-over-HTTPS.
///
/// Each lookup goes to a single endpoint, taken in turn from the configured
/// list. A failing endpoint is not retried nor replaced by another one.
#[derive(Debug)]
pub struct DohResolver<T = HttpTransport> {
    endpoints: Vec<Endpoint>,
    transport: T,
    cursor: AtomicUsize,
}

impl DohResolver<HttpTransport> {
    /// Resolver on the given endpoints, or on the well known ones when there
    /// are none.
    pub fn new(endpoints: Option<Vec<Endpoint>>) -> Self {
        let endpoints = match endpoints {
            Some(list) if !list.is_empty() => list,
            Some(_) => {
                tracing::warn!("empty endpoint list, using the well known endpoints");
                endpoint::well_known()
            }
            None => endpoint::well_known(),
        };
        Self {
            endpoints,
            transport: HttpTransport::default(),
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn well_known() -> Self {
        Self::new(None)
    }

    pub fn builder() -> DohResolverBuilder<HttpTransport> {
        DohResolverBuilder::default()
    }
}

impl Default for DohResolver<HttpTransport> {
    fn default() -> Self {
        Self::well_known()
    }
}

impl<T: Transport> DohResolver<T> {
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    fn next_endpoint(&self) -> Result<&Endpoint, ResolverError> {
        if self.endpoints.is_empty() {
            return Err(ResolverError::NoEndpoint);
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.endpoints.len();
        self.endpoints
            .get(index)
            .ok_or(ResolverError::NoEndpoint)
    }

    /// Same as the [`Resolver`] operations, but tells apart a lookup that
    /// failed from a name without records.
    ///
    /// A name that doesn't exist (NXDOMAIN) is not an error and gives an empty
    /// list, any other error code from the server is.
    #[tracing::instrument(skip(self), fields(resolver = self.kind()))]
    pub async fn lookup(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Vec<String>, ResolverError> {
        let endpoint = self.next_endpoint()?;
        // id zero keeps the responses cacheable by http intermediaries
        let query = DnsPacket::query(0, domain, record_type.into());

        tracing::debug!("querying {endpoint}");
        let response = self.transport.exchange(endpoint, &query).await?;

        match response.header.response_code {
            ResponseCode::NoError | ResponseCode::NameError => {
                tracing::debug!("received {} answers", response.answers.len());
                Ok(answer::normalize(record_type, response.answers))
            }
            other => Err(ResolverError::Response(other)),
        }
    }

    async fn resolve(&self, domain: &str, record_type: RecordType) -> Vec<String> {
        match self.lookup(domain, record_type).await {
            Ok(found) => found,
            Err(error) => {
                tracing::error!(
                    %domain,
                    %record_type,
                    "unable to resolve {record_type} for {domain}: {error}"
                );
                Vec::new()
            }
        }
    }
}

#[async_trait::async_trait]
impl<T: Transport> Resolver for DohResolver<T> {
    fn kind(&self) -> &'static str {
        "doh-resolver"
    }

    async fn a(&self, domain: &str) -> Vec<String> {
        self.resolve(domain, RecordType::A).await
    }

    async fn cname(&self, domain: &str) -> Vec<String> {
        self.resolve(domain, RecordType::CNAME).await
    }

    async fn ns(&self, domain: &str) -> Vec<String> {
        self.resolve(domain, RecordType::NS).await
    }

    async fn txt(&self, domain: &str) -> Vec<String> {
        self.resolve(domain, RecordType::TXT).await
    }
}
