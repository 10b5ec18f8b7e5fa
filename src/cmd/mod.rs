pub mod lookup;

use clap::{Parser, Subcommand};
use dohq_resolver::{BuilderError, Endpoint, RecordType, Resolver};
use std::path::PathBuf;

/// Looks up DNS records through DNS-over-HTTPS servers
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the configuration file
    #[arg(short, long, env = "CONFIG_PATH")]
    config_path: Option<PathBuf>,
    /// Endpoint to query instead of the configured ones, like
    /// `https://dns.google/dns-query` or `get:https://dns.google/dns-query`
    #[arg(short, long = "endpoint", global = true)]
    endpoints: Vec<Endpoint>,
    #[command(subcommand)]
    inner: Commands,
}

#[derive(Debug)]
pub enum Error {
    Config(::config::ConfigError),
    Resolver(BuilderError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(inner) => write!(f, "invalid configuration: {inner}"),
            Self::Resolver(inner) => write!(f, "unable to build resolver: {inner}"),
        }
    }
}

impl From<::config::ConfigError> for Error {
    fn from(value: ::config::ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<BuilderError> for Error {
    fn from(value: BuilderError) -> Self {
        Self::Resolver(value)
    }
}

impl Args {
    /// Returns the number of records found
    pub async fn run(self) -> Result<usize, Error> {
        let mut config = crate::config::Config::load(self.config_path.as_deref())?;
        if !self.endpoints.is_empty() {
            config.resolver.endpoints = Some(self.endpoints);
        }
        let resolver = config.resolver.build()?;

        Ok(self.inner.run(&resolver).await)
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// IPv4 addresses
    A(lookup::Command),
    /// Canonical name
    Cname(lookup::Command),
    /// Name servers
    Ns(lookup::Command),
    /// Text records
    Txt(lookup::Command),
    /// All the above, queried concurrently
    All(lookup::Command),
}

impl Commands {
    async fn run(self, resolver: &dyn Resolver) -> usize {
        match self {
            Self::A(inner) => inner.run(resolver, RecordType::A).await,
            Self::Cname(inner) => inner.run(resolver, RecordType::CNAME).await,
            Self::Ns(inner) => inner.run(resolver, RecordType::NS).await,
            Self::Txt(inner) => inner.run(resolver, RecordType::TXT).await,
            Self::All(inner) => inner.run_all(resolver).await,
        }
    }
}
