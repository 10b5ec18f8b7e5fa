use dohq_proto::{QueryType, ResponseCode};

/// The record types a [`Resolver`] knows how to look up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum RecordType {
    A,
    CNAME,
    NS,
    TXT,
}

impl RecordType {
    pub const ALL: [RecordType; 4] = [Self::A, Self::CNAME, Self::NS, Self::TXT];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::CNAME => "CNAME",
            Self::NS => "NS",
            Self::TXT => "TXT",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RecordType> for QueryType {
    fn from(value: RecordType) -> Self {
        match value {
            RecordType::A => QueryType::A,
            RecordType::CNAME => QueryType::CNAME,
            RecordType::NS => QueryType::NS,
            RecordType::TXT => QueryType::TXT,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    #[error("no endpoint to send the query to")]
    NoEndpoint,
    #[error(transparent)]
    Transport(#[from] crate::transport::TransportError),
    #[error("server answered with {0:?}")]
    Response(ResponseCode),
}

/// Looks up records for a domain name.
///
/// Every operation answers with the records found, one string per record.
/// Failures are not reported to the caller: a name without such records and
/// a lookup that went wrong both give an empty list.
#[async_trait::async_trait]
pub trait Resolver: std::fmt::Debug + Send + Sync {
    fn kind(&self) -> &'static str;

    /// IPv4 addresses, in dotted notation
    async fn a(&self, domain: &str) -> Vec<String>;
    /// Canonical names the domain is an alias of
    async fn cname(&self, domain: &str) -> Vec<String>;
    /// Authoritative name servers
    async fn ns(&self, domain: &str) -> Vec<String>;
    /// Text records, each one reassembled from its character strings
    async fn txt(&self, domain: &str) -> Vec<String>;
}
