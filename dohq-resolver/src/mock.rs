use crate::prelude::{RecordType, Resolver};
use std::collections::HashMap;

/// Resolver answering from records given upfront, nothing goes on the network.
#[derive(Debug, Default)]
pub struct MockResolver {
    records: HashMap<(RecordType, String), Vec<String>>,
}

impl MockResolver {
    pub fn with_records<D, I, S>(mut self, record_type: RecordType, domain: D, records: I) -> Self
    where
        D: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.records.insert(
            (record_type, domain.into()),
            records.into_iter().map(Into::into).collect(),
        );
        self
    }

    fn get(&self, record_type: RecordType, domain: &str) -> Vec<String> {
        self.records
            .get(&(record_type, domain.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl Resolver for MockResolver {
    fn kind(&self) -> &'static str {
        "mock-resolver"
    }

    async fn a(&self, domain: &str) -> Vec<String> {
        self.get(RecordType::A, domain)
    }

    async fn cname(&self, domain: &str) -> Vec<String> {
        self.get(RecordType::CNAME, domain)
    }

    async fn ns(&self, domain: &str) -> Vec<String> {
        self.get(RecordType::NS, domain)
    }

    async fn txt(&self, domain: &str) -> Vec<String> {
        self.get(RecordType::TXT, domain)
    }
}
