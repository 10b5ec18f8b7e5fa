use dohq_resolver::{BuilderError, DohResolver, Endpoint};

#[derive(Debug, Default, serde::Deserialize)]
pub struct Config {
    /// Endpoints to query, the well known ones when missing
    #[serde(default)]
    pub endpoints: Option<Vec<Endpoint>>,
}

impl Config {
    pub fn build(self) -> Result<DohResolver, BuilderError> {
        let builder = DohResolver::builder();
        let builder = match self.endpoints {
            Some(endpoints) => builder.with_endpoints(endpoints),
            None => builder,
        };
        let resolver = builder.build()?;
        tracing::debug!(
            "resolver ready with {} endpoints",
            resolver.endpoints().len()
        );
        Ok(resolver)
    }
}
