use ::config::builder::DefaultState;
use ::config::{ConfigBuilder, ConfigError, Environment, File};
use std::path::Path;

#[derive(Debug, Default, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub resolver: crate::resolver::Config,
}

impl Config {
    /// Reads the optional configuration file, then the `DOHQ__` prefixed
    /// environment variables, like `DOHQ__RESOLVER__ENDPOINTS`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let builder = ::config::Config::builder();
        let builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder,
        };
        Self::from_builder(
            builder.add_source(
                Environment::with_prefix("DOHQ")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("resolver.endpoints"),
            ),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}
