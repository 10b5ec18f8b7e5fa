use std::fmt::Display;
use std::str::FromStr;
use url::Url;

/// Public resolvers used when no endpoint is configured.
pub const WELL_KNOWN: [&str; 3] = [
    "https://cloudflare-dns.com/dns-query",
    "https://dns.google/dns-query",
    "https://dns.quad9.net/dns-query",
];

pub fn well_known() -> Vec<Endpoint> {
    WELL_KNOWN
        .iter()
        .filter_map(|url| Endpoint::new(url).ok())
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("endpoint should use https, found {0:?}")]
    InsecureScheme(String),
    #[error("unknown http method {0:?}")]
    UnknownMethod(String),
}

/// How the DNS message travels in the HTTP request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Method {
    /// Message as request body
    #[default]
    Post,
    /// Message encoded in the `dns` query parameter
    Get,
}

impl FromStr for Method {
    type Err = EndpointError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "post" => Ok(Self::Post),
            "get" => Ok(Self::Get),
            _ => Err(EndpointError::UnknownMethod(value.to_string())),
        }
    }
}

/// A DNS-over-HTTPS server.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawEndpoint"))]
pub struct Endpoint {
    url: Url,
    method: Method,
}

impl Endpoint {
    pub fn new(url: &str) -> Result<Self, EndpointError> {
        let url = Url::parse(url)?;
        if url.scheme() != "https" {
            return Err(EndpointError::InsecureScheme(url.scheme().to_string()));
        }
        Ok(Self {
            url,
            method: Method::default(),
        })
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn method(&self) -> Method {
        self.method
    }
}

/// Accepts `https://host/path`, or the same prefixed by the method as in
/// `get:https://host/path`.
impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.split_once(':') {
            Some((method, rest)) if !rest.starts_with("//") => {
                Ok(Self::new(rest)?.with_method(method.parse()?))
            }
            _ => Self::new(value),
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.method {
            Method::Post => write!(f, "{}", self.url),
            Method::Get => write!(f, "get:{}", self.url),
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawEndpoint {
    Short(String),
    Detailed {
        url: String,
        #[serde(default)]
        method: Method,
    },
}

#[cfg(feature = "serde")]
impl TryFrom<RawEndpoint> for Endpoint {
    type Error = EndpointError;

    fn try_from(value: RawEndpoint) -> Result<Self, Self::Error> {
        match value {
            RawEndpoint::Short(value) => value.parse(),
            RawEndpoint::Detailed { url, method } => Ok(Self::new(&url)?.with_method(method)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Endpoint, EndpointError, Method};

    #[test]
    fn should_have_three_well_known_endpoints() {
        let endpoints = super::well_known();
        assert_eq!(endpoints.len(), 3);
        assert!(endpoints
            .iter()
            .all(|item| item.method() == Method::Post && item.url().scheme() == "https"));
    }

    #[test]
    fn should_parse_plain_url() {
        let endpoint: Endpoint = "https://dns.google/dns-query".parse().unwrap();
        assert_eq!(endpoint.method(), Method::Post);
        assert_eq!(endpoint.url().host_str(), Some("dns.google"));
        assert_eq!(endpoint.to_string(), "https://dns.google/dns-query");
    }

    #[test]
    fn should_parse_method_prefix() {
        let endpoint: Endpoint = "GET:https://dns.google/dns-query".parse().unwrap();
        assert_eq!(endpoint.method(), Method::Get);
        assert_eq!(endpoint.to_string(), "get:https://dns.google/dns-query");
    }

    #[test]
    fn should_reject_plain_http() {
        assert!(matches!(
            Endpoint::new("http://dns.google/dns-query"),
            Err(EndpointError::InsecureScheme(scheme)) if scheme == "http"
        ));
    }

    #[test]
    fn should_reject_garbage() {
        assert!(matches!(
            "not an url".parse::<Endpoint>(),
            Err(EndpointError::InvalidUrl(_))
        ));
        assert!(matches!(
            "put:https://dns.google/dns-query".parse::<Endpoint>(),
            Err(EndpointError::UnknownMethod(_))
        ));
    }
}
