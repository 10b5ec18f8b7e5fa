use crate::endpoint::{Endpoint, Method};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use dohq_proto::{DnsPacket, ReaderError, WriterError};
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;

/// Media type of a DNS message in wire format (RFC 8484)
pub const DNS_MESSAGE: &str = "application/dns-message";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("unable to encode query: {0}")]
    Writer(#[from] WriterError),
    #[error("unable to decode response: {0}")]
    Reader(#[from] ReaderError),
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} answered with status {status}")]
    Status { endpoint: String, status: StatusCode },
    #[error("{endpoint} answered with content type {content_type:?}")]
    ContentType {
        endpoint: String,
        content_type: Option<String>,
    },
}

/// Carries a DNS message to an endpoint and brings back its answer.
#[async_trait::async_trait]
pub trait Transport: std::fmt::Debug + Send + Sync {
    async fn exchange(
        &self,
        endpoint: &Endpoint,
        packet: &DnsPacket,
    ) -> Result<DnsPacket, TransportError>;
}

#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn request(&self, endpoint: &Endpoint, body: Vec<u8>) -> reqwest::RequestBuilder {
        let builder = match endpoint.method() {
            Method::Post => self
                .client
                .post(endpoint.url().clone())
                .header(CONTENT_TYPE, DNS_MESSAGE)
                .body(body),
            Method::Get => {
                let mut url = endpoint.url().clone();
                url.query_pairs_mut()
                    .append_pair("dns", &URL_SAFE_NO_PAD.encode(body));
                self.client.get(url)
            }
        };
        builder.header(ACCEPT, DNS_MESSAGE)
    }
}

fn is_dns_message(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().eq_ignore_ascii_case(DNS_MESSAGE))
        .unwrap_or(false)
}

/// Rejects a response that doesn't carry a DNS message, before its body is read.
fn check_response(
    endpoint: &Endpoint,
    status: StatusCode,
    headers: &HeaderMap,
) -> Result<(), TransportError> {
    if !status.is_success() {
        return Err(TransportError::Status {
            endpoint: endpoint.to_string(),
            status,
        });
    }

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    if !is_dns_message(content_type) {
        return Err(TransportError::ContentType {
            endpoint: endpoint.to_string(),
            content_type: content_type.map(String::from),
        });
    }

    Ok(())
}

fn decode_response(body: &[u8]) -> Result<DnsPacket, TransportError> {
    tracing::debug!("received {} bytes", body.len());
    Ok(DnsPacket::try_from(body)?)
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    #[tracing::instrument(skip_all, fields(endpoint = %endpoint))]
    async fn exchange(
        &self,
        endpoint: &Endpoint,
        packet: &DnsPacket,
    ) -> Result<DnsPacket, TransportError> {
        let body = packet.create_buffer()?.into_bytes();
        tracing::debug!("sending {} bytes", body.len());

        let response = self
            .request(endpoint, body)
            .send()
            .await
            .map_err(|source| TransportError::Http {
                endpoint: endpoint.to_string(),
                source,
            })?;

        check_response(endpoint, response.status(), response.headers())?;

        let bytes = response
            .bytes()
            .await
            .map_err(|source| TransportError::Http {
                endpoint: endpoint.to_string(),
                source,
            })?;

        decode_response(bytes.as_ref())
    }
}
