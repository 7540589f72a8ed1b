// HTTP transport seam: one GET per call, no retries

use crate::error::TransportError;
use crate::query::QueryParams;
use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues a single GET. Any status code is a successful transport outcome;
/// `Err` means no response was obtained.
#[async_trait]
pub trait HttpTransport: Send + Sync + 'static {
    async fn get(&self, url: &str, params: &QueryParams) -> Result<HttpResponse, TransportError>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("ticketmaster-mcp/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, params: &QueryParams) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .query(params.as_pairs())
            .send()
            .await?;
        let status = response.status().as_u16();
        Ok(assemble_response(status, response.bytes().await)?)
    }
}

// A failing status stays classifiable even when its body cannot be read
fn assemble_response<E>(status: u16, body: Result<Bytes, E>) -> Result<HttpResponse, E> {
    match body {
        Ok(body) => Ok(HttpResponse { status, body }),
        Err(_) if !(200..300).contains(&status) => Ok(HttpResponse::new(status, Bytes::new())),
        Err(err) => Err(err),
    }
}
