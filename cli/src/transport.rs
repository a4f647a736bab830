//! Executes `mural-core` requests over the network.

use mural_core::{HttpMethod, HttpRequest, HttpResponse};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{method} {url} failed")]
    Request {
        method: &'static str,
        url: String,
        #[source]
        source: ureq::Error,
    },
}

/// Performs one HTTP round-trip. Non-2xx statuses are data, not errors.
pub trait Transport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport backed by a shared `ureq::Agent`.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = req.method.as_str();
        let url = req.path;
        tracing::debug!(method, %url, "sending request");

        let sent = match (req.method, req.body) {
            (HttpMethod::Get, _) => self.agent.get(&url).call(),
            (HttpMethod::Delete, _) => self.agent.delete(&url).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&url).send_empty(),
        };
        let mut response = sent.map_err(|source| TransportError::Request {
            method,
            url: url.clone(),
            source,
        })?;

        let status = response.status().as_u16();
        // A body that cannot be read as text is handled like an empty one.
        let body = response.body_mut().read_to_string().unwrap_or_default();
        tracing::debug!(method, %url, status, "response received");
        Ok(HttpResponse::new(status, body))
    }
}
