//! Stateless HTTP request builder and response parser for the message store.
//!
//! # Design
//! `MuralClient` holds only a `base_url`. Each store operation is split into
//! a `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The caller executes the round-trip, so
//! the core stays deterministic and free of I/O.
//!
//! Any 2xx status counts as success. Listing bodies are validated through
//! [`decode_listing`]; a body that is not a JSON array, including one that
//! is not JSON at all, is an empty board rather than an error.

use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{decode_listing, Message, MessageId, NewMessage};

const COLLECTION: &str = "recados";

/// Synchronous, stateless client for the message store.
#[derive(Debug, Clone)]
pub struct MuralClient {
    base_url: String,
}

impl MuralClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_messages(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/{COLLECTION}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_message(&self, input: &NewMessage) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/{COLLECTION}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete_message(&self, id: &MessageId) -> HttpRequest {
        let segment = urlencoding::encode(&id.to_string()).into_owned();
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/{COLLECTION}/{segment}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_messages(&self, response: HttpResponse) -> Result<Vec<Message>, ApiError> {
        check_status(&response)?;
        match serde_json::from_str::<Value>(&response.body) {
            Ok(listing) => Ok(decode_listing(&listing)),
            Err(e) => {
                tracing::warn!(error = %e, "listing body is not JSON, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Returns the created record when the store echoes one back.
    pub fn parse_create_message(&self, response: HttpResponse) -> Result<Option<Message>, ApiError> {
        check_status(&response)?;
        let created = serde_json::from_str::<Value>(&response.body)
            .ok()
            .and_then(|value| Message::from_value(&value));
        Ok(created)
    }

    pub fn parse_delete_message(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)?;
        Ok(())
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
