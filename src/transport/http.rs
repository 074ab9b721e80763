//! HTTP transport - the content API over reqwest.
//!
//! Requires the `http` feature.
//!
//! ## Example
//!
//! ```ignore
//! use comforters_admin::{ApiConfig, ApiRequest, HttpTransport, Transport};
//!
//! let transport = HttpTransport::new(&ApiConfig::from_env()?)?;
//! let posts = transport.send(ApiRequest::get("/posts?page=1")).await?;
//! ```

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{debug, warn};

use super::{parse_success_body, ApiRequest, Method, RequestBody, Transport, TransportError};
use crate::config::ApiConfig;

/// [`Transport`] backed by a shared `reqwest::Client`. Clones share the
/// connection pool.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpTransport {
    /// Build a client with the configured timeout.
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self::with_client(client, config.clone()))
    }

    /// Use an existing client, e.g. one shared with the rest of an application.
    pub fn with_client(client: reqwest::Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn multipart(body: RequestBody) -> Result<Option<Form>, TransportError> {
        match body {
            RequestBody::Empty => Ok(None),
            RequestBody::Form(fields) => Ok(Some(
                fields
                    .into_iter()
                    .fold(Form::new(), |form, (name, value)| form.text(name, value)),
            )),
            RequestBody::File(file) => {
                let part = Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.content_type)
                    .map_err(|e| {
                        TransportError::InvalidRequest(format!("content type {:?}: {}", file.content_type, e))
                    })?;
                Ok(Some(Form::new().part(file.field, part)))
            }
        }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, TransportError> {
        let url = self.config.url(&request.path);
        debug!(method = %request.method, url = %url, "sending request");

        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        };
        let builder = match Self::multipart(request.body)? {
            Some(form) => builder.multipart(form),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| {
            warn!(method = %request.method, url = %url, error = %e, "request failed");
            TransportError::Network(e.to_string())
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        debug!(method = %request.method, url = %url, status = status.as_u16(), "response received");

        if !status.is_success() {
            return Err(TransportError::from_response(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
                &text,
            ));
        }
        parse_success_body(&text)
    }
}
