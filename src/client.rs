//! HTTP client for the Cloudmersive conversion API.
//!
//! Both conversions are the same exchange against a different path: one
//! multipart `POST` carrying the file under the `file` field, authenticated
//! with an `Apikey` header. HTTP 200 means the body *is* the converted file;
//! any other status is a failure. There is no retry: a failed conversion is
//! reported to the sender, who can simply send the file again.

use crate::config::ConverterConfig;
use crate::dispatch::DocumentConverter;
use crate::error::ConvertError;
use crate::route::Route;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use std::time::Duration;
use tracing::debug;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "Apikey";

/// Multipart field name the API expects the document under.
pub const FILE_FIELD: &str = "file";

/// Longest error-body excerpt kept in [`ConvertError::RemoteFailure`].
const MAX_ERROR_DETAIL_CHARS: usize = 200;

/// [`DocumentConverter`] backed by the Cloudmersive REST API.
#[derive(Debug, Clone)]
pub struct CloudmersiveClient {
    http: reqwest::Client,
    config: ConverterConfig,
}

impl CloudmersiveClient {
    /// Build a client with the configured timeout.
    pub fn new(config: ConverterConfig) -> Result<Self, ConvertError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConvertError::Internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    fn build_form(route: Route, data: &[u8]) -> Result<Form, ConvertError> {
        let part = Part::bytes(data.to_vec())
            .file_name(route.upload_filename())
            .mime_str(route.input_mime())?;
        Ok(Form::new().part(FILE_FIELD, part))
    }

    fn map_send_error(&self, e: reqwest::Error) -> ConvertError {
        if e.is_timeout() {
            ConvertError::Timeout {
                secs: self.config.timeout_secs,
            }
        } else {
            ConvertError::Http(e)
        }
    }
}

#[async_trait]
impl DocumentConverter for CloudmersiveClient {
    async fn convert(&self, route: Route, data: &[u8]) -> Result<Vec<u8>, ConvertError> {
        let url = self.config.endpoint_url(route.endpoint_path());
        debug!("POST {} ({} bytes)", url, data.len());

        let form = Self::build_form(route, data)?;
        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, self.config.api_key.expose_secret().as_str())
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            // The body is only used for diagnostics; a failure to read it
            // must not hide the status.
            let body = response.text().await.unwrap_or_default();
            return Err(ConvertError::RemoteFailure {
                route,
                status: status.as_u16(),
                detail: truncate_detail(&body),
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.map_send_error(e))?;
        debug!("{} answered {} with {} bytes", url, status, bytes.len());
        Ok(bytes.to_vec())
    }
}

/// Collapse whitespace and cap an error body for log-friendly display.
fn truncate_detail(body: &str) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return "<empty body>".to_string();
    }
    if collapsed.chars().count() > MAX_ERROR_DETAIL_CHARS {
        let head: String = collapsed.chars().take(MAX_ERROR_DETAIL_CHARS - 1).collect();
        format!("{head}\u{2026}")
    } else {
        collapsed
    }
}
