//! HTTP client and upload pipeline for the SferoWeb image API.
//!
//! The backend contract is a single multipart POST; this crate owns the
//! request assembly ([`form`]), the timestamp formats it needs ([`timefmt`]),
//! and the end-to-end pipeline that turns a capture plus context into an
//! [`arnia_core::UploadOutcome`] ([`pipeline`]).

pub mod form;
pub mod pipeline;
pub mod timefmt;

use anyhow::{Context, Result};
use arnia_core::AppError;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;

pub use form::{Credentials, FilePart, PhotoForm};
pub use pipeline::{interpret_response, UploadPipeline};

/// HTTP client bound to the fixed upload endpoint.
///
/// One attempt per call, no automatic retry; the boundary of the multipart
/// body is generated by the encoder.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    endpoint: String,
}

impl ApiClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the multipart form and return the raw `(status, body_text)`.
    ///
    /// Transport-level failures (timeout, DNS, connection reset) surface as
    /// [`AppError::Transport`]; status classification is left to the caller.
    pub async fn post_multipart(
        &self,
        form: reqwest::multipart::Form,
    ) -> Result<(u16, String), AppError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to read response body: {}", e)))?;

        Ok((status, body))
    }
}
