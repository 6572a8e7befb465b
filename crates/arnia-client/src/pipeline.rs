//! The photo-to-upload pipeline.
//!
//! One asynchronous unit of work per user action: resolve the source
//! reference, read the bytes, assemble the multipart form, POST once, and
//! classify the response. Every failure is caught at this boundary and
//! converted into an [`UploadOutcome`]; the function never returns `Err`.

use crate::form::{Credentials, PhotoForm};
use crate::ApiClient;
use arnia_core::filename::ensure_filename;
use arnia_core::{AppError, FailureReason, PhotoCapture, UploadContext, UploadOutcome, UploaderConfig};
use arnia_resolver::{resolve_source, LocalFiles, SourceResolver};
use std::sync::Arc;
use std::time::Duration;

/// Fallback success message for an empty 2xx body.
const GENERIC_SUCCESS: &str = "Upload completed";

pub struct UploadPipeline {
    client: ApiClient,
    resolver: Arc<dyn SourceResolver>,
    credentials: Credentials,
    gps: String,
}

impl UploadPipeline {
    pub fn new(
        client: ApiClient,
        resolver: Arc<dyn SourceResolver>,
        credentials: Credentials,
        gps: impl Into<String>,
    ) -> Self {
        Self {
            client,
            resolver,
            credentials,
            gps: gps.into(),
        }
    }

    /// Build a pipeline from config, with the local-filesystem resolver.
    pub fn from_config(config: &UploaderConfig) -> anyhow::Result<Self> {
        let client = ApiClient::new(
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Self::new(
            client,
            Arc::new(LocalFiles::new(config.cache_dir.clone())),
            Credentials {
                username: config.username.clone(),
                password: config.password.clone(),
            },
            config.gps.clone(),
        ))
    }

    /// Resolve the capture and assemble the form without sending it.
    ///
    /// Shared by [`upload`](Self::upload) and the dry-run path. The only
    /// hard error is a missing source reference; a degraded resolution is
    /// logged and the original reference is still attempted.
    pub async fn prepare(
        &self,
        capture: &PhotoCapture,
        context: &UploadContext,
    ) -> Result<PhotoForm, AppError> {
        if capture.is_empty() {
            return Err(AppError::NoSourceReference);
        }

        let file_name = ensure_filename(capture.suggested_filename.as_deref(), &capture.source_uri);
        let resolved = resolve_source(self.resolver.as_ref(), &capture.source_uri, &file_name).await;
        if resolved.degraded {
            tracing::warn!(
                source = %capture.source_uri,
                "File resolution degraded: attempting original reference"
            );
        }

        let data = tokio::fs::read(&resolved.location).await.map_err(|e| {
            AppError::Transport(format!("Failed to read photo {}: {}", resolved.location, e))
        })?;

        Ok(PhotoForm::build(
            &self.credentials,
            &self.gps,
            context,
            file_name,
            data,
        ))
    }

    /// Run the full pipeline for one capture.
    pub async fn upload(&self, capture: &PhotoCapture, context: &UploadContext) -> UploadOutcome {
        let start = std::time::Instant::now();

        let form = match self.prepare(capture, context).await {
            Ok(form) => form,
            Err(e) => return failure_outcome(e),
        };

        let file_name = form.file.file_name.clone();
        let size_bytes = form.file.data.len();

        let multipart = match form.into_multipart() {
            Ok(multipart) => multipart,
            Err(e) => return failure_outcome(AppError::Internal(e.to_string())),
        };

        let outcome = match self.client.post_multipart(multipart).await {
            Ok((status, body)) => interpret_response(status, &body),
            Err(e) => failure_outcome(e),
        };

        match &outcome {
            UploadOutcome::Success { message } => tracing::info!(
                file = %file_name,
                size_bytes,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                message = %message,
                "Upload successful"
            ),
            UploadOutcome::Failure { reason, detail } => tracing::warn!(
                file = %file_name,
                size_bytes,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                reason = ?reason,
                detail = %detail,
                "Upload failed"
            ),
        }

        outcome
    }
}

/// Classify the raw HTTP exchange into an outcome.
///
/// Non-2xx fails with the status and raw body as diagnostic text. A 2xx body
/// is treated as JSON when it parses and carries a `message`; otherwise the
/// raw text stands in, and an empty body falls back to a generic phrase.
pub fn interpret_response(status: u16, body: &str) -> UploadOutcome {
    if !(200..300).contains(&status) {
        return UploadOutcome::Failure {
            reason: FailureReason::ServerRejected,
            detail: format!("HTTP {}: {}", status, body),
        };
    }

    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(|m| m.as_str().map(str::to_string))
        })
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                GENERIC_SUCCESS.to_string()
            } else {
                trimmed.to_string()
            }
        });

    UploadOutcome::Success { message }
}

fn failure_outcome(err: AppError) -> UploadOutcome {
    let reason = match &err {
        AppError::NoSourceReference => FailureReason::NoSourceReference,
        AppError::ServerRejected { .. } => FailureReason::ServerRejected,
        _ => FailureReason::Transport,
    };
    UploadOutcome::Failure {
        reason,
        detail: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpret_rejection_includes_status_and_body() {
        let outcome = interpret_response(500, "internal error");
        assert_eq!(
            outcome,
            UploadOutcome::Failure {
                reason: FailureReason::ServerRejected,
                detail: "HTTP 500: internal error".to_string(),
            }
        );
    }

    #[test]
    fn test_interpret_json_message() {
        let outcome = interpret_response(200, r#"{"message":"ok, stored"}"#);
        assert_eq!(
            outcome,
            UploadOutcome::Success {
                message: "ok, stored".to_string()
            }
        );
    }

    #[test]
    fn test_interpret_plain_text_body() {
        let outcome = interpret_response(200, "plain text ack");
        assert_eq!(
            outcome,
            UploadOutcome::Success {
                message: "plain text ack".to_string()
            }
        );
    }

    #[test]
    fn test_interpret_json_without_message_shows_raw_body() {
        let outcome = interpret_response(200, r#"{"stored":true}"#);
        assert_eq!(
            outcome,
            UploadOutcome::Success {
                message: r#"{"stored":true}"#.to_string()
            }
        );
    }

    #[test]
    fn test_interpret_empty_body_generic_phrase() {
        let outcome = interpret_response(204, "");
        assert_eq!(
            outcome,
            UploadOutcome::Success {
                message: GENERIC_SUCCESS.to_string()
            }
        );
    }
}
