use serde::{Deserialize, Serialize};

/// Why an upload failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The capture yielded no usable reference; nothing was sent.
    NoSourceReference,
    /// Network-level failure (timeout, DNS, connection reset, unreadable file).
    Transport,
    /// The server answered with a non-2xx status.
    ServerRejected,
}

/// Terminal result of one upload, reported to the invoking screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UploadOutcome {
    Success {
        message: String,
    },
    Failure {
        reason: FailureReason,
        detail: String,
    },
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Success { .. })
    }

    /// Convert the outcome into a user-facing notification (title + message).
    pub fn notification(&self) -> Notification {
        match self {
            UploadOutcome::Success { message } => Notification {
                title: "Upload riuscito".to_string(),
                message: message.clone(),
            },
            UploadOutcome::Failure { reason, detail } => {
                let title = match reason {
                    FailureReason::NoSourceReference => "Nessuna foto selezionata",
                    FailureReason::Transport => "Errore di rete",
                    FailureReason::ServerRejected => "Upload rifiutato",
                };
                Notification {
                    title: title.to_string(),
                    message: detail.clone(),
                }
            }
        }
    }
}

/// User-visible notification derived from an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_notification() {
        let outcome = UploadOutcome::Success {
            message: "ok, stored".to_string(),
        };
        assert!(outcome.is_success());
        let n = outcome.notification();
        assert_eq!(n.title, "Upload riuscito");
        assert_eq!(n.message, "ok, stored");
    }

    #[test]
    fn test_failure_notification() {
        let outcome = UploadOutcome::Failure {
            reason: FailureReason::ServerRejected,
            detail: "HTTP 500: internal error".to_string(),
        };
        assert!(!outcome.is_success());
        let n = outcome.notification();
        assert_eq!(n.title, "Upload rifiutato");
        assert!(n.message.contains("HTTP 500"));
    }
}
