//! Submission transport.
//!
//! Posts the assembled field list to the configured endpoint as a form body
//! and interprets the JSON reply. The outcome is advisory only; form state
//! never depends on what the endpoint says.

use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use tracing::debug;

use crate::settings::DEFAULT_ENDPOINT;

#[derive(Debug, Clone)]
pub struct SubmitConfig {
    pub endpoint: String,
    pub request_timeout: Duration,
    pub dry_run: bool,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_secs(5),
            dry_run: false,
        }
    }
}

/// Result of one submission attempt, as shown in the status dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted { detail: String },
    Rejected { detail: String },
    /// Dry run: nothing was sent; the preview is displayed instead.
    Skipped { payload_preview: String },
}

#[derive(Debug, Deserialize)]
struct SubmitReply {
    success: bool,
    message: Option<String>,
    error: Option<String>,
}

/// Sends one submission, blocking until the endpoint replies or the
/// request times out.
pub fn send(config: &SubmitConfig, fields: &[(String, String)]) -> anyhow::Result<SubmitOutcome> {
    if config.dry_run {
        return Ok(SubmitOutcome::Skipped {
            payload_preview: payload_preview(fields),
        });
    }

    debug!(
        "submitting {} fields to {}",
        fields.len(),
        config.endpoint
    );

    let client = reqwest::blocking::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("failed to build HTTP client")?;

    let response = client
        .post(&config.endpoint)
        .form(&fields)
        .send()
        .with_context(|| format!("failed to reach endpoint '{}'", config.endpoint))?;

    let status = response.status();
    let body = response.text().unwrap_or_default();
    Ok(parse_reply(status.is_success(), status.as_u16(), &body))
}

fn parse_reply(status_ok: bool, status: u16, body: &str) -> SubmitOutcome {
    if !status_ok {
        let detail = if body.trim().is_empty() {
            format!("endpoint returned HTTP {status}")
        } else {
            format!("endpoint returned HTTP {status}: {}", body.trim())
        };
        return SubmitOutcome::Rejected { detail };
    }

    match serde_json::from_str::<SubmitReply>(body) {
        Ok(reply) if reply.success => SubmitOutcome::Accepted {
            detail: reply
                .message
                .unwrap_or_else(|| "plan request accepted".to_string()),
        },
        Ok(reply) => SubmitOutcome::Rejected {
            detail: reply
                .error
                .or(reply.message)
                .unwrap_or_else(|| "endpoint rejected the submission".to_string()),
        },
        Err(_) => SubmitOutcome::Accepted {
            detail: format!("submitted (HTTP {status})"),
        },
    }
}

/// One `name=value` line per field, for display without a backend.
fn payload_preview(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reply_success_uses_message() {
        let outcome = parse_reply(true, 200, r#"{"success": true, "message": "queued"}"#);
        assert_eq!(
            outcome,
            SubmitOutcome::Accepted {
                detail: "queued".to_string()
            }
        );
    }

    #[test]
    fn parse_reply_failure_prefers_error_detail() {
        let outcome = parse_reply(true, 200, r#"{"success": false, "error": "bad age"}"#);
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                detail: "bad age".to_string()
            }
        );
    }

    #[test]
    fn parse_reply_http_error_is_rejected() {
        let outcome = parse_reply(false, 500, "boom");
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                detail: "endpoint returned HTTP 500: boom".to_string()
            }
        );
    }

    #[test]
    fn parse_reply_non_json_success_is_accepted() {
        let outcome = parse_reply(true, 204, "");
        assert_eq!(
            outcome,
            SubmitOutcome::Accepted {
                detail: "submitted (HTTP 204)".to_string()
            }
        );
    }

    #[test]
    fn dry_run_skips_sending() {
        let config = SubmitConfig {
            dry_run: true,
            ..SubmitConfig::default()
        };
        let fields = vec![
            ("user_name".to_string(), "Priya".to_string()),
            ("num_goals".to_string(), "3".to_string()),
        ];

        let outcome = send(&config, &fields).expect("dry run should not fail");
        assert_eq!(
            outcome,
            SubmitOutcome::Skipped {
                payload_preview: "user_name=Priya\nnum_goals=3".to_string()
            }
        );
    }
}
