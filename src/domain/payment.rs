use std::fmt;

use serde::Deserialize;

use crate::error::OrderError;

/// A short-lived bearer token from the provider's client-credentials grant.
///
/// The token is fetched fresh per operation and never cached; `Debug` is
/// redacted so tokens cannot leak through logs.
#[derive(Clone, PartialEq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(secret: String) -> Self {
        Self(secret)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// Opaque handle to a provider-side payment intent. The client-side payment
/// UI consumes the id; we keep it only as a reference.
#[derive(Debug, PartialEq, Clone)]
pub struct IntentHandle {
    pub id: String,
    pub status: String,
}

/// Outcome of a capture call as reported by the provider.
#[derive(Debug, PartialEq, Clone)]
pub enum CaptureStatus {
    Completed,
    /// Any other provider status, carried verbatim for diagnostics.
    Other(String),
}

impl CaptureStatus {
    pub fn from_provider(status: &str) -> Self {
        if status == "COMPLETED" {
            Self::Completed
        } else {
            Self::Other(status.to_string())
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct CaptureResult {
    pub status: CaptureStatus,
    /// Transaction id of the completed capture, nested in the provider
    /// response payload. Present when status is `Completed`.
    pub transaction_id: Option<String>,
}

/// Provider error body, deserialized at the gateway boundary.
///
/// Everything downstream sees the typed [`OrderError`] variants built from
/// this; raw provider JSON never crosses the adapter.
#[derive(Debug, Deserialize, Default)]
pub struct ProviderErrorBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Vec<ProviderErrorDetail>,
    #[serde(default)]
    pub debug_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderErrorDetail {
    #[serde(default)]
    pub issue: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

const INSTRUMENT_DECLINED: &str = "INSTRUMENT_DECLINED";

impl ProviderErrorBody {
    fn declined_detail(&self) -> Option<&ProviderErrorDetail> {
        self.details
            .iter()
            .find(|detail| detail.issue.as_deref() == Some(INSTRUMENT_DECLINED))
    }

    /// Converts a non-success provider response into the error taxonomy.
    /// The `INSTRUMENT_DECLINED` issue becomes the distinguished, retryable
    /// decline; everything else is a generic upstream failure preserving the
    /// provider's name/details/debug id for diagnostics.
    pub fn into_error(self, status: u16) -> OrderError {
        let declined = self.declined_detail().map(|detail| {
            detail
                .description
                .clone()
                .unwrap_or_else(|| "The payment instrument was declined".to_string())
        });
        if let Some(description) = declined {
            return OrderError::PaymentDeclined {
                description,
                debug_id: self.debug_id,
            };
        }

        let details = if self.details.is_empty() {
            self.message.clone().unwrap_or_default()
        } else {
            self.details
                .iter()
                .filter_map(|detail| detail.description.as_deref().or(detail.issue.as_deref()))
                .collect::<Vec<_>>()
                .join("; ")
        };

        OrderError::Upstream {
            status,
            name: self.name.unwrap_or_else(|| "UNKNOWN".to_string()),
            details,
            debug_id: self.debug_id,
        }
    }

    /// Parses a raw error body, falling back to an opaque upstream error
    /// when the body is not the provider's JSON error shape.
    pub fn classify(status: u16, body: &str) -> OrderError {
        match serde_json::from_str::<ProviderErrorBody>(body) {
            Ok(parsed) => parsed.into_error(status),
            Err(_) => OrderError::Upstream {
                status,
                name: "UNKNOWN".to_string(),
                details: body.chars().take(512).collect(),
                debug_id: None,
            },
        }
    }
}
