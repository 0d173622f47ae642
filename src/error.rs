use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Error taxonomy for the checkout flow.
///
/// Provider error bodies are converted into these variants at the gateway
/// boundary, so nothing downstream ever inspects raw provider JSON.
#[derive(Error, Debug)]
pub enum OrderError {
    /// Required credentials or environment values are missing.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The payment provider rejected our client credentials.
    #[error("payment provider rejected credentials (status {status})")]
    UpstreamAuth { status: u16, body: String },

    /// The payment provider returned a non-success response.
    #[error("payment provider error {name} (status {status}): {details}")]
    Upstream {
        status: u16,
        name: String,
        details: String,
        debug_id: Option<String>,
    },

    /// The provider reported the payment instrument was declined.
    /// Expected and user-actionable, unlike the generic upstream case.
    #[error("payment declined: {description}")]
    PaymentDeclined {
        description: String,
        debug_id: Option<String>,
    },

    /// Capture returned a status other than COMPLETED. Carries the
    /// provider-reported status for diagnostics.
    #[error("Payment not completed")]
    PaymentNotCompleted(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// An order failed to save after a successful capture. Money has moved
    /// without a recorded order; needs operator attention.
    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, OrderError>;

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let (status, message, details) = match &self {
            OrderError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            OrderError::PaymentNotCompleted(provider_status) => (
                StatusCode::BAD_REQUEST,
                "Payment not completed".to_string(),
                Some(format!("provider status: {provider_status}")),
            ),
            OrderError::PaymentDeclined {
                description,
                debug_id,
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Your payment was declined. Please try a different payment method.".to_string(),
                Some(match debug_id {
                    Some(id) => format!("{description} (debug id: {id})"),
                    None => description.clone(),
                }),
            ),
            OrderError::NotFound(what) => (StatusCode::NOT_FOUND, what.clone(), None),
            OrderError::Upstream {
                status,
                name,
                details,
                debug_id,
            } => {
                error!(
                    status,
                    name = %name,
                    details = %details,
                    debug_id = debug_id.as_deref().unwrap_or("-"),
                    "payment provider request failed"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Payment processing failed. Please try again later.".to_string(),
                    Some(format!("{name}: {details}")),
                )
            }
            OrderError::Persistence(msg) => {
                error!(detail = %msg, "order persistence failed after capture");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Order processing failed. Please contact support.".to_string(),
                    None,
                )
            }
            // Configuration, auth and transport failures carry secrets or
            // provider internals; log them, return a generic body.
            other => {
                error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = json!({
            "success": false,
            "message": message,
            "details": details,
        });

        (status, Json(body)).into_response()
    }
}
