use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::PayPalConfig;
use crate::domain::payment::{
    AccessToken, CaptureResult, CaptureStatus, IntentHandle, ProviderErrorBody,
};
use crate::domain::ports::PaymentGateway;
use crate::error::{OrderError, Result};

/// Payment Gateway Adapter for PayPal's REST v2 checkout API.
///
/// Each operation is a fresh HTTP exchange: tokens are fetched per call and
/// never cached, trading efficiency for simplicity at this system's request
/// volume. All provider error bodies are converted to typed errors here.
pub struct PayPalGateway {
    http: Client,
    cfg: PayPalConfig,
}

impl PayPalGateway {
    pub fn new(cfg: PayPalConfig) -> Result<Self> {
        let http = Client::builder()
            .use_rustls_tls()
            .timeout(cfg.timeout)
            .build()?;
        Ok(Self { http, cfg })
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct CreateOrderResponse {
    id: String,
    status: String,
}

#[derive(Deserialize)]
struct CaptureResponse {
    status: String,
    #[serde(default)]
    purchase_units: Vec<PurchaseUnit>,
}

#[derive(Deserialize)]
struct PurchaseUnit {
    #[serde(default)]
    payments: Option<UnitPayments>,
}

#[derive(Deserialize)]
struct UnitPayments {
    #[serde(default)]
    captures: Vec<CaptureRecord>,
}

#[derive(Deserialize)]
struct CaptureRecord {
    id: String,
}

impl CaptureResponse {
    /// The transaction id lives on the first capture of the first purchase
    /// unit in the provider payload.
    fn transaction_id(&self) -> Option<String> {
        self.purchase_units
            .first()
            .and_then(|unit| unit.payments.as_ref())
            .and_then(|payments| payments.captures.first())
            .map(|capture| capture.id.clone())
    }
}

#[async_trait]
impl PaymentGateway for PayPalGateway {
    async fn authenticate(&self) -> Result<AccessToken> {
        let response = self
            .http
            .post(format!("{}/v1/oauth2/token", self.cfg.base_url))
            .basic_auth(&self.cfg.client_id, Some(&self.cfg.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OrderError::UpstreamAuth {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response.json().await?;
        Ok(AccessToken::new(token.access_token))
    }

    async fn create_intent(&self, amount: Decimal) -> Result<IntentHandle> {
        let token = self.authenticate().await?;

        let payload = json!({
            "intent": "CAPTURE",
            "purchase_units": [{
                "amount": {
                    "currency_code": self.cfg.currency,
                    "value": amount.round_dp(2).to_string(),
                }
            }]
        });

        let response = self
            .http
            .post(format!("{}/v2/checkout/orders", self.cfg.base_url))
            .bearer_auth(token.as_str())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderErrorBody::classify(status.as_u16(), &body));
        }

        let created: CreateOrderResponse = response.json().await?;
        debug!(intent_id = %created.id, status = %created.status, "provider intent created");
        Ok(IntentHandle {
            id: created.id,
            status: created.status,
        })
    }

    async fn capture_intent(
        &self,
        token: &AccessToken,
        intent_id: &str,
    ) -> Result<CaptureResult> {
        let response = self
            .http
            .post(format!(
                "{}/v2/checkout/orders/{intent_id}/capture",
                self.cfg.base_url
            ))
            .bearer_auth(token.as_str())
            .json(&json!({}))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderErrorBody::classify(status.as_u16(), &body));
        }

        let captured: CaptureResponse = response.json().await?;
        debug!(intent_id, status = %captured.status, "capture response received");
        Ok(CaptureResult {
            transaction_id: captured.transaction_id(),
            status: CaptureStatus::from_provider(&captured.status),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_response_extracts_nested_transaction_id() {
        let raw = r#"{
            "id": "5O190127TN364715T",
            "status": "COMPLETED",
            "purchase_units": [{
                "payments": {
                    "captures": [{ "id": "3C679366HH908993F", "status": "COMPLETED" }]
                }
            }]
        }"#;

        let parsed: CaptureResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.transaction_id().as_deref(), Some("3C679366HH908993F"));
        assert_eq!(
            CaptureStatus::from_provider(&parsed.status),
            CaptureStatus::Completed
        );
    }

    #[test]
    fn test_capture_response_without_captures() {
        let raw = r#"{ "id": "5O190127TN364715T", "status": "PENDING" }"#;
        let parsed: CaptureResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.transaction_id(), None);
        assert_eq!(
            CaptureStatus::from_provider(&parsed.status),
            CaptureStatus::Other("PENDING".to_string())
        );
    }

    #[test]
    fn test_create_order_response_shape() {
        let raw = r#"{ "id": "8XU12345", "status": "CREATED", "links": [] }"#;
        let parsed: CreateOrderResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.id, "8XU12345");
        assert_eq!(parsed.status, "CREATED");
    }
}
