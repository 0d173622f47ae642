use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::info;

use crate::config::EmailConfig;
use crate::domain::order::LineItem;
use crate::domain::ports::NotificationDispatcher;
use crate::error::Result;

/// Sends order confirmations through a transactional-email HTTP API.
///
/// Delivery is best-effort: a non-success response is reported as `false`
/// and left to the caller to log.
pub struct HttpEmailDispatcher {
    http: Client,
    cfg: EmailConfig,
}

impl HttpEmailDispatcher {
    pub fn new(cfg: EmailConfig) -> Result<Self> {
        let http = Client::builder().use_rustls_tls().build()?;
        Ok(Self { http, cfg })
    }
}

#[async_trait]
impl NotificationDispatcher for HttpEmailDispatcher {
    async fn send_order_confirmation(
        &self,
        email: &str,
        name: &str,
        order_id: &str,
        items: &[LineItem],
    ) -> Result<bool> {
        let payload = json!({
            "from": self.cfg.from_address,
            "to": email,
            "subject": format!("Order confirmation #{order_id}"),
            "template": "order-confirmation",
            "variables": {
                "name": name,
                "orderId": order_id,
                "items": items.iter().map(|item| json!({
                    "name": item.name,
                    "quantity": item.quantity,
                    "price": item.price,
                })).collect::<Vec<_>>(),
            }
        });

        let response = self
            .http
            .post(&self.cfg.endpoint)
            .bearer_auth(&self.cfg.api_key)
            .json(&payload)
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}

/// Fallback dispatcher used when no email endpoint is configured: the
/// confirmation is written to the log and counted as delivered.
pub struct LogOnlyDispatcher;

#[async_trait]
impl NotificationDispatcher for LogOnlyDispatcher {
    async fn send_order_confirmation(
        &self,
        email: &str,
        name: &str,
        order_id: &str,
        items: &[LineItem],
    ) -> Result<bool> {
        info!(
            %email,
            %name,
            %order_id,
            item_count = items.len(),
            "order confirmation (log-only dispatcher)"
        );
        Ok(true)
    }
}
