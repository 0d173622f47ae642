use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::domain::order::{self, LineItem, NewOrder, Order};
use crate::domain::payment::{CaptureStatus, IntentHandle};
use crate::domain::ports::{
    NotificationDispatcherBox, OrderStoreBox, PaymentGatewayBox, UserStoreBox,
};
use crate::error::{OrderError, Result};

/// Capture request as accepted from the client: the provider intent id the
/// payer approved, plus the cart it was created for.
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    pub intent_id: String,
    pub user_id: String,
    pub items: Vec<LineItem>,
    pub total: Decimal,
}

impl CaptureRequest {
    /// Input validation, done before any upstream call is made.
    fn validate(&self) -> Result<()> {
        if self.user_id.is_empty() {
            return Err(OrderError::Validation("userId is required".to_string()));
        }
        if self.intent_id.is_empty() {
            return Err(OrderError::Validation("orderId is required".to_string()));
        }
        if self.items.is_empty() {
            return Err(OrderError::Validation(
                "at least one item is required".to_string(),
            ));
        }
        let computed = order::items_total(&self.items);
        if computed != self.total {
            return Err(OrderError::Validation(format!(
                "total {} does not match line items (expected {computed})",
                self.total
            )));
        }
        Ok(())
    }
}

/// Orchestrates intent creation, capture confirmation, order persistence and
/// the confirmation notification.
///
/// Owns its collaborators as boxed ports; every step is a sequential await
/// with no background work, retries or compensation. Once capture is issued
/// the provider is the source of truth for whether money moved.
pub struct CheckoutEngine {
    orders: OrderStoreBox,
    users: UserStoreBox,
    gateway: PaymentGatewayBox,
    notifier: NotificationDispatcherBox,
}

impl CheckoutEngine {
    pub fn new(
        orders: OrderStoreBox,
        users: UserStoreBox,
        gateway: PaymentGatewayBox,
        notifier: NotificationDispatcherBox,
    ) -> Self {
        Self {
            orders,
            users,
            gateway,
            notifier,
        }
    }

    /// Creates a provider-side payment intent for the cart.
    ///
    /// The claimed total must equal the sum of price x quantity across
    /// items; nothing is persisted locally at this stage.
    pub async fn create_intent(&self, items: &[LineItem], total: Decimal) -> Result<IntentHandle> {
        if items.is_empty() {
            return Err(OrderError::Validation(
                "at least one item is required".to_string(),
            ));
        }

        let computed = order::items_total(items);
        if computed != total {
            return Err(OrderError::Validation(format!(
                "total {total} does not match line items (expected {computed})"
            )));
        }

        let handle = self.gateway.create_intent(total).await?;
        info!(intent_id = %handle.id, %total, "payment intent created");
        Ok(handle)
    }

    /// Captures an approved intent and records the paid order.
    ///
    /// On a non-`COMPLETED` capture status nothing is persisted and the
    /// caller gets a failure. A declined instrument surfaces as its own
    /// error so the caller can prompt for a different payment method.
    pub async fn capture(&self, request: CaptureRequest) -> Result<Order> {
        request.validate()?;

        let token = self.gateway.authenticate().await?;
        let capture = self.gateway.capture_intent(&token, &request.intent_id).await?;

        let transaction_id = match capture.status {
            CaptureStatus::Completed => capture.transaction_id.ok_or(OrderError::Upstream {
                status: 200,
                name: "MALFORMED_CAPTURE_RESPONSE".to_string(),
                details: "completed capture carried no transaction id".to_string(),
                debug_id: None,
            })?,
            CaptureStatus::Other(status) => {
                warn!(intent_id = %request.intent_id, provider_status = %status, "capture not completed");
                return Err(OrderError::PaymentNotCompleted(status));
            }
        };

        // No dedup on the intent id here: concurrent captures of the same
        // intent can each persist an order. Known gap; a uniqueness
        // constraint keyed on paypal_order_id would close it.
        let new_order = NewOrder::paid(
            &request.user_id,
            request.items,
            request.total,
            &request.intent_id,
            &transaction_id,
        );
        let saved = self.orders.insert(new_order).await?;
        if saved.id.is_empty() {
            // Storage-layer anomaly; money has moved, so no partial success.
            return Err(OrderError::Persistence(
                "order store returned no identifier".to_string(),
            ));
        }
        info!(order_id = %saved.id, transaction_id = %saved.paypal_transaction_id, "order recorded as paid");

        self.notify_confirmation(&request.user_id, &saved).await;
        Ok(saved)
    }

    /// Best-effort confirmation. The order is already paid; failures here
    /// are logged and never escalate into a request failure.
    async fn notify_confirmation(&self, user_id: &str, saved: &Order) {
        match self.users.get(user_id).await {
            Ok(Some(user)) => {
                match self
                    .notifier
                    .send_order_confirmation(&user.email, &user.name, &saved.id, &saved.items)
                    .await
                {
                    Ok(true) => {}
                    Ok(false) => {
                        warn!(order_id = %saved.id, "order confirmation was not sent");
                    }
                    Err(e) => {
                        warn!(order_id = %saved.id, error = %e, "order confirmation failed");
                    }
                }
            }
            Ok(None) => warn!(%user_id, "user not found, skipping order confirmation"),
            Err(e) => warn!(%user_id, error = %e, "user lookup failed, skipping order confirmation"),
        }
    }

    pub async fn order(&self, id: &str) -> Result<Order> {
        self.orders
            .get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(format!("order {id}")))
    }

    pub async fn orders_for_user(&self, user_id: &str) -> Result<Vec<Order>> {
        self.orders.get_for_user(user_id).await
    }
}
