use async_trait::async_trait;
use rust_decimal::Decimal;

use super::order::{LineItem, NewOrder, Order};
use super::payment::{AccessToken, CaptureResult, IntentHandle};
use super::user::User;
use crate::error::Result;

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new order, assigning its identity and timestamps.
    async fn insert(&self, order: NewOrder) -> Result<Order>;
    async fn get(&self, id: &str) -> Result<Option<Order>>;
    async fn get_for_user(&self, user_id: &str) -> Result<Vec<Order>>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<User>>;
    async fn insert(&self, user: User) -> Result<()>;
}

/// Boundary to the external payment provider. Each operation is a fresh,
/// stateless HTTP exchange; the adapter never retains a token across calls.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn authenticate(&self) -> Result<AccessToken>;
    async fn create_intent(&self, amount: Decimal) -> Result<IntentHandle>;
    async fn capture_intent(
        &self,
        token: &AccessToken,
        intent_id: &str,
    ) -> Result<CaptureResult>;
}

/// Confirmation-message boundary. A `false` result means the message was not
/// sent; callers treat that as non-fatal.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn send_order_confirmation(
        &self,
        email: &str,
        name: &str,
        order_id: &str,
        items: &[LineItem],
    ) -> Result<bool>;
}

pub type OrderStoreBox = Box<dyn OrderStore>;
pub type UserStoreBox = Box<dyn UserStore>;
pub type PaymentGatewayBox = Box<dyn PaymentGateway>;
pub type NotificationDispatcherBox = Box<dyn NotificationDispatcher>;
