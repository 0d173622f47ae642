use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use paperdesk::application::checkout::CheckoutEngine;
use paperdesk::domain::order::LineItem;
use paperdesk::domain::payment::{AccessToken, CaptureResult, CaptureStatus, IntentHandle};
use paperdesk::domain::ports::{NotificationDispatcher, PaymentGateway};
use paperdesk::domain::ports::UserStore;
use paperdesk::domain::user::User;
use paperdesk::error::{OrderError, Result};
use paperdesk::infrastructure::in_memory::{InMemoryOrderStore, InMemoryUserStore};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Gateway double with a scripted capture outcome and an upstream-call
/// counter shared with the test.
pub struct MockGateway {
    outcome: Mutex<Option<Result<CaptureResult>>>,
    pub calls: Arc<AtomicUsize>,
}

impl MockGateway {
    pub fn with_outcome(outcome: Result<CaptureResult>) -> Self {
        Self {
            outcome: Mutex::new(Some(outcome)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn completed(transaction_id: &str) -> Self {
        Self::with_outcome(Ok(CaptureResult {
            status: CaptureStatus::Completed,
            transaction_id: Some(transaction_id.to_string()),
        }))
    }

    pub fn with_status(status: &str) -> Self {
        Self::with_outcome(Ok(CaptureResult {
            status: CaptureStatus::Other(status.to_string()),
            transaction_id: None,
        }))
    }

    pub fn declined() -> Self {
        Self::with_outcome(Err(OrderError::PaymentDeclined {
            description: "The instrument presented was declined by the processor".to_string(),
            debug_id: Some("debug-123".to_string()),
        }))
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn authenticate(&self) -> Result<AccessToken> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(AccessToken::new("test-token".to_string()))
    }

    async fn create_intent(&self, _amount: Decimal) -> Result<IntentHandle> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(IntentHandle {
            id: "INTENT1".to_string(),
            status: "CREATED".to_string(),
        })
    }

    async fn capture_intent(
        &self,
        _token: &AccessToken,
        _intent_id: &str,
    ) -> Result<CaptureResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome
            .lock()
            .unwrap()
            .take()
            .expect("capture_intent called more than once")
    }
}

/// Dispatcher double recording each confirmation it is asked to send.
#[derive(Default)]
pub struct RecordingDispatcher {
    pub confirmations: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait]
impl NotificationDispatcher for RecordingDispatcher {
    async fn send_order_confirmation(
        &self,
        email: &str,
        _name: &str,
        order_id: &str,
        _items: &[LineItem],
    ) -> Result<bool> {
        self.confirmations
            .lock()
            .unwrap()
            .push((email.to_string(), order_id.to_string()));
        Ok(true)
    }
}

pub fn essay_item() -> LineItem {
    LineItem {
        id: "svc-essay".to_string(),
        name: "Essay".to_string(),
        price: dec!(50),
        quantity: 1,
        pages: 2,
        total_words: 0,
        attachment: None,
    }
}

pub struct Harness {
    pub engine: CheckoutEngine,
    pub orders: InMemoryOrderStore,
    pub users: InMemoryUserStore,
    pub gateway_calls: Arc<AtomicUsize>,
    pub confirmations: Arc<Mutex<Vec<(String, String)>>>,
}

/// Wires an engine around in-memory stores, the given gateway double and a
/// recording dispatcher, with one known user.
pub async fn harness(gateway: MockGateway) -> Harness {
    let orders = InMemoryOrderStore::new();
    let users = InMemoryUserStore::new();
    users
        .insert(User::new("user-1", "student@example.com", "Sam"))
        .await
        .unwrap();

    let gateway_calls = gateway.calls.clone();
    let dispatcher = RecordingDispatcher::default();
    let confirmations = dispatcher.confirmations.clone();

    let engine = CheckoutEngine::new(
        Box::new(orders.clone()),
        Box::new(users.clone()),
        Box::new(gateway),
        Box::new(dispatcher),
    );

    Harness {
        engine,
        orders,
        users,
        gateway_calls,
        confirmations,
    }
}
