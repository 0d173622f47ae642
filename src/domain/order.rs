use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fallback word count per page when an item declares no word total.
pub const WORDS_PER_PAGE: u32 = 250;

/// One service selected by the customer, with quantity and the page/word
/// figures the writers work from.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub total_words: u32,
    /// Storage reference of an uploaded brief, e.g. `uploads/essay/brief.pdf`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
}

impl LineItem {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// Declared word count, falling back to pages x 250 when the item
    /// declares none (a declared 0 counts as none).
    pub fn effective_words(&self) -> u32 {
        if self.total_words == 0 {
            self.pages * WORDS_PER_PAGE
        } else {
            self.total_words
        }
    }
}

/// Sum of price x quantity across items.
pub fn items_total(items: &[LineItem]) -> Decimal {
    items.iter().map(LineItem::line_total).sum()
}

/// Sum of pages x quantity across items.
pub fn aggregate_pages(items: &[LineItem]) -> u32 {
    items.iter().map(|item| item.pages * item.quantity).sum()
}

/// Sum of effective word counts x quantity across items.
pub fn aggregate_words(items: &[LineItem]) -> u32 {
    items
        .iter()
        .map(|item| item.effective_words() * item.quantity)
        .sum()
}

/// Fulfilment status. Administrator-driven; transitions are not constrained
/// by the checkout core.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    Refunded,
}

/// A file attached to an order, split into filename and storage path.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub filename: String,
    pub path: String,
}

impl Attachment {
    /// Splits a storage reference on its last `/` into filename and path.
    /// A bare filename keeps an empty path.
    pub fn from_reference(reference: &str) -> Self {
        match reference.rsplit_once('/') {
            Some((path, filename)) => Self {
                filename: filename.to_string(),
                path: path.to_string(),
            },
            None => Self {
                filename: reference.to_string(),
                path: String::new(),
            },
        }
    }
}

/// An order ready to be persisted. The store assigns the identity and
/// timestamps and returns the full [`Order`].
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub user_id: String,
    pub items: Vec<LineItem>,
    pub service_name: String,
    pub description: String,
    pub total: Decimal,
    pub pages: u32,
    pub total_words: u32,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub paypal_order_id: String,
    pub paypal_transaction_id: String,
    pub attachments: Vec<Attachment>,
}

impl NewOrder {
    /// Builds the paid order record for a completed capture.
    ///
    /// Service name is the first item's name, the description a comma-joined
    /// list of item names, and attachments are derived from any item
    /// carrying an attachment reference.
    pub fn paid(
        user_id: &str,
        items: Vec<LineItem>,
        total: Decimal,
        intent_id: &str,
        transaction_id: &str,
    ) -> Self {
        let service_name = items
            .first()
            .map(|item| item.name.clone())
            .unwrap_or_default();
        let description = items
            .iter()
            .map(|item| item.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let attachments = items
            .iter()
            .filter_map(|item| item.attachment.as_deref())
            .map(Attachment::from_reference)
            .collect();

        Self {
            user_id: user_id.to_string(),
            service_name,
            description,
            total,
            pages: aggregate_pages(&items),
            total_words: aggregate_words(&items),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Paid,
            paypal_order_id: intent_id.to_string(),
            paypal_transaction_id: transaction_id.to_string(),
            attachments,
            items,
        }
    }
}

/// A persisted order document.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub items: Vec<LineItem>,
    pub service_name: String,
    pub description: String,
    pub total: Decimal,
    pub pages: u32,
    pub total_words: u32,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub paypal_order_id: String,
    pub paypal_transaction_id: String,
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn from_new(new: NewOrder, id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: new.user_id,
            items: new.items,
            service_name: new.service_name,
            description: new.description,
            total: new.total,
            pages: new.pages,
            total_words: new.total_words,
            status: new.status,
            payment_status: new.payment_status,
            paypal_order_id: new.paypal_order_id,
            paypal_transaction_id: new.paypal_transaction_id,
            attachments: new.attachments,
            created_at: now,
            updated_at: now,
        }
    }
}
