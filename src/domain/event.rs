use crate::domain::money::{MoneyAmount, PaymentOption};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    OrderPaid,
    OrderFailed,
    Unknown(String),
}

impl EventKind {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "ORDER_PAID" => EventKind::OrderPaid,
            "ORDER_FAILED" => EventKind::OrderFailed,
            other => EventKind::Unknown(other.to_string()),
        }
    }
}

/// Store-supplied custom data attached to an order. The provider transports
/// it as a string; JSON-shaped strings are decoded, anything else is kept
/// verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomData {
    Json(serde_json::Value),
    Text(String),
}

/// A verified payment notification. Immutable once classified; the
/// dispatcher hands the same instance to every callback.
#[derive(Debug, Clone)]
pub struct Event {
    pub event_id: String,
    pub event_timestamp: DateTime<Utc>,
    pub kind: EventKind,
    pub payload: Payload,
}

#[derive(Debug, Clone)]
pub struct Payload {
    pub order_id: i64,
    pub order_number: String,
    pub external_id: String,
    pub status: Option<String>,
    pub custom_data: Option<CustomData>,
    pub order_amount: MoneyAmount,
    /// `Some` exactly when the raw payload carried the key; failed orders
    /// arrive without it.
    pub selected_payment_option: Option<PaymentOption>,
    pub completed_at: Option<DateTime<Utc>>,
}
