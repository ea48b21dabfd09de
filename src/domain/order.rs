use crate::domain::money::{MoneyAmount, PaymentOption};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An order record as returned from order creation and order preview.
/// `status` is one of ACTIVE, EXPIRED, PAID or CANCELLED; unknown values
/// pass through as-is.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub status: String,
    pub number: String,
    pub amount: MoneyAmount,
    pub created_date_time: DateTime<Utc>,
    pub expiration_date_time: DateTime<Utc>,
    #[serde(default)]
    pub completed_date_time: Option<DateTime<Utc>>,
    pub pay_link: String,
    pub direct_pay_link: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReconciliationItem {
    pub id: i64,
    pub status: String,
    pub amount: MoneyAmount,
    pub external_id: String,
    #[serde(default)]
    pub customer_telegram_user_id: Option<i64>,
    pub created_date_time: DateTime<Utc>,
    pub expiration_date_time: DateTime<Utc>,
    #[serde(default)]
    pub payment_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub selected_payment_option: Option<PaymentOption>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub amount: MoneyAmount,
    pub description: String,
    pub external_id: String,
    pub timeout_seconds: i64,
    pub customer_telegram_user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_return_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<String>,
}
