use serde::{Deserialize, Serialize};

/// A currency amount as the provider reports it. `amount` stays an opaque
/// decimal string; it is never parsed into a float.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyAmount {
    /// Known values are TON, BTC, USDT, EUR, USD, RUB, but unknown codes
    /// pass through untouched.
    pub currency_code: String,
    pub amount: String,
}

/// The payment option the customer settled with. Failed orders carry none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOption {
    pub amount: MoneyAmount,
    pub amount_fee: MoneyAmount,
    pub amount_net: MoneyAmount,
    pub exchange_rate: String,
}
