use crate::domain::order::{CreateOrderRequest, Order, OrderReconciliationItem};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://pay.wallet.tg/wpay/store-api/v1/";

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The provider answered with a non-200 status or a non-SUCCESS
    /// envelope; carries the provider's own message.
    #[error("{message}")]
    Api { message: String },
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Response wrapper every store-api endpoint uses.
#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct OrderListData {
    #[serde(default)]
    items: Vec<OrderReconciliationItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderAmountData {
    total_amount: i64,
}

/// Client for the Wallet Pay store API. Requests carry the store key in the
/// `Wpay-Store-Api-Key` header; retries are the caller's decision.
#[derive(Clone)]
pub struct WalletPayClient {
    pub base_url: String,
    pub api_key: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

impl WalletPayClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout_ms: 2500,
            client: reqwest::Client::new(),
        }
    }

    pub async fn create_order(&self, request: CreateOrderRequest) -> Result<Order, ProviderError> {
        let body = serde_json::to_value(&request)?;
        self.request(Method::POST, "order", Some(body)).await
    }

    pub async fn get_order_preview(&self, order_id: i64) -> Result<Order, ProviderError> {
        self.request(Method::GET, &format!("order/preview?id={order_id}"), None)
            .await
    }

    pub async fn get_order_list(
        &self,
        offset: i64,
        count: i64,
    ) -> Result<Vec<OrderReconciliationItem>, ProviderError> {
        let data: OrderListData = self
            .request(
                Method::GET,
                &format!("reconciliation/order-list?offset={offset}&count={count}"),
                None,
            )
            .await?;
        Ok(data.items)
    }

    pub async fn get_order_amount(&self) -> Result<i64, ProviderError> {
        let data: OrderAmountData = self
            .request(Method::GET, "reconciliation/order-amount", None)
            .await?;
        Ok(data.total_amount)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut req = self
            .client
            .request(method, &url)
            .header("Wpay-Store-Api-Key", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(Duration::from_millis(self.timeout_ms));
        if let Some(body) = body {
            req = req.json(&body);
        }

        let response = req.send().await?;
        let http_status = response.status();
        let envelope: Envelope = response.json().await?;
        unwrap_envelope(http_status.is_success(), envelope)
    }
}

fn unwrap_envelope<T: DeserializeOwned>(
    http_ok: bool,
    envelope: Envelope,
) -> Result<T, ProviderError> {
    if !http_ok || envelope.status != "SUCCESS" {
        return Err(ProviderError::Api {
            message: envelope
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Unknown error".to_string()),
        });
    }
    let data = envelope.data.ok_or_else(|| ProviderError::Api {
        message: "response data missing".to_string(),
    })?;
    Ok(serde_json::from_value(data)?)
}
