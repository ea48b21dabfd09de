use crate::client::DEFAULT_BASE_URL;

#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub bind_addr: String,
    pub webhook_path: String,
    pub provider_base_url: String,
    pub provider_timeout_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("WALLETPAY_API_KEY").unwrap_or_default(),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:9123".to_string()),
            webhook_path: normalize_path(
                &std::env::var("WEBHOOK_PATH").unwrap_or_else(|_| "/wp_webhook".to_string()),
            ),
            provider_base_url: std::env::var("WALLETPAY_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            provider_timeout_ms: std::env::var("PROVIDER_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(2500),
        }
    }
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
