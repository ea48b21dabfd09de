use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use walletpay_gateway::client::WalletPayClient;
use walletpay_gateway::config::AppConfig;
use walletpay_gateway::webhook::dispatcher::{provider_source_ips, WebhookDispatcher};
use walletpay_gateway::webhook::registry::{CallbackKind, CallbackRegistry};
use walletpay_gateway::webhook::signature::HmacSha256Verifier;
use walletpay_gateway::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let wallet_client = Arc::new(WalletPayClient {
        base_url: cfg.provider_base_url.clone(),
        api_key: cfg.api_key.clone(),
        timeout_ms: cfg.provider_timeout_ms,
        client: reqwest::Client::new(),
    });

    // Registration must finish before serving starts; the registry is
    // read-only once the dispatcher owns it.
    let mut registry = CallbackRegistry::new();
    let preview_client = wallet_client.clone();
    registry.register(CallbackKind::Paid, move |event| {
        let client = preview_client.clone();
        async move {
            tracing::info!(
                order_id = event.payload.order_id,
                number = %event.payload.order_number,
                amount = %event.payload.order_amount.amount,
                currency = %event.payload.order_amount.currency_code,
                "order paid"
            );
            // Cross-check the notification against the store API.
            match client.get_order_preview(event.payload.order_id).await {
                Ok(order) => {
                    tracing::info!(order_id = order.id, status = %order.status, "order preview confirmed")
                }
                Err(e) => tracing::warn!(error = %e, "order preview lookup failed"),
            }
            Ok(())
        }
    });
    registry.register(CallbackKind::Failed, |event| async move {
        tracing::info!(
            order_id = event.payload.order_id,
            status = ?event.payload.status,
            "order failed"
        );
        Ok(())
    });

    let dispatcher = WebhookDispatcher {
        verifier: Arc::new(HmacSha256Verifier::new(cfg.api_key.clone())),
        registry,
        allowed_ips: provider_source_ips(),
    };

    let state = AppState {
        dispatcher: Arc::new(dispatcher),
    };

    let app = Router::new()
        .route("/health", get(walletpay_gateway::http::handlers::webhook::health))
        .route(
            &cfg.webhook_path,
            post(walletpay_gateway::http::handlers::webhook::receive_webhook),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("webhook listening on {}{}", cfg.bind_addr, cfg.webhook_path);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
