use crate::domain::event::EventKind;
use crate::webhook::classifier::{classify, MalformedEvent};
use crate::webhook::registry::{CallbackKind, CallbackRegistry};
use crate::webhook::signature::SignatureVerifier;
use std::collections::HashSet;
use std::net::IpAddr;
use std::sync::Arc;

/// The provider's webhook origin addresses, plus loopback for local testing.
pub const PROVIDER_SOURCE_IPS: [&str; 3] = ["172.255.248.29", "172.255.248.12", "127.0.0.1"];

pub fn provider_source_ips() -> HashSet<IpAddr> {
    PROVIDER_SOURCE_IPS
        .iter()
        .map(|ip| ip.parse().expect("well-formed address literal"))
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum WebhookRejection {
    #[error("source address not allowed: {0:?}")]
    UnauthorizedSource(Option<IpAddr>),
    #[error("missing signature or timestamp header")]
    MissingSignatureHeaders,
    #[error("signature mismatch")]
    SignatureMismatch,
    #[error(transparent)]
    MalformedEvent(#[from] MalformedEvent),
    #[error("callback failed: {0}")]
    CallbackFault(#[source] anyhow::Error),
}

impl WebhookRejection {
    pub fn status(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            WebhookRejection::UnauthorizedSource(_) => StatusCode::FORBIDDEN,
            WebhookRejection::MissingSignatureHeaders | WebhookRejection::SignatureMismatch => {
                StatusCode::BAD_REQUEST
            }
            WebhookRejection::MalformedEvent(_) => StatusCode::BAD_REQUEST,
            WebhookRejection::CallbackFault(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body text sent back to the provider. Callback fault detail stays in
    /// the logs.
    pub fn detail(&self) -> String {
        match self {
            WebhookRejection::UnauthorizedSource(_) => "IP not allowed".to_string(),
            WebhookRejection::MissingSignatureHeaders | WebhookRejection::SignatureMismatch => {
                "Invalid signature".to_string()
            }
            WebhookRejection::MalformedEvent(e) => format!("Malformed event: {e}"),
            WebhookRejection::CallbackFault(_) => "Internal server error".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Paid,
    Failed,
    Unknown,
}

impl DispatchOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            DispatchOutcome::Paid => "Successful event processed!",
            DispatchOutcome::Failed => "Failed event processed!",
            DispatchOutcome::Unknown => "Webhook received with unknown status!",
        }
    }
}

/// Authenticates an inbound notification and routes it to the registered
/// callbacks: source check, then signature, then classification, then
/// dispatch. Each step terminates the request on failure; no retries.
pub struct WebhookDispatcher {
    pub verifier: Arc<dyn SignatureVerifier>,
    pub registry: CallbackRegistry,
    pub allowed_ips: HashSet<IpAddr>,
}

impl WebhookDispatcher {
    pub async fn handle(
        &self,
        client_ip: Option<IpAddr>,
        method: &str,
        path: &str,
        timestamp: Option<&str>,
        signature: Option<&str>,
        body: &[u8],
    ) -> Result<DispatchOutcome, WebhookRejection> {
        match client_ip {
            Some(ip) if self.allowed_ips.contains(&ip) => {}
            _ => return Err(WebhookRejection::UnauthorizedSource(client_ip)),
        }

        let (timestamp, signature) = match (timestamp, signature) {
            (Some(t), Some(s)) => (t, s),
            _ => return Err(WebhookRejection::MissingSignatureHeaders),
        };
        if !self.verifier.verify(method, path, timestamp, body, signature) {
            return Err(WebhookRejection::SignatureMismatch);
        }

        let event = classify(body)?;
        let kind = match &event.kind {
            EventKind::OrderPaid => CallbackKind::Paid,
            EventKind::OrderFailed => CallbackKind::Failed,
            EventKind::Unknown(raw) => {
                tracing::info!(kind = %raw, event_id = %event.event_id, "unknown event kind, no callbacks invoked");
                return Ok(DispatchOutcome::Unknown);
            }
        };

        // Callbacks run one at a time in registration order; a failure
        // aborts the rest of the list and surfaces to the HTTP layer.
        let event = Arc::new(event);
        for callback in self.registry.callbacks_for(kind) {
            callback(event.clone())
                .await
                .map_err(WebhookRejection::CallbackFault)?;
        }

        Ok(match kind {
            CallbackKind::Paid => DispatchOutcome::Paid,
            CallbackKind::Failed => DispatchOutcome::Failed,
        })
    }
}
