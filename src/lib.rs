pub mod client;
pub mod config;
pub mod domain {
    pub mod event;
    pub mod money;
    pub mod order;
}
pub mod http {
    pub mod handlers {
        pub mod webhook;
    }
}
pub mod webhook {
    pub mod classifier;
    pub mod dispatcher;
    pub mod registry;
    pub mod signature;
}

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<webhook::dispatcher::WebhookDispatcher>,
}
