use crate::domain::event::Event;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type CallbackFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;
pub type EventCallback = Box<dyn Fn(Arc<Event>) -> CallbackFuture + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackKind {
    Paid,
    Failed,
}

/// Ordered, append-only lists of application callbacks, one list per event
/// kind. Populated before serving starts and read-only afterwards; there is
/// no list for unrecognized kinds.
#[derive(Default)]
pub struct CallbackRegistry {
    paid: Vec<EventCallback>,
    failed: Vec<EventCallback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a callback to the list for `kind`. Registration order is
    /// invocation order; duplicates are kept.
    pub fn register<F, Fut>(&mut self, kind: CallbackKind, callback: F)
    where
        F: Fn(Arc<Event>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let callback: EventCallback = Box::new(move |event| Box::pin(callback(event)));
        match kind {
            CallbackKind::Paid => self.paid.push(callback),
            CallbackKind::Failed => self.failed.push(callback),
        }
    }

    pub fn callbacks_for(&self, kind: CallbackKind) -> &[EventCallback] {
        match kind {
            CallbackKind::Paid => &self.paid,
            CallbackKind::Failed => &self.failed,
        }
    }
}
