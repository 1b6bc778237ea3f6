use super::QueryEvent;
use ferrous_resolve_application::ports::QueryListener;
use ferrous_resolve_domain::Question;
use std::net::SocketAddr;
use tokio::sync::mpsc;

/// Non-blocking emitter for query events.
///
/// Uses an unbounded channel so the transport never awaits on it. Events
/// are fire-and-forget: when disabled or when the receiver is gone they are
/// dropped.
#[derive(Clone)]
pub struct QueryEventEmitter {
    sender: Option<mpsc::UnboundedSender<QueryEvent>>,
}

impl QueryEventEmitter {
    pub fn new_disabled() -> Self {
        Self { sender: None }
    }

    /// Creates an enabled emitter and the receiver for its consumer task.
    pub fn new_enabled() -> (Self, mpsc::UnboundedReceiver<QueryEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { sender: Some(tx) }, rx)
    }

    pub fn emit(&self, event: QueryEvent) {
        if let Some(ref tx) = self.sender {
            let _ = tx.send(event);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }
}

impl QueryListener for QueryEventEmitter {
    fn before_sending_query(&self, question: &Question, server: SocketAddr, transaction_id: u16) {
        if self.is_enabled() {
            self.emit(QueryEvent::new(question, server, transaction_id));
        }
    }
}

impl Default for QueryEventEmitter {
    fn default() -> Self {
        Self::new_disabled()
    }
}

impl std::fmt::Debug for QueryEventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEventEmitter")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
