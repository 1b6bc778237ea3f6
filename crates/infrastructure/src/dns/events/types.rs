use ferrous_resolve_domain::{Question, RecordClass, RecordType};
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

/// Emitted right before a query datagram leaves, once per attempt.
#[derive(Debug, Clone)]
pub struct QueryEvent {
    pub domain: Arc<str>,
    pub record_type: RecordType,
    pub record_class: RecordClass,
    pub server: SocketAddr,
    pub transaction_id: u16,
}

impl QueryEvent {
    pub fn new(question: &Question, server: SocketAddr, transaction_id: u16) -> Self {
        Self {
            domain: Arc::from(question.host_name()),
            record_type: question.record_type(),
            record_class: question.record_class(),
            server,
            transaction_id,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}

/// The trace line shown by `--trace`.
impl fmt::Display for QueryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let domain = if self.domain.is_empty() { "." } else { &self.domain };
        write!(
            f,
            "Query ID     {} {}  {} --> {}",
            self.transaction_id,
            domain,
            self.record_type,
            self.server.ip()
        )
    }
}
