use ferrous_resolve_domain::Question;
use std::net::SocketAddr;

/// Observer notified right before every transmission, retries included.
///
/// Called on the query path: implementations must return immediately.
pub trait QueryListener: Send + Sync {
    fn before_sending_query(&self, question: &Question, server: SocketAddr, transaction_id: u16);
}
