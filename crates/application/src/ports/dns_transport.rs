use async_trait::async_trait;
use ferrous_resolve_domain::{DnsResponse, DomainError, Question};
use std::net::SocketAddr;

/// Sends one question to one nameserver and waits for the matching reply.
///
/// Implementations own the retry budget. `Ok(None)` means the server never
/// produced a usable reply; `Err` is reserved for local failures such as a
/// broken socket.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn exchange(
        &self,
        question: &Question,
        server: SocketAddr,
    ) -> Result<Option<DnsResponse>, DomainError>;

    /// Releases the underlying socket. Further exchanges fail.
    async fn close(&self) {}
}
