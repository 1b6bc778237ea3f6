use crate::dns::resolver::ResolverConfig;
use crate::dns::wire::{QueryBuilder, ResponseParser};
use async_trait::async_trait;
use ferrous_resolve_application::ports::{DnsTransport, QueryListener};
use ferrous_resolve_domain::{DnsResponse, DomainError, Question};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Largest datagram accepted from a nameserver.
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

#[derive(Default)]
struct Sockets {
    v4: Option<UdpSocket>,
    v6: Option<UdpSocket>,
    closed: bool,
}

impl Sockets {
    async fn for_server(&mut self, server: SocketAddr) -> Result<&UdpSocket, DomainError> {
        if self.closed {
            return Err(DomainError::IoError("UDP transport is closed".to_string()));
        }
        let (slot, bind_addr) = if server.is_ipv4() {
            (&mut self.v4, SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)))
        } else {
            (&mut self.v6, SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)))
        };
        if slot.is_none() {
            *slot = Some(bind(bind_addr).await?);
        }
        slot.as_ref()
            .ok_or_else(|| DomainError::IoError("UDP socket unavailable".to_string()))
    }
}

async fn bind(addr: SocketAddr) -> Result<UdpSocket, DomainError> {
    let socket = UdpSocket::bind(addr)
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to bind UDP socket: {}", e)))?;
    debug!(local = ?socket.local_addr().ok(), "UDP socket bound");
    Ok(socket)
}

/// DNS over UDP with a fixed attempt budget per query.
///
/// One exchange holds the socket for its whole duration, so replies can
/// only ever be matched against the single outstanding transaction.
pub struct UdpTransport {
    sockets: Mutex<Sockets>,
    listener: Arc<dyn QueryListener>,
    timeout: Duration,
    max_attempts: u32,
}

impl UdpTransport {
    /// Opens the IPv4 socket up front; an IPv6 one is bound on first use.
    pub async fn bind(
        config: &ResolverConfig,
        listener: Arc<dyn QueryListener>,
    ) -> Result<Self, DomainError> {
        let v4 = bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))).await?;
        Ok(Self {
            sockets: Mutex::new(Sockets {
                v4: Some(v4),
                ..Default::default()
            }),
            listener,
            timeout: config.query_timeout,
            max_attempts: config.max_query_attempts,
        })
    }

    /// Decodes a datagram and keeps it only if it is the awaited reply.
    fn accept(
        &self,
        datagram: &[u8],
        expected_id: u16,
        from: SocketAddr,
        server: SocketAddr,
    ) -> Option<DnsResponse> {
        let response = match ResponseParser::parse(datagram) {
            Ok(response) => response,
            Err(e) => {
                warn!(server = %server, from = %from, error = %e, "Discarding malformed DNS reply");
                return None;
            }
        };

        if response.transaction_id() != expected_id {
            warn!(
                server = %server,
                expected = expected_id,
                received = response.transaction_id(),
                "Discarding reply with mismatched transaction id"
            );
            return None;
        }
        if !response.header.is_response() {
            warn!(server = %server, id = expected_id, "Discarding datagram without QR flag");
            return None;
        }
        if from.ip() != server.ip() {
            warn!(
                expected = %server,
                received_from = %from,
                "UDP response from unexpected source"
            );
        }
        Some(response)
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn exchange(
        &self,
        question: &Question,
        server: SocketAddr,
    ) -> Result<Option<DnsResponse>, DomainError> {
        let query = QueryBuilder::build(question)?;
        let mut sockets = self.sockets.lock().await;
        let socket = sockets.for_server(server).await?;
        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        for attempt in 1..=self.max_attempts {
            self.listener.before_sending_query(question, server, query.id);

            let bytes_sent = socket.send_to(&query.bytes, server).await.map_err(|e| {
                DomainError::IoError(format!("Failed to send UDP query to {}: {}", server, e))
            })?;
            debug!(
                server = %server,
                domain = %question.host_name(),
                id = query.id,
                attempt = attempt,
                bytes_sent = bytes_sent,
                "UDP query sent"
            );

            let deadline = tokio::time::Instant::now() + self.timeout;
            loop {
                let received =
                    tokio::time::timeout_at(deadline, socket.recv_from(&mut recv_buf)).await;
                let (bytes_received, from) = match received {
                    Ok(result) => result.map_err(|e| {
                        DomainError::IoError(format!(
                            "Failed to receive UDP response from {}: {}",
                            server, e
                        ))
                    })?,
                    Err(_) => {
                        debug!(server = %server, id = query.id, attempt = attempt, "UDP query timed out");
                        break;
                    }
                };

                if let Some(response) =
                    self.accept(&recv_buf[..bytes_received], query.id, from, server)
                {
                    debug!(
                        server = %server,
                        id = query.id,
                        bytes_received = bytes_received,
                        "UDP response received"
                    );
                    return Ok(Some(response));
                }
            }
        }

        warn!(
            server = %server,
            domain = %question.host_name(),
            attempts = self.max_attempts,
            "No response from nameserver"
        );
        Ok(None)
    }

    async fn close(&self) {
        let mut sockets = self.sockets.lock().await;
        sockets.v4 = None;
        sockets.v6 = None;
        sockets.closed = true;
        debug!("UDP transport closed");
    }
}
