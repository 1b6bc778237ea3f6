use super::config::ResolverConfig;
use crate::dns::cache::DnsCache;
use arc_swap::ArcSwap;
use async_trait::async_trait;
use ferrous_resolve_application::ports::{DnsTransport, RecordResolver};
use ferrous_resolve_domain::root_hints;
use ferrous_resolve_domain::{
    DnsResponse, DomainError, NameServerSpec, Question, RecordData, RecordType, ResourceRecord,
};
use futures::future::{BoxFuture, FutureExt};
use std::collections::{HashSet, VecDeque};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Resolves questions by walking the delegation tree one nameserver at a
/// time, starting from a configured server (a root server by default).
///
/// Everything learned along the way lands in the shared cache; answers are
/// always read back from the cache so expiry rules apply uniformly.
pub struct IterativeResolver {
    cache: Arc<DnsCache>,
    transport: Arc<dyn DnsTransport>,
    config: ResolverConfig,
    name_server: ArcSwap<SocketAddr>,
}

impl IterativeResolver {
    pub fn new(
        cache: Arc<DnsCache>,
        transport: Arc<dyn DnsTransport>,
        config: ResolverConfig,
    ) -> Self {
        let start = SocketAddr::new(root_hints::random_root_address(), config.port);
        Self {
            cache,
            transport,
            config,
            name_server: ArcSwap::from_pointee(start),
        }
    }

    /// Selects the server every walk starts from: `random`/`root`/empty for
    /// a random root server, an address (with optional port) or a host name
    /// looked up through the system resolver.
    pub async fn set_name_server(&self, spec: &str) -> Result<SocketAddr, DomainError> {
        let addr = match spec.parse::<NameServerSpec>()? {
            NameServerSpec::RandomRoot => {
                SocketAddr::new(root_hints::random_root_address(), self.config.port)
            }
            NameServerSpec::Address { ip, port } => {
                SocketAddr::new(ip, port.unwrap_or(self.config.port))
            }
            NameServerSpec::Host { hostname, port } => {
                let port = port.unwrap_or(self.config.port);
                let addrs: Vec<SocketAddr> = tokio::net::lookup_host((&*hostname, port))
                    .await
                    .map_err(|e| {
                        DomainError::InvalidNameServer(format!("{}: {}", hostname, e))
                    })?
                    .collect();
                addrs
                    .iter()
                    .find(|addr| addr.is_ipv4())
                    .or_else(|| addrs.first())
                    .copied()
                    .ok_or_else(|| {
                        DomainError::InvalidNameServer(format!("{}: no addresses", hostname))
                    })?
            }
        };

        self.name_server.store(Arc::new(addr));
        info!(name_server = %addr, "Name server selected");
        Ok(addr)
    }

    pub fn name_server(&self) -> SocketAddr {
        **self.name_server.load()
    }

    /// Cached records for `question` (CNAMEs of the host included), or the
    /// outcome of one walk from the configured nameserver.
    pub async fn direct_resolve(&self, question: &Question) -> Vec<ResourceRecord> {
        self.resolve_at_depth(question, 0).await
    }

    /// Like `direct_resolve`, then follows every CNAME target with the same
    /// type and class, at most `max_indirection` levels deep.
    ///
    /// The result holds each CNAME record met and the final records, once
    /// each.
    pub async fn recursive_resolve(
        &self,
        question: &Question,
        max_indirection: usize,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        let mut results = Vec::new();
        let mut seen: HashSet<ResourceRecord> = HashSet::new();
        let mut visited: HashSet<Question> = HashSet::from([question.clone()]);
        let mut pending = VecDeque::from([(question.clone(), max_indirection)]);

        while let Some((current, remaining)) = pending.pop_front() {
            for record in self.resolve_at_depth(&current, 0).await {
                if record.record_type() == RecordType::CNAME
                    && current.record_type() != RecordType::CNAME
                {
                    if let Some(target) = record.data().host_name() {
                        if remaining == 0 {
                            return Err(DomainError::CnameIndirectionLimit {
                                host: current.host_name().to_string(),
                                limit: max_indirection,
                            });
                        }
                        let next = current.with_host(target);
                        if !visited.insert(next.clone()) {
                            return Err(DomainError::CnameLoop {
                                host: next.host_name().to_string(),
                            });
                        }
                        debug!(from = %current.host_name(), to = %next.host_name(), "Following CNAME");
                        pending.push_back((next, remaining - 1));
                    }
                }
                if seen.insert(record.clone()) {
                    results.push(record);
                }
            }
        }

        Ok(results)
    }

    pub async fn close(&self) {
        self.transport.close().await;
    }

    fn resolve_at_depth<'a>(
        &'a self,
        question: &'a Question,
        ns_depth: usize,
    ) -> BoxFuture<'a, Vec<ResourceRecord>> {
        async move {
            let cached = self.cache.lookup(question, true);
            if !cached.is_empty() {
                return cached;
            }

            self.walk(question, self.name_server(), ns_depth).await;
            self.cache.lookup(question, true)
        }
        .boxed()
    }

    /// One iterative walk; contacts exactly one server per iteration.
    async fn walk(&self, question: &Question, start: SocketAddr, ns_depth: usize) {
        let mut server = start;

        for _ in 0..self.config.max_iterations {
            let response = match self.transport.exchange(question, server).await {
                Ok(Some(response)) => response,
                Ok(None) => return,
                Err(e) => {
                    warn!(server = %server, domain = %question.host_name(), error = %e, "Query failed");
                    return;
                }
            };

            if response.header.truncated() {
                debug!(server = %server, domain = %question.host_name(), "Truncated reply");
            }
            if response.is_nxdomain() {
                debug!(server = %server, domain = %question.host_name(), "NXDOMAIN");
            }

            self.cache.store_all(response.all_records().cloned());

            if response.answers_question(question) {
                return;
            }

            match self.next_hop(&response, ns_depth).await {
                Some(next) => {
                    debug!(from = %server, to = %next, domain = %question.host_name(), "Following referral");
                    server = next;
                }
                None => return,
            }
        }

        warn!(
            domain = %question.host_name(),
            max_iterations = self.config.max_iterations,
            "Iteration ceiling reached"
        );
    }

    /// Picks the next server from a referral: the first NS (in received
    /// order) with a known address wins; failing that, NS hosts are
    /// resolved one by one until one yields an IPv4 address.
    async fn next_hop(&self, response: &DnsResponse, ns_depth: usize) -> Option<SocketAddr> {
        let ns_hosts: Vec<&str> = response
            .referral_name_servers()
            .filter_map(|record| record.data().host_name())
            .collect();
        if ns_hosts.is_empty() {
            return None;
        }

        for host in &ns_hosts {
            if let Some(ip) = self.known_address(host, response) {
                return Some(SocketAddr::new(ip, self.config.port));
            }
        }

        if ns_depth >= self.config.max_ns_indirection {
            warn!(
                max_ns_indirection = self.config.max_ns_indirection,
                "Nameserver indirection limit reached"
            );
            return None;
        }

        for host in &ns_hosts {
            let question = Question::internet(host, RecordType::A);
            let records = self.resolve_at_depth(&question, ns_depth + 1).await;
            let ipv4 = records.iter().find_map(|record| match record.data() {
                RecordData::Ipv4(addr) => Some(IpAddr::V4(*addr)),
                _ => None,
            });
            if let Some(ip) = ipv4 {
                return Some(SocketAddr::new(ip, self.config.port));
            }
            debug!(ns = %host, "Nameserver address unresolved");
        }

        warn!("No reachable nameserver in referral");
        None
    }

    fn known_address(&self, host: &str, response: &DnsResponse) -> Option<IpAddr> {
        Self::glue(host, RecordType::A, response)
            .or_else(|| self.cache.addresses(host, RecordType::A).into_iter().next())
            .or_else(|| Self::glue(host, RecordType::AAAA, response))
            .or_else(|| self.cache.addresses(host, RecordType::AAAA).into_iter().next())
    }

    fn glue(host: &str, record_type: RecordType, response: &DnsResponse) -> Option<IpAddr> {
        response
            .additionals
            .iter()
            .filter(|record| record.record_type() == record_type && record.host_name() == host)
            .find_map(|record| record.data().ip_addr())
    }
}

#[async_trait]
impl RecordResolver for IterativeResolver {
    async fn direct_resolve(&self, question: &Question) -> Result<Vec<ResourceRecord>, DomainError> {
        Ok(IterativeResolver::direct_resolve(self, question).await)
    }

    async fn recursive_resolve(
        &self,
        question: &Question,
        max_indirection: usize,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        IterativeResolver::recursive_resolve(self, question, max_indirection).await
    }
}
