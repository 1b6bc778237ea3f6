use super::QueryEvent;
use dashmap::DashMap;
use ferrous_resolve_domain::RecordType;
use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Query event counters, shareable across tasks.
#[derive(Clone, Default)]
pub struct QueryMetrics {
    total_events: Arc<AtomicU64>,
    server_counts: Arc<DashMap<IpAddr, u64>>,
    record_type_counts: Arc<DashMap<RecordType, u64>>,
}

impl QueryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&self, event: &QueryEvent) {
        self.total_events.fetch_add(1, Ordering::Relaxed);

        self.server_counts
            .entry(event.server.ip())
            .and_modify(|c| *c += 1)
            .or_insert(1);

        self.record_type_counts
            .entry(event.record_type)
            .and_modify(|c| *c += 1)
            .or_insert(1);
    }

    pub fn total_events(&self) -> u64 {
        self.total_events.load(Ordering::Relaxed)
    }

    pub fn server_count(&self, server: IpAddr) -> u64 {
        self.server_counts.get(&server).map(|v| *v).unwrap_or(0)
    }

    pub fn record_type_count(&self, record_type: RecordType) -> u64 {
        self.record_type_counts
            .get(&record_type)
            .map(|v| *v)
            .unwrap_or(0)
    }

    /// Servers ordered by descending query count.
    pub fn top_servers(&self, n: usize) -> Vec<(IpAddr, u64)> {
        let mut servers: Vec<_> = self
            .server_counts
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect();

        servers.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        servers.truncate(n);
        servers
    }

    pub fn reset(&self) {
        self.total_events.store(0, Ordering::Relaxed);
        self.server_counts.clear();
        self.record_type_counts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrous_resolve_domain::Question;

    #[test]
    fn test_track_counts_per_server_and_type() {
        let metrics = QueryMetrics::new();
        let root: std::net::SocketAddr = "198.41.0.4:53".parse().unwrap();
        let tld: std::net::SocketAddr = "198.51.100.1:53".parse().unwrap();
        let question = Question::internet("example.com", RecordType::A);

        metrics.track(&QueryEvent::new(&question, root, 1));
        metrics.track(&QueryEvent::new(&question, tld, 2));
        metrics.track(&QueryEvent::new(&question.with_type(RecordType::NS), tld, 3));

        assert_eq!(metrics.total_events(), 3);
        assert_eq!(metrics.server_count(tld.ip()), 2);
        assert_eq!(metrics.record_type_count(RecordType::A), 2);
        assert_eq!(metrics.top_servers(1), vec![(tld.ip(), 2)]);

        metrics.reset();
        assert_eq!(metrics.total_events(), 0);
        assert_eq!(metrics.server_count(root.ip()), 0);
    }
}
