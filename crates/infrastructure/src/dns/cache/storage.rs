use super::CacheMetrics;
use dashmap::DashMap;
use ferrous_resolve_domain::root_hints;
use ferrous_resolve_domain::{Question, RecordType, ResourceRecord};
use rustc_hash::FxBuildHasher;
use std::net::IpAddr;
use std::sync::atomic::Ordering as AtomicOrdering;
use std::time::Instant;
use tracing::{debug, info};

/// Shared record store keyed by question.
///
/// Each question maps to a set of records with per-record expiry. Expired
/// records are never returned; they are dropped lazily on access or in bulk
/// by `purge_expired`. Per-entry locking comes from the sharded map, so any
/// number of resolvers may share one cache through an `Arc`.
pub struct DnsCache {
    entries: DashMap<Question, Vec<ResourceRecord>, FxBuildHasher>,
    metrics: CacheMetrics,
}

impl DnsCache {
    /// A cache seeded with the root nameservers.
    pub fn new() -> Self {
        let cache = Self::empty();
        cache.seed_root_hints();
        cache
    }

    /// A cache with no records at all, not even root hints.
    pub fn empty() -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher::default()),
            metrics: CacheMetrics::default(),
        }
    }

    fn seed_root_hints(&self) {
        let seeds = root_hints::seed_records();
        let count = seeds.len();
        for record in seeds {
            self.insert(record);
        }
        info!(records = count, "Cache seeded with root hints");
    }

    /// Live records for `question`.
    ///
    /// With `include_cname`, CNAME records owned by the same host follow the
    /// exact-type matches (unless the question is itself for CNAMEs).
    pub fn lookup(&self, question: &Question, include_cname: bool) -> Vec<ResourceRecord> {
        let now = Instant::now();
        let mut results = self.live_records(question, now);

        if include_cname && question.record_type() != RecordType::CNAME {
            results.extend(self.live_records(&question.with_type(RecordType::CNAME), now));
        }

        if results.is_empty() {
            self.metrics.misses.fetch_add(1, AtomicOrdering::Relaxed);
            debug!(question = %question, "Cache miss");
        } else {
            self.metrics.hits.fetch_add(1, AtomicOrdering::Relaxed);
            debug!(question = %question, records = results.len(), "Cache hit");
        }
        results
    }

    fn live_records(&self, question: &Question, now: Instant) -> Vec<ResourceRecord> {
        let Some(mut entry) = self.entries.get_mut(question) else {
            return Vec::new();
        };

        let before = entry.len();
        entry.retain(|record| !record.is_expired_at(now));
        let expired = before - entry.len();
        if expired > 0 {
            self.metrics
                .expirations
                .fetch_add(expired as u64, AtomicOrdering::Relaxed);
        }
        entry.value().clone()
    }

    /// Live addresses cached for `host` under an A or AAAA question.
    pub fn addresses(&self, host: &str, record_type: RecordType) -> Vec<IpAddr> {
        let question = Question::internet(host, record_type);
        self.live_records(&question, Instant::now())
            .iter()
            .filter_map(|record| record.data().ip_addr())
            .collect()
    }

    /// Inserts `record`, replacing an equal one so its TTL and timestamp
    /// are refreshed.
    pub fn store(&self, record: ResourceRecord) {
        debug!(
            question = %record.question(),
            ttl = record.ttl(),
            data = %record.data(),
            "Caching record"
        );
        self.insert(record);
    }

    fn insert(&self, record: ResourceRecord) {
        let mut entry = self.entries.entry(record.question().clone()).or_default();
        match entry.iter().position(|existing| existing == &record) {
            Some(index) => entry[index] = record,
            None => entry.push(record),
        }
        self.metrics.insertions.fetch_add(1, AtomicOrdering::Relaxed);
    }

    pub fn store_all<I>(&self, records: I)
    where
        I: IntoIterator<Item = ResourceRecord>,
    {
        for record in records {
            self.store(record);
        }
    }

    /// Every live record, ordered by host name then type.
    pub fn entries(&self) -> Vec<ResourceRecord> {
        let now = Instant::now();
        let mut records: Vec<ResourceRecord> = self
            .entries
            .iter()
            .flat_map(|entry| {
                entry
                    .value()
                    .iter()
                    .filter(|record| !record.is_expired_at(now))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .collect();
        records.sort_by(|a, b| a.question().cmp(b.question()));
        records
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .iter()
            .map(|entry| {
                entry
                    .value()
                    .iter()
                    .filter(|record| !record.is_expired_at(now))
                    .count()
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops everything learned, then re-seeds the root hints.
    pub fn clear(&self) {
        self.entries.clear();
        self.metrics.reset();
        self.seed_root_hints();
    }

    /// Removes every expired record; returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;

        self.entries.retain(|_, records| {
            let before = records.len();
            records.retain(|record| !record.is_expired_at(now));
            removed += before - records.len();
            !records.is_empty()
        });

        if removed > 0 {
            self.metrics
                .expirations
                .fetch_add(removed as u64, AtomicOrdering::Relaxed);
            debug!(removed = removed, "Purged expired cache records");
        }
        removed
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }
}

impl Default for DnsCache {
    fn default() -> Self {
        Self::new()
    }
}
