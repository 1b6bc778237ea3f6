use ferrous_resolve_domain::root_hints::ROOT_SERVERS;
use ferrous_resolve_domain::{Question, RecordData, RecordType, ResourceRecord};
use ferrous_resolve_infrastructure::dns::DnsCache;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn a_record(host: &str, addr: [u8; 4], ttl: u32) -> ResourceRecord {
    ResourceRecord::new(
        Question::internet(host, RecordType::A),
        ttl,
        RecordData::Ipv4(Ipv4Addr::from(addr)),
    )
}

fn cname_record(host: &str, target: &str) -> ResourceRecord {
    ResourceRecord::new(
        Question::internet(host, RecordType::CNAME),
        300,
        RecordData::HostName(target.to_string()),
    )
}

#[test]
fn test_new_cache_is_seeded_with_root_hints() {
    let cache = DnsCache::new();

    let roots = cache.lookup(&Question::root(), false);
    assert_eq!(roots.len(), ROOT_SERVERS.len());

    let addrs = cache.addresses("k.root-servers.net", RecordType::A);
    assert_eq!(addrs, vec![IpAddr::V4(Ipv4Addr::new(193, 0, 14, 129))]);
    assert!(DnsCache::empty().is_empty());
}

#[test]
fn test_lookup_never_returns_expired_records() {
    let cache = DnsCache::empty();
    let question = Question::internet("example.com", RecordType::A);
    let long_ago = Instant::now()
        .checked_sub(Duration::from_secs(5))
        .expect("monotonic clock is older than 5s");

    cache.store(ResourceRecord::recorded_at(
        question.clone(),
        2,
        RecordData::Ipv4(Ipv4Addr::new(192, 0, 2, 1)),
        long_ago,
    ));
    cache.store(a_record("example.com", [192, 0, 2, 2], 0));
    cache.store(a_record("example.com", [192, 0, 2, 3], 300));

    let live = cache.lookup(&question, false);
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].text_result(), "192.0.2.3");
    assert_eq!(cache.metrics().expirations.load(Ordering::Relaxed), 2);
}

#[test]
fn test_record_with_negative_wire_ttl_is_never_served() {
    use ferrous_resolve_infrastructure::dns::wire::ResponseParser;

    let mut bytes = vec![0, 1, 0x84, 0, 0, 0, 0, 1, 0, 0, 0, 0];
    bytes.extend_from_slice(b"\x07example\x03com\x00");
    bytes.extend_from_slice(&[0, 1, 0, 1, 0xFF, 0xFF, 0xFF, 0xFF, 0, 4, 192, 0, 2, 1]);

    let cache = DnsCache::empty();
    for record in ResponseParser::parse(&bytes).unwrap().answers {
        cache.store(record);
    }

    assert!(cache
        .lookup(&Question::internet("example.com", RecordType::A), false)
        .is_empty());
}

#[test]
fn test_store_replaces_equal_record_and_refreshes_ttl() {
    let cache = DnsCache::empty();
    cache.store(a_record("example.com", [192, 0, 2, 1], 60));
    cache.store(a_record("example.com", [192, 0, 2, 1], 3600));

    let records = cache.lookup(&Question::internet("example.com", RecordType::A), false);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].ttl(), 3600);
}

#[test]
fn test_lookup_with_cname_lists_exact_matches_first() {
    let cache = DnsCache::empty();
    cache.store(cname_record("www.example.org", "example.org"));
    cache.store(a_record("www.example.org", [192, 0, 2, 9], 300));

    let question = Question::internet("www.example.org", RecordType::A);
    let with_cname = cache.lookup(&question, true);
    assert_eq!(with_cname.len(), 2);
    assert_eq!(with_cname[0].record_type(), RecordType::A);
    assert_eq!(with_cname[1].record_type(), RecordType::CNAME);

    assert_eq!(cache.lookup(&question, false).len(), 1);

    let cname_question = question.with_type(RecordType::CNAME);
    assert_eq!(cache.lookup(&cname_question, true).len(), 1);
}

#[test]
fn test_lookup_is_case_insensitive() {
    let cache = DnsCache::empty();
    cache.store(a_record("Example.COM.", [192, 0, 2, 1], 300));

    let records = cache.lookup(&Question::internet("example.com", RecordType::A), false);
    assert_eq!(records.len(), 1);
}

#[test]
fn test_hit_and_miss_metrics() {
    let cache = DnsCache::empty();
    let question = Question::internet("example.com", RecordType::A);

    assert!(cache.lookup(&question, true).is_empty());
    cache.store(a_record("example.com", [192, 0, 2, 1], 300));
    assert!(!cache.lookup(&question, true).is_empty());

    assert_eq!(cache.metrics().hits.load(Ordering::Relaxed), 1);
    assert_eq!(cache.metrics().misses.load(Ordering::Relaxed), 1);
    assert_eq!(cache.metrics().hit_rate(), 50.0);
}

#[test]
fn test_entries_are_sorted_and_clear_reseeds() {
    let cache = DnsCache::new();
    cache.store(a_record("zz.example", [192, 0, 2, 1], 300));
    cache.store(a_record("aa.example", [192, 0, 2, 2], 300));

    let entries = cache.entries();
    assert_eq!(entries.len(), cache.len());
    assert_eq!(entries.len(), 28);
    assert_eq!(entries[0].host_name(), "");
    assert!(entries
        .windows(2)
        .all(|w| w[0].question() <= w[1].question()));

    cache.clear();
    assert_eq!(cache.len(), 26);
    assert!(cache
        .lookup(&Question::internet("aa.example", RecordType::A), false)
        .is_empty());
}

#[test]
fn test_purge_expired_drops_only_dead_records() {
    let cache = DnsCache::empty();
    cache.store(a_record("dead.example", [192, 0, 2, 1], 0));
    cache.store(a_record("live.example", [192, 0, 2, 2], 300));

    assert_eq!(cache.purge_expired(), 1);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.purge_expired(), 0);
}

#[test]
fn test_shared_cache_across_threads() {
    let cache = Arc::new(DnsCache::empty());
    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                for j in 0..50u8 {
                    cache.store(a_record("shared.example", [10, 0, i, j], 300));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let records = cache.lookup(&Question::internet("shared.example", RecordType::A), false);
    assert_eq!(records.len(), 400);
}
