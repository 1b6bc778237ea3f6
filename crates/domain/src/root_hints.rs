//! Bootstrap data for the 13 IANA root nameservers.

use crate::{Question, RecordData, RecordType, ResourceRecord};
use std::net::{IpAddr, Ipv4Addr};
use std::time::Instant;

/// TTL given to seeded root records; long enough to outlive any process.
pub const ROOT_HINT_TTL: u32 = 3_600_000;

pub const ROOT_SERVERS: [(&str, Ipv4Addr); 13] = [
    ("a.root-servers.net", Ipv4Addr::new(198, 41, 0, 4)),
    ("b.root-servers.net", Ipv4Addr::new(170, 247, 170, 2)),
    ("c.root-servers.net", Ipv4Addr::new(192, 33, 4, 12)),
    ("d.root-servers.net", Ipv4Addr::new(199, 7, 91, 13)),
    ("e.root-servers.net", Ipv4Addr::new(192, 203, 230, 10)),
    ("f.root-servers.net", Ipv4Addr::new(192, 5, 5, 241)),
    ("g.root-servers.net", Ipv4Addr::new(192, 112, 36, 4)),
    ("h.root-servers.net", Ipv4Addr::new(198, 97, 190, 53)),
    ("i.root-servers.net", Ipv4Addr::new(192, 36, 148, 17)),
    ("j.root-servers.net", Ipv4Addr::new(192, 58, 128, 30)),
    ("k.root-servers.net", Ipv4Addr::new(193, 0, 14, 129)),
    ("l.root-servers.net", Ipv4Addr::new(199, 7, 83, 42)),
    ("m.root-servers.net", Ipv4Addr::new(202, 12, 27, 33)),
];

/// NS records for the root question plus one A record per root server host.
pub fn seed_records() -> Vec<ResourceRecord> {
    let now = Instant::now();
    let mut records = Vec::with_capacity(ROOT_SERVERS.len() * 2);

    for (host, _) in ROOT_SERVERS.iter() {
        records.push(ResourceRecord::recorded_at(
            Question::root(),
            ROOT_HINT_TTL,
            RecordData::HostName((*host).to_string()),
            now,
        ));
    }
    for (host, addr) in ROOT_SERVERS.iter() {
        records.push(ResourceRecord::recorded_at(
            Question::internet(host, RecordType::A),
            ROOT_HINT_TTL,
            RecordData::Ipv4(*addr),
            now,
        ));
    }

    records
}

/// Uniformly random root server address.
pub fn random_root_address() -> IpAddr {
    let (_, addr) = ROOT_SERVERS[fastrand::usize(..ROOT_SERVERS.len())];
    IpAddr::V4(addr)
}
