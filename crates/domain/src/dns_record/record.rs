use super::RecordType;
use crate::Question;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::{Duration, Instant};

/// Decoded RDATA of a resource record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordData {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    /// NS, CNAME and MX targets (MX preference is not kept).
    HostName(String),
    /// Lowercase hex of the raw RDATA for every other type.
    Hex(String),
}

impl RecordData {
    pub fn ip_addr(&self) -> Option<IpAddr> {
        match self {
            RecordData::Ipv4(addr) => Some(IpAddr::V4(*addr)),
            RecordData::Ipv6(addr) => Some(IpAddr::V6(*addr)),
            _ => None,
        }
    }

    pub fn host_name(&self) -> Option<&str> {
        match self {
            RecordData::HostName(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::Ipv4(addr) => write!(f, "{}", addr),
            RecordData::Ipv6(addr) => write!(f, "{}", addr),
            RecordData::HostName(name) => f.write_str(name),
            RecordData::Hex(hex) => f.write_str(hex),
        }
    }
}

/// A resource record learned from a nameserver (or seeded at bootstrap).
///
/// Records never change after creation; expiry is computed from
/// `recorded_at + ttl`. Set identity is `(question, data)`: the same answer
/// received twice with different TTLs is one record.
#[derive(Debug, Clone)]
pub struct ResourceRecord {
    question: Question,
    ttl: u32,
    data: RecordData,
    recorded_at: Instant,
}

impl ResourceRecord {
    pub fn new(question: Question, ttl: u32, data: RecordData) -> Self {
        Self::recorded_at(question, ttl, data, Instant::now())
    }

    pub fn recorded_at(question: Question, ttl: u32, data: RecordData, at: Instant) -> Self {
        Self {
            question,
            ttl,
            data,
            recorded_at: at,
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn host_name(&self) -> &str {
        self.question.host_name()
    }

    pub fn record_type(&self) -> RecordType {
        self.question.record_type()
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn data(&self) -> &RecordData {
        &self.data
    }

    /// Textual form of the result, as shown to users.
    pub fn text_result(&self) -> String {
        self.data.to_string()
    }

    pub fn expires_at(&self) -> Instant {
        self.recorded_at + Duration::from_secs(u64::from(self.ttl))
    }

    /// Expired once `recorded_at + ttl` is reached; a zero TTL is never usable.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Seconds left before expiry, saturating at zero.
    pub fn remaining_ttl(&self, now: Instant) -> u32 {
        let left = self.expires_at().saturating_duration_since(now).as_secs();
        u32::try_from(left).unwrap_or(u32::MAX)
    }
}

impl PartialEq for ResourceRecord {
    fn eq(&self, other: &Self) -> bool {
        self.question == other.question && self.data == other.data
    }
}

impl Eq for ResourceRecord {}

impl Hash for ResourceRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.question.hash(state);
        self.data.hash(state);
    }
}

/// Shows the TTL still left, not the one received.
impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<30} {:>10} {:<5} {}",
            self.question.host_name(),
            self.remaining_ttl(Instant::now()),
            self.record_type(),
            self.data
        )
    }
}
