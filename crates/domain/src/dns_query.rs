use super::{RecordClass, RecordType};
use std::fmt;
use std::sync::Arc;

/// A DNS question (host name + record type + record class).
///
/// Host names compare case-insensitively: the name is lowercased and a single
/// trailing dot is removed on construction, so `WWW.Example.COM.` and
/// `www.example.com` produce equal questions and hit the same cache entry.
/// The root zone is the empty name.
///
/// Uses `Arc<str>` so cloning across resolver → cache → transport is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Question {
    host_name: Arc<str>,
    record_type: RecordType,
    record_class: RecordClass,
}

impl Question {
    pub fn new(host_name: &str, record_type: RecordType, record_class: RecordClass) -> Self {
        let trimmed = match host_name.strip_suffix('.') {
            Some(rest) if !ends_with_escape(rest) => rest,
            _ => host_name,
        };
        Self {
            host_name: Arc::from(trimmed.to_ascii_lowercase().as_str()),
            record_type,
            record_class,
        }
    }

    /// Question in the IN class, the common case.
    pub fn internet(host_name: &str, record_type: RecordType) -> Self {
        Self::new(host_name, record_type, RecordClass::IN)
    }

    /// The question answered by the bootstrap root nameserver records.
    pub fn root() -> Self {
        Self::internet("", RecordType::NS)
    }

    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    pub fn record_class(&self) -> RecordClass {
        self.record_class
    }

    /// Same host and class, different type.
    pub fn with_type(&self, record_type: RecordType) -> Self {
        Self {
            host_name: Arc::clone(&self.host_name),
            record_type,
            record_class: self.record_class,
        }
    }

    /// Same type and class, different host (used to follow a CNAME).
    pub fn with_host(&self, host_name: &str) -> Self {
        Self::new(host_name, self.record_type, self.record_class)
    }
}

// An odd run of trailing backslashes escapes whatever follows it.
fn ends_with_escape(text: &str) -> bool {
    text.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let host = if self.host_name.is_empty() {
            "."
        } else {
            &self.host_name
        };
        write!(f, "{} {} {}", host, self.record_class, self.record_type)
    }
}
