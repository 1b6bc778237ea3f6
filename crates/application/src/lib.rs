//! Ferrous Resolve Application Layer
pub mod ports;
pub mod use_cases;

pub use ports::{DnsTransport, QueryListener, RecordResolver};
pub use use_cases::{LookupMode, LookupUseCase};
