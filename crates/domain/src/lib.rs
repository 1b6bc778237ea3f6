//! Ferrous Resolve Domain Layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod dns_response;
pub mod errors;
pub mod name_server;
pub mod root_hints;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::Question;
pub use dns_record::{RecordClass, RecordData, RecordType, ResourceRecord};
pub use dns_response::{DnsHeader, DnsResponse};
pub use errors::DomainError;
pub use name_server::NameServerSpec;
