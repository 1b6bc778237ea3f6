pub mod dns_transport;
pub mod query_listener;
pub mod record_resolver;

pub use dns_transport::DnsTransport;
pub use query_listener::QueryListener;
pub use record_resolver::RecordResolver;
