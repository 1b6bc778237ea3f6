pub mod cache;
pub mod events;
pub mod resolver;
pub mod transport;
pub mod wire;

pub use cache::{CacheMetrics, DnsCache};
pub use events::{QueryEvent, QueryEventEmitter, QueryMetrics};
pub use resolver::{IterativeResolver, ResolverConfig};
pub use transport::UdpTransport;
