//! Query event system
//!
//! - `QueryEvent`: one transmission to a nameserver
//! - `QueryEventEmitter`: non-blocking emitter, plugged in as the transport's
//!   `QueryListener`
//! - `QueryMetrics`: counters per server and record type
//!
//! ```rust,no_run
//! use ferrous_resolve_infrastructure::dns::events::{QueryEventEmitter, QueryMetrics};
//!
//! let (emitter, mut rx) = QueryEventEmitter::new_enabled();
//! let metrics = QueryMetrics::new();
//!
//! tokio::spawn(async move {
//!     while let Some(event) = rx.recv().await {
//!         metrics.track(&event);
//!     }
//! });
//! ```

pub mod emitter;
pub mod metrics;
pub mod types;

pub use emitter::QueryEventEmitter;
pub use metrics::QueryMetrics;
pub use types::QueryEvent;
