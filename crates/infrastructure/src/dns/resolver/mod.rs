//! Iterative resolution engine.
//!
//! `IterativeResolver` walks referrals from a starting nameserver, caching
//! every record it receives, and expands CNAME chains on request.

pub mod config;
pub mod iterative;

pub use config::ResolverConfig;
pub use iterative::IterativeResolver;
