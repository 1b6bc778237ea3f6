//! DNS wire format: query encoding and response decoding.

pub mod name;
pub mod query_builder;
pub mod response_parser;

pub use query_builder::{OutboundQuery, QueryBuilder};
pub use response_parser::ResponseParser;

pub(crate) const HEADER_LEN: usize = 12;
