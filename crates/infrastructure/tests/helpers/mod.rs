#![allow(dead_code)]

pub mod mock_name_server;
pub mod mock_transport;
pub mod response_builder;

pub use mock_name_server::MockNameServer;
pub use mock_transport::MockTransport;
pub use response_builder::{Rdata, ResponseBuilder};
