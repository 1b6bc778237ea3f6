pub mod mock_resolver;

pub use mock_resolver::MockRecordResolver;
