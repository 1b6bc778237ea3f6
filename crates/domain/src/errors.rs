use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Invalid name server: {0}")]
    InvalidNameServer(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("CNAME indirection limit of {limit} exceeded while resolving {host}")]
    CnameIndirectionLimit { host: String, limit: usize },

    #[error("CNAME loop detected at {host}")]
    CnameLoop { host: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::IoError(err.to_string())
    }
}
