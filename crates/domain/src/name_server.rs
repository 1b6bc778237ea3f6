use crate::DomainError;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

/// How the user designates the nameserver that starts every walk.
///
/// Ports are optional; when absent the configured resolver port applies.
/// Host names are resolved through the system resolver by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NameServerSpec {
    /// `random`, `root` or empty: any seeded root server.
    RandomRoot,
    Address { ip: IpAddr, port: Option<u16> },
    Host { hostname: Arc<str>, port: Option<u16> },
}

fn parse_host_port(s: &str) -> Option<(&str, u16)> {
    let (host, port_str) = s.rsplit_once(':')?;
    let port = port_str.parse::<u16>().ok()?;
    Some((host, port))
}

fn is_valid_hostname(host: &str) -> bool {
    let trimmed = host.strip_suffix('.').unwrap_or(host);
    !trimmed.is_empty()
        && trimmed.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && label
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        })
}

impl FromStr for NameServerSpec {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("random") || s.eq_ignore_ascii_case("root") {
            return Ok(NameServerSpec::RandomRoot);
        }
        if let Ok(ip) = s.parse::<IpAddr>() {
            return Ok(NameServerSpec::Address { ip, port: None });
        }
        if let Ok(addr) = s.parse::<SocketAddr>() {
            return Ok(NameServerSpec::Address {
                ip: addr.ip(),
                port: Some(addr.port()),
            });
        }
        let (host, port) = match parse_host_port(s) {
            Some((host, port)) => (host, Some(port)),
            None => (s, None),
        };
        if is_valid_hostname(host) {
            return Ok(NameServerSpec::Host {
                hostname: host.to_ascii_lowercase().into(),
                port,
            });
        }
        Err(DomainError::InvalidNameServer(s.to_string()))
    }
}

impl fmt::Display for NameServerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameServerSpec::RandomRoot => f.write_str("random"),
            NameServerSpec::Address { ip, port: None } => write!(f, "{}", ip),
            NameServerSpec::Address { ip, port: Some(port) } => {
                write!(f, "{}", SocketAddr::new(*ip, *port))
            }
            NameServerSpec::Host { hostname, port: None } => f.write_str(hostname),
            NameServerSpec::Host { hostname, port: Some(port) } => {
                write!(f, "{}:{}", hostname, port)
            }
        }
    }
}
