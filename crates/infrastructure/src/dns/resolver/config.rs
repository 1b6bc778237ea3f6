use ferrous_resolve_domain::config::ResolverSettings;
use std::time::Duration;

/// Runtime limits for the iterative resolver and its transport.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Destination port for every nameserver (default: 53)
    pub port: u16,

    /// Per-attempt wait for a matching reply
    pub query_timeout: Duration,

    /// Transmissions per query before a server counts as silent
    pub max_query_attempts: u32,

    /// Nesting depth for resolving nameserver addresses
    pub max_ns_indirection: usize,

    /// Default CNAME depth for recursive lookups
    pub max_cname_indirection: usize,

    /// Referrals followed by one walk before giving up
    pub max_iterations: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::from(&ResolverSettings::default())
    }
}

impl From<&ResolverSettings> for ResolverConfig {
    fn from(settings: &ResolverSettings) -> Self {
        Self {
            port: settings.port,
            query_timeout: Duration::from_millis(settings.query_timeout_ms),
            max_query_attempts: settings.max_query_attempts,
            max_ns_indirection: settings.max_ns_indirection,
            max_cname_indirection: settings.max_cname_indirection,
            max_iterations: settings.max_iterations,
        }
    }
}

impl ResolverConfig {
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_query_attempts = attempts;
        self
    }

    pub fn with_max_ns_indirection(mut self, depth: usize) -> Self {
        self.max_ns_indirection = depth;
        self
    }

    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }
}
