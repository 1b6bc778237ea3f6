use serde::{Deserialize, Serialize};

/// Iterative resolution settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverSettings {
    /// Starting nameserver: "random", "root", an IP, "ip:port" or a host name
    #[serde(default = "default_name_server")]
    pub name_server: String,

    /// Destination UDP port for every query (default: 53)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-attempt wait for a reply, in milliseconds
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Transmissions per query before giving up on a nameserver
    #[serde(default = "default_max_query_attempts")]
    pub max_query_attempts: u32,

    /// Nesting depth for resolving nameserver addresses
    #[serde(default = "default_max_ns_indirection")]
    pub max_ns_indirection: usize,

    /// Default CNAME depth for recursive lookups
    #[serde(default = "default_max_cname_indirection")]
    pub max_cname_indirection: usize,

    /// Ceiling on referrals followed by one walk
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            name_server: default_name_server(),
            port: default_port(),
            query_timeout_ms: default_query_timeout_ms(),
            max_query_attempts: default_max_query_attempts(),
            max_ns_indirection: default_max_ns_indirection(),
            max_cname_indirection: default_max_cname_indirection(),
            max_iterations: default_max_iterations(),
        }
    }
}

fn default_name_server() -> String {
    "random".to_string()
}

fn default_port() -> u16 {
    53
}

fn default_query_timeout_ms() -> u64 {
    5000
}

fn default_max_query_attempts() -> u32 {
    3
}

fn default_max_ns_indirection() -> usize {
    10
}

fn default_max_cname_indirection() -> usize {
    10
}

fn default_max_iterations() -> usize {
    32
}
