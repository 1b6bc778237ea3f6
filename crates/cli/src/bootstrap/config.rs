use anyhow::Context;
use ferrous_resolve_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides).context("loading configuration")?;
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Called once logging is up, since loading happens before the level is known.
pub fn log_config(config: &Config, config_path: Option<&str>) {
    info!(
        config_file = config_path.unwrap_or("default"),
        name_server = %config.resolver.name_server,
        port = config.resolver.port,
        timeout_ms = config.resolver.query_timeout_ms,
        attempts = config.resolver.max_query_attempts,
        "Configuration loaded"
    );
}
