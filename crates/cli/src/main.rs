//! # Ferrous Resolve
//!
//! Iterative DNS lookups from the command line.

mod bootstrap;

use anyhow::Context;
use clap::Parser;
use ferrous_resolve_application::{LookupMode, LookupUseCase};
use ferrous_resolve_domain::{CliOverrides, Question, RecordClass, RecordType};
use ferrous_resolve_infrastructure::dns::{
    DnsCache, IterativeResolver, QueryEventEmitter, QueryMetrics, ResolverConfig, UdpTransport,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "ferrous-resolve")]
#[command(version = "0.1.0")]
#[command(about = "Iterative DNS lookups starting from the root servers")]
struct Cli {
    /// Host names to look up
    #[arg(required_unless_present = "dump_cache")]
    names: Vec<String>,

    /// Record type (A, AAAA, NS, MX, CNAME, TXT, TYPE<n>, ...)
    #[arg(short = 't', long = "type", default_value = "A")]
    record_type: RecordType,

    /// Record class (IN, CH, HS, CLASS<n>)
    #[arg(short = 'c', long = "class", default_value = "IN")]
    record_class: RecordClass,

    /// Starting name server: "random", an IP, ip:port or a host name
    #[arg(short = 's', long)]
    server: Option<String>,

    /// Port used for name servers given without one
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Do not follow CNAME records
    #[arg(long)]
    direct: bool,

    /// Maximum CNAME indirection level
    #[arg(short = 'm', long)]
    max_indirection: Option<usize>,

    /// Print every query as it is sent
    #[arg(long)]
    trace: bool,

    /// Print the cache contents when done
    #[arg(long)]
    dump_cache: bool,

    /// Path to configuration file
    #[arg(long)]
    config: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            name_server: self.server.clone(),
            port: self.port,
            max_cname_indirection: self.max_indirection,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config);
    bootstrap::log_config(&config, cli.config.as_deref());

    let (emitter, trace_task) = if cli.trace {
        let (emitter, mut events) = QueryEventEmitter::new_enabled();
        let task = tokio::spawn(async move {
            let metrics = QueryMetrics::new();
            while let Some(event) = events.recv().await {
                println!("{}", event);
                metrics.track(&event);
            }
            metrics
        });
        (emitter, Some(task))
    } else {
        (QueryEventEmitter::new_disabled(), None)
    };

    let resolver_config = ResolverConfig::from(&config.resolver);
    let transport = UdpTransport::bind(&resolver_config, Arc::new(emitter))
        .await
        .context("binding UDP socket")?;
    let cache = Arc::new(DnsCache::new());
    let resolver = Arc::new(IterativeResolver::new(
        Arc::clone(&cache),
        Arc::new(transport),
        resolver_config,
    ));
    resolver
        .set_name_server(&config.resolver.name_server)
        .await
        .with_context(|| format!("selecting name server '{}'", config.resolver.name_server))?;

    let lookup = LookupUseCase::new(resolver.clone());
    let mode = if cli.direct {
        LookupMode::Direct
    } else {
        LookupMode::Recursive {
            max_indirection: config.resolver.max_cname_indirection,
        }
    };

    let mut failures = 0usize;
    for name in &cli.names {
        let question = Question::new(name, cli.record_type, cli.record_class);
        match lookup.execute(&question, mode).await {
            Ok(records) if records.is_empty() => {
                print_placeholder(&question, "No results");
            }
            Ok(records) => {
                for record in &records {
                    println!("{}", record);
                }
            }
            Err(e) => {
                failures += 1;
                print_placeholder(&question, &format!("Error: {}", e));
            }
        }
    }

    if cli.dump_cache {
        for record in cache.entries() {
            println!("{}", record);
        }
    }

    let cache_metrics = cache.metrics();
    info!(
        hits = cache_metrics.hits.load(Ordering::Relaxed),
        misses = cache_metrics.misses.load(Ordering::Relaxed),
        hit_rate = cache_metrics.hit_rate(),
        records = cache.len(),
        "Cache statistics"
    );

    resolver.close().await;
    drop(lookup);
    drop(resolver);

    if let Some(task) = trace_task {
        match task.await {
            Ok(metrics) => info!(
                queries = metrics.total_events(),
                top_servers = ?metrics.top_servers(3),
                "Query trace complete"
            ),
            Err(e) => warn!(error = %e, "Trace printer failed"),
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} lookups failed", failures, cli.names.len());
    }
    Ok(())
}

/// Same columns as a record line, with a TTL of -1 and a message as result.
fn print_placeholder(question: &Question, message: &str) {
    let host = if question.host_name().is_empty() {
        "."
    } else {
        question.host_name()
    };
    println!(
        "{:<30} {:>10} {:<5} {}",
        host,
        -1,
        question.record_type(),
        message
    );
}
