//! Blog Graph Server
//!
//! Serves the blog graph engine over HTTP.

use anyhow::Context;
use blog_graph::core::{config, create_app_state, logging};
use blog_graph::api::start_server;
use clap::{Arg, ArgAction, Command};
use tracing::info;

// Configure global allocator for maximum performance
#[global_allocator]
static GLOBAL: jemallocator::Jemalloc = jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let matches = Command::new("blog-graph")
        .version(blog_graph::VERSION)
        .about("In-process graph query engine over users, posts and comments.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path"),
        )
        .arg(
            Arg::new("http-addr")
                .long("http-addr")
                .value_name("ADDR")
                .help("HTTP server bind address"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (trace, debug, info, warn, error)"),
        )
        .arg(
            Arg::new("no-seed")
                .long("no-seed")
                .action(ArgAction::SetTrue)
                .help("Start with empty collections instead of the demo data"),
        )
        .get_matches();

    // Load configuration (file, then environment)
    let config_path = matches.get_one::<String>("config").map(|s| s.as_str());
    let mut config = config::load_config(config_path).context("Failed to load configuration")?;

    // Apply CLI overrides
    if let Some(addr) = matches.get_one::<String>("http-addr") {
        config.server.http_addr = addr
            .parse()
            .with_context(|| format!("Invalid HTTP address: {}", addr))?;
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.logging.level = level.clone();
    }
    if matches.get_flag("no-seed") {
        config.storage.seed_demo_data = false;
    }
    // Validate once, after every override source
    config.validate()?;

    // Initialize logging
    logging::init_tracing(&config.logging)?;
    info!("Starting {} v{}", blog_graph::NAME, blog_graph::VERSION);

    let state = create_app_state(config)?;
    start_server(state).await?;

    info!("Shutdown complete");
    Ok(())
}
