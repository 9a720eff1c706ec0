mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use tokio_util::sync::CancellationToken;
use vt_core::config::Config;
use vt_server::context::AppContext;

/// Load the config file (if any) and overlay `DATABASE_URL`/`DATABASE_NAME`.
fn load_config(path: Option<&Path>) -> Config {
    let mut config = Config::load_or_default(path);
    config.apply_env();
    config
}

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = load_config(config_path);

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting vitrine {}", env!("CARGO_PKG_VERSION"));
    vt_server::start(config, CancellationToken::new()).await?;
    Ok(())
}

fn seed(config_path: Option<&Path>) -> Result<()> {
    let ctx = AppContext::connect(load_config(config_path));
    let report = ctx.catalog.seed()?;
    println!(
        "Seeded: {} media items, {} channels inserted",
        report.media_items_inserted, report.channels_inserted
    );
    Ok(())
}

fn status(config_path: Option<&Path>) -> Result<()> {
    let ctx = AppContext::connect(load_config(config_path));
    println!("{}", serde_json::to_string_pretty(&ctx.catalog.status())?);
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        anyhow::bail!("No config file given; pass one as an argument or with --config");
    };
    let contents = std::fs::read_to_string(path)?;
    let mut config = Config::from_json(&contents)?;
    config.apply_env();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("Configuration is valid");
    } else {
        println!("Configuration is valid with {} warning(s):", warnings.len());
        for warning in warnings {
            println!("  - {warning}");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "vitrine=trace,vt_server=trace,vt_store=debug,vt_core=debug,tower_http=debug".to_string()
        } else {
            "vitrine=info,vt_server=info,vt_store=info,vt_core=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Seed => seed(cli.config.as_deref()),
        Commands::Status => status(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("vitrine {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
