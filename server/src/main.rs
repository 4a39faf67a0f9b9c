//! Nobel Realty storefront server
//!
//! Serves the composed pages and the editor API over one HTTP listener.
//!
//! Usage:
//!   storefront-server --config storefront.toml --bind 127.0.0.1:3000
//!
//! Upstream URLs may also come from `STRAPI_BASE_URL`, `MEDUSA_BACKEND_URL`
//! and `MEDUSA_PUBLISHABLE_KEY`.

use anyhow::{Context, Result};
use clap::Parser;
use std::{net::SocketAddr, path::PathBuf};
use storefront_server::{build_router, AppState, SiteConfig, DEFAULT_CONFIG_FILE};
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "storefront-server")]
#[command(about = "Nobel Realty storefront and page builder server")]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Listen address
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Page document file
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Headless CMS base URL
    #[arg(long, env = "STRAPI_BASE_URL")]
    cms_url: Option<String>,

    /// Commerce backend base URL
    #[arg(long, env = "MEDUSA_BACKEND_URL")]
    commerce_url: Option<String>,

    /// Commerce publishable API key
    #[arg(long, env = "MEDUSA_PUBLISHABLE_KEY", hide_env_values = true)]
    publishable_key: Option<String>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(self, mut config: SiteConfig) -> SiteConfig {
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(data_file) = self.data_file {
            config.data_file = data_file;
        }
        if let Some(cms_url) = self.cms_url {
            config.cms_url = cms_url;
        }
        if let Some(commerce_url) = self.commerce_url {
            config.commerce_url = commerce_url;
        }
        if let Some(key) = self.publishable_key {
            config.publishable_key = key;
        }
        config
    }
}

fn init_tracing(verbose: bool) {
    let builder = FmtSubscriber::builder().with_target(false).compact();
    match EnvFilter::try_from_default_env() {
        Ok(filter) if !verbose => builder.with_env_filter(filter).init(),
        _ => {
            let level = if verbose { Level::DEBUG } else { Level::INFO };
            builder.with_max_level(level).init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    info!("Storefront server starting...");
    let config = SiteConfig::load(&args.config);
    let config = args.apply(config);

    let state = AppState::from_config(&config).context("Failed to set up storefront")?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!(bind = %config.bind, "Listening");
    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}
