mod cache;
mod catalog;
mod clock;
mod config;
mod consensus;
mod output;
mod ratelimit;
mod regional;
mod resolver;
mod server;
mod sources;
mod types;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "pricewatch",
    about = "Resolve subscription service pricing from layered sources, or serve the pricing API"
)]
struct Args {
    /// Path to config YAML file
    #[arg(short, long, default_value = "pricewatch.yaml")]
    config: PathBuf,

    /// Country code (ISO 3166-1 alpha-2)
    #[arg(long, default_value = "US")]
    country: String,

    /// Resolve a single service instead of refreshing all supported ones
    #[arg(short, long)]
    service: Option<String>,

    /// Output format: "table" (default) or "json"
    #[arg(short, long, default_value = "table")]
    output: String,

    /// Run the HTTP API instead of a one-shot resolution
    #[arg(long)]
    serve: bool,

    /// Port for --serve (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Credential for the live pricing API source
    #[arg(long, env = "PRICING_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut cfg = config::Config::load_or_default(&args.config)
        .with_context(|| format!("loading config from {}", args.config.display()))?;
    cfg.sources.api.credential = args.api_key.clone();

    let country = args.country.to_uppercase();

    let client = reqwest::Client::builder()
        .user_agent("pricewatch/0.1")
        .build()
        .context("building HTTP client")?;

    let clock: Arc<dyn clock::Clock> = Arc::new(clock::SystemClock);
    let registry = sources::SourceRegistry::new(client.clone(), &cfg.sources);
    info!("Registered {} pricing source(s)", registry.source_count());

    let resolver = resolver::PricingResolver::new(
        registry,
        Box::new(cache::MemoryStore::new()),
        clock.clone(),
        &cfg.resolver,
    );

    if args.serve {
        let state = server::AppState {
            resolver: Arc::new(resolver),
            board: Arc::new(consensus::ReportBoard::simulated(clock.clone())),
            scraper: Arc::new(sources::scraping::ScrapingSource::new(client)),
            clock,
        };
        let port = args.port.unwrap_or(cfg.server.port);
        return server::serve(state, port).await;
    }

    let quotes = match &args.service {
        Some(service) => match resolver.resolve(service, &country).await {
            Some(quote) => vec![quote],
            None => return print_offline_estimate(service, &country),
        },
        None => resolver.refresh_all(&country).await,
    };

    match args.output.as_str() {
        "json" => output::print_json(&quotes)?,
        _ => output::print_table(&quotes),
    }

    Ok(())
}

/// A service outside the live-pricing set still gets a localized estimate
/// when the tracking catalog knows its base cost.
fn print_offline_estimate(service: &str, country: &str) -> Result<()> {
    let Some(base_cost) = catalog::popular_base_cost(service) else {
        anyhow::bail!(
            "{} is not supported for live pricing; enter its price manually",
            service
        );
    };

    let currency = regional::currency_for_country(country);
    let localized = regional::regional_price(service, base_cost, country, currency);
    let estimate = regional::round_for_currency(localized, currency);

    println!(
        "{} is not supported for live pricing.",
        regional::localized_service_name(service, country)
    );
    println!(
        "Catalog estimate for {} ({}): {}",
        country,
        regional::currency_name(currency),
        regional::format_currency(estimate, currency, regional::currency_symbol(currency))
    );
    Ok(())
}
