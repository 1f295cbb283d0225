use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bus_arrivals::cache::{CacheConfig, CachedArrivalFeed};
use bus_arrivals::domain::StationCatalog;
use bus_arrivals::output::{OutputFormat, render};
use bus_arrivals::pipeline::{ArrivalPipeline, ArrivalProvider, FilterPolicy, PipelineConfig};
use bus_arrivals::seoul::{MockArrivalFeed, SeoulBusClient, SeoulBusConfig};
use bus_arrivals::stations::load_catalog;

/// Exit code for bad configuration (missing key, bad flags, unusable catalog).
const EXIT_CONFIG: u8 = 2;

#[derive(Parser)]
#[command(name = "bus-arrivals")]
#[command(about = "Sample random Seoul bus routes and list buses arriving soon", long_about = None)]
struct Cli {
    /// Route catalog (JSON)
    #[arg(short, long, default_value = "data/catalog_sample.json")]
    catalog: PathBuf,

    /// Routes drawn per sampling attempt
    #[arg(short = 'k', long, default_value_t = 3)]
    sample_size: usize,

    /// Give up after this many samples with no data
    #[arg(long, default_value_t = 20)]
    max_attempts: usize,

    /// Keep buses whose both ETAs are below this many seconds
    #[arg(long, default_value_t = 300)]
    eta_threshold: u32,

    /// Fetch sampled routes one after another instead of concurrently
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// Serve arrivals from recorded XML responses in this directory
    #[arg(long)]
    mock_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Seoul open API service key
    #[arg(long, env = "SERVICE_KEY", hide_env_values = true)]
    service_key: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let catalog = match load_catalog(&cli.catalog) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!(path = %cli.catalog.display(), error = %e, "failed to load route catalog");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let config = PipelineConfig {
        sample_size: cli.sample_size,
        max_attempts: cli.max_attempts,
        concurrent_fetch: !cli.sequential,
        filter: FilterPolicy {
            eta_threshold_secs: cli.eta_threshold,
            ..FilterPolicy::default()
        },
    };
    if let Err(e) = config.validate() {
        error!(error = %e, "invalid configuration");
        return ExitCode::from(EXIT_CONFIG);
    }

    if let Some(dir) = &cli.mock_dir {
        let feed = match MockArrivalFeed::new(dir) {
            Ok(feed) => feed,
            Err(e) => {
                error!(dir = %dir.display(), error = %e, "failed to load mock feed");
                return ExitCode::from(EXIT_CONFIG);
            }
        };
        info!(dir = %dir.display(), "using mock arrival feed");
        return run(&feed, &catalog, &config, cli.format).await;
    }

    let Some(service_key) = cli.service_key else {
        error!("SERVICE_KEY not set; pass --service-key, export it, or add it to .env");
        return ExitCode::from(EXIT_CONFIG);
    };

    let client = match SeoulBusClient::new(SeoulBusConfig::new(service_key).with_timeout(cli.timeout))
    {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to create arrival feed client");
            return ExitCode::from(EXIT_CONFIG);
        }
    };
    let feed = CachedArrivalFeed::new(client, &CacheConfig::default());

    run(&feed, &catalog, &config, cli.format).await
}

async fn run<P: ArrivalProvider>(
    feed: &P,
    catalog: &StationCatalog,
    config: &PipelineConfig,
    format: OutputFormat,
) -> ExitCode {
    info!(routes = catalog.len(), sample_size = config.sample_size, "sampling routes");

    let pipeline = ArrivalPipeline::new(feed, catalog, config);
    let outcome = match pipeline.run(&mut rand::rng()).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(error = %e, "pipeline failed");
            return ExitCode::FAILURE;
        }
    };

    match render(&outcome, format, Local::now().fixed_offset()) {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "failed to render output");
            ExitCode::FAILURE
        }
    }
}
