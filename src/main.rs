use clap::{Parser, Subcommand};
use mediveri::app::{ReviewUseCase, ValidateUseCase};
use mediveri::config::Config;
use mediveri::ingest::synthetic::generate_providers;
use mediveri::observability::logging::init_logging;
use mediveri::pipeline::confidence::UniformFallback;
use mediveri::pipeline::ValidationPipeline;
use mediveri::registry::{NpiRegistryClient, RegistryPort, StaticRegistry};
use mediveri::storage::{InMemoryStorage, Storage};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "mediveri")]
#[command(about = "Provider directory validation pipeline")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed synthetic providers, run the full validation pipeline, and
    /// print the resulting stats and review queue
    Demo {
        /// Number of synthetic providers to seed
        #[arg(long, default_value_t = 200)]
        count: usize,
        /// Query the live NPI registry instead of an offline stub
        #[arg(long)]
        live: bool,
    },
    /// Look up a single NPI against the registry
    Lookup {
        #[arg(long)]
        npi: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Demo { count, live } => run_demo(&config, count, live).await?,
        Commands::Lookup { npi } => {
            let client = NpiRegistryClient::new(&config.registry)?;
            match client.lookup(&npi).await {
                Some(record) => {
                    println!("Registry hit for {}:", npi);
                    println!("{}", serde_json::to_string_pretty(record.as_json())?);
                }
                None => println!("No registry record for {}", npi),
            }
        }
    }

    Ok(())
}

async fn run_demo(config: &Config, count: usize, live: bool) -> anyhow::Result<()> {
    let storage: Arc<dyn Storage> = Arc::new(InMemoryStorage::new());
    let registry: Arc<dyn RegistryPort> = if live {
        Arc::new(NpiRegistryClient::new(&config.registry)?)
    } else {
        Arc::new(StaticRegistry::new())
    };

    info!("Seeding {} synthetic providers", count);
    let providers = generate_providers(count);
    storage.bulk_create_providers(providers).await?;

    let pipeline = ValidationPipeline::new(registry, Arc::new(UniformFallback));
    let validate = ValidateUseCase::new(Arc::clone(&storage), pipeline);
    let report = validate.validate_all().await?;
    println!(
        "Validated {}/{} providers",
        report.processed, report.total
    );

    let stats = storage.dashboard_stats().await?;
    println!(
        "Status: {} verified, {} flagged, {} pending (avg confidence {:.1})",
        stats.verified_providers,
        stats.flagged_providers,
        stats.pending_providers,
        stats.average_confidence
    );

    for bucket in storage.confidence_distribution().await? {
        println!("  {:>8}: {:>4} ({:.1}%)", bucket.range, bucket.count, bucket.percentage);
    }

    let review = ReviewUseCase::new(Arc::clone(&storage));
    let queue = review.pending_queue().await?;
    println!("Review queue: {} pending items", queue.len());
    for item in queue.iter().take(10) {
        println!("  [{:?}] {} - {}", item.priority, item.provider_id, item.reason);
    }

    Ok(())
}
