use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use breathe::config::ContentSource;
use breathe::content::{ContentCatalog, TaskType};
use breathe::notify::{ConsoleNotifier, Notifier, TracingNotifier};
use breathe::stats::{DurableStore, FileStore, MemoryStore, StatsRepository};
use breathe::{App, Config, TaskSessionEngine, app::view};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "breathe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Read content from this directory instead of the configured source
    #[arg(long, global = true, conflicts_with = "api_url")]
    content_dir: Option<PathBuf>,

    /// Fetch content from this backend instead of the configured source
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Seed for task selection
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Keep stats in memory only
    #[arg(long, global = true)]
    ephemeral: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show lifetime stats
    Stats,
    /// Clear lifetime stats
    ResetStats,
    /// Load the content pools and report their sizes
    Catalog,
}

impl Cli {
    fn content_source(&self, config: &Config) -> ContentSource {
        if let Some(path) = &self.content_dir {
            ContentSource::Directory { path: path.clone() }
        } else if let Some(base_url) = &self.api_url {
            ContentSource::Api { base_url: base_url.clone() }
        } else {
            config.content.clone()
        }
    }

    fn store(&self) -> Result<Box<dyn DurableStore>> {
        if self.ephemeral {
            Ok(Box::new(MemoryStore::default()))
        } else {
            Ok(Box::new(FileStore::new(Config::store_dir()?)))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "breathe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match &cli.command {
        Some(Commands::Stats) => {
            let mut repository = StatsRepository::new(cli.store()?);
            println!("{}", view::stats(&repository.load_stats()));
        }
        Some(Commands::ResetStats) => {
            let mut engine = TaskSessionEngine::new(cli.store()?, Box::new(TracingNotifier));
            engine.reset_stats()?;
            println!("Lifetime stats cleared.");
        }
        Some(Commands::Catalog) => {
            let provider = cli.content_source(&config).provider()?;
            let catalog = ContentCatalog::load(provider.as_ref()).await?;
            println!("quizzes: {}", catalog.pool_size(TaskType::Quiz));
            println!("tips:    {}", catalog.pool_size(TaskType::Tip));
        }
        None => {
            let notifier: Box<dyn Notifier> =
                if config.show_notices { Box::new(ConsoleNotifier) } else { Box::new(TracingNotifier) };
            let rng = cli.seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
            let engine = TaskSessionEngine::with_rng(cli.store()?, notifier, rng);
            let provider = Arc::from(cli.content_source(&config).provider()?);

            let (app, loads) = App::new(engine, provider);
            app.run(loads).await?;
        }
    }

    Ok(())
}
