use aj_core::{ArticleStorage, HeadlineProvider, ImageProvider, MessagingApi, TextGenerator};
use aj_pipeline::{Coordinator, PipelineConfig, ScheduleConfig, Scheduler};
use aj_services::{NewsApiClient, TelegramClient, UnsplashClient};
use aj_storage::MemoryStorage;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(
        long,
        default_value = "gemini",
        help = "Generator model. Available models: gemini (default), template (offline)"
    )]
    model: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Start the HTTP API together with the content scheduler
    Serve {
        #[arg(long, default_value = "0.0.0.0:5000")]
        addr: String,
    },
    /// Execute a single pipeline run and exit
    Run,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = PipelineConfig::from_env();

    let storage: Arc<dyn ArticleStorage> = Arc::new(MemoryStorage::with_seed_data().await);
    info!("💾 Storage initialized (memory backend)");

    let generator = aj_inference::create_model(aj_inference::Config {
        api_key: std::env::var("GEMINI_API_KEY").ok(),
        model_name: Some(cli.model.clone()),
        base_url: None,
    })?;
    info!("🧠 Generator initialized (using {})", generator.name());

    let images: Arc<dyn ImageProvider> = Arc::new(UnsplashClient::from_env());
    let headlines: Arc<dyn HeadlineProvider> = Arc::new(NewsApiClient::from_env());
    let messaging: Arc<dyn MessagingApi> = Arc::new(TelegramClient::from_env());
    if config.chat_id.is_empty() {
        warn!("⚠️ TELEGRAM_CHAT_ID is not set; channel posts will fail and be logged");
    }

    let chat_id = config.chat_id.clone();
    let coordinator = Arc::new(Coordinator::new(
        storage.clone(),
        generator,
        images,
        headlines,
        messaging.clone(),
        config,
    ));

    match cli.command {
        Commands::Run => {
            info!("🚀 Executing a single pipeline run");
            let outcome = coordinator.run_once().await;
            info!(outcome = ?outcome, "Run finished");
        }
        Commands::Serve { addr } => {
            let _scheduler =
                Scheduler::new(coordinator, messaging, ScheduleConfig::default(), chat_id).spawn();

            let app = aj_web::create_app(aj_web::AppState { storage }).await;
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            info!(addr = %addr, "🌐 HTTP API listening");
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
