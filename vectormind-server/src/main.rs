use std::sync::Arc;

use clap::Parser;
use tokio::sync::broadcast;
use tracing_subscriber::{fmt, EnvFilter};
use vectormind_core::VectorMindConfig;

use vectormind_server::http::{self, HttpState};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "vectormind.toml")]
    config: String,

    #[arg(long)]
    health: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience; production uses real env vars)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Init logging
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    // Load config
    let config = match VectorMindConfig::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", args.config, e);
            std::process::exit(1);
        }
    };

    // Connect to DB and apply migrations
    let pool = match vectormind_core::db::connect(&config.database).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to open database {}: {}", config.database.url, e);
            std::process::exit(1);
        }
    };
    tracing::info!(url = %config.database.url, "database ready");

    if args.health {
        match vectormind_core::db::health_check(&pool).await {
            Ok(v) => println!("✅ SQLite connected: {}", v),
            Err(e) => {
                println!("❌ SQLite check failed: {}", e);
                std::process::exit(1);
            }
        }

        if config.provider.is_live() {
            println!("✅ Provider key configured, model {}", config.provider.model);
        } else {
            println!("⚠️  No provider key configured, endpoints will serve mock responses");
        }

        println!("✅ VectorMind health check passed");
        return Ok(());
    }

    let assistant = vectormind_core::create_assistant(&config.provider)?;
    tracing::info!(
        backend = assistant.name(),
        model = %config.provider.model,
        "assistant backend selected"
    );

    let (tx, _rx) = broadcast::channel(1);
    let shutdown_tx = tx.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(());
    });

    let state = Arc::new(HttpState {
        pool,
        config,
        assistant,
    });

    http::start_http_server(state, tx.subscribe()).await?;

    Ok(())
}
