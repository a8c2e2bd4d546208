//! Veracity: fact-or-fiction trivia backend.
//!
//! Serves trivia statements that may have been subtly falsified by a
//! generative model, and tracks per-user answer streaks in an external
//! profile store.

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use veracity_facts::{FactPresenter, FactSource, Falsifier};
use veracity_store::StoreClient;
use veracity_web::create_router;

const DEFAULT_FACTS_URL: &str = "https://api.api-ninjas.com";
const DEFAULT_GENERATIVE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Parser)]
#[command(name = "veracity")]
#[command(about = "Fact-or-fiction trivia backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Bind address
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,

        /// HTTP server port
        #[arg(long, default_value = "8080")]
        port: u16,

        /// API key for the facts source
        #[arg(long, env = "FACTS_API_KEY")]
        facts_api_key: String,

        /// Facts API base URL
        #[arg(long, env = "FACTS_API_URL", default_value = DEFAULT_FACTS_URL)]
        facts_api_url: String,

        /// API key for the generative falsifier
        #[arg(long, env = "GEMINI_API_KEY")]
        gemini_api_key: String,

        /// Generative API base URL
        #[arg(long, env = "GEMINI_API_URL", default_value = DEFAULT_GENERATIVE_URL)]
        gemini_api_url: String,

        /// Profile store URL
        #[arg(long, env = "SUPABASE_URL")]
        store_url: String,

        /// Profile store public API key
        #[arg(long, env = "SUPABASE_ANON_KEY")]
        store_api_key: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "veracity=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            port,
            facts_api_key,
            facts_api_url,
            gemini_api_key,
            gemini_api_url,
            store_url,
            store_api_key,
        } => {
            let presenter = FactPresenter::new(
                FactSource::new(facts_api_url, facts_api_key),
                Falsifier::new(gemini_api_url, gemini_api_key),
            );
            let store = StoreClient::new(store_url, store_api_key);
            let router = create_router(presenter, store);

            let addr = format!("{}:{}", bind, port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .into_diagnostic()?;
            info!(addr = %addr, "veracity listening");

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await
                .into_diagnostic()?;

            Ok(())
        }
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
