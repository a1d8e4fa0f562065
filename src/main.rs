//! Recipe API: service entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Parse CLI args
//!   3. Load config (file + env overrides)
//!   4. Init logger once (CLI `-v` flags > env > config)
//!   5. Load the lookup tables
//!   6. Build the LLM provider and recipe generator
//!   7. Spawn Ctrl-C → shutdown signal watcher
//!   8. Serve HTTP until shutdown

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use recipe_api::bootstrap::cli;
use recipe_api::catalog::Catalog;
use recipe_api::error::AppError;
use recipe_api::http::{ApiState, HttpServer};
use recipe_api::llm::providers;
use recipe_api::recipes::RecipeGenerator;
use recipe_api::{config, logger};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Load .env if present; the file is optional.
    let _ = dotenvy::dotenv();

    let args = cli::parse(std::env::args().skip(1)).map_err(AppError::Config)?;
    if args.show_help {
        println!("{}", cli::USAGE);
        return Ok(());
    }

    let config = config::load(args.config_path.as_deref())?;

    let effective_log_level = args.log_level.unwrap_or(config.log_level.as_str());
    logger::init(effective_log_level, args.log_level.is_some())?;

    info!(
        bind = %config.server.bind,
        provider = %config.llm.provider,
        model = %config.llm.openai.model,
        debug = config.server.debug,
        log_level = %effective_log_level,
        "config loaded"
    );

    let catalog = Arc::new(Catalog::load(&config.catalog)?);

    let provider = providers::build(&config.llm, config.llm_api_key.clone())
        .map_err(|e| AppError::Config(format!("llm provider: {e}")))?;
    let generator = Arc::new(RecipeGenerator::new(provider, catalog));

    let state = ApiState::new(
        generator,
        config.server.debug,
        config.server.generation_timeout,
    );

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("ctrl-c received, shutting down");
                shutdown.cancel();
            }
        });
    }

    HttpServer::new(config.server.bind.clone(), state)
        .run(shutdown)
        .await
}
