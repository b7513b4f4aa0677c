use std::env;
use std::process::ExitCode;

use anyhow::Result;
use wayfarer_api::build_app;
use wayfarer_llm::ModelSettings;
use wayfarer_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing("wayfarer_api");

    let settings = match ModelSettings::load(None) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("⚠️ {err}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let bind = env::var("WAYFARER_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let app = build_app(&settings)?;

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(bind = %bind, model = %settings.model, "wayfarer api started");

    axum::serve(listener, app).await?;
    Ok(ExitCode::SUCCESS)
}
