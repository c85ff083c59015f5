use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use tripplanner::api::AppState;
use tripplanner::{web, PdfExporter, TripPlanner, TripPlannerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = TripPlannerConfig::load()?;
    init_tracing(&config);

    tracing::info!(
        version = tripplanner::VERSION,
        model = %config.llm.model,
        "Starting trip planner"
    );

    let port = config.server.port;
    let exporter = Arc::new(PdfExporter::new(&config.pdf));
    let planner = Arc::new(TripPlanner::new(config)?);

    web::run(AppState { planner, exporter }, port).await
}

fn init_tracing(config: &TripPlannerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
