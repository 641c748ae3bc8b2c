use std::sync::Arc;

use capex_core::{
    fx::FxService,
    projects::{ProjectService, ProjectServiceTrait},
};
use capex_market_data::{ExchangeRateApiProvider, ExchangeRateProvider};
use capex_storage_sqlite::{db, projects::ProjectRepository, QueryExecutor};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub project_service: Arc<dyn ProjectServiceTrait>,
    pub executor: Arc<dyn QueryExecutor>,
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_current_span(false))
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = ExchangeRateApiProvider::with_timeout(
        config.rates_base_url.clone(),
        config.rates_api_key.clone(),
        config.rates_timeout,
    );
    build_state_with_provider(config, Arc::new(provider)).await
}

/// Wires storage and services around the given rate source.
pub async fn build_state_with_provider(
    config: &Config,
    provider: Arc<dyn ExchangeRateProvider>,
) -> anyhow::Result<Arc<AppState>> {
    let executor = db::open(&config.db_engine)?;
    db::run_migrations(executor.as_ref()).await?;
    tracing::info!("Storage ready ({:?})", config.db_engine);

    let project_repo = Arc::new(ProjectRepository::new(executor.clone()));
    let fx_service = Arc::new(FxService::new(provider));
    let project_service = Arc::new(ProjectService::new(project_repo, fx_service));

    Ok(Arc::new(AppState {
        project_service,
        executor,
    }))
}
