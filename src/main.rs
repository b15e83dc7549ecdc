//! Loanbook service binary.
//!
//! Wires the PostgreSQL adapters into the lending router and serves it.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use loanbook::adapters::document::StaticAgreementLetterService;
use loanbook::adapters::http::lending::{lending_router, LendingAppState};
use loanbook::adapters::postgres::{
    PostgresInvestmentRepository, PostgresLoanProductRepository, PostgresLoanRepository,
    PostgresPartyRepository,
};
use loanbook::application::LoanLocks;
use loanbook::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let parties = Arc::new(PostgresPartyRepository::new(pool.clone()));
    let state = LendingAppState {
        loans: Arc::new(PostgresLoanRepository::new(pool.clone())),
        investments: Arc::new(PostgresInvestmentRepository::new(pool.clone())),
        loan_products: Arc::new(PostgresLoanProductRepository::new(pool)),
        users: parties.clone(),
        employees: parties.clone(),
        investors: parties,
        agreement_letters: Arc::new(StaticAgreementLetterService::default()),
        loan_locks: Arc::new(LoanLocks::new()),
    };

    let cors = build_cors_layer(&config);

    let app = lending_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "loanbook listening");

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = config.server.cors_origins_list();
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    layer.allow_origin(origins)
}
