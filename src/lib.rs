pub(crate) mod controllers;
pub(crate) mod core;
pub(crate) mod routes;
pub(crate) mod store;
pub(crate) mod types;
pub(crate) mod utils;

use config::Config;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::core::error::ConfigError as Error;
use crate::core::{config::Args, state::AppState};
use crate::store::postgres::PgStore;

pub async fn run() -> Result<(), Error> {
    let config = Config::builder()
        .add_source(config::File::with_name("gitkeys").required(false))
        .add_source(config::Environment::with_prefix("GITKEYS"))
        .build()
        .map_err(Error::Config)?;

    let config = config.try_deserialize::<Args>().map_err(Error::Config)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_new(&config.log_level).unwrap_or_default())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = PgStore::connect(&config.database_url(), config.database_max_connections).await?;

    store.migrate().await?;

    let app = routes::router::routes(AppState::new(store, &config.secret));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .map_err(Error::IO)?;

    tracing::debug!("listening on port {}", config.port);

    axum::serve(listener, app).await.map_err(Error::IO)?;

    Ok(())
}
