//! Table viewer server: loads settings and the table registry, connects the MySQL pool, serves the API.

use std::sync::Arc;
use table_viewer::{app, load_from_path, AppState, MySqlStore, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("table_viewer=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    tracing::debug!(?settings, "settings loaded");

    let registry = load_from_path(&settings.tables_config).await?;
    let store = MySqlStore::connect(&settings).await?;

    let state = AppState {
        store: Arc::new(store),
        registry: Arc::new(registry),
        max_page_rows: settings.max_page_rows,
    };
    let app = app(state, settings.body_limit_bytes);

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
