mod catalog;
mod config;
mod geometry;
mod outcome;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env();

    // A broken custom catalogue is fatal: every placement depends on it.
    let catalog = config.load_catalog().inspect_err(|e| {
        tracing::error!(error = %e, "catalog load failed");
    })?;
    let source = config
        .catalog_path
        .as_deref()
        .map_or_else(|| "builtin".to_string(), |p| p.display().to_string());
    tracing::info!(types = catalog.len(), %source, "catalog loaded");

    let state = state::AppState::new(catalog);
    let app = routes::app(state, config.static_dir.as_deref());

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(%addr, "map editor listening");
    axum::serve(listener, app).await?;
    Ok(())
}
