use axum::serve;
use chirp_rest::api::routes::create_router;
use chirp_rest::config::AppConfig;
use chirp_rest::seed;
use chirp_rest::store::MemoryStore;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new().filter_level(LevelFilter::Info).init();

    // Load configuration
    let config = AppConfig::load()?;
    log::info!(
        "configuration loaded: server={}:{}",
        config.server.host,
        config.server.port
    );

    // In-memory store: every start begins from the demo dataset
    let store = Arc::new(MemoryStore::new());
    seed::load_seed_data(&*store).await?;

    let app = create_router().with_state(store);

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("chirp-rest listening on http://{}", bind_address);

    serve(listener, app).await?;

    Ok(())
}
