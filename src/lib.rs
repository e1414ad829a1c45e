pub mod api;
pub mod config;
pub mod errors;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

// Export the pipeline stages and the write-path validator
pub use errors::PipelineError;
pub use logic::{
    annotate_list, annotate_record, project_list, project_record, requested_fields,
    search_records, Check, Expander, HrefBase, PageWindow, Validator,
};

// Export all model types
pub use model::*;

// Export store types
pub use store::{MemoryStore, Store};

// Function for integration testing
pub async fn run_server() -> anyhow::Result<()> {
    use axum::serve;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize logging with INFO level only (suppress DEBUG logs)
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    // Load configuration
    let config = crate::config::AppConfig::load()?;

    // The store is in memory: every start begins from the demo dataset
    let store = Arc::new(crate::store::MemoryStore::new());
    crate::seed::load_seed_data(&*store).await?;

    // Create router with state
    let app = crate::api::routes::create_router().with_state(store);

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;

    serve(listener, app).await?;

    Ok(())
}
