use std::sync::Arc;

use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config;
use crate::todo::api::{TodoState, create_todo_router};
use crate::todo::store::TodoStore;

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: config::Config) -> anyhow::Result<()> {
    use axum::Router;

    let server_address = format!("0.0.0.0:{}", &config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Server running at http://{}", server_address);
    tracing::info!("API available at http://{}/api/todos", server_address);

    let store = TodoStore::new(&config.data_file);
    // Bootstrap the snapshot file up front so a fresh deployment starts
    // from an empty collection rather than failing its first read.
    store.load()?;
    let todo_state = Arc::new(TodoState { store });

    let todo_router = create_todo_router(todo_state);

    let app = Router::new()
        .route("/health", axum::routing::get(health_check_handler))
        .nest("/api", todo_router)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    axum::serve(listener, app).await?;
    Ok(())
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}
