use tracing::info;

use crate::api;
use crate::errors::SitescopeError;

use super::commands::ServeArgs;
use super::load_config;

pub async fn handle_serve(args: ServeArgs) -> Result<(), SitescopeError> {
    info!(host = %args.host, port = args.port, "Starting API server");

    let config = load_config(args.config.as_deref()).await?;
    let state = api::create_app_state(&args.db, &config)?;
    let app = api::build_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| SitescopeError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
