pub mod errors;
pub mod routes;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::SitescopeConfig;
use crate::errors::SitescopeError;
use crate::store::ReportStore;
use crate::tasks::{spawn_delivery_consumer, Analyzers, TaskQueue};

#[derive(Clone)]
pub struct AppState {
    pub store: ReportStore,
    pub queue: TaskQueue,
}

pub fn create_app_state(
    db_path: &str,
    config: &SitescopeConfig,
) -> Result<AppState, SitescopeError> {
    let store = ReportStore::new(db_path)?;
    let analyzers = Analyzers::from_config(config)?;
    let (queue, delivery_rx) = TaskQueue::new(store.clone(), analyzers);
    spawn_delivery_consumer(delivery_rx);
    Ok(AppState { store, queue })
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", axum::routing::get(routes::health::health_check))
        .route(
            "/api/reports",
            axum::routing::post(routes::reports::create_report)
                .get(routes::reports::list_reports),
        )
        .route("/api/reports/{id}", axum::routing::get(routes::reports::get_report))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
