mod handlers;
mod middleware;

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub use middleware::{RateLimiter, SecurityConfig};

use crate::gateway::Gateway;
use crate::store::ChecklistStore;

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: ChecklistStore,
    pub gateway: Arc<dyn Gateway>,
}

impl AppState {
    pub fn new(store: ChecklistStore, gateway: Arc<dyn Gateway>) -> Self {
        Self { store, gateway }
    }
}

/// Router with no authentication, rate limiting or CORS restrictions.
pub fn create_router(state: AppState) -> Router {
    create_router_with_security(state, SecurityConfig::disabled())
}

pub fn create_router_with_security(state: AppState, security: SecurityConfig) -> Router {
    let mut api = Router::new()
        // Parsing
        .route("/parse", post(handlers::parse))
        // Checklists
        .route("/checklists", get(handlers::list_checklists))
        .route("/checklists", post(handlers::create_checklist))
        .route("/checklists/{id}", get(handlers::get_checklist))
        .route("/checklists/{id}", delete(handlers::delete_checklist))
        // Tasks
        .route("/checklists/{id}/tasks", post(handlers::add_task))
        .route(
            "/checklists/{id}/tasks/{task_id}/toggle",
            post(handlers::toggle_task_expanded),
        )
        // Subtasks
        .route(
            "/checklists/{id}/tasks/{task_id}/subtasks/{subtask_id}/toggle",
            post(handlers::toggle_subtask),
        )
        // Health
        .route("/health", get(handlers::health));

    // The last layer added runs first, so rate limiting wraps authentication.
    if security.api_key.is_some() {
        api = api.layer(axum::middleware::from_fn_with_state(
            security.clone(),
            middleware::auth_middleware,
        ));
    }
    if let Some(limiter) = security.rate_limiter.clone() {
        api = api.layer(axum::middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    let cors = match &security.cors_origins {
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| match o.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin: {}", o);
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => CorsLayer::permissive(),
    };

    Router::new()
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
