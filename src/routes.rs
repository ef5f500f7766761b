// src/routes.rs

use axum::{
    Router,
    http::Method,
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{assignment, leaderboard, submission},
    state::AppState,
    utils::guard::api_guard,
};

/// Assembles the main application router.
///
/// * Mounts the game client API under `/api`, behind the access guard.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool, Config).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/assignments/{id}", get(assignment::get_assignment))
        .route("/submit/{assignment_id}", post(submission::submit_assignment))
        .route(
            "/leaderboard/{class_code}",
            get(leaderboard::get_class_leaderboard),
        )
        .layer(middleware::from_fn_with_state(state.clone(), api_guard));

    Router::new()
        .nest("/api", api_routes)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
