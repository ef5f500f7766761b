// src/utils/guard.rs

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{config::Config, error::AppError};

/// Axum Middleware: API access guard.
///
/// Maintenance mode takes precedence and answers 503 with the configured message.
/// A disabled mobile API also answers 503.
pub async fn api_guard(State(config): State<Config>, req: Request<Body>, next: Next) -> Response {
    let access = &config.access;

    if access.maintenance_mode {
        return AppError::ServiceUnavailable(access.maintenance_message.clone()).into_response();
    }

    if !access.enable_mobile_api {
        return AppError::ServiceUnavailable("Mobile API is disabled by admin".to_string())
            .into_response();
    }

    next.run(req).await
}
