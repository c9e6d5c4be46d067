// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Routes module
//!
//! This module provides route configuration and handlers for the social API server.

pub mod handlers;

use axum::{Router, middleware, routing::get};
use handlers::{
    get_articles_handler, get_followers_handler, get_friends_handler, get_user_handler,
    health_handler,
};

use crate::{
    metrics::metrics_handler,
    middleware::http_metrics_middleware,
    openapi::{OPENAPI_PATH, SWAGGER_UI_PATH, openapi_spec, swagger_ui},
    state::ServerState,
};

/// Create application routes
pub fn create_routes() -> Router<ServerState> {
    let ops_routes = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler));

    let docs_routes = Router::new()
        .route(OPENAPI_PATH, get(openapi_spec))
        .route(SWAGGER_UI_PATH, get(swagger_ui));

    let user_routes = Router::new()
        .route("/user/{user_id}", get(get_user_handler))
        .route("/user/{user_id}/article", get(get_articles_handler))
        .route("/user/{user_id}/friend", get(get_friends_handler))
        .route("/user/{user_id}/follower", get(get_followers_handler))
        .route_layer(middleware::from_fn(http_metrics_middleware));

    let v1 = Router::new().nest("/api/v1", user_routes);

    Router::new()
        .merge(ops_routes)
        .merge(docs_routes)
        .merge(v1)
}
