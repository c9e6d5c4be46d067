// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP request handlers module
//!
//! Handlers are a thin pass-through: they parse the path and query, call the
//! aggregator, record metrics, and let [`ServerError`] map failures onto statuses.

use std::time::Instant;

use axum::{
    Json,
    extract::{Path, State},
};
use shared_types::{Article, Provider, User};
use social_client::SocialError;

use crate::{
    error::ServerError,
    extractors::{ListQuery, QueryExtractor, SourceQuery},
    metrics,
    state::{HealthCheck, ServerState},
};

/// Run a social operation, recording request and duration metrics
async fn tracked<T>(
    operation: &'static str,
    source: Option<Provider>,
    call: impl Future<Output = Result<T, SocialError>>,
) -> Result<T, ServerError> {
    metrics::inc_requests(operation, source);
    let started = Instant::now();
    let result = call.await;

    let label = match &result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    metrics::observe_request_duration(operation, label, started.elapsed().as_secs_f64());

    result.map_err(ServerError::from)
}

/// Health check endpoint handler
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Health check endpoint",
    description = "Returns the service status, version, environment, and the configured providers in fallback order.",
    responses(
        (status = 200, description = "Service health report", body = HealthCheck)
    )
)]
pub async fn health_handler(State(state): State<ServerState>) -> Json<HealthCheck> {
    Json(state.health_check())
}

/// Get a user profile
#[utoipa::path(
    get,
    path = "/api/v1/user/{user_id}",
    tag = "users",
    summary = "Get a user profile",
    description = "Resolves a user by numeric id or handle. With `source` only that provider is queried; without it providers are tried in fallback order.",
    params(
        ("user_id" = String, Path, description = "Numeric id or handle"),
        SourceQuery
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User does not exist", body = String),
        (status = 422, description = "Invalid query parameters", body = String),
        (status = 500, description = "Provider failure", body = String)
    )
)]
pub async fn get_user_handler(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
    QueryExtractor(query): QueryExtractor<SourceQuery>,
) -> Result<Json<User>, ServerError> {
    let user = tracked(
        "get_user",
        query.source,
        state.aggregator().get_user(&user_id, query.source),
    )
    .await?;
    Ok(Json(user))
}

/// Get a user's recent posts
#[utoipa::path(
    get,
    path = "/api/v1/user/{user_id}/article",
    tag = "users",
    summary = "Get a user's posts",
    description = "Returns at most `count` of the user's most recent posts.",
    params(
        ("user_id" = String, Path, description = "Numeric id or handle"),
        ListQuery
    ),
    responses(
        (status = 200, description = "Posts, newest first", body = [Article]),
        (status = 404, description = "User does not exist", body = String),
        (status = 422, description = "Invalid query parameters", body = String),
        (status = 500, description = "Provider failure", body = String)
    )
)]
pub async fn get_articles_handler(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
    QueryExtractor(query): QueryExtractor<ListQuery>,
) -> Result<Json<Vec<Article>>, ServerError> {
    let articles = tracked(
        "get_articles",
        query.source,
        state
            .aggregator()
            .get_articles(&user_id, query.count.value(), query.source),
    )
    .await?;
    Ok(Json(articles))
}

/// Get a user's friends
#[utoipa::path(
    get,
    path = "/api/v1/user/{user_id}/friend",
    tag = "users",
    summary = "Get a user's friends",
    description = "Returns at most `count` accounts the user is connected to.",
    params(
        ("user_id" = String, Path, description = "Numeric id or handle"),
        ListQuery
    ),
    responses(
        (status = 200, description = "Friends", body = [User]),
        (status = 404, description = "User does not exist", body = String),
        (status = 422, description = "Invalid query parameters", body = String),
        (status = 500, description = "Provider failure", body = String)
    )
)]
pub async fn get_friends_handler(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
    QueryExtractor(query): QueryExtractor<ListQuery>,
) -> Result<Json<Vec<User>>, ServerError> {
    let friends = tracked(
        "get_friends",
        query.source,
        state
            .aggregator()
            .get_friends(&user_id, query.count.value(), query.source),
    )
    .await?;
    Ok(Json(friends))
}

/// Get a user's followers
#[utoipa::path(
    get,
    path = "/api/v1/user/{user_id}/follower",
    tag = "users",
    summary = "Get a user's followers",
    description = "Returns at most `count` accounts following the user.",
    params(
        ("user_id" = String, Path, description = "Numeric id or handle"),
        ListQuery
    ),
    responses(
        (status = 200, description = "Followers", body = [User]),
        (status = 404, description = "User does not exist", body = String),
        (status = 422, description = "Invalid query parameters", body = String),
        (status = 500, description = "Provider failure", body = String)
    )
)]
pub async fn get_followers_handler(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
    QueryExtractor(query): QueryExtractor<ListQuery>,
) -> Result<Json<Vec<User>>, ServerError> {
    let followers = tracked(
        "get_followers",
        query.source,
        state
            .aggregator()
            .get_followers(&user_id, query.count.value(), query.source),
    )
    .await?;
    Ok(Json(followers))
}
