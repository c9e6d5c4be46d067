// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! `OpenAPI` document definition

use shared_types::{Article, Provider, User};
use utoipa::OpenApi;

use crate::{
    config::Environment,
    routes::handlers,
    state::{HealthCheck, HealthStatus, ProviderHealth},
};

/// `OpenAPI` document for the social API
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Social API",
        description = "Unified access to user profiles, posts, and social graphs across VK and Twitter."
    ),
    paths(
        handlers::health_handler,
        handlers::get_user_handler,
        handlers::get_articles_handler,
        handlers::get_friends_handler,
        handlers::get_followers_handler,
    ),
    components(schemas(
        User,
        Article,
        Provider,
        HealthCheck,
        HealthStatus,
        ProviderHealth,
        Environment
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "users", description = "User profiles, posts, and social graph")
    )
)]
pub struct ApiDoc;
