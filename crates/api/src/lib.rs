// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Social API Server Implementation
//!
//! This crate provides the HTTP server that exposes user profiles, posts, and social
//! graphs from VK and Twitter behind one interface, built with Axum.
//!
//! # Module Structure
//!
//! - [`config`]: Server and provider configuration with hierarchical loading
//! - [`error`]: Error types and HTTP response mapping
//! - [`extractors`]: Query extraction with `422` rejections
//! - [`state`]: Shared application state with cancellation token support
//! - [`server`]: Server lifecycle and coordinated shutdown
//! - [`routes`]: Route configuration and HTTP request handlers
//! - [`middleware`]: Per-route response metrics
//! - [`metrics`]: Prometheus metrics and the `/metrics` handler
//! - [`docs`], [`openapi`]: `OpenAPI` document and Swagger UI
//!
//! # Key Features
//!
//! - **Provider Fallback**: Requests without a `source` try each configured provider in order
//! - **Graceful Shutdown**: Coordinated termination using `CancellationToken` with a drain timeout
//! - **Health Monitoring**: Reports every configured provider and proxy usage
//! - **Request Tracing**: `x-request-id` set and propagated on every request

pub mod config;
pub mod docs;
pub mod error;
pub mod extractors;
pub mod metrics;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{Environment, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::{Server, ShutdownConfig};
pub use state::{HealthCheck, ServerState, SocialAggregator};
