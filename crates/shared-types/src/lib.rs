// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the social aggregation API
//!
//! This crate provides the provider-agnostic domain records and the provider
//! identifier shared across the workspace, avoiding circular dependencies
//! between the client contract, the provider integrations, and the server.

pub mod models;
pub mod provider;

pub use models::{Article, User};
pub use provider::{Provider, ProviderParseError};
