// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Social network API integrations
//!
//! This crate provides implementations of the `SocialClient` trait for the supported
//! providers, together with the factory and fallback logic the HTTP layer sits on.
//!
//! # Architecture
//!
//! - **Client Implementations**: [`vk`], [`twitter`] - provider-specific requests,
//!   error classification, and field-mapping tables
//! - **Request Signing**: [`oauth`] - OAuth 1.0a HMAC-SHA1 for Twitter
//! - **Factory**: [`factory::DefaultClientFactory`] - builds a client per provider from
//!   static configuration
//! - **Aggregation**: [`aggregator::Aggregator`] - explicit provider delegation or
//!   ordered fallback across providers
//! - **Validation Utilities**: [`non_empty_string::NonEmptyString`] - rejects blank
//!   credentials and hosts

pub mod aggregator;
pub mod factory;
pub mod http;
pub mod non_empty_string;
pub mod oauth;
pub mod twitter;
pub mod vk;

pub use aggregator::Aggregator;
pub use factory::{AnyClient, ClientFactory, DefaultClientFactory, ProvidersConfig};
pub use http::ProxyConfig;
pub use non_empty_string::NonEmptyString;
pub use oauth::OAuthCredentials;
pub use twitter::{TWITTER_BASE_URL, TwitterClient, TwitterConfig, TwitterError};
pub use vk::{VK_BASE_URL, VkClient, VkConfig, VkError};
