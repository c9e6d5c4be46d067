// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Provider-agnostic domain records
//!
//! Every provider response is normalized into one of these shapes before it
//! leaves the provider layer, so callers never see provider wire formats.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A social network user profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Numeric identity within the source provider
    #[schema(example = 12345)]
    pub id: i64,
    /// Handle used in profile URLs
    #[schema(example = "ann")]
    pub screen_name: String,
    /// Display name
    #[schema(example = "Ann")]
    pub name: String,
    /// Number of followers
    pub followers_count: u64,
    /// Number of friends (accounts followed, or mutual friends for VK)
    pub friends_count: u64,
    /// Profile image URL
    #[schema(example = "https://example.com/ann.jpg")]
    pub image_url: String,
    /// Free-form profile description, empty when the provider has none
    pub description: String,
}

/// A post published by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Article {
    /// Numeric identity within the source provider
    pub id: i64,
    /// Post body
    pub text: String,
    /// Likes (VK) or favorites (Twitter)
    pub likes_count: u64,
    /// Comments, zero when the provider does not expose them
    pub comments_count: u64,
    /// VK reposts, zero for Twitter
    pub reposts_count: u64,
    /// Twitter retweets, zero for VK
    pub retweet_count: u64,
}
