// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! VK API integration
//!
//! This module provides an implementation of the `SocialClient` trait for the VK REST
//! API. VK authenticates with an `access_token` query parameter and reports most
//! failures as an `error` object inside an HTTP 200 body, so classification happens
//! on the decoded envelope rather than on the status code.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use shared_types::{Article, Provider, User};
use social_client::{
    FieldDefault, FieldRule, NormalizeError, SocialClient, SocialError, is_numeric_id,
    normalize::normalize,
};
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::{
    NonEmptyString,
    http::{ProxyConfig, build_client, endpoint_url, limit},
};

/// Default VK API base URL
pub const VK_BASE_URL: &str = "https://api.vk.com/method/";

/// API version for profile and wall endpoints
const PROFILE_API_VERSION: &str = "5.89";
/// API version for friend and follower endpoints
const GRAPH_API_VERSION: &str = "5.21";
/// Extra profile fields requested for every user record
const USER_FIELDS: &str = "followers_count,common_count,photo,screen_name";

/// Error codes meaning the target does not exist or is not accessible
const NOT_FOUND_CODES: [i64; 5] = [113, 100, 15, 18, 30];
/// Error codes meaning the access token was rejected
const AUTH_CODES: [i64; 2] = [5, 16];

/// VK user record to domain [`User`]
pub const VK_USER_RULES: &[FieldRule] = &[
    FieldRule::required("id", &[&["id"]]),
    FieldRule::required("screen_name", &[&["screen_name"]]),
    FieldRule::required("name", &[&["first_name"]]),
    FieldRule::defaulted("followers_count", &[&["followers_count"]], FieldDefault::Zero),
    FieldRule::defaulted("friends_count", &[&["common_count"]], FieldDefault::Zero),
    FieldRule::required("image_url", &[&["photo"]]),
    FieldRule::defaulted("description", &[], FieldDefault::EmptyString),
];

/// VK wall post to domain [`Article`]
pub const VK_ARTICLE_RULES: &[FieldRule] = &[
    FieldRule::required("id", &[&["id"]]),
    FieldRule::required("text", &[&["text"]]),
    FieldRule::defaulted("likes_count", &[&["likes", "count"]], FieldDefault::Zero),
    FieldRule::defaulted("comments_count", &[&["comments", "count"]], FieldDefault::Zero),
    FieldRule::defaulted("reposts_count", &[&["reposts", "count"]], FieldDefault::Zero),
    FieldRule::defaulted("retweet_count", &[], FieldDefault::Zero),
];

/// Configuration for the VK API client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VkConfig {
    /// Base URL for the VK API
    pub base_url: String,
    /// Service or user access token
    pub access_token: NonEmptyString,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl VkConfig {
    /// Configuration against the public VK API with a 30 second timeout
    pub fn new(access_token: NonEmptyString) -> Self {
        Self {
            base_url: VK_BASE_URL.to_string(),
            access_token,
            timeout_seconds: 30,
        }
    }
}

/// Errors specific to the VK API client
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum VkError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request did not complete in time
    #[error("Request timeout after {seconds}s")]
    Timeout { seconds: u64 },

    /// Body was not valid JSON or did not match the envelope
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Record could not be mapped onto the domain model
    #[error("Normalization failed: {0}")]
    Normalize(#[from] NormalizeError),

    /// Target user does not exist, was deleted, or is hidden
    #[error("User {user_id} not found")]
    NotFound { user_id: String },

    /// Access token rejected
    #[error("Authorization failed ({code}): {message}")]
    Unauthorized { code: i64, message: String },

    /// Any other VK error code
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    /// Non-200 HTTP status
    #[error("Unexpected HTTP status {status}")]
    Status { status: u16 },

    /// Client could not be constructed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<VkError> for SocialError {
    fn from(value: VkError) -> Self {
        let provider = Provider::Vk;
        match value {
            VkError::NotFound { user_id } => SocialError::UserNotFound { user_id },
            VkError::Unauthorized { .. } => SocialError::Authorization {
                provider,
                message: value.to_string(),
            },
            VkError::Http(ref error) if error.is_decode() => SocialError::MalformedResponse {
                provider,
                message: value.to_string(),
            },
            VkError::Http(ref error) if error.is_builder() => SocialError::Unknown {
                provider,
                message: value.to_string(),
            },
            VkError::Http(_) | VkError::Timeout { .. } => SocialError::Connection {
                provider,
                message: value.to_string(),
            },
            VkError::Json(_) | VkError::Normalize(_) => SocialError::MalformedResponse {
                provider,
                message: value.to_string(),
            },
            VkError::Api { .. } | VkError::Status { .. } | VkError::Config(_) => {
                SocialError::Unknown {
                    provider,
                    message: value.to_string(),
                }
            }
        }
    }
}

/// Top-level VK response: exactly one of `response` or `error` is set
#[derive(Debug, Deserialize)]
struct Envelope {
    response: Option<Value>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error_code: i64,
    #[serde(default)]
    error_msg: String,
}

/// Paged list payload returned by `wall.get`, `friends.get`, and `users.getFollowers`
#[derive(Debug, Default, Deserialize)]
struct ItemList {
    #[serde(default)]
    items: Vec<Value>,
}

/// VK API client implementation
#[derive(Debug)]
pub struct VkClient {
    client: Client,
    config: VkConfig,
}

impl VkClient {
    /// Create a new VK API client
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is blank or the HTTP client cannot be created
    pub fn new(config: VkConfig, proxy: Option<&ProxyConfig>) -> Result<Self, VkError> {
        if config.base_url.trim().is_empty() {
            return Err(VkError::Config("Base URL cannot be empty".to_string()));
        }

        let client = build_client(config.timeout_seconds, proxy)?;
        Ok(Self { client, config })
    }

    /// Call a VK method and return the `response` member of the envelope
    async fn call(
        &self,
        method: &str,
        user_id: &str,
        params: &[(&str, String)],
    ) -> Result<Option<Value>, VkError> {
        let url = endpoint_url(&self.config.base_url, method);
        let request = self
            .client
            .get(&url)
            .query(params)
            .query(&[("access_token", self.config.access_token.as_str())]);

        let response = timeout(
            Duration::from_secs(self.config.timeout_seconds),
            request.send(),
        )
        .await
        .map_err(|_| VkError::Timeout {
            seconds: self.config.timeout_seconds,
        })??;

        let status = response.status();
        let body = response.text().await?;
        debug!(method, user_id, status = status.as_u16(), body = %body, "VK response");

        if status == StatusCode::UNAUTHORIZED {
            warn!(method, "VK rejected the access token");
            return Err(VkError::Unauthorized {
                code: i64::from(status.as_u16()),
                message: body,
            });
        }

        if status != StatusCode::OK {
            warn!(method, status = status.as_u16(), "VK returned non-200 status");
            return Err(VkError::Status {
                status: status.as_u16(),
            });
        }

        let envelope: Envelope = serde_json::from_str(&body)?;
        if let Some(error) = envelope.error {
            return Err(classify(error, user_id));
        }

        Ok(envelope.response)
    }

    /// Fetch a friend or follower page and normalize the active accounts in it
    async fn graph(&self, method: &str, user_id: &str, count: u32) -> Result<Vec<User>, VkError> {
        let params = [
            ("user_id", user_id.to_string()),
            ("v", GRAPH_API_VERSION.to_string()),
            ("count", count.to_string()),
            ("fields", USER_FIELDS.to_string()),
        ];

        let items = item_list(self.call(method, user_id, &params).await?)?;
        items
            .iter()
            .filter(|item| !is_deactivated(item))
            .take(limit(count))
            .map(|item| normalize(item, VK_USER_RULES).map_err(VkError::from))
            .collect()
    }

    async fn fetch_user(&self, user_id: &str) -> Result<User, VkError> {
        let params = [
            ("user_ids", user_id.to_string()),
            ("v", PROFILE_API_VERSION.to_string()),
            ("fields", USER_FIELDS.to_string()),
        ];

        let response = self.call("users.get", user_id, &params).await?;
        let users: Vec<Value> = match response {
            Some(value) => serde_json::from_value(value)?,
            None => Vec::new(),
        };

        let not_found = || VkError::NotFound {
            user_id: user_id.to_string(),
        };
        let raw = users.first().ok_or_else(not_found)?;
        if is_deactivated(raw) {
            debug!(user_id, "VK account is deactivated");
            return Err(not_found());
        }

        Ok(normalize(raw, VK_USER_RULES)?)
    }

    async fn fetch_articles(&self, user_id: &str, count: u32) -> Result<Vec<Article>, VkError> {
        let owner = if is_numeric_id(user_id) {
            "owner_id"
        } else {
            "domain"
        };
        let params = [
            (owner, user_id.to_string()),
            ("v", PROFILE_API_VERSION.to_string()),
            ("count", count.to_string()),
        ];

        let items = item_list(self.call("wall.get", user_id, &params).await?)?;
        items
            .iter()
            .take(limit(count))
            .map(|item| normalize(item, VK_ARTICLE_RULES).map_err(VkError::from))
            .collect()
    }
}

impl SocialClient for VkClient {
    async fn get_user(&self, user_id: &str) -> Result<User, SocialError> {
        Ok(self.fetch_user(user_id).await?)
    }

    async fn get_articles(&self, user_id: &str, count: u32) -> Result<Vec<Article>, SocialError> {
        Ok(self.fetch_articles(user_id, count).await?)
    }

    async fn get_friends(&self, user_id: &str, count: u32) -> Result<Vec<User>, SocialError> {
        Ok(self.graph("friends.get", user_id, count).await?)
    }

    async fn get_followers(&self, user_id: &str, count: u32) -> Result<Vec<User>, SocialError> {
        Ok(self.graph("users.getFollowers", user_id, count).await?)
    }

    fn provider(&self) -> Provider {
        Provider::Vk
    }
}

fn classify(error: ApiErrorBody, user_id: &str) -> VkError {
    let ApiErrorBody {
        error_code: code,
        error_msg: message,
    } = error;

    if NOT_FOUND_CODES.contains(&code) {
        debug!(user_id, code, message = %message, "VK reports user as unavailable");
        VkError::NotFound {
            user_id: user_id.to_string(),
        }
    } else if AUTH_CODES.contains(&code) {
        warn!(code, message = %message, "VK rejected access token");
        VkError::Unauthorized { code, message }
    } else {
        warn!(code, message = %message, "VK returned an unclassified error");
        VkError::Api { code, message }
    }
}

fn item_list(response: Option<Value>) -> Result<Vec<Value>, VkError> {
    let list: ItemList = match response {
        Some(value) => serde_json::from_value(value)?,
        None => ItemList::default(),
    };
    Ok(list.items)
}

fn is_deactivated(raw: &Value) -> bool {
    raw.get("deactivated").is_some_and(|flag| !flag.is_null())
}
