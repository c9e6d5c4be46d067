// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Twitter REST API v1.1 integration
//!
//! This module provides an implementation of the `SocialClient` trait for the Twitter
//! v1.1 REST API. Every request is signed with OAuth 1.0a user credentials; failures
//! are signalled through HTTP status codes.

use std::time::Duration;

use reqwest::{Client, StatusCode, header::AUTHORIZATION};
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
    http::{ProxyConfig, build_client, endpoint_url, limit},
    oauth::{OAuthCredentials, SigningError},
};

/// Default Twitter API base URL
pub const TWITTER_BASE_URL: &str = "https://api.twitter.com/1.1/";

/// Twitter user object to domain [`User`]
pub const TWITTER_USER_RULES: &[FieldRule] = &[
    FieldRule::required("id", &[&["id"]]),
    FieldRule::required("screen_name", &[&["screen_name"]]),
    FieldRule::required("name", &[&["name"]]),
    FieldRule::defaulted("followers_count", &[&["followers_count"]], FieldDefault::Zero),
    FieldRule::defaulted("friends_count", &[&["friends_count"]], FieldDefault::Zero),
    FieldRule::required(
        "image_url",
        &[&["profile_image_url_https"], &["profile_image_url"]],
    ),
    FieldRule::defaulted("description", &[&["description"]], FieldDefault::EmptyString),
];

/// Twitter status object to domain [`Article`]
pub const TWITTER_ARTICLE_RULES: &[FieldRule] = &[
    FieldRule::required("id", &[&["id"]]),
    FieldRule::required("text", &[&["full_text"], &["text"]]),
    FieldRule::defaulted("likes_count", &[&["favorite_count"]], FieldDefault::Zero),
    FieldRule::defaulted("comments_count", &[], FieldDefault::Zero),
    FieldRule::defaulted("reposts_count", &[], FieldDefault::Zero),
    FieldRule::defaulted("retweet_count", &[&["retweet_count"]], FieldDefault::Zero),
];

/// Configuration for the Twitter API client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwitterConfig {
    /// Base URL for the Twitter API
    pub base_url: String,
    /// OAuth 1.0a consumer and access-token credentials
    pub credentials: OAuthCredentials,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl TwitterConfig {
    /// Configuration against the public Twitter API with a 30 second timeout
    pub fn new(credentials: OAuthCredentials) -> Self {
        Self {
            base_url: TWITTER_BASE_URL.to_string(),
            credentials,
            timeout_seconds: 30,
        }
    }
}

/// Errors specific to the Twitter API client
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum TwitterError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request did not complete in time
    #[error("Request timeout after {seconds}s")]
    Timeout { seconds: u64 },

    /// Body was not valid JSON or had an unexpected shape
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Record could not be mapped onto the domain model
    #[error("Normalization failed: {0}")]
    Normalize(#[from] NormalizeError),

    /// Request could not be signed
    #[error(transparent)]
    Signing(#[from] SigningError),

    /// HTTP 404 or an empty lookup result
    #[error("User {user_id} not found")]
    NotFound { user_id: String },

    /// HTTP 401
    #[error("Authentication failed")]
    Unauthorized,

    /// Any other non-200 status
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Client could not be constructed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<TwitterError> for SocialError {
    fn from(value: TwitterError) -> Self {
        let provider = Provider::Twitter;
        match value {
            TwitterError::NotFound { user_id } => SocialError::UserNotFound { user_id },
            TwitterError::Unauthorized => SocialError::Authorization {
                provider,
                message: value.to_string(),
            },
            TwitterError::Http(ref error) if error.is_decode() => {
                SocialError::MalformedResponse {
                    provider,
                    message: value.to_string(),
                }
            }
            TwitterError::Http(ref error) if error.is_builder() => SocialError::Unknown {
                provider,
                message: value.to_string(),
            },
            TwitterError::Http(_) | TwitterError::Timeout { .. } => SocialError::Connection {
                provider,
                message: value.to_string(),
            },
            TwitterError::Json(_) | TwitterError::Normalize(_) => {
                SocialError::MalformedResponse {
                    provider,
                    message: value.to_string(),
                }
            }
            TwitterError::Signing(_) | TwitterError::ApiError { .. } | TwitterError::Config(_) => {
                SocialError::Unknown {
                    provider,
                    message: value.to_string(),
                }
            }
        }
    }
}

/// Cursor page returned by `friends/list` and `followers/list`
#[derive(Debug, Deserialize)]
struct UserPage {
    #[serde(default)]
    users: Vec<Value>,
}

/// Twitter API client implementation
#[derive(Debug)]
pub struct TwitterClient {
    client: Client,
    config: TwitterConfig,
}

impl TwitterClient {
    /// Create a new Twitter API client
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is blank or the HTTP client cannot be created
    pub fn new(config: TwitterConfig, proxy: Option<&ProxyConfig>) -> Result<Self, TwitterError> {
        if config.base_url.trim().is_empty() {
            return Err(TwitterError::Config("Base URL cannot be empty".to_string()));
        }

        let client = build_client(config.timeout_seconds, proxy)?;
        Ok(Self { client, config })
    }

    /// Issue a signed `GET` and decode the JSON body
    async fn signed_get(
        &self,
        endpoint: &str,
        user_id: &str,
        params: &[(&str, String)],
    ) -> Result<Value, TwitterError> {
        let url = endpoint_url(&self.config.base_url, endpoint);
        let authorization = self
            .config
            .credentials
            .authorization_header("GET", &url, params)?;

        let request = self
            .client
            .get(&url)
            .query(params)
            .header(AUTHORIZATION, authorization);

        let response = timeout(
            Duration::from_secs(self.config.timeout_seconds),
            request.send(),
        )
        .await
        .map_err(|_| TwitterError::Timeout {
            seconds: self.config.timeout_seconds,
        })??;

        let status = response.status();
        let body = response.text().await?;
        debug!(endpoint, user_id, status = status.as_u16(), body = %body, "Twitter response");

        match status {
            StatusCode::OK => Ok(serde_json::from_str(&body)?),
            StatusCode::NOT_FOUND => Err(TwitterError::NotFound {
                user_id: user_id.to_string(),
            }),
            StatusCode::UNAUTHORIZED => {
                warn!(endpoint, "Twitter rejected credentials");
                Err(TwitterError::Unauthorized)
            }
            status => {
                warn!(endpoint, status = status.as_u16(), "Twitter API error");
                Err(TwitterError::ApiError {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }

    async fn graph(
        &self,
        endpoint: &str,
        user_id: &str,
        count: u32,
    ) -> Result<Vec<User>, TwitterError> {
        let params = [identity(user_id), ("count", count.to_string())];
        let page: UserPage = serde_json::from_value(self.signed_get(endpoint, user_id, &params).await?)?;

        page.users
            .iter()
            .take(limit(count))
            .map(|item| normalize(item, TWITTER_USER_RULES).map_err(TwitterError::from))
            .collect()
    }

    async fn fetch_user(&self, user_id: &str) -> Result<User, TwitterError> {
        let params = [identity(user_id)];
        let users: Vec<Value> =
            serde_json::from_value(self.signed_get("users/lookup.json", user_id, &params).await?)?;

        let raw = users.first().ok_or_else(|| TwitterError::NotFound {
            user_id: user_id.to_string(),
        })?;
        Ok(normalize(raw, TWITTER_USER_RULES)?)
    }

    async fn fetch_articles(&self, user_id: &str, count: u32) -> Result<Vec<Article>, TwitterError> {
        let params = [
            identity(user_id),
            ("count", count.to_string()),
            ("tweet_mode", "extended".to_string()),
        ];
        let statuses: Vec<Value> = serde_json::from_value(
            self.signed_get("statuses/user_timeline.json", user_id, &params)
                .await?,
        )?;

        statuses
            .iter()
            .take(limit(count))
            .map(|item| normalize(item, TWITTER_ARTICLE_RULES).map_err(TwitterError::from))
            .collect()
    }
}

impl SocialClient for TwitterClient {
    async fn get_user(&self, user_id: &str) -> Result<User, SocialError> {
        Ok(self.fetch_user(user_id).await?)
    }

    async fn get_articles(&self, user_id: &str, count: u32) -> Result<Vec<Article>, SocialError> {
        Ok(self.fetch_articles(user_id, count).await?)
    }

    async fn get_friends(&self, user_id: &str, count: u32) -> Result<Vec<User>, SocialError> {
        Ok(self.graph("friends/list.json", user_id, count).await?)
    }

    async fn get_followers(&self, user_id: &str, count: u32) -> Result<Vec<User>, SocialError> {
        Ok(self.graph("followers/list.json", user_id, count).await?)
    }

    fn provider(&self) -> Provider {
        Provider::Twitter
    }
}

/// `user_id` for numeric identifiers, `screen_name` otherwise
fn identity(user_id: &str) -> (&'static str, String) {
    let key = if is_numeric_id(user_id) {
        "user_id"
    } else {
        "screen_name"
    };
    (key, user_id.to_string())
}
