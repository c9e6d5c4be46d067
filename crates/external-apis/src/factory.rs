// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Client construction by provider identifier
//!
//! [`ClientFactory`] is the seam between the aggregation logic and concrete clients.
//! [`DefaultClientFactory`] builds a fresh [`AnyClient`] from immutable configuration
//! on every call; nothing is cached between requests.

use shared_types::{Article, Provider, User};
use social_client::{SocialClient, SocialError};
use tracing::debug;

use crate::{ProxyConfig, TwitterClient, TwitterConfig, VkClient, VkConfig};

/// Builds a ready-to-use client for a provider
pub trait ClientFactory: Send + Sync {
    /// Concrete client type produced by this factory
    type Client: SocialClient;

    /// Create a client for `provider`
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::Unknown`] if the client cannot be constructed
    fn create_client(&self, provider: Provider) -> Result<Self::Client, SocialError>;

    /// Create a client from a textual provider identifier
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::UnknownResourceType`] if `name` is not a known provider
    fn create_client_by_name(&self, name: &str) -> Result<Self::Client, SocialError> {
        let provider: Provider = name.parse()?;
        self.create_client(provider)
    }
}

/// Credentials and transport settings for every provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvidersConfig {
    /// VK client settings
    pub vk: VkConfig,
    /// Twitter client settings
    pub twitter: TwitterConfig,
    /// Optional forward proxy applied to all providers
    pub proxy: Option<ProxyConfig>,
}

/// Any concrete provider client
#[derive(Debug)]
pub enum AnyClient {
    /// VK client
    Vk(VkClient),
    /// Twitter client
    Twitter(TwitterClient),
}

impl SocialClient for AnyClient {
    async fn get_user(&self, user_id: &str) -> Result<User, SocialError> {
        match self {
            Self::Vk(client) => client.get_user(user_id).await,
            Self::Twitter(client) => client.get_user(user_id).await,
        }
    }

    async fn get_articles(&self, user_id: &str, count: u32) -> Result<Vec<Article>, SocialError> {
        match self {
            Self::Vk(client) => client.get_articles(user_id, count).await,
            Self::Twitter(client) => client.get_articles(user_id, count).await,
        }
    }

    async fn get_friends(&self, user_id: &str, count: u32) -> Result<Vec<User>, SocialError> {
        match self {
            Self::Vk(client) => client.get_friends(user_id, count).await,
            Self::Twitter(client) => client.get_friends(user_id, count).await,
        }
    }

    async fn get_followers(&self, user_id: &str, count: u32) -> Result<Vec<User>, SocialError> {
        match self {
            Self::Vk(client) => client.get_followers(user_id, count).await,
            Self::Twitter(client) => client.get_followers(user_id, count).await,
        }
    }

    fn provider(&self) -> Provider {
        match self {
            Self::Vk(client) => client.provider(),
            Self::Twitter(client) => client.provider(),
        }
    }
}

/// Factory backed by static [`ProvidersConfig`]
#[derive(Debug, Clone)]
pub struct DefaultClientFactory {
    config: ProvidersConfig,
}

impl DefaultClientFactory {
    /// Create a factory over the given provider settings
    pub fn new(config: ProvidersConfig) -> Self {
        Self { config }
    }

    /// Provider settings this factory builds from
    pub fn config(&self) -> &ProvidersConfig {
        &self.config
    }
}

impl ClientFactory for DefaultClientFactory {
    type Client = AnyClient;

    fn create_client(&self, provider: Provider) -> Result<AnyClient, SocialError> {
        debug!(%provider, proxied = self.config.proxy.is_some(), "creating client");
        let proxy = self.config.proxy.as_ref();
        match provider {
            Provider::Vk => Ok(AnyClient::Vk(VkClient::new(self.config.vk.clone(), proxy)?)),
            Provider::Twitter => Ok(AnyClient::Twitter(TwitterClient::new(
                self.config.twitter.clone(),
                proxy,
            )?)),
        }
    }
}
