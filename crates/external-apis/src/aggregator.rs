// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Provider selection and fallback
//!
//! This module provides the entry points the HTTP layer calls. With an explicit
//! provider the request is delegated as-is; without one, providers are tried in the
//! configured fallback order until one succeeds.

use shared_types::{Article, Provider, User};
use social_client::{SocialClient, SocialError};
use tracing::{debug, info, warn};

use crate::ClientFactory;

/// Aggregation service over a [`ClientFactory`]
#[derive(Debug, Clone)]
pub struct Aggregator<F> {
    factory: F,
    fallback_order: Vec<Provider>,
}

impl<F: ClientFactory> Aggregator<F> {
    /// Create an aggregator using the canonical provider order
    pub fn new(factory: F) -> Self {
        Self::with_fallback_order(factory, Provider::all().to_vec())
    }

    /// Create an aggregator with an explicit fallback order
    pub fn with_fallback_order(factory: F, fallback_order: Vec<Provider>) -> Self {
        Self {
            factory,
            fallback_order,
        }
    }

    /// Providers tried, in order, when no source is given
    pub fn fallback_order(&self) -> &[Provider] {
        &self.fallback_order
    }

    /// Underlying client factory
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Resolve a user profile
    ///
    /// # Errors
    ///
    /// With `source` set, returns that provider's error unchanged. Without it, returns
    /// [`SocialError::UserNotFound`] once every provider has failed.
    pub async fn get_user(
        &self,
        user_id: &str,
        source: Option<Provider>,
    ) -> Result<User, SocialError> {
        self.dispatch("get_user", user_id, source, |client| async move {
            client.get_user(user_id).await
        })
        .await
    }

    /// Fetch up to `count` recent posts
    ///
    /// # Errors
    ///
    /// Same policy as [`Aggregator::get_user`]
    pub async fn get_articles(
        &self,
        user_id: &str,
        count: u32,
        source: Option<Provider>,
    ) -> Result<Vec<Article>, SocialError> {
        self.dispatch("get_articles", user_id, source, |client| async move {
            client.get_articles(user_id, count).await
        })
        .await
    }

    /// Fetch up to `count` friends
    ///
    /// # Errors
    ///
    /// Same policy as [`Aggregator::get_user`]
    pub async fn get_friends(
        &self,
        user_id: &str,
        count: u32,
        source: Option<Provider>,
    ) -> Result<Vec<User>, SocialError> {
        self.dispatch("get_friends", user_id, source, |client| async move {
            client.get_friends(user_id, count).await
        })
        .await
    }

    /// Fetch up to `count` followers
    ///
    /// # Errors
    ///
    /// Same policy as [`Aggregator::get_user`]
    pub async fn get_followers(
        &self,
        user_id: &str,
        count: u32,
        source: Option<Provider>,
    ) -> Result<Vec<User>, SocialError> {
        self.dispatch("get_followers", user_id, source, |client| async move {
            client.get_followers(user_id, count).await
        })
        .await
    }

    async fn dispatch<T, Op, Fut>(
        &self,
        operation: &'static str,
        user_id: &str,
        source: Option<Provider>,
        op: Op,
    ) -> Result<T, SocialError>
    where
        Op: Fn(F::Client) -> Fut,
        Fut: Future<Output = Result<T, SocialError>>,
    {
        if let Some(provider) = source {
            debug!(operation, user_id, %provider, "explicit provider requested");
            let client = self.factory.create_client(provider)?;
            return op(client).await;
        }

        for &provider in &self.fallback_order {
            let attempt = match self.factory.create_client(provider) {
                Ok(client) => op(client).await,
                Err(error) => Err(error),
            };

            match attempt {
                Ok(value) => {
                    info!(operation, user_id, %provider, "resolved via fallback");
                    return Ok(value);
                }
                Err(error) => {
                    warn!(
                        operation,
                        user_id,
                        %provider,
                        kind = error.kind(),
                        %error,
                        "provider failed, trying next"
                    );
                }
            }
        }

        debug!(operation, user_id, "all providers exhausted");
        Err(SocialError::user_not_found(user_id))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    use super::*;

    fn user(id: i64) -> User {
        User {
            id,
            screen_name: format!("user{id}"),
            name: "Test".to_string(),
            followers_count: 0,
            friends_count: 0,
            image_url: String::new(),
            description: String::new(),
        }
    }

    fn connection_error(provider: Provider) -> SocialError {
        SocialError::Connection {
            provider,
            message: "connection refused".to_string(),
        }
    }

    /// Client returning canned results
    #[derive(Debug, Clone)]
    struct FakeClient {
        provider: Provider,
        outcome: Result<User, SocialError>,
    }

    impl SocialClient for FakeClient {
        async fn get_user(&self, _user_id: &str) -> Result<User, SocialError> {
            self.outcome.clone()
        }

        async fn get_articles(&self, _user_id: &str, _count: u32) -> Result<Vec<Article>, SocialError> {
            self.outcome.clone().map(|_| Vec::new())
        }

        async fn get_friends(&self, _user_id: &str, count: u32) -> Result<Vec<User>, SocialError> {
            self.outcome
                .clone()
                .map(|u| (0..i64::from(count)).map(|i| user(u.id + i)).collect())
        }

        async fn get_followers(&self, user_id: &str, count: u32) -> Result<Vec<User>, SocialError> {
            self.get_friends(user_id, count).await
        }

        fn provider(&self) -> Provider {
            self.provider
        }
    }

    /// Factory recording every provider it was asked for
    #[derive(Debug, Default)]
    struct FakeFactory {
        outcomes: HashMap<Provider, Result<User, SocialError>>,
        attempts: Arc<Mutex<Vec<Provider>>>,
    }

    impl FakeFactory {
        fn with(mut self, provider: Provider, outcome: Result<User, SocialError>) -> Self {
            self.outcomes.insert(provider, outcome);
            self
        }

        fn attempts(&self) -> Vec<Provider> {
            self.attempts.lock().unwrap().clone()
        }
    }

    impl ClientFactory for FakeFactory {
        type Client = FakeClient;

        fn create_client(&self, provider: Provider) -> Result<FakeClient, SocialError> {
            self.attempts.lock().unwrap().push(provider);
            let outcome = self.outcomes.get(&provider).cloned().ok_or_else(|| {
                SocialError::Unknown {
                    provider,
                    message: "not configured".to_string(),
                }
            })?;
            Ok(FakeClient { provider, outcome })
        }
    }

    #[tokio::test]
    async fn explicit_source_delegates_and_propagates_errors() {
        let factory = FakeFactory::default()
            .with(Provider::Vk, Ok(user(1)))
            .with(Provider::Twitter, Err(connection_error(Provider::Twitter)));
        let aggregator = Aggregator::new(factory);

        let found = aggregator.get_user("1", Some(Provider::Vk)).await.unwrap();
        assert_eq!(found.id, 1);

        let err = aggregator
            .get_user("1", Some(Provider::Twitter))
            .await
            .unwrap_err();
        assert_eq!(err, connection_error(Provider::Twitter));
        assert_eq!(
            aggregator.factory().attempts(),
            vec![Provider::Vk, Provider::Twitter]
        );
    }

    #[tokio::test]
    async fn fallback_returns_first_success_without_trying_rest() {
        let factory = FakeFactory::default()
            .with(Provider::Vk, Ok(user(1)))
            .with(Provider::Twitter, Ok(user(2)));
        let aggregator = Aggregator::new(factory);

        let found = aggregator.get_user("ann", None).await.unwrap();
        assert_eq!(found.id, 1);
        assert_eq!(aggregator.factory().attempts(), vec![Provider::Vk]);
    }

    #[tokio::test]
    async fn fallback_skips_failing_provider() {
        let factory = FakeFactory::default()
            .with(Provider::Vk, Err(SocialError::user_not_found("ann")))
            .with(Provider::Twitter, Ok(user(2)));
        let aggregator = Aggregator::new(factory);

        let found = aggregator.get_user("ann", None).await.unwrap();
        assert_eq!(found.id, 2);
        assert_eq!(
            aggregator.factory().attempts(),
            vec![Provider::Vk, Provider::Twitter]
        );
    }

    #[tokio::test]
    async fn fallback_suppresses_non_not_found_errors() {
        let factory = FakeFactory::default()
            .with(Provider::Vk, Err(connection_error(Provider::Vk)))
            .with(Provider::Twitter, Ok(user(2)));
        let aggregator = Aggregator::new(factory);

        let friends = aggregator.get_friends("ann", 3, None).await.unwrap();
        assert_eq!(friends.len(), 3);
    }

    #[tokio::test]
    async fn exhausted_fallback_is_not_found() {
        let factory = FakeFactory::default()
            .with(Provider::Vk, Err(connection_error(Provider::Vk)))
            .with(
                Provider::Twitter,
                Err(SocialError::Authorization {
                    provider: Provider::Twitter,
                    message: "bad token".to_string(),
                }),
            );
        let aggregator = Aggregator::new(factory);

        let err = aggregator.get_articles("ann", 5, None).await.unwrap_err();
        assert_eq!(err, SocialError::user_not_found("ann"));
    }

    #[tokio::test]
    async fn construction_failure_counts_as_failed_attempt() {
        let factory = FakeFactory::default().with(Provider::Twitter, Ok(user(9)));
        let aggregator = Aggregator::new(factory);

        let found = aggregator.get_followers("9", 1, None).await.unwrap();
        assert_eq!(found[0].id, 9);
        assert_eq!(
            aggregator.factory().attempts(),
            vec![Provider::Vk, Provider::Twitter]
        );
    }

    #[tokio::test]
    async fn custom_fallback_order_is_respected() {
        let factory = FakeFactory::default()
            .with(Provider::Vk, Ok(user(1)))
            .with(Provider::Twitter, Ok(user(2)));
        let aggregator = Aggregator::with_fallback_order(factory, vec![Provider::Twitter]);

        assert_eq!(aggregator.fallback_order(), &[Provider::Twitter]);
        let found = aggregator.get_user("x", None).await.unwrap();
        assert_eq!(found.id, 2);
    }
}
