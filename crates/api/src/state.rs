// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Server state management module
//!
//! This module provides shared application state for the social API server,
//! including configuration, the provider aggregator, and coordinated cancellation.

use std::sync::Arc;

use external_apis::{Aggregator, ClientFactory, DefaultClientFactory};
use serde::{Deserialize, Serialize};
use shared_types::Provider;
use tokio_util::sync::CancellationToken;
use utoipa::ToSchema;

use crate::config::{Environment, ServerConfig};

/// Aggregator type served by the HTTP layer
pub type SocialAggregator = Aggregator<DefaultClientFactory>;

/// Shared application state with cancellation token support
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Server configuration
    config: Arc<ServerConfig>,
    /// Provider aggregation service
    aggregator: Arc<SocialAggregator>,
    /// Cancellation token for coordinated shutdown
    pub cancellation_token: CancellationToken,
}

impl ServerState {
    /// Create new server state
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `aggregator` - Provider aggregation service
    /// * `cancellation_token` - Token for coordinated cancellation
    pub fn new(
        config: ServerConfig,
        aggregator: Arc<SocialAggregator>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            config: Arc::new(config),
            aggregator,
            cancellation_token,
        }
    }

    /// Server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Provider aggregation service
    pub fn aggregator(&self) -> &SocialAggregator {
        &self.aggregator
    }

    /// Report service health
    ///
    /// Each configured provider is checked by building its client, which exercises
    /// credentials and proxy settings without contacting the provider.
    pub fn health_check(&self) -> HealthCheck {
        let providers: Vec<ProviderHealth> = self
            .aggregator
            .fallback_order()
            .iter()
            .map(|&provider| {
                let status = match self.aggregator.factory().create_client(provider) {
                    Ok(_) => HealthStatus::Up,
                    Err(e) => HealthStatus::Down {
                        reason: e.to_string().into_boxed_str(),
                    },
                };
                ProviderHealth { provider, status }
            })
            .collect();

        HealthCheck {
            status: HealthStatus::overall(&providers),
            version: Box::from(env!("CARGO_PKG_VERSION")),
            environment: self.config.environment,
            timestamp: chrono::Utc::now().to_rfc3339(),
            proxy_enabled: self.config.providers.proxy.enabled,
            providers,
        }
    }
}

/// Health status of a service or dependency
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum HealthStatus {
    /// Service is fully operational
    Up,

    /// Service is not operational
    Down {
        /// Human-readable explanation of why the service is down
        reason: Box<str>,
    },

    /// Service is operational but some providers are unavailable
    Degraded {
        /// Human-readable explanation of the degradation condition
        reason: Box<str>,
    },
}

impl HealthStatus {
    fn overall(providers: &[ProviderHealth]) -> Self {
        let down: Vec<&str> = providers
            .iter()
            .filter(|p| p.status != Self::Up)
            .map(|p| p.provider.name())
            .collect();

        if down.is_empty() {
            Self::Up
        } else if down.len() == providers.len() {
            Self::Down {
                reason: Box::from("no provider is available"),
            }
        } else {
            Self::Degraded {
                reason: format!("unavailable providers: {}", down.join(", ")).into_boxed_str(),
            }
        }
    }
}

/// Health of a single configured provider
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProviderHealth {
    /// Provider identifier
    pub provider: Provider,
    /// Provider status
    pub status: HealthStatus,
}

/// Health check status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthCheck {
    /// Service status
    pub status: HealthStatus,
    /// Service version
    pub version: Box<str>,
    /// Environment
    pub environment: Environment,
    /// Timestamp
    pub timestamp: String,
    /// Whether provider traffic goes through a proxy
    pub proxy_enabled: bool,
    /// Configured providers in fallback order
    pub providers: Vec<ProviderHealth>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(token: CancellationToken) -> ServerState {
        let config = ServerConfig::for_testing();
        let factory = DefaultClientFactory::new(config.providers.to_providers_config().unwrap());
        let aggregator = Arc::new(Aggregator::with_fallback_order(
            factory,
            config.providers.fallback_order.clone(),
        ));
        ServerState::new(config, aggregator, token)
    }

    #[test]
    fn server_state_with_cancellation_token() {
        let token = CancellationToken::new();
        let state = state(token.clone());

        assert!(!state.cancellation_token.is_cancelled());

        token.cancel();
        assert!(state.cancellation_token.is_cancelled());
    }

    #[test]
    fn health_lists_configured_providers() {
        let health = state(CancellationToken::new()).health_check();

        assert_eq!(health.status, HealthStatus::Up);
        assert_eq!(health.environment, Environment::Testing);
        assert!(!health.proxy_enabled);
        let providers: Vec<Provider> = health.providers.iter().map(|p| p.provider).collect();
        assert_eq!(providers, vec![Provider::Vk, Provider::Twitter]);
    }

    #[test]
    fn overall_status() {
        let up = |provider| ProviderHealth {
            provider,
            status: HealthStatus::Up,
        };
        let down = |provider| ProviderHealth {
            provider,
            status: HealthStatus::Down {
                reason: Box::from("bad proxy"),
            },
        };

        assert_eq!(
            HealthStatus::overall(&[up(Provider::Vk), up(Provider::Twitter)]),
            HealthStatus::Up
        );
        assert_eq!(
            HealthStatus::overall(&[up(Provider::Vk), down(Provider::Twitter)]),
            HealthStatus::Degraded {
                reason: Box::from("unavailable providers: twitter")
            }
        );
        assert!(matches!(
            HealthStatus::overall(&[down(Provider::Vk)]),
            HealthStatus::Down { .. }
        ));
    }
}
