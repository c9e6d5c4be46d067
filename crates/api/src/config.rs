// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Server configuration module
//!
//! This module provides configuration structures and logic for the social API server,
//! supporting different environments, provider credentials, and validation of
//! configuration parameters.

use std::{
    collections::HashSet,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};

use anyhow::{Result, anyhow, ensure};
use config::{Config, ConfigError, Environment as ConfigEnv, File};
use external_apis::{
    NonEmptyString, OAuthCredentials, ProvidersConfig, ProxyConfig, TWITTER_BASE_URL,
    TwitterConfig, VK_BASE_URL, VkConfig,
};
use serde::{Deserialize, Deserializer, Serialize, de};
use shared_types::Provider;
use url::Url;

use crate::error::{ServerError, ServerResult};

/// Legacy environment variables and the configuration keys they override
const LEGACY_ENV_OVERRIDES: &[(&str, &str)] = &[
    ("VK_ACCESS_TOKEN", "providers.vk.access_token"),
    ("TWITTER_API_KEY", "providers.twitter.consumer_key"),
    ("TWITTER_API_SECRET_KEY", "providers.twitter.consumer_secret"),
    ("TWITTER_ACCESS_TOKEN", "providers.twitter.access_token"),
    (
        "TWITTER_ACCESS_TOKEN_SECRET",
        "providers.twitter.access_token_secret",
    ),
    ("PROXY_SERVER_IP", "providers.proxy.host"),
    ("PROXY_SERVER_PORT", "providers.proxy.port"),
];

/// A validated server port that ensures the value is appropriate for the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServerPort {
    port: u16,
    environment: Environment,
}

impl ServerPort {
    /// Create a new `ServerPort`, ensuring it's valid for the given environment
    ///
    /// # Errors
    ///
    /// Returns an error if the port is 0 in non-testing environments
    pub fn new(port: u16, environment: Environment) -> Result<Self> {
        if port == 0 && environment != Environment::Testing {
            return Err(anyhow!("port cannot be 0 in non-testing environments"));
        }
        Ok(Self { port, environment })
    }

    /// Create a safe testing port (port 0)
    pub const fn testing() -> Self {
        Self {
            port: 0,
            environment: Environment::Testing,
        }
    }

    /// Get the port value
    pub fn value(&self) -> u16 {
        self.port
    }
}

impl<'de> Deserialize<'de> for ServerPort {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let port = u16::deserialize(deserializer)?;
        // Re-validated in `load` once the environment is known
        Ok(Self {
            port,
            environment: Environment::Development,
        })
    }
}

/// A validated timeout duration in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeoutSeconds(Duration);

impl TimeoutSeconds {
    /// Create a new `TimeoutSeconds`, ensuring the value is within valid bounds
    ///
    /// # Errors
    ///
    /// Returns an error if timeout is 0 or greater than 300 seconds
    pub fn new(seconds: u64) -> Result<Self> {
        ensure!(seconds != 0, "timeout must be greater than 0");
        ensure!(seconds <= 300, "timeout cannot exceed 300");
        Ok(Self(Duration::from_secs(seconds)))
    }

    /// Create a safe default timeout (30 seconds)
    pub const fn default_value() -> Self {
        Self(Duration::from_secs(30))
    }

    /// Create a safe testing timeout (5 seconds)
    pub const fn testing() -> Self {
        Self(Duration::from_secs(5))
    }

    /// Get the timeout value
    pub fn value(&self) -> Duration {
        self.0
    }

    /// Get the timeout value in whole seconds
    pub fn as_secs(&self) -> u64 {
        self.0.as_secs()
    }
}

impl<'de> Deserialize<'de> for TimeoutSeconds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = u64::deserialize(deserializer)?;
        Self::new(seconds).map_err(|e| de::Error::custom(e.to_string()))
    }
}

impl Default for TimeoutSeconds {
    fn default() -> Self {
        Self::default_value()
    }
}

/// Environment types for configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production environment
    Production,
    /// Development environment
    Development,
    /// Testing environment
    Testing,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Development => write!(f, "development"),
            Environment::Testing => write!(f, "testing"),
        }
    }
}

/// VK provider settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VkSettings {
    /// API base URL
    pub base_url: Url,
    /// Access token sent with every request
    pub access_token: NonEmptyString,
    /// Per-request timeout
    #[serde(default)]
    pub timeout_seconds: TimeoutSeconds,
}

/// Twitter provider settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitterSettings {
    /// API base URL
    pub base_url: Url,
    /// OAuth consumer key
    pub consumer_key: NonEmptyString,
    /// OAuth consumer secret
    pub consumer_secret: NonEmptyString,
    /// OAuth access token
    pub access_token: NonEmptyString,
    /// OAuth access token secret
    pub access_token_secret: NonEmptyString,
    /// Per-request timeout
    #[serde(default)]
    pub timeout_seconds: TimeoutSeconds,
}

/// Outbound HTTP proxy settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxySettings {
    /// Route provider traffic through the proxy
    #[serde(default)]
    pub enabled: bool,
    /// Proxy host, required when enabled
    #[serde(default)]
    pub host: Option<String>,
    /// Proxy port, required when enabled
    #[serde(default)]
    pub port: Option<u16>,
}

impl ProxySettings {
    /// Resolve into a proxy for the clients, `None` when disabled
    ///
    /// # Errors
    ///
    /// Returns an error if the proxy is enabled without a host or with port 0
    pub fn resolve(&self) -> Result<Option<ProxyConfig>> {
        if !self.enabled {
            return Ok(None);
        }

        let host = self
            .host
            .clone()
            .ok_or_else(|| anyhow!("proxy host is required when the proxy is enabled"))?;
        let host = NonEmptyString::new(host).map_err(|e| anyhow!("invalid proxy host: {e}"))?;
        let port = self
            .port
            .ok_or_else(|| anyhow!("proxy port is required when the proxy is enabled"))?;
        ensure!(port != 0, "proxy port cannot be 0");

        Ok(Some(ProxyConfig { host, port }))
    }
}

/// Settings for all social network providers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvidersSettings {
    /// VK settings
    pub vk: VkSettings,
    /// Twitter settings
    pub twitter: TwitterSettings,
    /// Optional outbound proxy
    #[serde(default)]
    pub proxy: ProxySettings,
    /// Providers tried, in order, when a request names no source
    #[serde(default = "default_fallback_order")]
    pub fallback_order: Vec<Provider>,
}

fn default_fallback_order() -> Vec<Provider> {
    Provider::all().to_vec()
}

impl ProvidersSettings {
    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error if the fallback order is empty or repeats a provider, or the
    /// proxy settings are incomplete
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.fallback_order.is_empty(),
            "fallback order must name at least one provider"
        );
        let mut seen = HashSet::new();
        for provider in &self.fallback_order {
            ensure!(
                seen.insert(provider),
                "fallback order lists {provider} more than once"
            );
        }
        self.proxy.resolve()?;
        Ok(())
    }

    /// Build the client-facing provider configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the proxy settings are incomplete
    pub fn to_providers_config(&self) -> Result<ProvidersConfig> {
        Ok(ProvidersConfig {
            vk: VkConfig {
                base_url: self.vk.base_url.to_string(),
                access_token: self.vk.access_token.clone(),
                timeout_seconds: self.vk.timeout_seconds.as_secs(),
            },
            twitter: TwitterConfig {
                base_url: self.twitter.base_url.to_string(),
                credentials: OAuthCredentials {
                    consumer_key: self.twitter.consumer_key.clone(),
                    consumer_secret: self.twitter.consumer_secret.clone(),
                    access_token: self.twitter.access_token.clone(),
                    access_token_secret: self.twitter.access_token_secret.clone(),
                },
                timeout_seconds: self.twitter.timeout_seconds.as_secs(),
            },
            proxy: self.proxy.resolve()?,
        })
    }
}

/// Server configuration for different environments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: IpAddr,
    /// Server port (validated for environment compatibility)
    pub port: ServerPort,
    /// Request timeout in seconds (validated range: 1-300)
    pub timeout_seconds: TimeoutSeconds,
    /// Environment type
    pub environment: Environment,
    /// Social network provider settings
    pub providers: ProvidersSettings,
}

impl ServerConfig {
    /// Create configuration from environment variables and optional configuration files
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Config` if configuration is invalid or cannot be loaded.
    pub fn from_env() -> ServerResult<Self> {
        let config = Self::load().map_err(|e| ServerError::Config {
            message: format!("failed to load configuration: {e}"),
        })?;
        config.providers.validate().map_err(|e| ServerError::Config {
            message: format!("invalid provider configuration: {e}"),
        })?;
        Ok(config)
    }

    /// Load configuration using the config crate with hierarchical sources
    ///
    /// Configuration is loaded in the following order (later sources override earlier ones):
    /// 1. Default values
    /// 2. Configuration file (config.json)
    /// 3. Environment-specific files (config.{env}.json)
    /// 4. Environment variables with `SERVER_` prefix, `__` between nested keys
    ///    (e.g. `SERVER_PROVIDERS__VK__ACCESS_TOKEN`)
    /// 5. Legacy variables: `VK_ACCESS_TOKEN`, `TWITTER_API_KEY`, `TWITTER_API_SECRET_KEY`,
    ///    `TWITTER_ACCESS_TOKEN`, `TWITTER_ACCESS_TOKEN_SECRET`, `USE_PROXY_SERVER`,
    ///    `PROXY_SERVER_IP`, `PROXY_SERVER_PORT`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let env_var = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let mut config_builder = Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8000)?
            .set_default("timeout_seconds", 30)?
            .set_default("environment", "development")?
            .set_default("providers.vk.base_url", VK_BASE_URL)?
            .set_default("providers.vk.timeout_seconds", 30)?
            .set_default("providers.twitter.base_url", TWITTER_BASE_URL)?
            .set_default("providers.twitter.timeout_seconds", 30)?
            .set_default("providers.proxy.enabled", false)?
            .add_source(File::with_name("config.json").required(false))
            .add_source(
                File::with_name(&format!("config.{}.json", env_var.to_lowercase())).required(false),
            )
            .add_source(
                ConfigEnv::with_prefix("SERVER")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("providers.fallback_order")
                    .try_parsing(true),
            );

        for (variable, key) in LEGACY_ENV_OVERRIDES {
            config_builder = config_builder.set_override_option(*key, std::env::var(variable).ok())?;
        }
        config_builder = config_builder.set_override_option(
            "providers.proxy.enabled",
            std::env::var("USE_PROXY_SERVER").ok().map(|v| parse_flag(&v)),
        )?;

        if std::env::var("ENVIRONMENT").is_ok() {
            config_builder = config_builder.set_override("environment", env_var.to_lowercase())?;
        }

        let config = config_builder.build()?;
        let mut server_config: Self = config.try_deserialize()?;

        server_config.port = ServerPort::new(server_config.port.value(), server_config.environment)
            .map_err(|e| ConfigError::Message(format!("invalid port configuration: {e}")))?;

        Ok(server_config)
    }

    /// Create configuration optimized for testing
    ///
    /// Provider credentials are placeholders and base URLs point at the public APIs;
    /// tests override the URLs to target mock servers.
    pub fn for_testing() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: ServerPort::testing(),
            timeout_seconds: TimeoutSeconds::testing(),
            environment: Environment::Testing,
            providers: ProvidersSettings {
                vk: VkSettings {
                    base_url: testing_url(VK_BASE_URL),
                    access_token: testing_secret("test-vk-token"),
                    timeout_seconds: TimeoutSeconds::testing(),
                },
                twitter: TwitterSettings {
                    base_url: testing_url(TWITTER_BASE_URL),
                    consumer_key: testing_secret("test-consumer-key"),
                    consumer_secret: testing_secret("test-consumer-secret"),
                    access_token: testing_secret("test-access-token"),
                    access_token_secret: testing_secret("test-access-token-secret"),
                    timeout_seconds: TimeoutSeconds::testing(),
                },
                proxy: ProxySettings::default(),
                fallback_order: default_fallback_order(),
            },
        }
    }

    /// Get socket address for binding
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port.value())
    }
}

/// Interpret a legacy boolean environment value
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn testing_url(url: &str) -> Url {
    Url::parse(url).expect("built-in provider URL is valid")
}

fn testing_secret(value: &str) -> NonEmptyString {
    NonEmptyString::new(value).expect("built-in test credential is non-empty")
}
