// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Outbound HTTP transport shared by the provider clients

use std::time::Duration;

use reqwest::{Client, Proxy};

use crate::NonEmptyString;

/// User agent sent with every provider request
pub const USER_AGENT: &str = concat!("social-api/", env!("CARGO_PKG_VERSION"));

/// Plain HTTP forward proxy applied to all provider traffic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Proxy host name or IP address
    pub host: NonEmptyString,
    /// Proxy TCP port
    pub port: u16,
}

impl ProxyConfig {
    /// Proxy URL in `http://{host}:{port}` form
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Build a `reqwest` client with the given timeout and optional proxy
///
/// # Errors
///
/// Returns an error if the proxy URL is invalid or the TLS backend fails to initialize
pub(crate) fn build_client(
    timeout_seconds: u64,
    proxy: Option<&ProxyConfig>,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(USER_AGENT);

    if let Some(proxy) = proxy {
        builder = builder.proxy(Proxy::all(proxy.url())?);
    }

    builder.build()
}

/// Join a provider base URL and an endpoint path with exactly one slash
pub(crate) fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), endpoint)
}

/// Convert a requested item count into a `take` bound
pub(crate) fn limit(count: u32) -> usize {
    usize::try_from(count).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_url_format() {
        let proxy = ProxyConfig {
            host: NonEmptyString::new("10.0.0.1").unwrap(),
            port: 3128,
        };
        assert_eq!(proxy.url(), "http://10.0.0.1:3128");
    }

    #[test]
    fn endpoint_url_handles_trailing_slash() {
        assert_eq!(
            endpoint_url("https://api.vk.com/method/", "users.get"),
            "https://api.vk.com/method/users.get"
        );
        assert_eq!(
            endpoint_url("http://127.0.0.1:8080", "users/lookup.json"),
            "http://127.0.0.1:8080/users/lookup.json"
        );
    }

    #[test]
    fn client_builds_with_and_without_proxy() {
        assert!(build_client(5, None).is_ok());

        let proxy = ProxyConfig {
            host: NonEmptyString::new("localhost").unwrap(),
            port: 8888,
        };
        assert!(build_client(5, Some(&proxy)).is_ok());
    }
}
