// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0
#![allow(dead_code)]

//! Test fixtures for server integration tests
//!
//! Starts the server against mock VK and Twitter endpoints and provides canned
//! provider payloads.

use std::net::SocketAddr;

use api::{Server, ServerConfig, ShutdownConfig};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use url::Url;
use wiremock::MockServer;

/// Mock upstream providers and a running server pointed at them
pub struct TestApp {
    pub addr: SocketAddr,
    pub vk: MockServer,
    pub twitter: MockServer,
    pub client: reqwest::Client,
    token: CancellationToken,
}

impl TestApp {
    /// Start with the default configuration
    pub async fn start() -> Self {
        Self::start_with(|_| {}).await
    }

    /// Start after adjusting the configuration
    pub async fn start_with(configure: impl FnOnce(&mut ServerConfig)) -> Self {
        let vk = MockServer::start().await;
        let twitter = MockServer::start().await;

        let mut config = ServerConfig::for_testing();
        config.providers.vk.base_url = Url::parse(&vk.uri()).unwrap();
        config.providers.twitter.base_url = Url::parse(&twitter.uri()).unwrap();
        configure(&mut config);

        let (addr, token) = Server::new(config, ShutdownConfig::default())
            .expect("Failed to create server")
            .run_for_testing()
            .await
            .expect("Failed to start test server");

        Self {
            addr,
            vk,
            twitter,
            client: reqwest::Client::new(),
            token,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send request")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

pub fn vk_user_response() -> Value {
    json!({
        "response": [{
            "id": 12345,
            "first_name": "Ann",
            "screen_name": "ann",
            "followers_count": 10,
            "common_count": 3,
            "photo": "http://x/p.jpg"
        }]
    })
}

pub fn vk_error(code: i64, message: &str) -> Value {
    json!({"error": {"error_code": code, "error_msg": message}})
}

pub fn vk_items(items: Vec<Value>) -> Value {
    json!({"response": {"count": items.len(), "items": items}})
}

pub fn vk_friend(id: i64) -> Value {
    json!({
        "id": id,
        "first_name": format!("Friend{id}"),
        "screen_name": format!("id{id}"),
        "photo": format!("https://vk.example/{id}.jpg")
    })
}

pub fn twitter_user(id: i64, screen_name: &str) -> Value {
    json!({
        "id": id,
        "name": "Twitter User",
        "screen_name": screen_name,
        "description": "bio",
        "followers_count": 200,
        "friends_count": 50,
        "profile_image_url_https": format!("https://pbs.twimg.com/{id}.jpg")
    })
}

pub fn tweet(id: i64, text: &str) -> Value {
    json!({
        "id": id,
        "full_text": text,
        "favorite_count": 7,
        "retweet_count": 3
    })
}
