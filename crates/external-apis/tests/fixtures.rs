// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0
#![allow(missing_docs, dead_code)]

//! Provider test fixtures
//!
//! Client configurations pointing at a mock server and canned provider payloads.

use external_apis::{
    DefaultClientFactory, NonEmptyString, OAuthCredentials, ProvidersConfig, TwitterConfig,
    VkConfig,
};
use serde_json::{Value, json};

pub const TEST_TIMEOUT_SECONDS: u64 = 5;
pub const VK_TOKEN: &str = "test-vk-token";

fn value(s: &str) -> NonEmptyString {
    NonEmptyString::new(s).unwrap()
}

pub fn vk_config(base_url: String) -> VkConfig {
    VkConfig {
        base_url,
        access_token: value(VK_TOKEN),
        timeout_seconds: TEST_TIMEOUT_SECONDS,
    }
}

pub fn twitter_config(base_url: String) -> TwitterConfig {
    TwitterConfig {
        base_url,
        credentials: OAuthCredentials {
            consumer_key: value("test-consumer-key"),
            consumer_secret: value("test-consumer-secret"),
            access_token: value("test-access-token"),
            access_token_secret: value("test-access-token-secret"),
        },
        timeout_seconds: TEST_TIMEOUT_SECONDS,
    }
}

/// Factory whose providers both point at mock servers
pub fn factory(vk_url: String, twitter_url: String) -> DefaultClientFactory {
    DefaultClientFactory::new(ProvidersConfig {
        vk: vk_config(vk_url),
        twitter: twitter_config(twitter_url),
        proxy: None,
    })
}

/// VK `users.get` payload for a single active user
pub fn vk_user_response() -> Value {
    json!({
        "response": [{
            "id": 12345,
            "first_name": "Ann",
            "last_name": "Smith",
            "screen_name": "ann",
            "followers_count": 10,
            "common_count": 3,
            "photo": "http://x/p.jpg"
        }]
    })
}

pub fn vk_error(code: i64, message: &str) -> Value {
    json!({
        "error": {
            "error_code": code,
            "error_msg": message,
            "request_params": []
        }
    })
}

pub fn vk_friend(id: i64) -> Value {
    json!({
        "id": id,
        "first_name": format!("Friend{id}"),
        "screen_name": format!("id{id}"),
        "photo": format!("https://vk.example/{id}.jpg")
    })
}

pub fn vk_items(items: Vec<Value>) -> Value {
    json!({
        "response": {
            "count": items.len(),
            "items": items
        }
    })
}

pub fn vk_post(id: i64, text: &str) -> Value {
    json!({
        "id": id,
        "from_id": 12345,
        "owner_id": 12345,
        "date": 1_600_000_000,
        "text": text,
        "comments": {"count": 1},
        "likes": {"count": 5},
        "reposts": {"count": 2}
    })
}

pub fn twitter_user(id: i64, screen_name: &str) -> Value {
    json!({
        "id": id,
        "id_str": id.to_string(),
        "name": "Twitter User",
        "screen_name": screen_name,
        "description": "Just setting up",
        "followers_count": 200,
        "friends_count": 50,
        "profile_image_url": format!("http://pbs.twimg.com/{id}.jpg"),
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
