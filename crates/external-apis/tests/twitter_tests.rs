// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for `TwitterClient`
//!
//! These tests use wiremock to mock the v1.1 endpoints and verify signing, identity
//! parameter selection, normalization, and status-code classification.

use external_apis::TwitterClient;
use serde_json::json;
use shared_types::Provider;
use social_client::{SocialClient, SocialError};
use wiremock::{
    Mock, MockServer, Request, ResponseTemplate,
    matchers::{header_exists, method, path, query_param},
};

mod fixtures;
use fixtures::*;

async fn client(mock_server: &MockServer) -> TwitterClient {
    TwitterClient::new(twitter_config(mock_server.uri()), None).unwrap()
}

/// Test handle lookup is signed and normalized
#[tokio::test]
async fn get_user_by_screen_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/lookup.json"))
        .and(query_param("screen_name", "jack"))
        .and(header_exists("authorization"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([twitter_user(12, "jack")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let user = client(&mock_server).await.get_user("jack").await.unwrap();
    assert_eq!(user.id, 12);
    assert_eq!(user.screen_name, "jack");
    assert_eq!(user.name, "Twitter User");
    assert_eq!(user.followers_count, 200);
    assert_eq!(user.friends_count, 50);
    assert_eq!(user.image_url, "https://pbs.twimg.com/12.jpg");
    assert_eq!(user.description, "Just setting up");
}

/// Test numeric ids are sent as `user_id`
#[tokio::test]
async fn get_user_by_numeric_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/lookup.json"))
        .and(query_param("user_id", "783214"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([twitter_user(783_214, "twitter")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let user = client(&mock_server).await.get_user("783214").await.unwrap();
    assert_eq!(user.id, 783_214);
}

/// Test the authorization header carries the OAuth 1.0a fields
#[tokio::test]
async fn requests_are_oauth_signed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/lookup.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([twitter_user(1, "a")])),
        )
        .mount(&mock_server)
        .await;

    client(&mock_server).await.get_user("a").await.unwrap();

    let requests: Vec<Request> = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let authorization = requests[0]
        .headers
        .get("authorization")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    assert!(authorization.starts_with("OAuth "));
    assert!(authorization.contains("oauth_consumer_key=\"test-consumer-key\""));
    assert!(authorization.contains("oauth_token=\"test-access-token\""));
    assert!(authorization.contains("oauth_signature_method=\"HMAC-SHA1\""));
    assert!(authorization.contains("oauth_signature=\""));
}

/// Test an empty lookup array is not found
#[tokio::test]
async fn get_user_empty_lookup() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/lookup.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).await.get_user("ghost").await.unwrap_err();
    assert_eq!(err, SocialError::user_not_found("ghost"));
}

/// Test HTTP 404 is not found
#[tokio::test]
async fn get_user_not_found_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/lookup.json"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{"code": 17, "message": "No user matches for specified terms."}]
        })))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).await.get_user("ghost").await.unwrap_err();
    assert!(err.is_not_found());
}

/// Test HTTP 401 is an authorization failure
#[tokio::test]
async fn get_user_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/lookup.json"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).await.get_user("jack").await.unwrap_err();
    assert!(matches!(
        err,
        SocialError::Authorization {
            provider: Provider::Twitter,
            ..
        }
    ));
}

/// Test other error statuses map to unknown
#[tokio::test]
async fn get_user_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/lookup.json"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit exceeded"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).await.get_user("jack").await.unwrap_err();
    assert_eq!(err.kind(), "unknown");
    assert!(err.to_string().contains("429"));
}

/// Test invalid JSON is a malformed response
#[tokio::test]
async fn get_user_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/lookup.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).await.get_user("jack").await.unwrap_err();
    assert_eq!(err.kind(), "malformed_response");
}

/// Test timeline requests extended text and truncates to count
#[tokio::test]
async fn get_articles_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/statuses/user_timeline.json"))
        .and(query_param("screen_name", "jack"))
        .and(query_param("count", "2"))
        .and(query_param("tweet_mode", "extended"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            tweet(3, "third"),
            tweet(2, "second"),
            tweet(1, "first")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let articles = client(&mock_server)
        .await
        .get_articles("jack", 2)
        .await
        .unwrap();

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].text, "third");
    assert_eq!(articles[0].likes_count, 7);
    assert_eq!(articles[0].retweet_count, 3);
    assert_eq!(articles[0].reposts_count, 0);
    assert_eq!(articles[0].comments_count, 0);
}

/// Test friends are read from the `users` member
#[tokio::test]
async fn get_friends_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/friends/list.json"))
        .and(query_param("user_id", "12"))
        .and(query_param("count", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [twitter_user(1, "a"), twitter_user(2, "b")],
            "next_cursor": 0,
            "previous_cursor": 0
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let friends = client(&mock_server)
        .await
        .get_friends("12", 10)
        .await
        .unwrap();
    let names: Vec<&str> = friends.iter().map(|f| f.screen_name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

/// Test followers honour the count bound
#[tokio::test]
async fn get_followers_truncates_to_count() {
    let mock_server = MockServer::start().await;

    let users: Vec<_> = (1..=4).map(|id| twitter_user(id, "f")).collect();
    Mock::given(method("GET"))
        .and(path("/followers/list.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"users": users})))
        .mount(&mock_server)
        .await;

    let followers = client(&mock_server)
        .await
        .get_followers("jack", 1)
        .await
        .unwrap();
    assert_eq!(followers.len(), 1);
}

/// Test a graph page without `users` is empty
#[tokio::test]
async fn get_followers_missing_users_member() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/followers/list.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"next_cursor": 0})))
        .mount(&mock_server)
        .await;

    let followers = client(&mock_server)
        .await
        .get_followers("jack", 5)
        .await
        .unwrap();
    assert!(followers.is_empty());
}
