// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Custom extractors for improved error handling
//!
//! This module provides a query extractor that reports parse and validation
//! failures as `422 Unprocessable Entity` with the server's JSON error body,
//! plus the query parameter types shared by the social routes.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use shared_types::Provider;
use utoipa::IntoParams;

use crate::error::ServerError;

/// Number of list items returned when `count` is omitted
pub const DEFAULT_COUNT: u32 = 10;

/// Largest accepted `count`
pub const MAX_COUNT: u32 = 200;

/// Query extractor that rejects invalid input with [`ServerError::InvalidQuery`]
#[derive(Debug)]
pub struct QueryExtractor<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryExtractor<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(ServerError::InvalidQuery {
                message: rejection.body_text(),
            }),
        }
    }
}

/// Requested item count, validated to `1..=200`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Count(u32);

impl Count {
    /// Create a new `Count`
    ///
    /// # Errors
    ///
    /// Returns a message if the value is outside `1..=200`
    pub fn new(value: u32) -> Result<Self, String> {
        if (1..=MAX_COUNT).contains(&value) {
            Ok(Self(value))
        } else {
            Err(format!("count must be between 1 and {MAX_COUNT}, got {value}"))
        }
    }

    /// Get the count value
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Count {
    fn default() -> Self {
        Self(DEFAULT_COUNT)
    }
}

impl<'de> Deserialize<'de> for Count {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u32::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

/// Query parameters for single-record lookups
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SourceQuery {
    /// Provider to query; omit to try every provider in fallback order
    #[serde(default)]
    pub source: Option<Provider>,
}

/// Query parameters for list operations
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Provider to query; omit to try every provider in fallback order
    #[serde(default)]
    pub source: Option<Provider>,
    /// Maximum number of items to return
    #[serde(default)]
    #[param(value_type = u32, minimum = 1, maximum = 200, default = 10)]
    pub count: Count,
}

#[cfg(test)]
mod tests {
    use axum::http::{Request, StatusCode};

    use super::*;

    async fn extract<T: DeserializeOwned>(uri: &str) -> Result<T, ServerError> {
        let (mut parts, ()) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        QueryExtractor::<T>::from_request_parts(&mut parts, &())
            .await
            .map(|QueryExtractor(value)| value)
    }

    #[tokio::test]
    async fn defaults_when_omitted() {
        let query: ListQuery = extract("/user/1/article").await.unwrap();
        assert_eq!(query.source, None);
        assert_eq!(query.count.value(), DEFAULT_COUNT);
    }

    #[tokio::test]
    async fn parses_source_and_count() {
        let query: ListQuery = extract("/user/1/friend?source=twitter&count=25")
            .await
            .unwrap();
        assert_eq!(query.source, Some(Provider::Twitter));
        assert_eq!(query.count.value(), 25);
    }

    #[tokio::test]
    async fn unknown_source_is_rejected() {
        let err = extract::<SourceQuery>("/user/1?source=myspace")
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.to_string().contains("myspace"));
    }

    #[tokio::test]
    async fn count_bounds_are_enforced() {
        for uri in ["/x?count=0", "/x?count=201", "/x?count=-1", "/x?count=ten"] {
            let err = extract::<ListQuery>(uri).await.unwrap_err();
            assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        }

        let query: ListQuery = extract("/x?count=200").await.unwrap();
        assert_eq!(query.count.value(), MAX_COUNT);
    }
}
