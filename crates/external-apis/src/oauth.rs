// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! OAuth 1.0a request signing (HMAC-SHA1)
//!
//! Produces the `Authorization` header value for a request given the consumer and
//! access-token credentials. Only what Twitter REST v1.1 read endpoints need is
//! covered: `GET` requests with query parameters, no request body.

use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac, digest::InvalidLength};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha1::Sha1;
use thiserror::Error;
use uuid::Uuid;

use crate::NonEmptyString;

/// RFC 5849 §3.6: everything but unreserved characters is encoded
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

/// Consumer and access-token credentials for one application user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthCredentials {
    /// Application (consumer) key
    pub consumer_key: NonEmptyString,
    /// Application (consumer) secret
    pub consumer_secret: NonEmptyString,
    /// User access token
    pub access_token: NonEmptyString,
    /// User access token secret
    pub access_token_secret: NonEmptyString,
}

/// Signing key could not be used by the MAC implementation
#[derive(Debug, Error)]
#[error("failed to sign request: {0}")]
pub struct SigningError(#[from] InvalidLength);

/// Per-request values that must be unique or current
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nonce {
    /// Random single-use token
    pub value: String,
    /// Seconds since the Unix epoch
    pub timestamp: i64,
}

impl Nonce {
    /// Fresh random nonce stamped with the current time
    pub fn generate() -> Self {
        Self {
            value: Uuid::new_v4().simple().to_string(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl OAuthCredentials {
    /// Build the `Authorization` header for a request with a fresh nonce
    ///
    /// # Errors
    ///
    /// Returns [`SigningError`] if the HMAC cannot be keyed
    pub fn authorization_header(
        &self,
        method: &str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<String, SigningError> {
        self.authorization_header_with(method, url, query, &Nonce::generate())
    }

    /// Build the `Authorization` header with an explicit nonce
    ///
    /// # Errors
    ///
    /// Returns [`SigningError`] if the HMAC cannot be keyed
    pub fn authorization_header_with(
        &self,
        method: &str,
        url: &str,
        query: &[(&str, String)],
        nonce: &Nonce,
    ) -> Result<String, SigningError> {
        let timestamp = nonce.timestamp.to_string();
        let mut oauth_params = vec![
            ("oauth_consumer_key", self.consumer_key.as_str()),
            ("oauth_nonce", nonce.value.as_str()),
            ("oauth_signature_method", SIGNATURE_METHOD),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_token", self.access_token.as_str()),
            ("oauth_version", OAUTH_VERSION),
        ];

        let all_params = oauth_params
            .iter()
            .copied()
            .chain(query.iter().map(|(key, value)| (*key, value.as_str())));
        let base = signature_base_string(method, url, all_params);
        let signature = sign(
            &base,
            self.consumer_secret.as_str(),
            self.access_token_secret.as_str(),
        )?;

        oauth_params.push(("oauth_signature", signature.as_str()));
        oauth_params.sort_unstable();

        let fields = oauth_params
            .iter()
            .map(|(key, value)| format!("{}=\"{}\"", encode(key), encode(value)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("OAuth {fields}"))
    }
}

/// Percent-encode per RFC 5849
pub fn encode(input: &str) -> String {
    utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}

/// `METHOD&encoded-url&encoded-normalized-parameters`
pub fn signature_base_string<'a>(
    method: &str,
    url: &str,
    params: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> String {
    let mut encoded: Vec<(String, String)> = params
        .into_iter()
        .map(|(key, value)| (encode(key), encode(value)))
        .collect();
    encoded.sort_unstable();

    let normalized = encoded
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(url),
        encode(&normalized)
    )
}

/// Base64 HMAC-SHA1 of `base` keyed with both secrets
///
/// # Errors
///
/// Returns [`SigningError`] if the HMAC cannot be keyed
pub fn sign(base: &str, consumer_secret: &str, token_secret: &str) -> Result<String, SigningError> {
    let key = format!("{}&{}", encode(consumer_secret), encode(token_secret));
    let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())?;
    mac.update(base.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}
