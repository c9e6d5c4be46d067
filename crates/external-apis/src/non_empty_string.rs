// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Non-empty string validation for credentials and hosts
//!
//! [`NonEmptyString`] makes an empty access token or proxy host unrepresentable.
//! It deserializes with the same validation, so configuration files holding a
//! blank credential are rejected while loading rather than at the first request.
//!
//! ```rust
//! use external_apis::NonEmptyString;
//!
//! let token = NonEmptyString::new("vk1.a.token").unwrap();
//! assert_eq!(token.as_str(), "vk1.a.token");
//!
//! assert!(NonEmptyString::new("").is_err());
//! assert!(NonEmptyString::new("  \t").is_err());
//! ```

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Minimum length at which [`NonEmptyString::redacted`] reveals a prefix
const REDACTED_PREFIX_MIN_LEN: usize = 16;

/// A string that contains at least one non-whitespace character
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyString(Box<str>);

impl NonEmptyString {
    /// Validate and wrap `s`
    ///
    /// Leading and trailing whitespace is kept as-is; only blank input is rejected.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if `s` is empty or whitespace-only
    pub fn new(s: impl Into<String>) -> Result<Self, String> {
        let s = s.into();
        if s.trim().is_empty() {
            Err("String cannot be empty or whitespace-only".to_string())
        } else {
            Ok(Self(s.into_boxed_str()))
        }
    }

    /// Borrow the contained value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Debug-safe rendering for secrets
    ///
    /// Values shorter than 16 characters are fully masked; longer ones keep a
    /// four-character prefix.
    pub fn redacted(&self) -> String {
        if self.0.chars().count() < REDACTED_PREFIX_MIN_LEN {
            return "***".to_string();
        }
        let visible: String = self.0.chars().take(4).collect();
        format!("{visible}***")
    }
}

// Credentials are the main use, so Debug never prints the full value
impl fmt::Debug for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NonEmptyString")
            .field(&self.redacted())
            .finish()
    }
}

impl fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NonEmptyString {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for NonEmptyString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for NonEmptyString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NonEmptyString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(de::Error::custom)
    }
}
