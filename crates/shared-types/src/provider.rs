// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Social network provider identifiers
//!
//! This module provides the closed set of providers the service knows how to
//! talk to, along with the canonical order used for fallback iteration.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;
use utoipa::ToSchema;

/// Supported social network providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
#[schema(rename_all = "lowercase")]
pub enum Provider {
    /// VK (`VKontakte`) REST API
    Vk,
    /// Twitter REST API v1.1
    Twitter,
}

/// Error returned when a provider identifier is not recognized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown resource type: {0}")]
pub struct ProviderParseError(pub String);

impl Provider {
    /// Returns the wire identifier used in query strings and configuration
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vk => "vk",
            Self::Twitter => "twitter",
        }
    }

    /// Returns a human-readable name of the provider
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Vk => "VK",
            Self::Twitter => "Twitter",
        }
    }

    /// Returns all known providers in canonical fallback order
    pub const fn all() -> &'static [Self] {
        &[Self::Vk, Self::Twitter]
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = ProviderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vk" | "vkontakte" => Ok(Self::Vk),
            "twitter" => Ok(Self::Twitter),
            _ => Err(ProviderParseError(s.to_string())),
        }
    }
}

impl Serialize for Provider {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Provider {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}
