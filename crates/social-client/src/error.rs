// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Domain error taxonomy shared by all providers

use shared_types::{Provider, ProviderParseError};
use thiserror::Error;

/// Closed set of failures a social network operation can produce
///
/// Provider clients classify transport, status, and payload errors into one of these
/// variants at their boundary, so provider-specific error types never travel upward.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum SocialError {
    /// Target identity does not exist or was deleted
    #[error("user {user_id} does not exist")]
    UserNotFound { user_id: String },

    /// Credentials were rejected by the provider
    #[error("{provider} authorization failed: {message}")]
    Authorization { provider: Provider, message: String },

    /// Transport failure: timeout, DNS, connection reset
    #[error("{provider} connection failed: {message}")]
    Connection { provider: Provider, message: String },

    /// Payload could not be parsed or normalized
    #[error("malformed {provider} response: {message}")]
    MalformedResponse { provider: Provider, message: String },

    /// Provider identifier is not one of the known providers
    #[error("unknown resource type: {value}")]
    UnknownResourceType { value: String },

    /// Any other unclassified provider failure
    #[error("{provider} request failed: {message}")]
    Unknown { provider: Provider, message: String },
}

impl SocialError {
    /// Create a not-found error for the given identifier
    pub fn user_not_found(user_id: impl Into<String>) -> Self {
        Self::UserNotFound {
            user_id: user_id.into(),
        }
    }

    /// Check if this error means the target user does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound { .. })
    }

    /// The provider that produced this error, if any
    pub fn provider(&self) -> Option<Provider> {
        match self {
            Self::Authorization { provider, .. }
            | Self::Connection { provider, .. }
            | Self::MalformedResponse { provider, .. }
            | Self::Unknown { provider, .. } => Some(*provider),
            Self::UserNotFound { .. } | Self::UnknownResourceType { .. } => None,
        }
    }

    /// Short machine-readable label, used in logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound { .. } => "not_found",
            Self::Authorization { .. } => "authorization",
            Self::Connection { .. } => "connection",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::UnknownResourceType { .. } => "unknown_resource_type",
            Self::Unknown { .. } => "unknown",
        }
    }
}

impl From<ProviderParseError> for SocialError {
    fn from(value: ProviderParseError) -> Self {
        Self::UnknownResourceType { value: value.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_detection() {
        assert!(SocialError::user_not_found("42").is_not_found());
        assert!(
            !SocialError::Authorization {
                provider: Provider::Vk,
                message: "bad token".to_string(),
            }
            .is_not_found()
        );
    }

    #[test]
    fn provider_context() {
        let error = SocialError::Connection {
            provider: Provider::Twitter,
            message: "timed out".to_string(),
        };
        assert_eq!(error.provider(), Some(Provider::Twitter));
        assert_eq!(SocialError::user_not_found("1").provider(), None);
    }

    #[test]
    fn error_display() {
        assert_eq!(
            SocialError::user_not_found("ann").to_string(),
            "user ann does not exist"
        );
        assert_eq!(
            SocialError::MalformedResponse {
                provider: Provider::Vk,
                message: "missing field `id`".to_string(),
            }
            .to_string(),
            "malformed vk response: missing field `id`"
        );
    }

    #[test]
    fn unknown_provider_maps_to_unknown_resource_type() {
        let error: SocialError = "myspace"
            .parse::<Provider>()
            .map_err(SocialError::from)
            .unwrap_err();
        assert_eq!(
            error,
            SocialError::UnknownResourceType {
                value: "myspace".to_string()
            }
        );
        assert_eq!(error.kind(), "unknown_resource_type");
    }
}
