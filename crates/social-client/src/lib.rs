// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Social network client contract and shared utilities
//!
//! This crate provides the abstractions every social network integration is
//! built on, independent of any particular provider.
//!
//! # Core Abstractions
//!
//! - **`SocialClient` Trait**: the four-operation capability contract (user, articles,
//!   friends, followers) every provider implements
//! - **Error Taxonomy**: [`SocialError`], the closed set of domain failures providers
//!   classify their transport and payload errors into
//! - **Normalization**: [`normalize`], a declarative field-mapping routine turning raw
//!   provider payloads into [`User`] and [`Article`] records

use shared_types::{Article, Provider, User};

pub mod error;
pub mod normalize;

pub use error::*;
pub use normalize::{FieldDefault, FieldRule, NormalizeError};

/// Capability contract for social network clients
///
/// Every provider exposes the same four read operations. Implementations perform
/// exactly one outbound request per call and classify all failures into
/// [`SocialError`] before returning.
pub trait SocialClient: Send + Sync {
    /// Resolve a single user by numeric ID or handle
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::UserNotFound`] if the provider reports no match or a
    /// deactivated account, and the other variants for auth, transport, and payload
    /// failures
    fn get_user(&self, user_id: &str) -> impl Future<Output = Result<User, SocialError>> + Send;

    /// Fetch up to `count` of the user's most recent posts
    ///
    /// # Errors
    ///
    /// Same error surface as [`SocialClient::get_user`]
    fn get_articles(
        &self,
        user_id: &str,
        count: u32,
    ) -> impl Future<Output = Result<Vec<Article>, SocialError>> + Send;

    /// Fetch up to `count` of the user's friends
    ///
    /// # Errors
    ///
    /// Same error surface as [`SocialClient::get_user`]
    fn get_friends(
        &self,
        user_id: &str,
        count: u32,
    ) -> impl Future<Output = Result<Vec<User>, SocialError>> + Send;

    /// Fetch up to `count` of the user's followers
    ///
    /// # Errors
    ///
    /// Same error surface as [`SocialClient::get_user`]
    fn get_followers(
        &self,
        user_id: &str,
        count: u32,
    ) -> impl Future<Output = Result<Vec<User>, SocialError>> + Send;

    /// The provider this client talks to
    fn provider(&self) -> Provider;
}

/// Returns true when the identifier should be sent as a numeric ID rather than a handle
pub fn is_numeric_id(user_id: &str) -> bool {
    !user_id.is_empty() && user_id.bytes().all(|b| b.is_ascii_digit())
}
