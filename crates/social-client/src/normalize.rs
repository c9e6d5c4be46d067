// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Declarative response normalization
//!
//! Providers describe how their wire payloads map onto the domain records with a
//! table of [`FieldRule`]s. A single routine, [`normalize`], applies such a table:
//! for each domain field it tries the listed source paths in order, takes the first
//! non-null value, falls back to the rule's default, and finally lets `serde` check
//! the assembled object against the target type.
//!
//! ```rust
//! use serde_json::json;
//! use shared_types::Article;
//! use social_client::{FieldDefault, FieldRule, normalize::normalize};
//!
//! const RULES: &[FieldRule] = &[
//!     FieldRule::required("id", &[&["id"]]),
//!     FieldRule::required("text", &[&["text"]]),
//!     FieldRule::defaulted("likes_count", &[&["likes", "count"]], FieldDefault::Zero),
//!     FieldRule::defaulted("comments_count", &[], FieldDefault::Zero),
//!     FieldRule::defaulted("reposts_count", &[], FieldDefault::Zero),
//!     FieldRule::defaulted("retweet_count", &[], FieldDefault::Zero),
//! ];
//!
//! let raw = json!({"id": 7, "text": "hi", "likes": {"count": 3}});
//! let article: Article = normalize(&raw, RULES).unwrap();
//! assert_eq!(article.likes_count, 3);
//! assert_eq!(article.comments_count, 0);
//! ```

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

/// A path into a raw JSON object, one key per nesting level
pub type SourcePath = &'static [&'static str];

/// What to do when none of a rule's sources yields a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    /// The field must be present in the payload
    Required,
    /// Fill with numeric zero
    Zero,
    /// Fill with an empty string
    EmptyString,
}

impl FieldDefault {
    fn value(self) -> Option<Value> {
        match self {
            Self::Required => None,
            Self::Zero => Some(Value::from(0)),
            Self::EmptyString => Some(Value::String(String::new())),
        }
    }
}

/// Mapping of one domain field onto a provider's wire format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Name of the domain field being produced
    pub field: &'static str,
    /// Candidate source paths, tried in order
    pub sources: &'static [SourcePath],
    /// Fallback when no source is present
    pub default: FieldDefault,
}

impl FieldRule {
    /// A field that must be present under one of `sources`
    pub const fn required(field: &'static str, sources: &'static [SourcePath]) -> Self {
        Self {
            field,
            sources,
            default: FieldDefault::Required,
        }
    }

    /// A field that falls back to `default` when absent
    pub const fn defaulted(
        field: &'static str,
        sources: &'static [SourcePath],
        default: FieldDefault,
    ) -> Self {
        Self {
            field,
            sources,
            default,
        }
    }

    fn resolve(&self, raw: &Value) -> Option<Value> {
        self.sources
            .iter()
            .find_map(|path| lookup(raw, path))
            .cloned()
            .or_else(|| self.default.value())
    }
}

/// Errors produced while normalizing a raw payload
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The payload was not a JSON object
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// A required field had no source value
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The assembled record did not match the domain type
    #[error("invalid field value: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Apply `rules` to `raw` and deserialize the result into `T`
///
/// # Errors
///
/// Returns [`NormalizeError`] if `raw` is not an object, a required field is missing,
/// or a mapped value has the wrong type for the domain field
pub fn normalize<T: DeserializeOwned>(raw: &Value, rules: &[FieldRule]) -> Result<T, NormalizeError> {
    if !raw.is_object() {
        return Err(NormalizeError::NotAnObject(json_type_name(raw)));
    }

    let mut record = Map::with_capacity(rules.len());
    for rule in rules {
        let value = rule
            .resolve(raw)
            .ok_or(NormalizeError::MissingField(rule.field))?;
        record.insert(rule.field.to_string(), value);
    }

    Ok(serde_json::from_value(Value::Object(record))?)
}

/// Apply `rules` to every item of `items`, preserving order
///
/// # Errors
///
/// Fails on the first item that cannot be normalized
pub fn normalize_all<T: DeserializeOwned>(
    items: &[Value],
    rules: &[FieldRule],
) -> Result<Vec<T>, NormalizeError> {
    items.iter().map(|item| normalize(item, rules)).collect()
}

/// Follow `path` into `raw`, treating `null` as absent
fn lookup<'a>(raw: &'a Value, path: &[&str]) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    path.iter()
        .try_fold(raw, |value, key| value.get(key))
        .filter(|value| !value.is_null())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
