#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::multiple_crate_versions)]
//! Shared HTTP DTOs for the Scorecalc API.
//!
//! These types mirror the JSON contract of the remote service (camelCase field
//! names). Fields the UI never inspects are kept in an `extra` map so payloads
//! pass through without loss.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error name used when the server response cannot be interpreted.
pub const UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";
/// Error name used when no response was received at all.
pub const CONNECTION_ERROR: &str = "CONNECTION_ERROR";

/// Identifier shared by categories, elements, element types and exercises.
pub type EntityId = i64;

/// Login/password pair used for HTTP basic authentication.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorizationData {
    /// Account login.
    pub login: String,
    /// Account password.
    pub password: String,
}

impl AuthorizationData {
    /// Build a credential pair.
    #[must_use]
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }
}

/// Normalized error descriptor, also the shape of structured error bodies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Machine-readable error name (`BAD_LOGIN`, `UNKNOWN_ERROR`, ...).
    pub name: String,
    /// Human-readable message shown to the user.
    pub message: String,
}

impl ErrorResponse {
    /// Build an error descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Reference category; its level bounds which elements earn credit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    /// Category identifier.
    pub id: EntityId,
    /// Difficulty level of the category.
    pub level: i32,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// A composable element with its difficulty level and score value.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ElementResponse {
    /// Element identifier.
    pub id: EntityId,
    /// Difficulty level of the element.
    pub level: i32,
    /// Score awarded when the element is credited.
    pub score: f64,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Owning element type, when the server reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_type_id: Option<EntityId>,
    /// Fields not interpreted by the UI.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Classification of elements.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ElementTypeResponse {
    /// Element type identifier.
    pub id: EntityId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Fields not interpreted by the UI.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reference exercise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseResponse {
    /// Exercise identifier.
    pub id: EntityId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Fields not interpreted by the UI.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Public payload backing the calculator.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// Every element available for combos.
    pub elements: Vec<ElementResponse>,
    /// Categories offered in the calculator selector.
    #[serde(default)]
    pub categories: Vec<CategoryResponse>,
    /// Element types used to group the element picker.
    #[serde(default)]
    pub element_types: Vec<ElementTypeResponse>,
}
