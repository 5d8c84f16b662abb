//! API factory and the client seam consumed by the session store.
//!
//! # Design
//! - Keep URL and header construction DOM-free so it can be tested natively.
//! - Transport lives behind [`ScoreApi`]; the browser implementation sits in `services::api`.
//! - Every remote call returns a [`Result`]; negative outcomes are values, not panics.

use crate::core::auth::basic_auth_header;
use async_trait::async_trait;
use scorecalc_api_models::{
    AuthorizationData, CategoryResponse, Content, ElementResponse, ElementTypeResponse,
    ExerciseResponse,
};
use std::rc::Rc;
use thiserror::Error;

/// Base endpoint used when no build-time override is provided.
pub const DEFAULT_API_BASE_URL: &str = "http://185.252.146.69:8080";

/// Connection settings for the remote service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
}

impl ApiConfig {
    /// Build a config, trimming trailing slashes from the base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve the base URL from `SCORECALC_API_BASE_URL` at build time.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(option_env!("SCORECALC_API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

/// Remote operations consumed by the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Public calculator content.
    Content,
    /// Credential check for the admin area.
    AdminCheckAuth,
    /// Admin category listing.
    AdminCategories,
    /// Admin element listing.
    AdminElements,
    /// Admin element type listing.
    AdminElementTypes,
    /// Admin exercise listing.
    AdminExercises,
}

impl Endpoint {
    /// Path relative to the base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Content => "/content",
            Self::AdminCheckAuth => "/admin/check-auth",
            Self::AdminCategories => "/admin/categories",
            Self::AdminElements => "/admin/elements",
            Self::AdminElementTypes => "/admin/element-types",
            Self::AdminExercises => "/admin/exercises",
        }
    }
}

/// Configured client handle: base URL plus optional basic-auth credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiClient {
    config: ApiConfig,
    auth: Option<AuthorizationData>,
}

impl ApiClient {
    /// Absolute URL for an endpoint.
    #[must_use]
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.config.base_url, endpoint.path())
    }

    /// `Authorization` header value when credentials are configured.
    #[must_use]
    pub fn authorization_header(&self) -> Option<String> {
        self.auth.as_ref().map(basic_auth_header)
    }

    /// Credentials this client was built with.
    #[must_use]
    pub const fn auth(&self) -> Option<&AuthorizationData> {
        self.auth.as_ref()
    }
}

/// Build a client handle, optionally carrying credentials.
#[must_use]
pub fn create_api(config: &ApiConfig, auth: Option<AuthorizationData>) -> ApiClient {
    ApiClient {
        config: config.clone(),
        auth,
    }
}

/// Failure of a remote call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("request failed with status {status}")]
    Response {
        /// HTTP status code.
        status: u16,
        /// Raw response body, `None` when it could not be read.
        body: Option<String>,
    },
    /// No response was received.
    #[error("no response from server: {0}")]
    Connection(String),
    /// A success response carried an unreadable payload.
    #[error("malformed response payload: {0}")]
    Decode(String),
    /// An admin operation was attempted without an admin client.
    #[error("admin client is not configured")]
    NotAuthenticated,
}

/// Remote operations exposed by the service.
#[async_trait(?Send)]
pub trait ScoreApi {
    /// Fetch the public calculator content.
    async fn get_content(&self) -> Result<Content, ApiError>;
    /// Verify the client's credentials.
    async fn admin_check_auth(&self) -> Result<(), ApiError>;
    /// Fetch all categories.
    async fn admin_get_categories(&self) -> Result<Vec<CategoryResponse>, ApiError>;
    /// Fetch all elements.
    async fn admin_get_elements(&self) -> Result<Vec<ElementResponse>, ApiError>;
    /// Fetch all element types.
    async fn admin_get_element_types(&self) -> Result<Vec<ElementTypeResponse>, ApiError>;
    /// Fetch all exercises.
    async fn admin_get_exercises(&self) -> Result<Vec<ExerciseResponse>, ApiError>;
}

/// Builds client handles, with or without credentials.
pub trait ApiFactory {
    /// Create a client bound to `auth`.
    fn create(&self, auth: Option<AuthorizationData>) -> Rc<dyn ScoreApi>;
}
