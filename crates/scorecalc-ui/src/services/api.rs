//! HTTP client (REST) backing [`ScoreApi`].
//!
//! # Design
//! - One `GET` per operation; credentials travel as a basic `Authorization` header.
//! - Transport failures become [`ApiError::Connection`]; non-2xx answers keep status and body.

use crate::core::api::{ApiClient, ApiConfig, ApiError, ApiFactory, Endpoint, ScoreApi, create_api};
use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use scorecalc_api_models::{
    AuthorizationData, CategoryResponse, Content, ElementResponse, ElementTypeResponse,
    ExerciseResponse,
};
use serde::de::DeserializeOwned;
use std::rc::Rc;

/// `gloo-net` transport for one configured client.
#[derive(Clone, Debug)]
pub struct HttpApi {
    client: ApiClient,
}

impl HttpApi {
    /// Wrap a configured client.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn send(&self, endpoint: Endpoint) -> Result<Response, ApiError> {
        let mut req = Request::get(&self.client.url(endpoint));
        if let Some(header) = self.client.authorization_header() {
            req = req.header("Authorization", &header);
        }
        let response = req
            .send()
            .await
            .map_err(|err| ApiError::Connection(err.to_string()))?;
        if response.ok() {
            return Ok(response);
        }
        Err(ApiError::Response {
            status: response.status(),
            body: response.text().await.ok(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        self.send(endpoint)
            .await?
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[async_trait(?Send)]
impl ScoreApi for HttpApi {
    async fn get_content(&self) -> Result<Content, ApiError> {
        self.get_json(Endpoint::Content).await
    }

    async fn admin_check_auth(&self) -> Result<(), ApiError> {
        self.send(Endpoint::AdminCheckAuth).await.map(|_| ())
    }

    async fn admin_get_categories(&self) -> Result<Vec<CategoryResponse>, ApiError> {
        self.get_json(Endpoint::AdminCategories).await
    }

    async fn admin_get_elements(&self) -> Result<Vec<ElementResponse>, ApiError> {
        self.get_json(Endpoint::AdminElements).await
    }

    async fn admin_get_element_types(&self) -> Result<Vec<ElementTypeResponse>, ApiError> {
        self.get_json(Endpoint::AdminElementTypes).await
    }

    async fn admin_get_exercises(&self) -> Result<Vec<ExerciseResponse>, ApiError> {
        self.get_json(Endpoint::AdminExercises).await
    }
}

/// Builds [`HttpApi`] clients against one base URL.
#[derive(Clone, Debug)]
pub struct HttpApiFactory {
    config: ApiConfig,
}

impl HttpApiFactory {
    /// Factory for the given connection settings.
    #[must_use]
    pub const fn new(config: ApiConfig) -> Self {
        Self { config }
    }
}

impl ApiFactory for HttpApiFactory {
    fn create(&self, auth: Option<AuthorizationData>) -> Rc<dyn ScoreApi> {
        Rc::new(HttpApi::new(create_api(&self.config, auth)))
    }
}
