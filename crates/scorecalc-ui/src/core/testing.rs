//! In-memory fakes for exercising the session without a browser.

use crate::core::api::{ApiError, ApiFactory, ScoreApi};
use crate::core::auth::CredentialStore;
use crate::core::errors::Notifier;
use crate::core::session::Session;
use async_trait::async_trait;
use scorecalc_api_models::{
    AuthorizationData, CategoryResponse, Content, ElementResponse, ElementTypeResponse,
    ErrorResponse, ExerciseResponse,
};
use serde_json::Map;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use tokio::sync::Notify;

pub(crate) fn valid_auth() -> AuthorizationData {
    AuthorizationData::new("admin", "secret")
}

fn element(id: i64, level: i32, score: f64) -> ElementResponse {
    ElementResponse {
        id,
        level,
        score,
        name: format!("element-{id}"),
        element_type_id: Some(1),
        extra: Map::new(),
    }
}

fn category(id: i64, level: i32) -> CategoryResponse {
    CategoryResponse {
        id,
        level,
        name: format!("category-{id}"),
    }
}

/// Scripted remote service shared by every client the factory builds.
#[derive(Default)]
pub(crate) struct FakeBackend {
    calls: RefCell<HashMap<&'static str, usize>>,
    failure: RefCell<Option<ApiError>>,
    held: Cell<bool>,
    released: Notify,
}

impl FakeBackend {
    pub(crate) fn calls(&self, endpoint: &str) -> usize {
        self.calls.borrow().get(endpoint).copied().unwrap_or(0)
    }

    pub(crate) fn fail_with(&self, error: ApiError) {
        *self.failure.borrow_mut() = Some(error);
    }

    pub(crate) fn recover(&self) {
        self.failure.borrow_mut().take();
    }

    /// Park every response until [`FakeBackend::release`] is called.
    pub(crate) fn hold(&self) {
        self.held.set(true);
    }

    pub(crate) fn release(&self) {
        self.held.set(false);
        self.released.notify_waiters();
    }

    async fn respond<T>(&self, endpoint: &'static str, value: T) -> Result<T, ApiError> {
        *self.calls.borrow_mut().entry(endpoint).or_insert(0) += 1;
        while self.held.get() {
            self.released.notified().await;
        }
        match self.failure.borrow().clone() {
            Some(error) => Err(error),
            None => Ok(value),
        }
    }
}

struct FakeClient {
    backend: Rc<FakeBackend>,
    auth: Option<AuthorizationData>,
}

impl FakeClient {
    fn require_auth(&self) -> Result<(), ApiError> {
        if self.auth == Some(valid_auth()) {
            Ok(())
        } else {
            Err(ApiError::Response {
                status: 401,
                body: Some(r#"{"name":"BAD_LOGIN","message":"Invalid credentials"}"#.into()),
            })
        }
    }
}

#[async_trait(?Send)]
impl ScoreApi for FakeClient {
    async fn get_content(&self) -> Result<Content, ApiError> {
        let content = Content {
            elements: vec![element(1, 1, 0.5), element(2, 2, 1.0), element(3, 9, 3.0)],
            categories: vec![category(1, 2), category(2, 5)],
            element_types: Vec::new(),
        };
        self.backend.respond("content", content).await
    }

    async fn admin_check_auth(&self) -> Result<(), ApiError> {
        let result = self.backend.respond("check-auth", ()).await;
        result.and_then(|()| self.require_auth())
    }

    async fn admin_get_categories(&self) -> Result<Vec<CategoryResponse>, ApiError> {
        self.require_auth()?;
        let categories = vec![category(1, 2), category(2, 5)];
        self.backend.respond("categories", categories).await
    }

    async fn admin_get_elements(&self) -> Result<Vec<ElementResponse>, ApiError> {
        self.require_auth()?;
        let elements = vec![element(1, 1, 0.5), element(2, 2, 1.0), element(3, 9, 3.0)];
        self.backend.respond("elements", elements).await
    }

    async fn admin_get_element_types(&self) -> Result<Vec<ElementTypeResponse>, ApiError> {
        self.require_auth()?;
        let types = vec![ElementTypeResponse {
            id: 1,
            name: "Leaps".into(),
            extra: Map::new(),
        }];
        self.backend.respond("element-types", types).await
    }

    async fn admin_get_exercises(&self) -> Result<Vec<ExerciseResponse>, ApiError> {
        self.require_auth()?;
        let exercises = vec![ExerciseResponse {
            id: 1,
            name: "Floor".into(),
            extra: Map::new(),
        }];
        self.backend.respond("exercises", exercises).await
    }
}

struct FakeFactory {
    backend: Rc<FakeBackend>,
}

impl ApiFactory for FakeFactory {
    fn create(&self, auth: Option<AuthorizationData>) -> Rc<dyn ScoreApi> {
        Rc::new(FakeClient {
            backend: Rc::clone(&self.backend),
            auth,
        })
    }
}

#[derive(Default)]
pub(crate) struct MemoryCredentials {
    stored: RefCell<Option<AuthorizationData>>,
}

impl MemoryCredentials {
    pub(crate) fn stored(&self) -> Option<AuthorizationData> {
        self.stored.borrow().clone()
    }

    pub(crate) fn seed(&self, auth: AuthorizationData) {
        *self.stored.borrow_mut() = Some(auth);
    }
}

impl CredentialStore for MemoryCredentials {
    fn load(&self) -> Option<AuthorizationData> {
        self.stored()
    }

    fn save(&self, auth: &AuthorizationData) {
        self.seed(auth.clone());
    }

    fn clear(&self) {
        self.stored.borrow_mut().take();
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    reported: RefCell<Vec<ErrorResponse>>,
}

impl RecordingNotifier {
    pub(crate) fn reported(&self) -> Vec<ErrorResponse> {
        self.reported.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_error(&self, error: &ErrorResponse, _source: &ApiError) {
        self.reported.borrow_mut().push(error.clone());
    }
}

/// A session wired to fakes, with handles to inspect them.
pub(crate) struct Harness {
    pub(crate) session: Session,
    pub(crate) backend: Rc<FakeBackend>,
    pub(crate) credentials: Rc<MemoryCredentials>,
    pub(crate) notifier: Rc<RecordingNotifier>,
}

impl Harness {
    pub(crate) fn new() -> Self {
        let backend = Rc::new(FakeBackend::default());
        let credentials = Rc::new(MemoryCredentials::default());
        let notifier = Rc::new(RecordingNotifier::default());
        let session = Session::new(
            Rc::new(FakeFactory {
                backend: Rc::clone(&backend),
            }),
            Rc::clone(&credentials) as Rc<dyn CredentialStore>,
            Rc::clone(&notifier) as Rc<dyn Notifier>,
        );
        Self {
            session,
            backend,
            credentials,
            notifier,
        }
    }
}
