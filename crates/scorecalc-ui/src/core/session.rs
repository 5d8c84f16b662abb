//! Session store: authentication, cached collections, and calculator mutations.
//!
//! # Design
//! - One `Rc`-backed handle owns all state; clones share it and compare by pointer.
//! - Loaders fetch once unless forced; concurrent callers join the pending request.
//! - Failures are reported through the [`Notifier`] and never returned to callers.
//! - No `RefCell` borrow is held across an `.await`.
//! - Logging out starts a new auth generation; admin loads from an older one are discarded.

use crate::core::api::{ApiError, ApiFactory, ScoreApi};
use crate::core::auth::{AuthOutcome, CredentialStore};
use crate::core::errors::{Notifier, report_error};
use crate::core::store::{CalculatorState, Collection, CollectionKind, is_authorized};
use crate::features::calculator::state::{self as calculator, Gender};
use futures_util::future::{FutureExt, LocalBoxFuture, Shared};
use scorecalc_api_models::{AuthorizationData, CategoryResponse, EntityId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

type PendingLoad = Shared<LocalBoxFuture<'static, ()>>;
type PendingAuth = Shared<LocalBoxFuture<'static, AuthOutcome>>;
type Observer = Rc<dyn Fn(&CalculatorState)>;
type Fetch<T> = fn(Rc<dyn ScoreApi>) -> LocalBoxFuture<'static, Result<T, ApiError>>;
type Slot<T> = fn(&mut CalculatorState) -> &mut Collection<T>;

/// Shared handle to the application state and its actions.
#[derive(Clone)]
pub struct Session {
    inner: Rc<SessionInner>,
}

struct SessionInner {
    state: RefCell<CalculatorState>,
    factory: Rc<dyn ApiFactory>,
    user_api: Rc<dyn ScoreApi>,
    admin_api: RefCell<Option<Rc<dyn ScoreApi>>>,
    credentials: Rc<dyn CredentialStore>,
    notifier: Rc<dyn Notifier>,
    pending: RefCell<HashMap<CollectionKind, PendingLoad>>,
    auth_generation: Cell<u64>,
    pending_auth: RefCell<Option<PendingAuth>>,
    observers: RefCell<Vec<(u64, Observer)>>,
    next_observer: Cell<u64>,
}

/// Keeps an observer registered; dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    session: Weak<SessionInner>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.session.upgrade() {
            inner
                .observers
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session with an anonymous user client and no admin client.
    #[must_use]
    pub fn new(
        factory: Rc<dyn ApiFactory>,
        credentials: Rc<dyn CredentialStore>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        let user_api = factory.create(None);
        Self {
            inner: Rc::new(SessionInner {
                state: RefCell::new(CalculatorState::default()),
                factory,
                user_api,
                admin_api: RefCell::new(None),
                credentials,
                notifier,
                pending: RefCell::new(HashMap::new()),
                auth_generation: Cell::new(0),
                pending_auth: RefCell::new(None),
                observers: RefCell::new(Vec::new()),
                next_observer: Cell::new(0),
            }),
        }
    }

    /// Clone of the current state.
    #[must_use]
    pub fn snapshot(&self) -> CalculatorState {
        self.inner.state.borrow().clone()
    }

    /// Read the current state without cloning it.
    pub fn with_state<R>(&self, read: impl FnOnce(&CalculatorState) -> R) -> R {
        read(&self.inner.state.borrow())
    }

    /// Whether an admin is signed in.
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        self.with_state(is_authorized)
    }

    /// Register `observer` to receive a snapshot after every mutation.
    pub fn subscribe(&self, observer: impl Fn(&CalculatorState) + 'static) -> Subscription {
        let id = self.inner.next_observer.get();
        self.inner.next_observer.set(id + 1);
        self.inner
            .observers
            .borrow_mut()
            .push((id, Rc::new(observer)));
        Subscription {
            session: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Load public content.
    pub async fn load_content(&self, force: bool) {
        self.load(
            CollectionKind::Content,
            force,
            |state| &mut state.content,
            |api| async move { api.get_content().await }.boxed_local(),
        )
        .await;
    }

    /// Load categories with the admin client.
    pub async fn load_categories(&self, force: bool) {
        self.load(
            CollectionKind::Categories,
            force,
            |state| &mut state.categories,
            |api| async move { api.admin_get_categories().await }.boxed_local(),
        )
        .await;
    }

    /// Load elements with the admin client.
    pub async fn load_elements(&self, force: bool) {
        self.load(
            CollectionKind::Elements,
            force,
            |state| &mut state.elements,
            |api| async move { api.admin_get_elements().await }.boxed_local(),
        )
        .await;
    }

    /// Load element types with the admin client.
    pub async fn load_element_types(&self, force: bool) {
        self.load(
            CollectionKind::ElementTypes,
            force,
            |state| &mut state.element_types,
            |api| async move { api.admin_get_element_types().await }.boxed_local(),
        )
        .await;
    }

    /// Load exercises with the admin client.
    pub async fn load_exercises(&self, force: bool) {
        self.load(
            CollectionKind::Exercises,
            force,
            |state| &mut state.exercises,
            |api| async move { api.admin_get_exercises().await }.boxed_local(),
        )
        .await;
    }

    /// Restore authentication from persisted credentials.
    ///
    /// Returns immediately when already authorized. Rejected credentials are
    /// removed from storage.
    pub async fn load_auth(&self) -> AuthOutcome {
        if self.is_authorized() {
            return AuthOutcome::Authorized;
        }
        let existing = self.inner.pending_auth.borrow().clone();
        let pending = if let Some(pending) = existing {
            pending
        } else {
            let session = self.clone();
            let pending = async move {
                let outcome = session.restore_auth().await;
                session.inner.pending_auth.borrow_mut().take();
                outcome
            }
            .boxed_local()
            .shared();
            *self.inner.pending_auth.borrow_mut() = Some(pending.clone());
            pending
        };
        pending.await
    }

    /// Validate `auth` against the service and commit it on success.
    ///
    /// On failure the error is reported and state and storage are left untouched.
    pub async fn set_auth_data(&self, auth: AuthorizationData) -> bool {
        let admin_api = self.inner.factory.create(Some(auth.clone()));
        match admin_api.admin_check_auth().await {
            Ok(()) => {
                self.inner.credentials.save(&auth);
                *self.inner.admin_api.borrow_mut() = Some(admin_api);
                self.update(|state| state.auth_data = Some(auth));
                true
            }
            Err(err) => {
                report_error(self.inner.notifier.as_ref(), &err);
                false
            }
        }
    }

    /// Forget credentials, both persisted and in memory.
    ///
    /// Admin loads still in flight are abandoned: their results are dropped and
    /// the next load issues a fresh request.
    pub fn logout(&self) {
        self.inner.credentials.clear();
        self.inner.admin_api.borrow_mut().take();
        self.inner
            .auth_generation
            .set(self.inner.auth_generation.get() + 1);
        let abandoned: Vec<CollectionKind> = {
            let mut pending = self.inner.pending.borrow_mut();
            let kinds: Vec<CollectionKind> = pending
                .keys()
                .copied()
                .filter(|kind| kind.requires_auth())
                .collect();
            for kind in &kinds {
                pending.remove(kind);
            }
            kinds
        };
        self.update(|state| {
            state.auth_data = None;
            for kind in abandoned {
                state.stop_loading(kind);
            }
        });
    }

    /// Log out and drop admin-only cached collections.
    pub fn reset(&self) {
        self.logout();
        self.update(CalculatorState::clear_admin_collections);
    }

    /// Select the category that bounds credited elements.
    pub fn select_category(&self, category: Option<CategoryResponse>) {
        self.update(|state| state.selected_category = category);
    }

    /// Change the gender selector.
    pub fn set_gender(&self, gender: Gender) {
        self.update(|state| state.gender = gender);
    }

    /// Append an empty combo.
    pub fn add_combo(&self) {
        self.update(|state| calculator::add_combo(&mut state.combos));
    }

    /// Remove a combo; one empty combo always remains.
    pub fn remove_combo(&self, index: usize) {
        self.update(|state| calculator::remove_combo(&mut state.combos, index));
    }

    /// Append an element to a combo.
    pub fn push_element(&self, combo_index: usize, element_id: EntityId) {
        self.update(|state| calculator::push_element(&mut state.combos, combo_index, element_id));
    }

    /// Remove one element reference from a combo.
    pub fn remove_element(&self, combo_index: usize, position: usize) {
        self.update(|state| calculator::remove_element(&mut state.combos, combo_index, position));
    }

    /// Start over with a single empty combo.
    pub fn clear_combos(&self) {
        self.update(|state| calculator::clear_combos(&mut state.combos));
    }

    async fn load<T: 'static>(
        &self,
        kind: CollectionKind,
        force: bool,
        slot: Slot<T>,
        fetch: Fetch<T>,
    ) {
        let existing = self.inner.pending.borrow().get(&kind).cloned();
        if let Some(pending) = existing {
            pending.await;
            return;
        }
        let loaded = self.with_state_mut(|state| slot(state).is_loaded());
        if loaded && !force {
            return;
        }
        let session = self.clone();
        let pending = async move { session.run_load(kind, slot, fetch).await }
            .boxed_local()
            .shared();
        self.inner
            .pending
            .borrow_mut()
            .insert(kind, pending.clone());
        pending.await;
    }

    async fn run_load<T>(&self, kind: CollectionKind, slot: Slot<T>, fetch: Fetch<T>) {
        let generation = self.inner.auth_generation.get();
        self.update(|state| slot(state).loading = true);
        let result = match self.api_for(kind) {
            Ok(api) => fetch(api).await,
            Err(err) => Err(err),
        };
        if kind.requires_auth() && generation != self.inner.auth_generation.get() {
            return;
        }
        match result {
            Ok(value) => self.update(|state| {
                let collection = slot(state);
                collection.value = Some(value);
                collection.loading = false;
            }),
            Err(err) => {
                report_error(self.inner.notifier.as_ref(), &err);
                self.update(|state| slot(state).loading = false);
            }
        }
        self.inner.pending.borrow_mut().remove(&kind);
    }

    async fn restore_auth(&self) -> AuthOutcome {
        let Some(saved) = self.inner.credentials.load() else {
            return AuthOutcome::NoCredentials;
        };
        if self.set_auth_data(saved).await {
            AuthOutcome::Authorized
        } else {
            self.inner.credentials.clear();
            AuthOutcome::Rejected
        }
    }

    fn api_for(&self, kind: CollectionKind) -> Result<Rc<dyn ScoreApi>, ApiError> {
        if kind.requires_auth() {
            self.inner
                .admin_api
                .borrow()
                .clone()
                .ok_or(ApiError::NotAuthenticated)
        } else {
            Ok(Rc::clone(&self.inner.user_api))
        }
    }

    fn with_state_mut<R>(&self, read: impl FnOnce(&mut CalculatorState) -> R) -> R {
        read(&mut self.inner.state.borrow_mut())
    }

    fn update(&self, mutate: impl FnOnce(&mut CalculatorState)) {
        self.with_state_mut(mutate);
        self.notify();
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        let observers: Vec<Observer> = self
            .inner
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();
        for observer in observers {
            observer(&snapshot);
        }
    }
}
