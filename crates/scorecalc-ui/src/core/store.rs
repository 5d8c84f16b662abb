//! Calculator store snapshot and derived selectors.
//!
//! # Design
//! - Keep the snapshot plain data so it can be mirrored into yewdux as-is.
//! - `None` means "not loaded yet"; an empty vector is a loaded, empty collection.
//! - Derived values (`elements_dict`, `credit_elements`, `score`) are recomputed on read.

use crate::features::calculator::state::{Combo, Gender, initial_combos};
use scorecalc_api_models::{
    AuthorizationData, CategoryResponse, Content, ElementResponse, ElementTypeResponse, EntityId,
    ExerciseResponse,
};
use std::collections::HashMap;
use std::ops::RangeInclusive;
use yewdux::store::Store;

/// Load lifecycle of a cached collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    /// Never fetched, or every fetch so far failed.
    NotLoaded,
    /// A request is in flight.
    Loading,
    /// A value is cached.
    Loaded,
}

/// Collections the session knows how to load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// Public calculator content.
    Content,
    /// Admin categories.
    Categories,
    /// Admin elements.
    Elements,
    /// Admin element types.
    ElementTypes,
    /// Admin exercises.
    Exercises,
}

impl CollectionKind {
    /// Whether loading requires the admin client.
    #[must_use]
    pub const fn requires_auth(self) -> bool {
        !matches!(self, Self::Content)
    }
}

/// A lazily fetched value and its loading flag.
#[derive(Clone, Debug, PartialEq)]
pub struct Collection<T> {
    /// Cached value, `None` until the first successful load.
    pub value: Option<T>,
    /// Whether a request is in flight.
    pub loading: bool,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            value: None,
            loading: false,
        }
    }
}

impl<T> Collection<T> {
    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> LoadPhase {
        if self.loading {
            LoadPhase::Loading
        } else if self.value.is_some() {
            LoadPhase::Loaded
        } else {
            LoadPhase::NotLoaded
        }
    }

    /// Whether a value is cached.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.value.is_some()
    }
}

/// Session-scoped application state.
#[allow(clippy::derive_partial_eq_without_eq)]
#[derive(Clone, Debug, PartialEq, Store)]
pub struct CalculatorState {
    /// Credentials of the signed-in admin, if any.
    pub auth_data: Option<AuthorizationData>,
    /// Admin categories.
    pub categories: Collection<Vec<CategoryResponse>>,
    /// Admin elements.
    pub elements: Collection<Vec<ElementResponse>>,
    /// Admin element types.
    pub element_types: Collection<Vec<ElementTypeResponse>>,
    /// Admin exercises.
    pub exercises: Collection<Vec<ExerciseResponse>>,
    /// Public calculator content.
    pub content: Collection<Content>,
    /// Category whose level bounds credited elements.
    pub selected_category: Option<CategoryResponse>,
    /// Combos composed by the user.
    pub combos: Vec<Combo>,
    /// Gender selector.
    pub gender: Gender,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            auth_data: None,
            categories: Collection::default(),
            elements: Collection::default(),
            element_types: Collection::default(),
            exercises: Collection::default(),
            content: Collection::default(),
            selected_category: None,
            combos: initial_combos(),
            gender: Gender::default(),
        }
    }
}

impl CalculatorState {
    /// Drop cached admin-only collections.
    pub fn clear_admin_collections(&mut self) {
        self.categories = Collection::default();
        self.elements = Collection::default();
        self.element_types = Collection::default();
        self.exercises = Collection::default();
    }

    /// Clear the loading flag of one collection, keeping its value.
    pub fn stop_loading(&mut self, kind: CollectionKind) {
        match kind {
            CollectionKind::Content => self.content.loading = false,
            CollectionKind::Categories => self.categories.loading = false,
            CollectionKind::Elements => self.elements.loading = false,
            CollectionKind::ElementTypes => self.element_types.loading = false,
            CollectionKind::Exercises => self.exercises.loading = false,
        }
    }
}

/// Whether an admin is signed in.
#[must_use]
pub const fn is_authorized(state: &CalculatorState) -> bool {
    state.auth_data.is_some()
}

/// Content elements keyed by id.
#[must_use]
pub fn elements_dict(state: &CalculatorState) -> HashMap<EntityId, &ElementResponse> {
    state
        .content
        .value
        .iter()
        .flat_map(|content| content.elements.iter())
        .map(|element| (element.id, element))
        .collect()
}

/// Levels credited for a category level: one below through two above.
#[must_use]
pub const fn credit_band(category_level: i32) -> RangeInclusive<i32> {
    category_level.saturating_sub(1)..=category_level.saturating_add(2)
}

/// Elements referenced by combos whose level is inside the selected category's band.
///
/// One entry per reference, in combo order. Unknown ids are skipped and the list is
/// empty while no category is selected.
#[must_use]
pub fn credit_elements(state: &CalculatorState) -> Vec<ElementResponse> {
    let Some(category) = state.selected_category.as_ref() else {
        return Vec::new();
    };
    let band = credit_band(category.level);
    let dict = elements_dict(state);
    state
        .combos
        .iter()
        .flat_map(|combo| combo.elements.iter())
        .filter_map(|id| dict.get(id))
        .filter(|element| band.contains(&element.level))
        .map(|element| (*element).clone())
        .collect()
}

/// Sum of scores over the credited elements.
#[must_use]
pub fn score(state: &CalculatorState) -> f64 {
    credit_elements(state)
        .iter()
        .map(|element| element.score)
        .sum()
}
