//! Pure helpers for admin reference tables.

use crate::core::store::{CalculatorState, CollectionKind, LoadPhase};
use scorecalc_api_models::{ElementTypeResponse, EntityId};
use serde_json::{Map, Value};

/// Admin reference sections, in navigation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminSection {
    /// Categories table.
    Categories,
    /// Elements table.
    Elements,
    /// Element types table.
    ElementTypes,
    /// Exercises table.
    Exercises,
}

impl AdminSection {
    /// Every section for the admin landing page.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::Categories,
            Self::Elements,
            Self::ElementTypes,
            Self::Exercises,
        ]
    }

    /// Section heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Categories => "Категории",
            Self::Elements => "Элементы",
            Self::ElementTypes => "Типы элементов",
            Self::Exercises => "Упражнения",
        }
    }

    /// Collection backing the section.
    #[must_use]
    pub const fn collection(self) -> CollectionKind {
        match self {
            Self::Categories => CollectionKind::Categories,
            Self::Elements => CollectionKind::Elements,
            Self::ElementTypes => CollectionKind::ElementTypes,
            Self::Exercises => CollectionKind::Exercises,
        }
    }

    /// Load phase and row count of the section's collection.
    #[must_use]
    pub fn status(self, state: &CalculatorState) -> (LoadPhase, Option<usize>) {
        match self {
            Self::Categories => (
                state.categories.phase(),
                state.categories.value.as_ref().map(Vec::len),
            ),
            Self::Elements => (
                state.elements.phase(),
                state.elements.value.as_ref().map(Vec::len),
            ),
            Self::ElementTypes => (
                state.element_types.phase(),
                state.element_types.value.as_ref().map(Vec::len),
            ),
            Self::Exercises => (
                state.exercises.phase(),
                state.exercises.value.as_ref().map(Vec::len),
            ),
        }
    }
}

/// Score with two decimals.
#[must_use]
pub fn format_score(score: f64) -> String {
    format!("{score:.2}")
}

/// Name of an element type, or a dash when unknown.
#[must_use]
pub fn element_type_name(types: &[ElementTypeResponse], id: Option<EntityId>) -> String {
    id.and_then(|id| types.iter().find(|kind| kind.id == id))
        .map_or_else(|| "–".to_string(), |kind| kind.name.clone())
}

/// Pass-through fields rendered as `key: value` pairs, sorted by key.
#[must_use]
pub fn extra_summary(extra: &Map<String, Value>) -> String {
    let mut pairs: Vec<String> = extra
        .iter()
        .map(|(key, value)| match value {
            Value::String(text) => format!("{key}: {text}"),
            other => format!("{key}: {other}"),
        })
        .collect();
    pairs.sort_unstable();
    pairs.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sections_map_to_admin_collections() {
        assert!(
            AdminSection::all()
                .iter()
                .all(|section| section.collection().requires_auth())
        );
        assert_eq!(AdminSection::ElementTypes.title(), "Типы элементов");
    }

    #[test]
    fn status_reports_phase_and_count() {
        let mut state = CalculatorState::default();
        assert_eq!(
            AdminSection::Exercises.status(&state),
            (LoadPhase::NotLoaded, None)
        );
        state.exercises.value = Some(Vec::new());
        assert_eq!(
            AdminSection::Exercises.status(&state),
            (LoadPhase::Loaded, Some(0))
        );
    }

    #[test]
    fn element_type_lookup_falls_back_to_dash() {
        let types = vec![ElementTypeResponse {
            id: 4,
            name: "Jumps".into(),
            extra: Map::new(),
        }];
        assert_eq!(element_type_name(&types, Some(4)), "Jumps");
        assert_eq!(element_type_name(&types, Some(5)), "–");
        assert_eq!(element_type_name(&types, None), "–");
    }

    #[test]
    fn extra_fields_are_sorted_and_unquoted() {
        let Value::Object(extra) = json!({ "zone": "B", "bonus": 0.1, "flag": true }) else {
            panic!("object literal");
        };
        assert_eq!(extra_summary(&extra), "bonus: 0.1, flag: true, zone: B");
        assert_eq!(format_score(1.5), "1.50");
    }
}
