//! Calculator state: combos of element ids and the gender selector.
//!
//! # Design
//! - Combos hold ids only; element details are resolved from content on read.
//! - Mutators ignore out-of-range indices instead of failing.
//! - At least one combo always exists so the picker has a target.

use scorecalc_api_models::EntityId;
use serde::{Deserialize, Serialize};

/// Gender selector shown next to the category picker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male routines.
    #[default]
    Male,
    /// Female routines.
    Female,
}

impl Gender {
    /// Stable value used by select controls.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    /// Parse a select control value; unknown values fall back to male.
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        match value {
            "female" => Self::Female,
            _ => Self::Male,
        }
    }
}

/// Ordered element ids chosen by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combo {
    /// Element ids in the order they were picked.
    pub elements: Vec<EntityId>,
}

impl Combo {
    /// Build a combo from element ids.
    #[must_use]
    pub const fn new(elements: Vec<EntityId>) -> Self {
        Self { elements }
    }
}

/// Initial combo list: a single empty combo.
#[must_use]
pub fn initial_combos() -> Vec<Combo> {
    vec![Combo::default()]
}

/// Append an empty combo.
pub fn add_combo(combos: &mut Vec<Combo>) {
    combos.push(Combo::default());
}

/// Remove a combo, keeping at least one in place.
pub fn remove_combo(combos: &mut Vec<Combo>, index: usize) {
    if index < combos.len() {
        combos.remove(index);
    }
    if combos.is_empty() {
        combos.push(Combo::default());
    }
}

/// Append an element id to the combo at `combo_index`.
pub fn push_element(combos: &mut [Combo], combo_index: usize, element_id: EntityId) {
    if let Some(combo) = combos.get_mut(combo_index) {
        combo.elements.push(element_id);
    }
}

/// Remove the element at `position` from the combo at `combo_index`.
pub fn remove_element(combos: &mut [Combo], combo_index: usize, position: usize) {
    if let Some(combo) = combos.get_mut(combo_index) {
        if position < combo.elements.len() {
            combo.elements.remove(position);
        }
    }
}

/// Drop every combo and start over with one empty combo.
pub fn clear_combos(combos: &mut Vec<Combo>) {
    *combos = initial_combos();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removing_last_combo_leaves_an_empty_one() {
        let mut combos = vec![Combo::new(vec![1, 2])];
        remove_combo(&mut combos, 0);
        assert_eq!(combos, initial_combos());
    }

    #[test]
    fn push_and_remove_respect_bounds() {
        let mut combos = initial_combos();
        add_combo(&mut combos);
        push_element(&mut combos, 1, 7);
        push_element(&mut combos, 1, 8);
        push_element(&mut combos, 5, 9);
        assert_eq!(combos[0].elements, Vec::<EntityId>::new());
        assert_eq!(combos[1].elements, vec![7, 8]);

        remove_element(&mut combos, 1, 0);
        remove_element(&mut combos, 1, 4);
        remove_element(&mut combos, 3, 0);
        assert_eq!(combos[1].elements, vec![8]);
    }

    #[test]
    fn clear_resets_to_single_combo() {
        let mut combos = vec![Combo::new(vec![1]), Combo::new(vec![2])];
        clear_combos(&mut combos);
        assert_eq!(combos.len(), 1);
        assert!(combos[0].elements.is_empty());
    }

    #[test]
    fn gender_round_trips_select_values() {
        assert_eq!(Gender::from_value(Gender::Female.as_str()), Gender::Female);
        assert_eq!(Gender::from_value("unknown"), Gender::Male);
        assert_eq!(Gender::default(), Gender::Male);
    }
}
