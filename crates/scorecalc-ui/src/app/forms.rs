//! Yew binding for schema-driven forms.
//!
//! # Design
//! - A crate-private wrapper around [`FormState`] is the reducer state; every keystroke
//!   revalidates its field.
//! - Submit validates a local copy so the caller gets the result without waiting for a render.

use crate::core::forms::{FieldBinding, FormAction, FormSchema, FormState};
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
pub(crate) struct FormModel(FormState);

impl Reducible for FormModel {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = self.0.clone();
        next.apply(action);
        Rc::new(Self(next))
    }
}

#[derive(Clone, PartialEq)]
pub(crate) struct FormHandle {
    state: UseReducerHandle<FormModel>,
}

impl FormHandle {
    pub(crate) fn field(&self, name: &str) -> FieldBinding {
        self.state.0.field(name).cloned().unwrap_or_default()
    }

    pub(crate) fn oninput(&self, name: &'static str) -> Callback<InputEvent> {
        let state = self.state.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            state.dispatch(FormAction::Set {
                name: name.to_string(),
                value: input.value(),
            });
        })
    }

    /// Validate every field; returns the validated values when the form is valid.
    pub(crate) fn submit(&self) -> Option<FormState> {
        let mut snapshot = self.state.0.clone();
        let valid = snapshot.validate();
        self.state.dispatch(FormAction::Validate);
        valid.then_some(snapshot)
    }
}

#[hook]
pub(crate) fn use_form(schema: FormSchema) -> FormHandle {
    let state = use_reducer(move || FormModel(FormState::new(schema)));
    FormHandle { state }
}
