//! Form binder: JSON-schema validation wired to per-field bindings.
//!
//! # Design
//! - Keep field values as strings for lossless editing.
//! - Delegate every rule to `jsonschema`; this module only routes results to fields.
//! - An optional `errorMessage` annotation on a property replaces the library text.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Schema annotation holding a user-facing message for a field.
pub const ERROR_MESSAGE_KEYWORD: &str = "errorMessage";

/// Reasons a schema cannot back a form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormSchemaError {
    /// The schema has no `properties` object.
    #[error("form schema must declare an object with `properties`")]
    MissingProperties,
    /// A property schema failed to compile.
    #[error("schema for field `{field}` failed to compile: {detail}")]
    Compile {
        /// Field whose schema is invalid.
        field: String,
        /// Compiler message.
        detail: String,
    },
}

struct FieldSchema {
    name: String,
    validator: jsonschema::Validator,
    message: Option<String>,
}

/// Compiled form schema: one validator per declared field.
#[derive(Clone)]
pub struct FormSchema {
    schema: Rc<Value>,
    fields: Rc<Vec<FieldSchema>>,
}

impl fmt::Debug for FormSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSchema")
            .field("fields", &self.field_names())
            .finish_non_exhaustive()
    }
}

impl PartialEq for FormSchema {
    fn eq(&self, other: &Self) -> bool {
        self.schema == other.schema
    }
}

impl FormSchema {
    /// Compile an object schema; fields follow the order of `properties`.
    ///
    /// # Errors
    ///
    /// Returns [`FormSchemaError`] when `properties` is missing or a property
    /// schema does not compile.
    pub fn new(schema: Value) -> Result<Self, FormSchemaError> {
        let properties = schema
            .get("properties")
            .and_then(Value::as_object)
            .ok_or(FormSchemaError::MissingProperties)?;
        let mut fields = Vec::with_capacity(properties.len());
        for (name, property) in properties {
            let validator =
                jsonschema::Validator::new(property).map_err(|err| FormSchemaError::Compile {
                    field: name.clone(),
                    detail: err.to_string(),
                })?;
            let message = property
                .get(ERROR_MESSAGE_KEYWORD)
                .and_then(Value::as_str)
                .map(str::to_string);
            fields.push(FieldSchema {
                name: name.clone(),
                validator,
                message,
            });
        }
        Ok(Self {
            schema: Rc::new(schema),
            fields: Rc::new(fields),
        })
    }

    /// Declared field names.
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }

    /// Validate one field value; `None` when it is valid or undeclared.
    #[must_use]
    pub fn validate_field(&self, name: &str, value: &str) -> Option<String> {
        let field = self.fields.iter().find(|field| field.name == name)?;
        let instance = Value::String(value.to_string());
        let error = field.validator.validate(&instance).err()?;
        Some(
            field
                .message
                .clone()
                .unwrap_or_else(|| error.to_string()),
        )
    }
}

/// Reactive state of one field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldBinding {
    /// Current input text.
    pub value: String,
    /// Whether the user edited the field or attempted a submit.
    pub touched: bool,
    /// Validation message, when invalid.
    pub error: Option<String>,
}

impl FieldBinding {
    /// Error to display: only once the field has been touched.
    #[must_use]
    pub fn visible_error(&self) -> Option<&str> {
        if self.touched {
            self.error.as_deref()
        } else {
            None
        }
    }
}

/// Edit applied to a [`FormState`] by reducer-style callers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormAction {
    /// Replace a field's value.
    Set {
        /// Declared field name.
        name: String,
        /// New input text.
        value: String,
    },
    /// Validate every field, as on submit.
    Validate,
}

/// Form-level handle: the schema plus a binding for every declared field.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    schema: FormSchema,
    fields: BTreeMap<String, FieldBinding>,
}

impl FormState {
    /// Create bindings for every field declared by `schema`.
    #[must_use]
    pub fn new(schema: FormSchema) -> Self {
        let fields = schema
            .field_names()
            .into_iter()
            .map(|name| {
                let binding = FieldBinding {
                    error: schema.validate_field(name, ""),
                    ..FieldBinding::default()
                };
                (name.to_string(), binding)
            })
            .collect();
        Self { schema, fields }
    }

    /// Binding for a declared field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldBinding> {
        self.fields.get(name)
    }

    /// Update a field's value and revalidate it; undeclared names are ignored.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        let Some(binding) = self.fields.get_mut(name) else {
            return;
        };
        binding.value = value.into();
        binding.touched = true;
        binding.error = self.schema.validate_field(name, &binding.value);
    }

    /// Validate every field and mark them touched; returns whether the form is valid.
    pub fn validate(&mut self) -> bool {
        for (name, binding) in &mut self.fields {
            binding.touched = true;
            binding.error = self.schema.validate_field(name, &binding.value);
        }
        self.is_valid()
    }

    /// Whether no field currently has an error.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(|binding| binding.error.is_none())
    }

    /// Deserialize the current values into a typed payload.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the values do not fit `T`.
    pub fn value_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let object: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, binding)| (name.clone(), Value::String(binding.value.clone())))
            .collect();
        serde_json::from_value(Value::Object(object))
    }

    /// Apply one edit.
    pub fn apply(&mut self, action: FormAction) {
        match action {
            FormAction::Set { name, value } => self.set_value(&name, value),
            FormAction::Validate => {
                self.validate();
            }
        }
    }

    /// Clear values, touched flags and errors.
    pub fn reset(&mut self) {
        *self = Self::new(self.schema.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> FormSchema {
        FormSchema::new(json!({
            "type": "object",
            "properties": {
                "code": { "type": "string", "pattern": "^[A-Z]{2}$" },
                "title": { "type": "string", "minLength": 3, "errorMessage": "Too short" }
            }
        }))
        .unwrap()
    }

    #[test]
    fn fields_follow_schema_properties() {
        let schema = schema();
        let mut names = schema.field_names();
        names.sort_unstable();
        assert_eq!(names, vec!["code", "title"]);
    }

    #[test]
    fn missing_properties_is_rejected() {
        assert_eq!(
            FormSchema::new(json!({ "type": "object" })).unwrap_err(),
            FormSchemaError::MissingProperties
        );
    }

    #[test]
    fn invalid_property_schema_names_the_field() {
        let err = FormSchema::new(json!({
            "properties": { "broken": { "type": 12 } }
        }))
        .unwrap_err();
        assert!(matches!(err, FormSchemaError::Compile { ref field, .. } if field == "broken"));
    }

    #[test]
    fn errors_surface_after_touch() {
        let mut form = FormState::new(schema());
        let title = form.field("title").unwrap();
        assert_eq!(title.error.as_deref(), Some("Too short"));
        assert_eq!(title.visible_error(), None);

        form.set_value("title", "ab");
        assert_eq!(form.field("title").unwrap().visible_error(), Some("Too short"));
        form.set_value("title", "abc");
        assert_eq!(form.field("title").unwrap().error, None);
    }

    #[test]
    fn library_message_used_without_annotation() {
        let mut form = FormState::new(schema());
        form.set_value("code", "abc");
        let error = form.field("code").unwrap().error.clone();
        assert!(error.is_some_and(|message| !message.is_empty()));
    }

    #[test]
    fn validate_marks_every_field() {
        let mut form = FormState::new(schema());
        form.set_value("unknown", "ignored");
        assert!(!form.validate());
        assert!(form.field("code").unwrap().touched);

        form.set_value("code", "AB");
        form.set_value("title", "Floor");
        assert!(form.validate());
        form.reset();
        let code = form.field("code").unwrap();
        assert!(code.value.is_empty());
        assert!(!code.touched);
    }

    #[test]
    fn actions_edit_and_validate_the_form() {
        let mut form = FormState::new(schema());
        form.apply(FormAction::Set {
            name: "code".into(),
            value: "AB".into(),
        });
        assert_eq!(form.field("code").unwrap().value, "AB");
        assert!(!form.field("title").unwrap().touched);

        form.apply(FormAction::Validate);
        assert_eq!(form.field("title").unwrap().visible_error(), Some("Too short"));
        assert!(!form.is_valid());
    }

    #[test]
    fn values_deserialize_into_payload() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Payload {
            code: String,
            title: String,
        }
        let mut form = FormState::new(schema());
        form.set_value("code", "AB");
        form.set_value("title", "Beam");
        assert_eq!(
            form.value_as::<Payload>().unwrap(),
            Payload {
                code: "AB".into(),
                title: "Beam".into()
            }
        );
    }
}
