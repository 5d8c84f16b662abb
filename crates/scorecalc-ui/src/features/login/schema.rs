//! Login form schema.

use crate::core::forms::{FormSchema, FormSchemaError};
use serde_json::json;

/// Login field name.
pub const LOGIN_FIELD: &str = "login";
/// Password field name.
pub const PASSWORD_FIELD: &str = "password";

/// Schema for the login form: both fields are required, non-blank strings.
///
/// # Errors
///
/// Returns [`FormSchemaError`] if the schema fails to compile.
pub fn login_schema() -> Result<FormSchema, FormSchemaError> {
    FormSchema::new(json!({
        "type": "object",
        "properties": {
            LOGIN_FIELD: {
                "type": "string",
                "pattern": "\\S",
                "errorMessage": "Введите логин"
            },
            PASSWORD_FIELD: {
                "type": "string",
                "minLength": 1,
                "errorMessage": "Введите пароль"
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forms::FormState;
    use scorecalc_api_models::AuthorizationData;

    #[test]
    fn blank_fields_are_rejected() {
        let mut form = FormState::new(login_schema().unwrap());
        form.set_value(LOGIN_FIELD, "   ");
        assert!(!form.validate());
        assert_eq!(
            form.field(LOGIN_FIELD).unwrap().visible_error(),
            Some("Введите логин")
        );
        assert_eq!(
            form.field(PASSWORD_FIELD).unwrap().visible_error(),
            Some("Введите пароль")
        );
    }

    #[test]
    fn filled_form_yields_credentials() {
        let mut form = FormState::new(login_schema().unwrap());
        form.set_value(LOGIN_FIELD, "admin");
        form.set_value(PASSWORD_FIELD, "secret");
        assert!(form.validate());
        assert_eq!(
            form.value_as::<AuthorizationData>().unwrap(),
            AuthorizationData::new("admin", "secret")
        );
    }
}
