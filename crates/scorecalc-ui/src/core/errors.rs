//! Error normalization and reporting.
//!
//! # Design
//! - Collapse every [`ApiError`] into the `{name, message}` shape shown to users.
//! - Pass server-declared errors through verbatim; fall back to localized text otherwise.
//! - Side effects (console, toast) happen behind [`Notifier`].

use crate::core::api::ApiError;
use scorecalc_api_models::{CONNECTION_ERROR, ErrorResponse, UNKNOWN_ERROR};
use serde_json::Value;

/// Fallback text for failures that cannot be interpreted.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Неизвестная ошибка";
/// Fallback text when the server could not be reached.
pub const CONNECTION_ERROR_MESSAGE: &str = "Отсутствует соединение с сервером.";

/// Receives normalized errors for logging and presentation.
pub trait Notifier {
    /// Surface `error`; `source` is the original failure for diagnostics.
    fn notify_error(&self, error: &ErrorResponse, source: &ApiError);
}

/// Convert a failure into its user-facing descriptor.
#[must_use]
pub fn normalize_error(error: &ApiError) -> ErrorResponse {
    match error {
        ApiError::Response { body, .. } => body
            .as_deref()
            .and_then(parse_error_body)
            .unwrap_or_else(unknown_error),
        ApiError::Connection(_) => ErrorResponse::new(CONNECTION_ERROR, CONNECTION_ERROR_MESSAGE),
        ApiError::Decode(_) | ApiError::NotAuthenticated => unknown_error(),
    }
}

/// Normalize `error`, hand it to `notifier`, and return the descriptor.
pub fn report_error(notifier: &dyn Notifier, error: &ApiError) -> ErrorResponse {
    let normalized = normalize_error(error);
    notifier.notify_error(&normalized, error);
    normalized
}

fn parse_error_body(body: &str) -> Option<ErrorResponse> {
    let value: Value = serde_json::from_str(body).ok()?;
    let name = value.get("name")?.as_str()?;
    let message = value.get("message")?.as_str()?;
    Some(ErrorResponse::new(name, message))
}

fn unknown_error() -> ErrorResponse {
    ErrorResponse::new(UNKNOWN_ERROR, UNKNOWN_ERROR_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn response(body: Option<&str>) -> ApiError {
        ApiError::Response {
            status: 400,
            body: body.map(str::to_string),
        }
    }

    #[test]
    fn structured_body_passes_through() {
        let error = response(Some(r#"{"name":"BAD_LOGIN","message":"Invalid credentials"}"#));
        assert_eq!(
            normalize_error(&error),
            ErrorResponse::new("BAD_LOGIN", "Invalid credentials")
        );
    }

    #[test]
    fn unparseable_body_is_unknown() {
        let error = response(Some("<html>502 Bad Gateway</html>"));
        assert_eq!(
            normalize_error(&error),
            ErrorResponse::new(UNKNOWN_ERROR, UNKNOWN_ERROR_MESSAGE)
        );
    }

    #[test]
    fn body_without_name_and_message_is_unknown() {
        let missing_message = response(Some(r#"{"name":"BAD_LOGIN"}"#));
        assert_eq!(normalize_error(&missing_message).name, UNKNOWN_ERROR);
        let unreadable = response(None);
        assert_eq!(normalize_error(&unreadable).name, UNKNOWN_ERROR);
    }

    #[test]
    fn missing_response_is_connection_error() {
        let error = ApiError::Connection("TypeError: Failed to fetch".to_string());
        assert_eq!(
            normalize_error(&error),
            ErrorResponse::new(CONNECTION_ERROR, CONNECTION_ERROR_MESSAGE)
        );
    }

    #[test]
    fn other_failures_are_unknown() {
        assert_eq!(
            normalize_error(&ApiError::Decode("expected value".to_string())).name,
            UNKNOWN_ERROR
        );
        assert_eq!(
            normalize_error(&ApiError::NotAuthenticated).message,
            UNKNOWN_ERROR_MESSAGE
        );
    }

    #[test]
    fn report_forwards_normalized_error_and_source() {
        #[derive(Default)]
        struct Capture(RefCell<Vec<(ErrorResponse, ApiError)>>);
        impl Notifier for Capture {
            fn notify_error(&self, error: &ErrorResponse, source: &ApiError) {
                self.0.borrow_mut().push((error.clone(), source.clone()));
            }
        }

        let capture = Capture::default();
        let source = ApiError::Connection("offline".to_string());
        let reported = report_error(&capture, &source);
        assert_eq!(reported.name, CONNECTION_ERROR);
        assert_eq!(capture.0.borrow().as_slice(), &[(reported, source)]);
    }
}
