//! Authentication primitives shared across the UI.
//!
//! # Design
//! - Keep credential persistence behind [`CredentialStore`] so the session stays DOM-free.
//! - Encode the basic-auth header here; transports only attach it.
//! - Make "nothing persisted" a distinct outcome from "persisted but rejected".

use base64::{Engine as _, engine::general_purpose::STANDARD};
use scorecalc_api_models::AuthorizationData;

/// Local storage key holding the JSON-serialized credential pair.
pub const AUTH_DATA_KEY: &str = "auth-data";

/// Result of restoring authentication from persisted credentials.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    /// A validated admin client is active.
    Authorized,
    /// Persisted credentials were rejected and have been cleared.
    Rejected,
    /// No credentials were persisted.
    NoCredentials,
}

impl AuthOutcome {
    /// Whether navigation may treat the user as signed in.
    #[must_use]
    pub const fn is_authorized(self) -> bool {
        matches!(self, Self::Authorized)
    }
}

/// Synchronous storage for the credential pair.
pub trait CredentialStore {
    /// Read persisted credentials; unreadable data counts as absent.
    fn load(&self) -> Option<AuthorizationData>;
    /// Persist credentials, replacing any previous value.
    fn save(&self, auth: &AuthorizationData);
    /// Remove persisted credentials.
    fn clear(&self);
}

/// `Authorization` header value for HTTP basic authentication.
#[must_use]
pub fn basic_auth_header(auth: &AuthorizationData) -> String {
    let raw = format!("{}:{}", auth.login, auth.password);
    format!("Basic {}", STANDARD.encode(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_header_encodes_login_and_password() {
        let auth = AuthorizationData::new("user", "pa:ss");
        assert_eq!(basic_auth_header(&auth), "Basic dXNlcjpwYTpzcw==");
    }

    #[test]
    fn only_authorized_outcome_is_authorized() {
        assert!(AuthOutcome::Authorized.is_authorized());
        assert!(!AuthOutcome::Rejected.is_authorized());
        assert!(!AuthOutcome::NoCredentials.is_authorized());
    }
}
