//! `localStorage` persistence for admin credentials.

use crate::core::auth::{AUTH_DATA_KEY, CredentialStore};
use gloo::console;
use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};
use scorecalc_api_models::AuthorizationData;

/// Credential store backed by the browser's `localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalCredentialStore;

impl CredentialStore for LocalCredentialStore {
    fn load(&self) -> Option<AuthorizationData> {
        match LocalStorage::get::<AuthorizationData>(AUTH_DATA_KEY) {
            Ok(auth) => Some(auth),
            Err(StorageError::KeyNotFound(_)) => None,
            Err(err) => {
                log_storage_error("get", &err.to_string());
                LocalStorage::delete(AUTH_DATA_KEY);
                None
            }
        }
    }

    fn save(&self, auth: &AuthorizationData) {
        if let Err(err) = LocalStorage::set(AUTH_DATA_KEY, auth) {
            log_storage_error("set", &err.to_string());
        }
    }

    fn clear(&self) {
        LocalStorage::delete(AUTH_DATA_KEY);
    }
}

fn log_storage_error(operation: &'static str, detail: &str) {
    console::error!("storage operation failed", operation, AUTH_DATA_KEY, detail);
}
