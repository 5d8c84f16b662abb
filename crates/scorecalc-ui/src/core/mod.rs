//! Core, DOM-free primitives and helpers for the Web UI.
pub mod api;
pub mod auth;
pub mod errors;
pub mod forms;
pub mod guard;
pub mod session;
pub mod store;
pub mod toast;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub(crate) mod testing;
