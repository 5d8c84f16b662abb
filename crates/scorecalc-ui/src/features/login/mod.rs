//! Login feature: credential form and post-login navigation.

pub mod schema;
#[cfg(target_arch = "wasm32")]
pub mod view;
