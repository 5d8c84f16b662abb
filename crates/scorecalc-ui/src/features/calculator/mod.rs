//! Calculator feature: combo composition and the derived score.
//!
//! # Design
//! - Combo mutations are pure functions over the store's combo list.
//! - Credit and score selectors live with the store snapshot.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
