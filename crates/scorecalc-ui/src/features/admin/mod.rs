//! Admin reference data feature slice.
//!
//! # Design
//! - Pages read cached collections from the store and trigger loads on mount.
//! - Refresh buttons force a reload; everything else loads at most once.

pub mod logic;
#[cfg(target_arch = "wasm32")]
pub mod view;
