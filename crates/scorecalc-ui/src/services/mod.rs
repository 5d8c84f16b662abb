//! Browser-backed implementations of the core seams.
pub mod api;
pub mod storage;
