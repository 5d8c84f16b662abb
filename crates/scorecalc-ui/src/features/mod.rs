//! Feature slices: calculator, admin reference data, and login.

pub mod admin;
pub mod calculator;
pub mod login;
