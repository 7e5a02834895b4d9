//! Test helpers shared across crates.
//!
//! This crate provides `figment::Jail` wrappers for configuration tests and
//! text normalisation for behavioural step arguments.

pub mod figment;
pub mod text;
