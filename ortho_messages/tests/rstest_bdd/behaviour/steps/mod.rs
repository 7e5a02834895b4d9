//! Behavioural step modules registered with `rstest-bdd`.

pub mod format_steps;
pub mod helpers;
pub mod translation_steps;
