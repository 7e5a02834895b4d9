//! `rstest-bdd` behavioural suite for `ortho_messages`.
//!
//! Feature files under `tests/features` describe formatting and translation
//! behaviour in prose; the modules here register the fixtures and steps that
//! execute them under `cargo test`.

mod behaviour;
mod fixtures;
