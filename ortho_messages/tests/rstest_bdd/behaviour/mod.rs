//! Behavioural test harness for `ortho_messages` using `rstest-bdd`.
//!
//! Step implementations live under [`steps`], while [`scenarios`] binds the
//! `.feature` files to the shared fixtures.

mod scenarios;
pub mod steps;
