//! Shared fixtures for the behavioural suite.

use ortho_messages::MessageTree;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// Catalogue used by the translation scenarios.
pub const CATALOGUE: &str = include_str!("../fixtures/catalogue.json");

/// State shared between the steps of one scenario.
#[derive(Debug, Default, ScenarioState)]
pub struct MessageContext {
    /// Locale tag chosen by a `Given` step; English when unset.
    pub locale: Slot<String>,
    /// Placeholder assignments as `(name, text)` pairs.
    pub values: Slot<Vec<(String, String)>>,
    /// Tag names bound to a bold markup renderer.
    pub bold_tags: Slot<Vec<String>>,
    /// Catalogue loaded by a `Given` step.
    pub catalogue: Slot<MessageTree>,
    /// Output of the last `When` step.
    pub output: Slot<String>,
}

/// Creates a clean scenario state.
#[fixture]
pub fn context() -> MessageContext {
    MessageContext::default()
}
