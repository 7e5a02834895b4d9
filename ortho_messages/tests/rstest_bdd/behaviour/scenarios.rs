//! Binds the `ortho_messages` feature files to the step registry.

use crate::fixtures::{MessageContext, context};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/formatting.feature",
    fixtures = [context: MessageContext]
);
scenarios!(
    "tests/features/translations.feature",
    fixtures = [context: MessageContext]
);
