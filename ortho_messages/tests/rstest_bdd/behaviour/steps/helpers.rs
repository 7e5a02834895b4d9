//! Conversions from scenario state to formatter inputs.

use crate::fixtures::MessageContext;
use ortho_messages::{FormatterConfig, Renderer, Value, Values};
use unic_langid::LanguageIdentifier;

/// Locale chosen by the scenario, or the configured default.
pub fn locale(context: &MessageContext) -> LanguageIdentifier {
    let config = FormatterConfig::default();
    context
        .locale
        .with_ref(|tag| config.parse_locale(tag))
        .unwrap_or(config.default_locale)
}

/// Builds the value map from stored assignments and bold tags.
///
/// Assignments that parse as numbers become numeric values so plural
/// arguments see them as quantities.
pub fn values(context: &MessageContext) -> Values {
    let assignments = context.values.with_ref(Clone::clone).unwrap_or_default();
    let tags = context.bold_tags.with_ref(Clone::clone).unwrap_or_default();
    let mut values = Values::new();
    for (name, text) in assignments {
        let value = text
            .parse::<f64>()
            .map_or_else(|_| Value::from(text.as_str()), Value::from);
        values.insert(name, value);
    }
    for tag in tags {
        values.insert(
            tag,
            Renderer::markup(|inner| format!("<strong>{inner}</strong>")),
        );
    }
    values
}
