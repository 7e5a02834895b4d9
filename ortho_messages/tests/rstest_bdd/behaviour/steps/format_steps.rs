//! Steps that format templates directly.

use super::helpers::{locale, values};
use crate::fixtures::MessageContext;
use anyhow::{Result, anyhow, ensure};
use ortho_messages::MessageFormatter;
use rstest_bdd_macros::{given, then, when};
use test_helpers::text::{assignments, step_text};

#[given("the locale \"{tag}\"")]
fn choose_locale(context: &MessageContext, tag: String) {
    context.locale.set(step_text(&tag));
}

#[given("the values \"{spec}\"")]
fn assign_values(context: &MessageContext, spec: String) {
    context.values.set(assignments(&spec));
}

#[given("a bold renderer for \"{tag}\"")]
fn bold_renderer(context: &MessageContext, tag: String) {
    let mut tags = context.bold_tags.take().unwrap_or_default();
    tags.push(step_text(&tag));
    context.bold_tags.set(tags);
}

#[when("I format the plain template \"{template}\"")]
fn format_plain(context: &MessageContext, template: String) {
    let text = MessageFormatter::shared().format_plain(
        &step_text(&template),
        &values(context),
        &locale(context),
    );
    context.output.set(text);
}

#[when("I format the markup template \"{template}\"")]
fn format_markup(context: &MessageContext, template: String) {
    let text = MessageFormatter::shared()
        .format_rich(&step_text(&template), &values(context), &locale(context))
        .into_string();
    context.output.set(text);
}

#[then("the output is \"{expected}\"")]
fn assert_output(context: &MessageContext, expected: String) -> Result<()> {
    let actual = context
        .output
        .take()
        .ok_or_else(|| anyhow!("expected a formatted output"))?;
    let wanted = step_text(&expected);
    ensure!(actual == wanted, "formatted {actual:?}; expected {wanted:?}");
    Ok(())
}
