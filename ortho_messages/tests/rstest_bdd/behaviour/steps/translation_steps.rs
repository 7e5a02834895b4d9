//! Steps that translate keys from the sample catalogue.

use super::helpers::{locale, values};
use crate::fixtures::{CATALOGUE, MessageContext};
use anyhow::{Result, anyhow, ensure};
use ortho_messages::{MessageTree, Translator, translations};
use rstest_bdd_macros::{given, then, when};
use test_helpers::text::step_text;

#[given("the sample catalogue")]
fn load_catalogue(context: &MessageContext) -> Result<()> {
    context.catalogue.set(MessageTree::from_json_str(CATALOGUE)?);
    Ok(())
}

fn translator(context: &MessageContext, namespace: Option<&str>) -> Result<Translator> {
    context
        .catalogue
        .with_ref(|tree| translations(tree, locale(context), namespace))
        .ok_or_else(|| anyhow!("a catalogue must be loaded first"))
}

#[when("I translate \"{key}\" in namespace \"{namespace}\"")]
fn translate_namespaced(context: &MessageContext, key: String, namespace: String) -> Result<()> {
    let ns = step_text(&namespace);
    let text = translator(context, Some(&ns))?.t(&step_text(&key), &values(context));
    context.output.set(text);
    Ok(())
}

#[when("I translate the root key \"{key}\"")]
fn translate_root(context: &MessageContext, key: String) -> Result<()> {
    let text = translator(context, None)?.t(&step_text(&key), &values(context));
    context.output.set(text);
    Ok(())
}

#[when("I translate markup \"{key}\" in namespace \"{namespace}\"")]
fn translate_markup(context: &MessageContext, key: String, namespace: String) -> Result<()> {
    let ns = step_text(&namespace);
    let text = translator(context, Some(&ns))?.markup(&step_text(&key), &values(context));
    context.output.set(text);
    Ok(())
}

#[then("the text direction is \"{expected}\"")]
fn assert_direction(context: &MessageContext, expected: String) -> Result<()> {
    let direction = translator(context, None)?.direction();
    ensure!(
        direction.as_str() == expected,
        "direction {direction}; expected {expected}"
    );
    Ok(())
}
