//! Property tests for the lenient template grammar.

use ortho_messages::{
    MessageFormatter, MessageTree, Mode, Values, get_nested_message, syntax::parse,
};
use proptest::prelude::*;
use unic_langid::langid;

const TEMPLATE: &str = "[a-z #{}<>/,=]{0,48}";

proptest! {
    #[test]
    fn formatting_never_panics(input in TEMPLATE, rich in any::<bool>()) {
        let mode = if rich { Mode::Rich } else { Mode::Plain };
        let values = Values::new().with("a", 1).with("b", "x");
        let _formatted = MessageFormatter::shared().format(&input, &values, &langid!("en"), mode);
        let _nodes = parse(&input, mode);
    }

    #[test]
    fn formatting_is_deterministic(input in TEMPLATE) {
        let values = Values::new().with("a", 2);
        let formatter = MessageFormatter::default();
        let first = formatter.format(&input, &values, &langid!("en"), Mode::Rich);
        let second = formatter.format(&input, &values, &langid!("en"), Mode::Rich);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn text_without_syntax_is_unchanged(input in "[a-zA-Z0-9 .,!?#=/>-]{0,64}") {
        let formatted =
            MessageFormatter::shared().format_plain(&input, &Values::new(), &langid!("en"));
        prop_assert_eq!(formatted, input);
    }

    #[test]
    fn unmatched_open_brace_is_literal(head in "[a-z ]{0,16}", tail in "[a-z, ]{0,16}") {
        let input = format!("{head}{{{tail}");
        let formatted =
            MessageFormatter::shared().format_plain(&input, &Values::new(), &langid!("en"));
        prop_assert_eq!(formatted, input);
    }

    #[test]
    fn nested_lookup_never_panics(path in "[a-z.]{0,24}") {
        let inner: MessageTree = [("b", "leaf")].into_iter().collect();
        let tree: MessageTree = [("a", inner)].into_iter().collect();
        let found = get_nested_message(&tree, &path);
        if path == "a.b" {
            prop_assert!(found.is_some());
        }
        if path.is_empty() || path.starts_with('.') {
            prop_assert!(found.is_none());
        }
    }
}
