use super::*;
use proptest::prelude::*;

use crate::collapse;

proptest! {
    /// k separators on a line always give k + 1 phrases, empty ones included.
    #[test]
    fn phrase_count_follows_separators(segments in prop::collection::vec("[a-z ]{0,5}", 2..8)) {
        let source = segments.join("|");
        let output = parse_raw(&source);

        let Entity::Nest(blocks) = output.document else {
            panic!("expected a nest");
        };
        prop_assert_eq!(blocks.len(), 1);
        let Entity::Block(lines) = &blocks[0] else {
            panic!("expected a block");
        };
        let Entity::Line(phrases) = &lines[0] else {
            panic!("expected a line");
        };
        prop_assert_eq!(phrases.len(), segments.len());
        for (phrase, segment) in phrases.iter().zip(&segments) {
            prop_assert_eq!(render_text(phrase), segment.clone());
        }
    }

    /// Arbitrary markup never breaks an engine invariant.
    ///
    /// `~` is left out: a self-referencing macro that fans out is capped in
    /// depth but not in breadth.
    #[test]
    fn parse_never_fails(source in r"[ab|{}\[\]=`\\\n ]{0,40}") {
        let mut cx = Context::with_prelude();
        prop_assert!(parse(&source, &mut cx).is_ok());
        prop_assert_eq!(cx.frame_depth(), 1);
        prop_assert_eq!(cx.isolation_depth(), 0);
    }

    /// Collapsing an already collapsed document changes nothing.
    #[test]
    fn collapse_is_idempotent(source in r"[ab|{}\[\]=\\\n ]{0,40}") {
        let (doc, _) = parse_doc(&source);
        prop_assert_eq!(collapse(doc.clone()), doc);
    }

    /// Escaping any reserved character yields exactly that character.
    #[test]
    fn escaped_reserved_is_literal(index in 0..crate::RESERVED.len(), prefix in "[a-z]{0,4}") {
        let c = crate::RESERVED[index];
        let source = format!("{prefix}\\{c}");
        let output = parse_raw(&source);
        prop_assert!(!output.has_warnings());
        prop_assert_eq!(render_text(&output.document), format!("{prefix}{c}"));
    }
}
