use super::*;
use pretty_assertions::assert_eq;
use simark_diagnostic::ErrorCode;
use simark_ir::Span;

use crate::Parser;
use simark_eval::PhraseSource;

fn line(phrases: Vec<Entity>) -> Entity {
    Entity::Line(phrases)
}

#[test]
fn test_full_structure_without_collapse() {
    let output = parse_raw("a|b|c");
    assert_eq!(
        output.document,
        Entity::Nest(vec![Entity::Block(vec![line(vec![
            phrase(vec![text("a")]),
            phrase(vec![text("b")]),
            phrase(vec![text("c")]),
        ])])])
    );
    assert!(!output.has_warnings());
}

#[test]
fn test_empty_phrases_are_kept() {
    let output = parse_raw("a||b|");
    let Entity::Nest(blocks) = output.document else {
        panic!("expected a nest");
    };
    assert_eq!(
        blocks,
        vec![Entity::Block(vec![line(vec![
            phrase(vec![text("a")]),
            phrase(vec![]),
            phrase(vec![text("b")]),
            phrase(vec![]),
        ])])]
    );
}

#[test]
fn test_blank_lines_separate_blocks() {
    let output = parse_raw("one\n\n  \ntwo\nthree\n");
    let Entity::Nest(blocks) = output.document else {
        panic!("expected a nest");
    };
    assert_eq!(
        blocks,
        vec![
            Entity::Block(vec![line(vec![phrase(vec![text("one")])])]),
            Entity::Block(vec![
                line(vec![phrase(vec![text("two")])]),
                line(vec![phrase(vec![text("three")])]),
            ]),
        ]
    );
}

#[test]
fn test_crlf_line_endings() {
    let output = parse_raw("a\r\n\r\nb\r\n");
    let Entity::Nest(blocks) = output.document else {
        panic!("expected a nest");
    };
    assert_eq!(blocks.len(), 2);
}

#[test]
fn test_empty_document() {
    assert_eq!(parse_raw("").document, Entity::Nest(vec![]));
    assert_eq!(parse_raw("\n \n\n").document, Entity::Nest(vec![]));
}

#[test]
fn test_collapse_keeps_the_block_level() {
    assert_eq!(parse_doc("hello").0, Entity::Block(vec![text("hello")]));
    assert_eq!(
        parse_doc("a\n\nb").0,
        Entity::Nest(vec![
            Entity::Block(vec![text("a")]),
            Entity::Block(vec![text("b")]),
        ])
    );
}

#[test]
fn test_nest_inside_phrase() {
    assert_eq!(
        parse_body("x {a|b} y").0,
        phrase(vec![
            text("x "),
            Entity::Block(vec![line(vec![text("a"), text("b")])]),
            text(" y"),
        ])
    );
}

#[test]
fn test_nest_spanning_lines() {
    let (doc, _) = parse_body("{\n  first\n\n  second\n}");
    assert_eq!(
        doc,
        Entity::Nest(vec![
            Entity::Block(vec![text("  first")]),
            Entity::Block(vec![text("  second")]),
        ])
    );
}

#[test]
fn test_verbatim_is_untouched() {
    assert_eq!(
        parse_body(r"``\x | {y} ~z``").0,
        Entity::Verbatim(r"\x | {y} ~z".into())
    );
    assert_eq!(
        parse_body("```a``b```").0,
        Entity::Verbatim("a``b".into())
    );
}

#[test]
fn test_escapes_yield_literals() {
    let output = parse_raw(r"a\|b\{c\}\[d\]\~e\\f\`");
    assert!(!output.has_warnings());
    assert_eq!(render_text(&output.document), r"a|b{c}[d]~e\f`");
}

#[test]
fn test_unnecessary_escape_warns() {
    let output = parse_raw(r"a\.b");
    assert_eq!(render_text(&output.document), "a.b");
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].code, ErrorCode::S0002);
}

#[test]
fn test_trailing_backslash_warns() {
    let output = parse_raw("end\\");
    assert_eq!(render_text(&output.document), "end\\");
    assert_eq!(output.diagnostics[0].code, ErrorCode::S0003);
}

#[test]
fn test_unclosed_nest_is_closed_at_end() {
    let output = parse_raw("{a");
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].code, ErrorCode::S0001);
    let spans: Vec<_> = output.diagnostics[0].labels.iter().map(|l| l.span).collect();
    assert_eq!(spans, vec![Span::new(0, 1), Span::new(2, 2)]);
    assert_eq!(
        crate::collapse(output.document),
        Entity::Block(vec![Entity::Block(vec![text("a")])])
    );
}

#[test]
fn test_definition_only_lines_are_dropped() {
    let output = parse_raw("[x=1]\n[[y=2]]  \nbody");
    assert_eq!(
        output.document,
        Entity::Nest(vec![Entity::Block(vec![line(vec![phrase(vec![text(
            "body"
        )])])])])
    );
}

#[test]
fn test_definition_only_block_is_dropped() {
    let output = parse_raw("[x=1]\n\nbody");
    let Entity::Nest(blocks) = output.document else {
        panic!("expected a nest");
    };
    assert_eq!(blocks.len(), 1);
}

#[test]
fn test_references_stay_deferred() {
    assert_eq!(
        parse_body("~later").0,
        Entity::reference("later", simark_ir::NamedEntities::new())
    );
}

#[test]
fn test_read_phrase_stops_before_separator() {
    let mut cx = Context::with_prelude();
    let mut parser = Parser::new("  next one |rest");
    let phrase = parser.read_phrase(&mut cx).unwrap();
    assert_eq!(phrase, text("next one"));
    assert_eq!(parser.position(), 11);
}

#[test]
fn test_read_phrase_at_line_end_is_empty() {
    let mut cx = Context::with_prelude();
    let mut parser = Parser::new("\nnext line");
    assert_eq!(parser.read_phrase(&mut cx).unwrap(), text(""));
    assert_eq!(parser.position(), 0);
}

#[test]
fn test_blocks_one_at_a_time() {
    let mut cx = Context::with_prelude();
    let mut parser = Parser::new("[[g=G]]\n\n\\g\n\nlast");
    let first = parser.parse_next_block(&mut cx).unwrap();
    assert!(first.is_some());
    let second = parser.parse_next_block(&mut cx).unwrap();
    assert!(second.is_some());
    assert!(parser.parse_next_block(&mut cx).unwrap().is_none());
    assert!(parser.is_at_end());
}

#[test]
fn test_line_with_invocation_is_kept_when_empty() {
    let (doc, _) = parse_doc("[[e=]]\n\\e\nx");
    assert_eq!(doc, Entity::Block(vec![text(""), text("x")]));
    assert_eq!(render_text(&doc), "\nx");
}

#[test]
fn test_binding_faults_keep_their_line() {
    let output = parse_raw("[x=1|x=2]\nbody");
    let Entity::Nest(blocks) = output.document else {
        panic!("expected a nest");
    };
    let Entity::Block(lines) = &blocks[0] else {
        panic!("expected a block");
    };
    assert_eq!(lines.len(), 2);
    assert_eq!(
        fault_kinds(&lines[0]),
        vec![FaultKind::MalformedBinding]
    );
}
