use super::*;

#[test]
fn test_flag_ops() {
    let ctx = ParseContext::new().with(ParseContext::IN_DEFAULTS);
    assert!(ctx.in_defaults());
    assert!(!ctx.without(ParseContext::IN_DEFAULTS).in_defaults());
    assert_eq!(
        ParseContext::IN_NEST.union(ParseContext::IN_DEFAULTS),
        ParseContext::IN_DEFAULTS.with(ParseContext::IN_NEST)
    );
}

#[test]
fn test_enclosures_replace_each_other() {
    let nest = ParseContext::NONE.enter_nest();
    let brackets = nest.enter_brackets();
    assert!(brackets.in_brackets());
    assert!(!brackets.in_nest());
    assert!(brackets.enter_nest().in_nest());
    assert!(!brackets.enter_nest().in_brackets());
}

#[test]
fn test_enclosures_keep_defaults_flag() {
    let ctx = ParseContext::IN_DEFAULTS.enter_brackets().enter_nest();
    assert!(ctx.in_defaults());
}

#[test]
fn test_closing_characters() {
    assert!(!ParseContext::NONE.closes('}'));
    assert!(!ParseContext::NONE.closes(']'));
    assert!(ParseContext::NONE.enter_nest().closes('}'));
    assert!(ParseContext::NONE.enter_brackets().closes(']'));
    assert!(!ParseContext::NONE.enter_brackets().newline_ends_phrase());
    assert!(ParseContext::NONE.enter_nest().newline_ends_phrase());
}
