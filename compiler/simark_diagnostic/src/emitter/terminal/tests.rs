use super::*;
use crate::ErrorCode;
use pretty_assertions::assert_eq;
use simark_ir::Span;

fn unbound() -> Diagnostic {
    Diagnostic::error(ErrorCode::S1001)
        .with_message("`foo` is not bound")
        .with_label(Span::new(6, 10), "unbound-name")
        .with_note("bind it with `[foo=...]` first")
}

fn render(emitter_for: impl FnOnce(&mut Vec<u8>)) -> String {
    let mut out = Vec::new();
    emitter_for(&mut out);
    String::from_utf8(out).unwrap()
}

// Fallback (no source) tests

#[test]
fn test_no_source_no_color() {
    let text = render(|out| {
        let mut emitter = TerminalEmitter::with_color_mode(out, ColorMode::Never, false);
        emitter.emit(&unbound());
        emitter.flush();
    });

    assert!(text.starts_with("error[S1001]: `foo` is not bound\n"));
    assert!(text.contains("--> 6..10: unbound-name"));
    assert!(text.contains("= note: bind it with"));
    assert!(!text.contains("\x1b["));
}

#[test]
fn test_with_color() {
    let text = render(|out| {
        let mut emitter = TerminalEmitter::with_color_mode(out, ColorMode::Always, false);
        emitter.emit(&unbound());
    });
    assert!(text.contains("\x1b["));
    assert!(text.contains("S1001"));
}

#[test]
fn test_auto_follows_tty() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
}

// Source snippet tests

#[test]
fn test_snippet_with_underline() {
    let source = "intro\nsee \\foo here\n";
    let diag = Diagnostic::error(ErrorCode::S1001)
        .with_message("`foo` is not bound")
        .with_label(Span::new(10, 14), "unbound-name");

    let text = render(|out| {
        let mut emitter = TerminalEmitter::with_color_mode(out, ColorMode::Never, false)
            .with_source(source)
            .with_file_path("doc.sm");
        emitter.emit(&diag);
    });

    let expected = "\
error[S1001]: `foo` is not bound
  --> doc.sm:2:5
  |
2 | see \\foo here
  |     ^^^^ unbound-name

";
    assert_eq!(text, expected);
}

#[test]
fn test_zero_width_span_still_marks_a_column() {
    let source = "{open";
    let diag = Diagnostic::warning(ErrorCode::S0001)
        .with_message("group is never closed")
        .with_label(Span::point(5), "");

    let text = render(|out| {
        let mut emitter =
            TerminalEmitter::with_color_mode(out, ColorMode::Never, false).with_source(source);
        emitter.emit(&diag);
    });

    assert!(text.contains("--> <document>:1:6"));
    assert!(text.contains("1 | {open\n  |      ^\n"));
}

// Summary tests

#[test]
fn test_summary_faults_and_warnings() {
    let text = render(|out| {
        let mut emitter = TerminalEmitter::plain(out);
        emitter.emit_summary(2, 1);
    });
    assert_eq!(text, "error: document has 2 faults; 1 warning emitted\n");
}

#[test]
fn test_summary_warnings_only() {
    let text = render(|out| {
        let mut emitter = TerminalEmitter::plain(out);
        emitter.emit_summary(0, 3);
    });
    assert_eq!(text, "warning: 3 warnings emitted\n");
}

#[test]
fn test_summary_nothing_to_report() {
    let text = render(|out| {
        let mut emitter = TerminalEmitter::plain(out);
        emitter.emit_summary(0, 0);
    });
    assert!(text.is_empty());
}
