use super::*;

#[test]
fn test_default_is_bootstrap() {
    assert_eq!(EvalMode::default(), EvalMode::Bootstrap);
}

#[test]
fn test_only_bootstrap_reads_ahead() {
    assert!(EvalMode::Bootstrap.allows_read_ahead());
    assert!(!EvalMode::Render.allows_read_ahead());
}

#[test]
fn test_display() {
    assert_eq!(EvalMode::Render.to_string(), "render");
}
