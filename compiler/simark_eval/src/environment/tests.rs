use super::*;
use pretty_assertions::assert_eq;

fn text_of(cx: &Context, name: &str) -> Option<String> {
    cx.get(name)
        .and_then(|b| b.value.as_text().map(str::to_string))
}

fn local(name: &str, value: &str) -> Binding {
    Binding::local(Name::new(name), Entity::text(value))
}

fn global(name: &str, value: &str) -> Binding {
    Binding::new(
        Name::new(name),
        Entity::text(value),
        NamedEntities::new(),
        BindingScope::Global,
    )
}

#[test]
fn test_root_frame_is_never_popped() {
    let mut cx = Context::new();
    assert_eq!(cx.frame_depth(), 1);
    assert_eq!(cx.pop_frame().err(), Some(InvariantViolation::RootFramePopped));
    assert_eq!(cx.frame_depth(), 1);
}

#[test]
fn test_local_shadows_global() {
    let mut cx = Context::new();
    cx.set_global(global("x", "global"));
    let depth = cx.push_frame(Frame::default());
    cx.set_local(local("x", "local"));
    assert_eq!(text_of(&cx, "x").as_deref(), Some("local"));

    cx.pop_frame_to(depth).unwrap();
    assert_eq!(text_of(&cx, "x").as_deref(), Some("global"));
}

#[test]
fn test_set_local_only_touches_top_frame() {
    let mut cx = Context::new();
    cx.set_local(local("x", "root"));
    cx.with_frame(Frame::default(), |cx| {
        cx.set_local(local("x", "inner"));
        assert_eq!(text_of(cx, "x").as_deref(), Some("inner"));
        Ok(())
    })
    .unwrap();
    assert_eq!(text_of(&cx, "x").as_deref(), Some("root"));
}

#[test]
fn test_global_write_while_isolated_is_discarded() {
    let mut cx = Context::new();
    cx.with_isolation(|cx| {
        cx.set_global(global("g", "temp"));
        // visible for the rest of the isolated region
        assert_eq!(text_of(cx, "g").as_deref(), Some("temp"));
        Ok(())
    })
    .unwrap();

    assert!(cx.get("g").is_none());
    assert!(cx.globals().is_empty());
    assert!(!cx.is_isolated());
}

#[test]
fn test_top_level_global_write_persists() {
    let mut cx = Context::new();
    cx.with_frame(Frame::default(), |cx| {
        cx.set_global(global("g", "kept"));
        Ok(())
    })
    .unwrap();
    assert_eq!(text_of(&cx, "g").as_deref(), Some("kept"));
}

#[test]
fn test_overlay_survives_nested_isolation_until_outermost_exit() {
    let mut cx = Context::new();
    let outer = cx.enter_isolated();
    let inner = cx.enter_isolated();
    cx.set_global(global("g", "temp"));
    cx.exit_isolated(inner).unwrap();

    assert_eq!(cx.isolation_depth(), 1);
    assert_eq!(text_of(&cx, "g").as_deref(), Some("temp"));

    cx.exit_isolated(outer).unwrap();
    assert!(cx.get("g").is_none());
}

#[test]
fn test_isolated_locals_do_not_leak() {
    let mut cx = Context::new();
    cx.with_isolation(|cx| {
        cx.set_local(local("tmp", "1"));
        Ok(())
    })
    .unwrap();
    assert!(cx.get("tmp").is_none());
}

#[test]
fn test_exit_without_enter() {
    let mut cx = Context::new();
    assert_eq!(
        cx.exit_isolated(0),
        Err(InvariantViolation::IsolationUnderflow)
    );
}

#[test]
fn test_unbalanced_pop_is_detected() {
    let mut cx = Context::new();
    let depth = cx.push_frame(Frame::default());
    cx.push_frame(Frame::default());
    assert_eq!(
        cx.pop_frame_to(depth).err(),
        Some(InvariantViolation::UnbalancedFrames {
            expected: 2,
            found: 3,
        })
    );
}

#[test]
fn test_prelude_binds_read_phrase() {
    let cx = Context::with_prelude();
    let binding = cx.get("phrase").unwrap();
    assert_eq!(*binding.value, Entity::Intrinsic(Intrinsic::ReadPhrase));
}

#[test]
fn test_from_globals_starts_fresh() {
    let mut first = Context::new();
    first.set_global(global("title", "Doc"));
    first.set_local(local("scratch", "x"));

    let second = Context::from_globals(first.into_globals());
    assert_eq!(text_of(&second, "title").as_deref(), Some("Doc"));
    assert!(second.get("scratch").is_none());
    assert_eq!(second.frame_depth(), 1);
}

#[test]
fn test_call_depth_limit() {
    let mut cx = Context::new();
    cx.set_call_limit(2);
    assert!(cx.enter_call());
    assert!(cx.enter_call());
    assert!(!cx.enter_call());
    cx.exit_call();
    assert_eq!(cx.call_depth(), 1);
}

#[test]
fn test_placeholder_frame_passes_local_writes_down() {
    let mut cx = Context::new();
    cx.with_placeholders([Name::new("p")], |cx| {
        assert!(cx.get("p").is_some_and(Binding::is_placeholder));
        cx.set_local(local("y", "2"));
        assert_eq!(text_of(cx, "y").as_deref(), Some("2"));
        Ok(())
    })
    .unwrap();

    assert_eq!(text_of(&cx, "y").as_deref(), Some("2"));
    assert!(cx.get("p").is_none());
    assert_eq!(cx.frame_depth(), 1);
}

#[test]
fn test_local_write_replaces_placeholder_of_same_name() {
    let mut cx = Context::new();
    cx.with_placeholders([Name::new("p")], |cx| {
        cx.set_local(local("p", "bound"));
        assert_eq!(text_of(cx, "p").as_deref(), Some("bound"));
        Ok(())
    })
    .unwrap();
    assert_eq!(text_of(&cx, "p").as_deref(), Some("bound"));
}

#[test]
fn test_call_frame_above_placeholders_keeps_its_writes() {
    let mut cx = Context::new();
    cx.with_placeholders([Name::new("p")], |cx| {
        cx.with_frame(Frame::default(), |cx| {
            cx.set_local(local("inner", "x"));
            Ok(())
        })
    })
    .unwrap();
    assert!(cx.get("inner").is_none());
}
