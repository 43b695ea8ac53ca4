//! Stack growth for the recursive parts of the document engine.
//!
//! Nested `{ ... }` groups recurse through the grammar, and macro bodies that
//! invoke other macros recurse through call dispatch. Both paths wrap their
//! recursive step in [`ensure_sufficient_stack`] so a deeply nested document
//! grows the stack instead of overflowing it.
//!
//! On native targets the `stacker` crate does the growing. On `wasm32` the
//! guard is a plain call.

/// Remaining stack below which we grow (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn parse_nest(&mut self, cx: &mut Context) -> ParseResult<Entity> {
///     ensure_sufficient_stack(|| self.parse_blocks(cx))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_group_depth() {
        fn depth_of(groups: &[u8]) -> usize {
            ensure_sufficient_stack(|| match groups.split_first() {
                Some((b'{', rest)) => depth_of(rest) + 1,
                _ => 0,
            })
        }

        let source = vec![b'{'; 50_000];
        assert_eq!(depth_of(&source), 50_000);
    }

    #[test]
    fn test_passes_through_result() {
        let result: Result<&str, ()> = ensure_sufficient_stack(|| Ok("text"));
        assert_eq!(result, Ok("text"));
    }
}
