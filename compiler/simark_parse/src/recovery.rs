//! Resynchronization after malformed bracketed input.
//!
//! Once a binding block or argument list has committed, a malformed entry
//! is skipped up to the next entry boundary so the rest of the block still
//! parses. Skipping respects escapes, verbatim runs, and nested groups.

use crate::reader::Reader;

/// Skip to the next `|` or `]` that belongs to the current bracket level.
///
/// The boundary itself is not consumed. Stops at end of input.
pub fn skip_to_entry_end(reader: &mut Reader<'_>) {
    let mut depth = 0usize;
    while let Some(c) = reader.peek() {
        match c {
            '|' | ']' if depth == 0 => return,
            '[' | '{' => {
                depth += 1;
                reader.advance();
            }
            ']' | '}' => {
                depth = depth.saturating_sub(1);
                reader.advance();
            }
            _ => skip_one(reader),
        }
    }
}

/// Consume a balanced `[...]` group starting at `[`.
///
/// Returns `false` if the input ended before the group closed.
pub fn skip_bracket_group(reader: &mut Reader<'_>) -> bool {
    if !reader.eat('[') {
        return false;
    }
    let mut depth = 1usize;
    while let Some(c) = reader.peek() {
        match c {
            '[' => {
                depth += 1;
                reader.advance();
            }
            ']' => {
                depth -= 1;
                reader.advance();
                if depth == 0 {
                    return true;
                }
            }
            _ => skip_one(reader),
        }
    }
    false
}

/// Step over one character, or over a whole escape or verbatim run.
fn skip_one(reader: &mut Reader<'_>) {
    match reader.peek() {
        Some('\\') => {
            reader.advance();
            reader.advance();
        }
        Some('`') => {
            let run = reader.run_length('`');
            let fence = "`".repeat(run);
            let body_start = reader.position() + run;
            let close = if run >= 2 {
                reader.source()[body_start..].find(&fence)
            } else {
                None
            };
            match close {
                Some(offset) => reader.set_position(body_start + offset + run),
                None => reader.set_position(body_start),
            }
        }
        Some(_) => {
            reader.advance();
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_skip_to_entry_end_stops_at_separator() {
        let mut r = Reader::new("bad stuff | y=2]");
        skip_to_entry_end(&mut r);
        assert_eq!(r.rest(), "| y=2]");
    }

    #[test]
    fn test_skip_to_entry_end_respects_nesting() {
        let mut r = Reader::new("a[b|c]{d|e}f]rest");
        skip_to_entry_end(&mut r);
        assert_eq!(r.rest(), "]rest");
    }

    #[test]
    fn test_skip_to_entry_end_respects_escapes_and_verbatim() {
        let mut r = Reader::new(r"a\|b``x|y``c|d");
        skip_to_entry_end(&mut r);
        assert_eq!(r.rest(), "|d");
    }

    #[test]
    fn test_skip_bracket_group() {
        let mut r = Reader::new("[a[b]c] tail");
        assert!(skip_bracket_group(&mut r));
        assert_eq!(r.rest(), " tail");

        let mut r = Reader::new("[never closed");
        assert!(!skip_bracket_group(&mut r));
        assert!(r.at_end());
    }
}
