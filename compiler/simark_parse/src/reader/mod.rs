//! Character reader over document source.
//!
//! Positions are byte offsets into the source and always sit on a char
//! boundary. `\r\n` is read as one line terminator; a lone `\r` is an
//! ordinary character.

use tracing::trace;

use crate::outcome::NoMatch;

/// Characters with structural meaning. Writing one literally needs `\`.
pub const RESERVED: [char; 8] = ['\\', '~', '[', ']', '{', '}', '|', '`'];

/// Whether `c` is reserved markup.
#[inline]
pub fn is_reserved(c: char) -> bool {
    RESERVED.contains(&c)
}

/// Whether `c` may appear in a binding or invocation name.
#[inline]
pub fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Whether `c` is whitespace that does not end a line.
#[inline]
pub fn is_inline_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Cursor over the source text of one document.
#[derive(Clone, Debug)]
pub struct Reader<'src> {
    source: &'src str,
    pos: usize,
}

impl<'src> Reader<'src> {
    pub fn new(source: &'src str) -> Self {
        Reader { source, pos: 0 }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Current byte offset.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move to `pos`. Used by checkpoint restore.
    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(
            pos <= self.source.len() && self.source.is_char_boundary(pos),
            "reader position {pos} is not a char boundary"
        );
        self.pos = pos;
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Unconsumed source.
    #[inline]
    pub fn rest(&self) -> &'src str {
        &self.source[self.pos..]
    }

    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character after the next one.
    pub fn peek_second(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume `c` if it is next.
    pub fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consume `literal` if the source continues with it.
    pub fn try_literal(&mut self, literal: &str) -> Result<(), NoMatch> {
        if self.rest().starts_with(literal) {
            trace!(literal, pos = self.pos, "matched literal");
            self.pos += literal.len();
            Ok(())
        } else {
            Err(NoMatch)
        }
    }

    /// Consume characters while `pred` holds and return them.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'src str {
        let start = self.pos;
        let len = self
            .rest()
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map_or(self.rest().len(), |(i, _)| i);
        self.pos += len;
        &self.source[start..self.pos]
    }

    /// Consume a name, if one starts here.
    pub fn ident(&mut self) -> Option<&'src str> {
        let name = self.eat_while(is_ident_char);
        (!name.is_empty()).then_some(name)
    }

    pub fn skip_inline_space(&mut self) {
        self.eat_while(is_inline_space);
    }

    /// Skip spaces, tabs and line terminators.
    pub fn skip_space(&mut self) {
        loop {
            self.skip_inline_space();
            if !self.eat_newline() {
                break;
            }
        }
    }

    /// Whether a line terminator is next.
    pub fn at_newline(&self) -> bool {
        let rest = self.rest();
        rest.starts_with('\n') || rest.starts_with("\r\n")
    }

    /// Consume one line terminator if it is next.
    pub fn eat_newline(&mut self) -> bool {
        if self.eat('\n') {
            return true;
        }
        self.try_literal("\r\n").is_ok()
    }

    /// Number of consecutive `c` starting here, without consuming.
    pub fn run_length(&self, c: char) -> usize {
        self.rest().chars().take_while(|&x| x == c).count()
    }

    /// Source between two offsets.
    pub fn slice(&self, start: usize, end: usize) -> &'src str {
        &self.source[start..end]
    }
}
