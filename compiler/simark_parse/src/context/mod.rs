//! Parse context flags.
//!
//! Each enclosure decides which characters end the phrase being read. Inside
//! `{...}` a `}` closes; inside `[...]` a `]` closes and newlines are plain
//! text. Entering one enclosure clears the other's flag.

/// Context flags for parsing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseContext(u16);

impl ParseContext {
    /// Top level of the document.
    pub const NONE: Self = Self(0);

    /// Inside a `{...}` group. `}` ends phrases, lines and blocks.
    pub const IN_NEST: Self = Self(1 << 0);

    /// Inside a bracketed value. `]` and `|` end the value.
    pub const IN_BRACKETS: Self = Self(1 << 1);

    /// Inside a default expression. A binding here may not declare defaults.
    pub const IN_DEFAULTS: Self = Self(1 << 2);

    #[inline]
    pub const fn new() -> Self {
        Self::NONE
    }

    #[inline]
    pub const fn has(self, flag: Self) -> bool {
        (self.0 & flag.0) != 0
    }

    #[inline]
    #[must_use]
    pub const fn with(self, flag: Self) -> Self {
        Self(self.0 | flag.0)
    }

    #[inline]
    #[must_use]
    pub const fn without(self, flag: Self) -> Self {
        Self(self.0 & !flag.0)
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Context for the inside of a `{...}` group.
    #[inline]
    #[must_use]
    pub const fn enter_nest(self) -> Self {
        self.without(Self::IN_BRACKETS).with(Self::IN_NEST)
    }

    /// Context for a value inside `[...]`.
    #[inline]
    #[must_use]
    pub const fn enter_brackets(self) -> Self {
        self.without(Self::IN_NEST).with(Self::IN_BRACKETS)
    }

    #[inline]
    pub const fn in_nest(self) -> bool {
        self.has(Self::IN_NEST)
    }

    #[inline]
    pub const fn in_brackets(self) -> bool {
        self.has(Self::IN_BRACKETS)
    }

    #[inline]
    pub const fn in_defaults(self) -> bool {
        self.has(Self::IN_DEFAULTS)
    }

    /// Whether a line terminator ends the current phrase.
    #[inline]
    pub const fn newline_ends_phrase(self) -> bool {
        !self.in_brackets()
    }

    /// Whether `c` closes the current enclosure.
    #[inline]
    pub const fn closes(self, c: char) -> bool {
        (c == '}' && self.in_nest()) || (c == ']' && self.in_brackets())
    }
}

#[cfg(test)]
mod tests;
