//! Error codes for all engine diagnostics.
//!
//! Format: S#### where the first digit names the category:
//! - S0xxx: Warnings about questionable but accepted input
//! - S1xxx: Document faults (inlined error entities)
//! - S9xxx: Internal engine errors

use std::fmt;

use simark_ir::FaultKind;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Warnings (S0xxx)
    /// `{` never closed before end of input
    S0001,
    /// `\` before a character that needs no escaping
    S0002,
    /// `\` as the very last character of the document
    S0003,

    // Document faults (S1xxx)
    /// Unbound name
    S1001,
    /// Malformed binding
    S1002,
    /// Argument not accepted by the target
    S1003,
    /// Malformed syntax
    S1004,
    /// Read-ahead with no source
    S1005,
    /// Call depth exceeded
    S1006,

    // Internal (S9xxx)
    /// Engine invariant violated
    S9001,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::S0001 => "S0001",
            ErrorCode::S0002 => "S0002",
            ErrorCode::S0003 => "S0003",
            ErrorCode::S1001 => "S1001",
            ErrorCode::S1002 => "S1002",
            ErrorCode::S1003 => "S1003",
            ErrorCode::S1004 => "S1004",
            ErrorCode::S1005 => "S1005",
            ErrorCode::S1006 => "S1006",
            ErrorCode::S9001 => "S9001",
        }
    }

    /// One-line description, for `--explain` style listings.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::S0001 => "unclosed group",
            ErrorCode::S0002 => "unnecessary escape",
            ErrorCode::S0003 => "trailing backslash",
            ErrorCode::S1001 => "unbound name",
            ErrorCode::S1002 => "malformed binding",
            ErrorCode::S1003 => "argument not declared by target",
            ErrorCode::S1004 => "malformed syntax",
            ErrorCode::S1005 => "read-ahead unavailable",
            ErrorCode::S1006 => "recursion limit reached",
            ErrorCode::S9001 => "internal invariant violated",
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, ErrorCode::S0001 | ErrorCode::S0002 | ErrorCode::S0003)
    }

    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            ErrorCode::S1001
                | ErrorCode::S1002
                | ErrorCode::S1003
                | ErrorCode::S1004
                | ErrorCode::S1005
                | ErrorCode::S1006
        )
    }

    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::S9001)
    }
}

impl From<FaultKind> for ErrorCode {
    fn from(kind: FaultKind) -> Self {
        match kind {
            FaultKind::UnboundName => ErrorCode::S1001,
            FaultKind::MalformedBinding => ErrorCode::S1002,
            FaultKind::ArgumentMerge => ErrorCode::S1003,
            FaultKind::MalformedSyntax => ErrorCode::S1004,
            FaultKind::ReadAheadUnavailable => ErrorCode::S1005,
            FaultKind::RecursionLimit => ErrorCode::S1006,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests;
