//! Classification of recoverable faults.

use std::fmt;

/// What went wrong at an in-tree error node.
///
/// Every variant is author-facing and recoverable: the node is inlined where
/// the fault happened and the surrounding document keeps processing.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FaultKind {
    /// A `\name` or `~name` whose name has no binding in scope.
    UnboundName,
    /// Nested defaults, a repeated name in one binding block, or a binding
    /// entry without `=`.
    MalformedBinding,
    /// An argument the target macro does not declare, or a repeated key.
    ArgumentMerge,
    /// A reserved character where no construct can start, or an unclosed
    /// bracket form.
    MalformedSyntax,
    /// Read-ahead requested with no source left to read from.
    ReadAheadUnavailable,
    /// Macro calls nested deeper than the configured limit.
    RecursionLimit,
}

impl FaultKind {
    /// Short label used in rendered output and node attributes.
    pub fn label(self) -> &'static str {
        match self {
            FaultKind::UnboundName => "unbound-name",
            FaultKind::MalformedBinding => "malformed-binding",
            FaultKind::ArgumentMerge => "argument-merge",
            FaultKind::MalformedSyntax => "malformed-syntax",
            FaultKind::ReadAheadUnavailable => "read-ahead-unavailable",
            FaultKind::RecursionLimit => "recursion-limit",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Severity level for faults and diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
    Note,
    Help,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
            Severity::Help => write!(f, "help"),
        }
    }
}
