//! Simark IR - the value model shared by the parser and the evaluator.
//!
//! This crate contains:
//! - [`Entity`], the closed sum type every document value belongs to
//! - [`Name`] for identifiers and [`Span`] for source positions
//! - [`NamedEntities`], the ordered unique-key table used for arguments
//!   and defaults
//! - [`FaultKind`] and [`Severity`] carried by in-tree error nodes
//! - [`InvariantViolation`], the fatal error for engine defects
//!
//! Entities are plain owned data. Once the parser hands a tree over it holds
//! no reference to source text, so trees are `Send + Sync` and can outlive the
//! source they came from.

mod entity;
mod fault;
mod invariant;
mod name;
mod named;
mod span;

pub use entity::{Entity, ErrorNode, Intrinsic, Invocation};
pub use fault::{FaultKind, Severity};
pub use invariant::InvariantViolation;
pub use name::Name;
pub use named::{DuplicateName, NamedEntities};
pub use span::Span;
