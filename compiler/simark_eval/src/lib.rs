//! Scoping and evaluation engine for simark documents.
//!
//! - [`Context`]: local frames, global root, and the isolation overlay
//! - [`Binding`]: a named value with its own defaults
//! - [`Evaluator`]: the uniform `call` dispatch and the deep `evaluate` walk
//! - [`PhraseSource`]: the one hook the parser provides for read-ahead
//! - [`output`]: plain text and node-tree rendering of evaluated trees
//!
//! The same evaluator runs during parsing (phase 1, with the parser as its
//! phrase source) and over the finished tree (phase 2, with none).

mod binding;
mod environment;
pub mod errors;
mod eval_mode;
mod evaluator;
pub mod output;

pub use binding::{Binding, BindingScope};
pub use environment::{Context, Frame, DEFAULT_CALL_LIMIT};
pub use eval_mode::EvalMode;
pub use evaluator::{EvalResult, Evaluator, PhraseSource};
