//! The document pipeline: parse (phase 1) → evaluate (phase 2) → render.
//!
//! Portable (no filesystem IO). Source comes in as `&str`; results come out
//! as a [`DocumentOutput`].
//!
//! Phase 2 starts from a fresh [`Context`] seeded with the globals phase 1
//! left behind, so references resolve against the document's final
//! definitions. Read-ahead is only possible in phase 1.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Deserialize;
use simark_diagnostic::Diagnostic;
use simark_eval::output::{render_text, to_node};
use simark_eval::{Context, EvalMode, Evaluator, DEFAULT_CALL_LIMIT};
use simark_ir::Entity;
use simark_parse::ParseOptions;
use tracing::{debug, info};

use crate::output::{DocumentOutput, EngineError, ErrorPhase};

/// Which renderings to produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Tree,
    #[default]
    Both,
}

impl OutputFormat {
    pub fn wants_text(self) -> bool {
        matches!(self, OutputFormat::Text | OutputFormat::Both)
    }

    pub fn wants_tree(self) -> bool {
        matches!(self, OutputFormat::Tree | OutputFormat::Both)
    }
}

/// Configuration for processing one document.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Logical file path (used in diagnostics, not for IO).
    pub file_path: String,
    pub output: OutputFormat,
    /// Deepest allowed nesting of invocations.
    pub call_limit: usize,
    /// Replace single-child containers with their child after parsing.
    pub collapse: bool,
    /// Bind the engine primitives (`phrase`) before parsing.
    pub prelude: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            file_path: "input.simark".to_string(),
            output: OutputFormat::default(),
            call_limit: DEFAULT_CALL_LIMIT,
            collapse: true,
            prelude: true,
        }
    }
}

/// Process `source` to completion.
pub fn process(source: &str, config: &DocumentConfig) -> Result<DocumentOutput, EngineError> {
    process_with_cancel(source, config, &AtomicBool::new(false))
}

/// Process `source`, checking `cancel` before each top-level block of phase 2.
#[tracing::instrument(level = "debug", skip_all, fields(file = %config.file_path))]
pub fn process_with_cancel(
    source: &str,
    config: &DocumentConfig,
    cancel: &AtomicBool,
) -> Result<DocumentOutput, EngineError> {
    let mut cx = if config.prelude {
        Context::with_prelude()
    } else {
        Context::new()
    };
    cx.set_call_limit(config.call_limit);

    // Phase 1
    let options = ParseOptions {
        collapse: config.collapse,
    };
    let parsed = simark_parse::parse_with_options(source, &mut cx, options)
        .map_err(|violation| EngineError::new(ErrorPhase::Parse, violation))?;
    debug!(globals = cx.globals().len(), "phase 1 done");

    // Phase 2
    let mut render_cx = Context::from_globals(cx.into_globals());
    render_cx.set_call_limit(config.call_limit);
    let (evaluated, cancelled) = evaluate_blocks(&parsed.document, &mut render_cx, cancel)
        .map_err(|violation| EngineError::new(ErrorPhase::Render, violation))?;
    if cancelled {
        info!("phase 2 cancelled");
    }

    let mut diagnostics = parsed.diagnostics;
    diagnostics.extend(evaluated.faults().into_iter().map(Diagnostic::from_fault));
    diagnostics.sort_by_key(|d| d.primary_span().map(|span| span.start));

    Ok(DocumentOutput {
        text: config.output.wants_text().then(|| render_text(&evaluated)),
        nodes: config.output.wants_tree().then(|| to_node(&evaluated)),
        tree: parsed.document,
        evaluated,
        diagnostics,
        cancelled,
    })
}

/// Evaluate the top-level blocks one at a time.
///
/// Returns the evaluated document and whether `cancel` cut it short.
fn evaluate_blocks(
    document: &Entity,
    cx: &mut Context,
    cancel: &AtomicBool,
) -> Result<(Entity, bool), simark_ir::InvariantViolation> {
    let Entity::Nest(blocks) = document else {
        if cancel.load(Ordering::Relaxed) {
            return Ok((Entity::Nest(Vec::new()), true));
        }
        return Ok((Evaluator::new(cx, EvalMode::Render).evaluate(document)?, false));
    };

    let mut evaluated = Vec::with_capacity(blocks.len());
    for block in blocks {
        if cancel.load(Ordering::Relaxed) {
            debug!(done = evaluated.len(), total = blocks.len(), "cancel requested");
            return Ok((Entity::Nest(evaluated), true));
        }
        evaluated.push(Evaluator::new(cx, EvalMode::Render).evaluate(block)?);
    }
    Ok((Entity::Nest(evaluated), false))
}
