//! Portable simark document driver.
//!
//! Runs the whole pipeline over a string with no filesystem access, for the
//! CLI, renderers, and tests.
//!
//! # Usage
//!
//! ```ignore
//! use simark_driver::{process, DocumentConfig};
//!
//! let output = process("[x=hello]\\x", &DocumentConfig::default())?;
//! assert_eq!(output.text.as_deref(), Some("hello"));
//! ```
//!
//! # Architecture
//!
//! ```text
//! simark_ir, simark_diagnostic, simark_eval, simark_parse
//!                          ↓
//!                   simark_driver  ← this crate
//! ```

mod output;
mod pipeline;

pub use output::{DocumentOutput, EngineError, ErrorPhase};
pub use pipeline::{process, process_with_cancel, DocumentConfig, OutputFormat};

use std::sync::Once;

use simark_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use simark_diagnostic::Diagnostic;

/// Filter directives for engine logging, in `EnvFilter` syntax.
pub const LOG_ENV: &str = "SIMARK_LOG";

/// When set, logs are printed as an indented span tree.
pub const LOG_TREE_ENV: &str = "SIMARK_LOG_TREE";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `SIMARK_LOG` is set,
/// e.g. `SIMARK_LOG=simark_eval=debug` or `SIMARK_LOG=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Ok(directives) = std::env::var(LOG_ENV) else {
            return;
        };
        let filter = EnvFilter::new(directives);
        let registry = tracing_subscriber::registry().with(filter);
        let installed = if std::env::var_os(LOG_TREE_ENV).is_some() {
            registry
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        };
        if installed.is_err() {
            tracing::debug!("a global subscriber was already installed");
        }
    });
}

/// Render diagnostics to a string with source context.
///
/// Uses `TerminalEmitter` to produce line numbers, `^` underlines and
/// messages, followed by a one-line summary when anything was reported.
pub fn render_diagnostics(
    source: &str,
    file_path: &str,
    diagnostics: &[Diagnostic],
    color: ColorMode,
) -> String {
    let mut buf = Vec::new();
    {
        let mut emitter = TerminalEmitter::with_color_mode(&mut buf, color, false)
            .with_source(source)
            .with_file_path(file_path);
        emitter.emit_all(diagnostics);
        let errors = diagnostics.iter().filter(|d| d.is_error()).count();
        let warnings = diagnostics.iter().filter(|d| d.is_warning()).count();
        emitter.emit_summary(errors, warnings);
        emitter.flush();
    }
    String::from_utf8_lossy(&buf).into_owned()
}
