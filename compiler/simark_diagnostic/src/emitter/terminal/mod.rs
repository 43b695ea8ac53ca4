//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support. When a
//! source is attached, labels are shown as `file:line:col` with the source
//! line and a `^` underline; without one they fall back to raw spans.

use std::io::{self, Write};

use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, Label, Severity};

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Decide from whether the output is a TTY.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Source text plus its line table, attached with [`TerminalEmitter::with_source`].
struct SourceView<'src> {
    text: &'src str,
    lines: LineOffsetTable,
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<'src, W: Write> {
    writer: W,
    colors: bool,
    source: Option<SourceView<'src>>,
    file_path: Option<String>,
}

impl<'src, W: Write> TerminalEmitter<'src, W> {
    /// * `mode` - Color mode selection
    /// * `is_tty` - Whether output is a TTY (used for `ColorMode::Auto`)
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
            file_path: None,
        }
    }

    /// Render labels against this source.
    #[must_use]
    pub fn with_source(mut self, source: &'src str) -> Self {
        self.source = Some(SourceView {
            text: source,
            lines: LineOffsetTable::build(source),
        });
        self
    }

    /// Path shown in `-->` locations.
    #[must_use]
    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Write text with optional ANSI color codes.
    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
            Severity::Help => colors::HELP,
        };
        self.write_colored(&severity.to_string(), color);
    }

    fn write_code(&mut self, code: &str) {
        if self.colors {
            let _ = write!(self.writer, "{}[{code}]{}", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, "[{code}]");
        }
    }

    fn write_label(&mut self, label: &Label) {
        let color = if label.is_primary {
            colors::ERROR
        } else {
            colors::SECONDARY
        };

        if self.source.is_none() {
            let marker = if label.is_primary { "-->" } else { "   " };
            let _ = write!(self.writer, "  {marker} {:?}: ", label.span);
            self.write_colored(&label.message, color);
            let _ = writeln!(self.writer);
            return;
        }
        let Some(view) = &self.source else {
            return;
        };

        let (line, col) = view.lines.offset_to_line_col(view.text, label.span.start);
        let line_text = view.lines.line_text(view.text, line);
        let gutter = line.to_string().len();
        let path = self.file_path.as_deref().unwrap_or("<document>");

        // Underline at least one column, and never past the end of the line.
        let line_chars = line_text.chars().count();
        let start_col = (col as usize).saturating_sub(1);
        let span_chars = view
            .text
            .get(label.span.start as usize..label.span.end as usize)
            .map_or(0, |s| s.chars().take_while(|c| *c != '\n').count());
        let width = span_chars.clamp(1, line_chars.saturating_sub(start_col).max(1));
        let mark = if label.is_primary { "^" } else { "-" };
        let underline = mark.repeat(width);

        let _ = writeln!(
            self.writer,
            "{:gutter$}--> {path}:{line}:{col}",
            "",
            gutter = gutter + 1
        );
        let _ = writeln!(self.writer, "{:gutter$} |", "");
        let _ = writeln!(self.writer, "{line} | {line_text}");
        let _ = write!(self.writer, "{:gutter$} | {:start_col$}", "", "");
        self.write_colored(&underline, color);
        if !label.message.is_empty() {
            let _ = write!(self.writer, " ");
            self.write_colored(&label.message, color);
        }
        let _ = writeln!(self.writer);
    }
}

impl<W: Write> TerminalEmitter<'static, W> {
    /// Plain emitter writing to `writer` with no attached source.
    pub fn plain(writer: W) -> Self {
        TerminalEmitter::with_color_mode(writer, ColorMode::Never, false)
    }
}

impl TerminalEmitter<'static, io::Stderr> {
    /// * `is_tty` - Whether stderr is a TTY (used for `ColorMode::Auto`)
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: severity[CODE]: message
        self.write_severity(diagnostic.severity);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        for label in &diagnostic.labels {
            self.write_label(label);
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            if self.colors {
                let _ = write!(self.writer, "{}note{}", colors::BOLD, colors::RESET);
            } else {
                let _ = write!(self.writer, "note");
            }
            let _ = writeln!(self.writer, ": {note}");
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count == 0 && warning_count == 0 {
            return;
        }

        if error_count > 0 {
            self.write_colored("error", colors::ERROR);
            let _ = write!(
                self.writer,
                ": document has {error_count} fault{}",
                plural_s(error_count)
            );
            if warning_count > 0 {
                let _ = write!(
                    self.writer,
                    "; {warning_count} warning{} emitted",
                    plural_s(warning_count)
                );
            }
            let _ = writeln!(self.writer);
        } else {
            self.write_colored("warning", colors::WARNING);
            let _ = writeln!(
                self.writer,
                ": {warning_count} warning{} emitted",
                plural_s(warning_count)
            );
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
