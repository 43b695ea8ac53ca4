//! Line and column lookup for spans.
//!
//! [`LineOffsetTable`] pre-computes line starts once per document so each
//! diagnostic costs a binary search instead of a scan.

use simark_ir::Span;

/// Byte offsets of every line start.
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// offsets[0] = 0, offsets[n] = byte after the n-th `\n`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based (line, column), the column counted in characters.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self.line_start(line);
        let end = (offset as usize).min(source.len());
        let col_chars = source.get(line_start..end).map_or(0, |s| s.chars().count());
        let col = u32::try_from(col_chars).unwrap_or(u32::MAX - 1) + 1;
        (line, col)
    }

    /// Text of a 1-based line, without its terminator.
    pub fn line_text<'a>(&self, source: &'a str, line: u32) -> &'a str {
        let start = self.line_start(line);
        let rest = source.get(start..).unwrap_or("");
        let text = rest.split('\n').next().unwrap_or("");
        text.strip_suffix('\r').unwrap_or(text)
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }

    fn line_start(&self, line: u32) -> usize {
        let idx = line.saturating_sub(1) as usize;
        self.offsets.get(idx).copied().unwrap_or(0) as usize
    }
}

/// 1-based (line, column) of a span's start.
///
/// For repeated lookups build a [`LineOffsetTable`] instead.
pub fn span_to_line_col(source: &str, span: Span) -> (u32, u32) {
    LineOffsetTable::build(source).offset_to_line_col(source, span.start)
}
