//! Documents and blocks.
//!
//! A block is a run of lines; one or more blank lines end it. Inside a
//! `{...}` group the closing brace also ends the current block. Blocks that
//! hold nothing but definitions are dropped.

use simark_eval::Context;
use simark_ir::{Entity, InvariantViolation};

use crate::Parser;

impl Parser<'_> {
    /// Parse the whole document into a nest of blocks.
    pub fn parse_document(&mut self, cx: &mut Context) -> Result<Entity, InvariantViolation> {
        Ok(Entity::Nest(self.parse_blocks(cx)?))
    }

    /// Blocks up to end of input, or up to the `}` closing the current group.
    pub(crate) fn parse_blocks(
        &mut self,
        cx: &mut Context,
    ) -> Result<Vec<Entity>, InvariantViolation> {
        let mut blocks = Vec::new();
        while let Some(block) = self.parse_next_block(cx)? {
            blocks.push(block);
        }
        Ok(blocks)
    }

    /// The next block with content, or `None` once the block list ends.
    ///
    /// Bindings made in one block are visible to the next, so callers that
    /// stop early must not skip ahead.
    pub fn parse_next_block(
        &mut self,
        cx: &mut Context,
    ) -> Result<Option<Entity>, InvariantViolation> {
        loop {
            self.skip_blank_lines();
            if self.at_block_list_end() {
                return Ok(None);
            }
            let start = self.reader.position();
            let lines = self.parse_block_lines(cx)?;
            if self.reader.position() == start {
                return Err(InvariantViolation::LineLoopStalled { position: start });
            }
            if !lines.is_empty() {
                return Ok(Some(Entity::Block(lines)));
            }
        }
    }

    fn parse_block_lines(&mut self, cx: &mut Context) -> Result<Vec<Entity>, InvariantViolation> {
        let mut lines = Vec::new();
        while !self.at_block_list_end() && !self.blank_line_ahead() {
            let start = self.reader.position();
            if let Some(line) = self.parse_line(cx)? {
                lines.push(line);
            }
            if self.reader.position() == start {
                return Err(InvariantViolation::LineLoopStalled { position: start });
            }
        }
        Ok(lines)
    }

    fn at_block_list_end(&self) -> bool {
        match self.reader.peek() {
            None => true,
            Some(c) => self.context.closes(c),
        }
    }

    /// Whether only whitespace remains before the end of this line.
    fn blank_line_ahead(&self) -> bool {
        let mut probe = self.reader.clone();
        probe.skip_inline_space();
        match probe.peek() {
            None => true,
            Some(c) => probe.at_newline() || self.context.closes(c),
        }
    }

    /// Consume blank lines, and trailing whitespace before the end of the
    /// block list.
    fn skip_blank_lines(&mut self) {
        loop {
            let mut probe = self.reader.clone();
            probe.skip_inline_space();
            if probe.eat_newline() {
                self.reader = probe;
                continue;
            }
            let ends = match probe.peek() {
                None => true,
                Some(c) => self.context.closes(c),
            };
            if ends {
                self.reader = probe;
            }
            return;
        }
    }
}
