use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use ropey::{Rope, RopeSlice};
use serde::{Deserialize, Serialize};

use crate::{error::SnippetError, host::InsertionTarget};

/// Zero-based line and column of a cursor. Columns count characters, not bytes.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Eq, PartialEq, Default)]
pub struct CursorPosition {
    pub line: usize,
    pub column: usize,
}

impl CursorPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// An editable text buffer with a single cursor
#[derive(Debug, Clone)]
pub struct Document {
    path: Option<PathBuf>,
    rope: Rope,
    cursor: usize,
    dirty: bool,
}

impl Document {
    pub fn from_text(text: &str) -> Self {
        Self {
            path: None,
            rope: Rope::from_str(text),
            cursor: 0,
            dirty: false,
        }
    }

    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let text = std::fs::read_to_string(&path)
            .map_err(|e| anyhow!("could not read {}: {e}", path.display()))?;
        Ok(Self {
            path: Some(path),
            ..Self::from_text(&text)
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Lines a cursor can be placed on, including the empty one after a trailing line break
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_cursor(&mut self, offset: usize) -> Result<(), SnippetError> {
        let len = self.len_chars();
        if offset > len {
            return Err(SnippetError::OffsetOutOfBounds { offset, len });
        }
        self.cursor = offset;
        Ok(())
    }

    pub fn with_cursor(mut self, offset: usize) -> Result<Self, SnippetError> {
        self.set_cursor(offset)?;
        Ok(self)
    }

    pub fn set_cursor_position(&mut self, position: CursorPosition) -> Result<(), SnippetError> {
        let offset = self.position_to_offset(position)?;
        self.cursor = offset;
        Ok(())
    }

    pub fn cursor_position(&self) -> CursorPosition {
        let line = self.rope.char_to_line(self.cursor);
        CursorPosition {
            line,
            column: self.cursor - self.rope.line_to_char(line),
        }
    }

    pub fn position_to_offset(&self, position: CursorPosition) -> Result<usize, SnippetError> {
        let CursorPosition { line, column } = position;
        let out_of_bounds = SnippetError::PositionOutOfBounds { line, column };

        // ropey counts an empty final line after a trailing newline
        if line >= self.rope.len_lines() {
            return Err(out_of_bounds);
        }

        if column > content_len(self.rope.line(line)) {
            return Err(out_of_bounds);
        }

        Ok(self.rope.line_to_char(line) + column)
    }

    /// Write the buffer back to the file it was opened from
    pub fn save(&mut self) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| anyhow!("document has no path to save to"))?;
        std::fs::write(path, self.text())?;
        self.dirty = false;
        Ok(())
    }
}

// the same set of breaks ropey splits lines on
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Characters in `line` before its terminator. `\r\n` is a single break.
fn content_len(line: RopeSlice) -> usize {
    let len = line.len_chars();
    let last = len.checked_sub(1).map(|i| line.char(i));
    let before_last = len.checked_sub(2).map(|i| line.char(i));
    match (before_last, last) {
        (Some('\r'), Some('\n')) => len - 2,
        (_, Some(c)) if is_line_break(c) => len - 1,
        _ => len,
    }
}

impl InsertionTarget for Document {
    fn cursor(&self) -> usize {
        self.cursor
    }

    fn insert_text(&mut self, offset: usize, text: &str) -> Result<(), SnippetError> {
        let len = self.len_chars();
        if offset > len {
            return Err(SnippetError::OffsetOutOfBounds { offset, len });
        }
        self.rope.insert(offset, text);
        self.dirty = true;
        Ok(())
    }
}
