use std::sync::Arc;

use parking_lot::Mutex;

use super::document::Document;
use crate::error::{Result, TrainerError};

/// Editor bound to a single document, owning the caret.
pub struct Editor {
    document: Arc<Document>,
    caret: Mutex<usize>,
}

impl Editor {
    pub fn new(document: Arc<Document>) -> Self {
        Self {
            document,
            caret: Mutex::new(0),
        }
    }

    pub fn document(&self) -> &Arc<Document> {
        &self.document
    }

    /// Current caret byte offset
    pub fn caret_offset(&self) -> usize {
        *self.caret.lock()
    }

    /// Move the caret to a byte offset
    pub fn move_caret(&self, offset: usize) -> Result<()> {
        let valid = self
            .document
            .with_text(|text| offset <= text.len() && text.is_char_boundary(offset));
        if !valid {
            return Err(TrainerError::Document(format!(
                "caret offset {offset} out of bounds"
            )));
        }
        *self.caret.lock() = offset;
        Ok(())
    }

    /// Move the caret to a 1-based (line, column) position
    pub fn move_caret_to_position(&self, line: usize, column: usize) -> Result<()> {
        let offset = self.position_to_offset(line, column)?;
        *self.caret.lock() = offset;
        Ok(())
    }

    /// First occurrence of `text`, searching from the document start.
    ///
    /// A plain, non-global, non-replacing search; `None` when absent.
    pub fn search_offset(&self, text: &str) -> Option<usize> {
        if text.is_empty() {
            return None;
        }
        self.document.with_text(|content| content.find(text))
    }

    fn position_to_offset(&self, line: usize, column: usize) -> Result<usize> {
        if line == 0 || column == 0 {
            return Err(TrainerError::Document(
                "line and column positions are 1-based".to_string(),
            ));
        }
        self.document.with_text(|text| {
            let mut current_line = 1;
            let mut line_start = 0;
            for (idx, ch) in text.char_indices() {
                if current_line == line {
                    break;
                }
                if ch == '\n' {
                    current_line += 1;
                    line_start = idx + 1;
                }
            }
            if current_line != line {
                return Err(TrainerError::Document(format!(
                    "line {line} past end of document"
                )));
            }
            let line_end = text[line_start..]
                .find('\n')
                .map_or(text.len(), |i| line_start + i);
            let offset = line_start + column - 1;
            if offset > line_end {
                return Err(TrainerError::Document(format!(
                    "column {column} past end of line {line}"
                )));
            }
            Ok(offset)
        })
    }
}
