use tower_lsp::lsp_types::*;

// ── Document ────────────────────────────────────────────────────────────────

/// Snapshot of a single open text document.
#[derive(Debug, Clone)]
pub struct Document {
    pub uri: Url,
    /// Language id announced by the client (`cpp`, `Log`, ...).
    pub language_id: String,
    /// Full source text (always kept up-to-date).
    pub text: String,
    /// Document version as reported by the client.
    pub version: i32,
    /// Pre-computed line start byte offsets (rebuilt on every mutation).
    line_offsets: Vec<usize>,
}

impl Document {
    pub fn new(
        uri: Url,
        language_id: String,
        text: String,
        version: i32,
    ) -> Self {
        let line_offsets = Self::compute_line_offsets(&text);
        Self {
            uri,
            language_id,
            text,
            version,
            line_offsets,
        }
    }

    // ── queries ─────────────────────────────────────────────────────────

    pub fn line_count(&self) -> usize {
        self.line_offsets.len()
    }

    /// Convert an LSP `Position` (line/character, 0-based) to a byte offset.
    /// Columns past the end of a line clamp to the line end.
    pub fn offset_of(
        &self,
        pos: Position,
    ) -> Option<usize> {
        let line = pos.line as usize;
        let line_start = *self.line_offsets.get(line)?;
        let line_end = self.line_offsets.get(line + 1).map_or(self.text.len(), |next| next - 1);
        let line_text = &self.text[line_start..line_end];

        // LSP character offsets are UTF-16 code-unit counts.
        let mut utf16_offset: u32 = 0;
        let mut byte_offset = line_start;
        for ch in line_text.chars() {
            if utf16_offset >= pos.character {
                break;
            }
            utf16_offset += ch.len_utf16() as u32;
            byte_offset += ch.len_utf8();
        }
        Some(byte_offset)
    }

    /// Convert a byte offset to an LSP `Position`.
    pub fn position_of(
        &self,
        offset: usize,
    ) -> Position {
        let offset = offset.min(self.text.len());
        let line = match self.line_offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(ins) => ins.saturating_sub(1),
        };
        let line_start = self.line_offsets[line];
        let character = self.text[line_start..offset].chars().map(|c| c.len_utf16() as u32).sum::<u32>();
        Position {
            line: line as u32,
            character,
        }
    }

    /// Text covered by `range`. Positions past the end clamp to the document end.
    pub fn text_in(
        &self,
        range: Range,
    ) -> &str {
        let clamp = |pos: Position| {
            if pos.line as usize >= self.line_count() {
                self.text.len()
            } else {
                self.offset_of(pos).unwrap_or(self.text.len())
            }
        };
        let start = clamp(range.start);
        let end = clamp(range.end).max(start);
        &self.text[start..end]
    }

    /// Position just past the last character.
    pub fn end_position(&self) -> Position {
        self.position_of(self.text.len())
    }

    // ── mutations ───────────────────────────────────────────────────────

    /// Replace the full content and bump version.
    pub fn set_content(
        &mut self,
        text: String,
        version: i32,
    ) {
        self.text = text;
        self.version = version;
        self.line_offsets = Self::compute_line_offsets(&self.text);
    }

    /// Apply a list of incremental or full-content changes and bump version.
    pub fn apply_changes(
        &mut self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) {
        for change in changes {
            if let Some(range) = change.range {
                if let (Some(start), Some(end)) = (self.offset_of(range.start), self.offset_of(range.end)) {
                    self.text.replace_range(start..end.max(start), &change.text);
                    self.line_offsets = Self::compute_line_offsets(&self.text);
                }
            } else {
                self.text = change.text;
                self.line_offsets = Self::compute_line_offsets(&self.text);
            }
        }
        self.version = version;
    }

    // ── internal helpers ────────────────────────────────────────────────

    fn compute_line_offsets(text: &str) -> Vec<usize> {
        let mut offsets = vec![0usize];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(i + 1);
            }
        }
        offsets
    }
}

#[cfg(test)]
#[path = "../../tests/src/document/text_document_tests.rs"]
mod tests;
