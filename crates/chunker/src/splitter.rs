use crate::config::ChunkerConfig;
use crate::error::{ChunkerError, Result};

/// Characters that end a sentence for the purposes of boundary detection.
const SENTENCE_TERMINALS: [char; 6] = ['.', '!', '?', '。', '！', '？'];

/// How far back from the window edge the sentence backscan may reach.
const SENTENCE_LOOKBACK: usize = 100;

/// How far back the whitespace fallback backscan may reach.
const WHITESPACE_LOOKBACK: usize = 50;

/// Deterministic sliding-window splitter with boundary-aware cuts.
pub struct TextSplitter {
    config: ChunkerConfig,
}

impl TextSplitter {
    /// Create a new splitter, rejecting configurations where the overlap
    /// would swallow the whole window.
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        config.validate().map_err(ChunkerError::InvalidConfig)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Split `text` into an ordered sequence of overlapping chunks.
    ///
    /// Each window is at most `chunk_size` characters. Before cutting, the
    /// splitter scans backward for a sentence terminal (within the last
    /// `SENTENCE_LOOKBACK` characters), then for whitespace (within the
    /// last `WHITESPACE_LOOKBACK`), and otherwise cuts at the raw window
    /// edge, which may land mid-word. The next window starts `chunk_overlap`
    /// characters before the cut, except after the final cut at end-of-text.
    ///
    /// Emitted chunks are trimmed; chunks that are empty after trimming are
    /// dropped. Empty input yields an empty sequence.
    pub fn split(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        let total = chars.len();
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < total {
            let mut end = start + self.config.chunk_size;
            if end < total {
                end = boundary_cut(&chars, start, end);
            }

            let upper = end.min(total);
            let window: String = chars[start..upper].iter().collect();
            let trimmed = window.trim();
            if !trimmed.is_empty() {
                chunks.push(trimmed.to_string());
            }

            let next = if end < total {
                end.saturating_sub(self.config.chunk_overlap)
            } else {
                end
            };
            // The window must always move forward, even if a boundary cut
            // landed within `chunk_overlap` characters of `start`.
            start = next.max(start + 1);
        }

        log::trace!("Split {} characters into {} chunks", total, chunks.len());
        chunks
    }
}

/// Pick the cut position for a window ending at `end`.
///
/// Only called while `end` is strictly inside the text; a sentence terminal
/// cut includes the terminal, a whitespace cut excludes the whitespace.
fn boundary_cut(chars: &[char], start: usize, end: usize) -> usize {
    let sentence_floor = end.saturating_sub(SENTENCE_LOOKBACK).max(start);
    for i in (sentence_floor + 1..=end).rev() {
        if SENTENCE_TERMINALS.contains(&chars[i]) && i + 1 < chars.len() {
            return i + 1;
        }
    }

    let whitespace_floor = end.saturating_sub(WHITESPACE_LOOKBACK).max(start);
    for i in (whitespace_floor + 1..=end).rev() {
        if chars[i] == ' ' || chars[i] == '\n' {
            return i;
        }
    }

    end
}
