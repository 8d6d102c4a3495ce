//! Text statistics computed by the analysis pipeline.

use serde::{Deserialize, Serialize};

/// Paragraph, word, and character counts for one text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextStats {
    /// Non-blank `\n`-delimited lines.
    pub paragraphs: usize,
    /// Maximal whitespace-delimited tokens.
    pub words: usize,
    /// Characters (Unicode scalar values), not bytes.
    pub symbols: usize,
}

impl TextStats {
    /// Compute all three statistics for `text`.
    pub fn compute(text: &str) -> Self {
        Self {
            paragraphs: count_paragraphs(text),
            words: count_words(text),
            symbols: count_symbols(text),
        }
    }
}

/// Count lines that are non-empty after trimming.
pub fn count_paragraphs(text: &str) -> usize {
    text.split('\n').filter(|line| !line.trim().is_empty()).count()
}

/// Count whitespace-separated tokens; blank text has zero words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Count characters.
pub fn count_symbols(text: &str) -> usize {
    text.chars().count()
}
