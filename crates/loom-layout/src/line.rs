use ecow::EcoString;
use serde::{Deserialize, Serialize};

/// A finished line: positioned words and the line's height.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// The height of the tallest word on the line.
    pub height: f64,
    /// The words on the line, from left to right.
    pub words: Vec<Word>,
}

impl Line {
    /// The right edge of the last word, given its measured width.
    ///
    /// Returns zero for a line without words.
    pub fn extent(&self, width_of: impl Fn(&str) -> f64) -> f64 {
        self.words.last().map_or(0.0, |word| word.x + width_of(&word.text))
    }
}

/// A word placed on a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// The text of the word.
    pub text: EcoString,
    /// The horizontal offset of the word's left edge from the line start.
    pub x: f64,
}
