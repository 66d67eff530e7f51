use loom_layout::{Measure, Measurer, SpaceConfig};
use unicode_segmentation::UnicodeSegmentation;

/// Measures text on a monospace grid: every grapheme cluster takes one
/// column and every word one row.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Monospace {
    space: SpaceConfig,
}

impl Monospace {
    /// Creates a metric whose spaces are one column wide at rest, with the
    /// given elasticity.
    pub fn new(space: SpaceConfig) -> Self {
        Self { space }
    }
}

impl Measurer for Monospace {
    fn word(&self, text: &str) -> Measure {
        Measure::word(columns(text) as f64, 1.0)
    }

    fn space(&self, scale: f64) -> Measure {
        self.space.measure(scale)
    }
}

/// The number of columns a piece of text takes.
pub fn columns(text: &str) -> usize {
    text.graphemes(true).count()
}
