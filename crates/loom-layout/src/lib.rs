//! Loom's line breaker.
//!
//! Sets a paragraph, given as a flat [token stream](Stream), into justified
//! lines of a fixed width. Spaces between words can shrink and stretch, and
//! the breaker picks the set of line breaks that minimizes the total squared
//! deviation from their natural widths. Alternative renditions of content,
//! like hyphenated and unhyphenated forms of a word, are encoded as
//! [branches](Item::BranchEntry) that each line may independently take or
//! skip.
//!
//! ```
//! # use loom_layout::{FnMeasurer, Measure, SpaceConfig, StreamBuilder, layout};
//! let mut builder = StreamBuilder::new();
//! builder.text("the quick brown fox");
//! let stream = builder.finish().unwrap();
//!
//! let measurer = FnMeasurer::new(
//!     |text: &str| Measure::word(text.len() as f64, 1.0),
//!     |scale| SpaceConfig::default().measure(scale),
//! );
//!
//! let lines = layout(&stream, 10.0, &measurer);
//! assert_eq!(lines.len(), 2);
//! ```

pub mod diag;

mod builder;
mod finalize;
mod glue;
mod line;
mod linebreak;
mod measure;
mod measurer;
mod place;
mod prepare;
mod stream;

pub use self::builder::{Atom, Branches, StreamBuilder};
pub use self::glue::Glue;
pub use self::line::{Line, Word};
pub use self::linebreak::{Break, Breaks};
pub use self::measure::Measure;
pub use self::measurer::{FnMeasurer, MeasureCache, Measurer, SpaceConfig};
pub use self::place::{Surface, place};
pub use self::stream::{Item, Stream};

use serde::Serialize;

use self::finalize::finalize;
use self::linebreak::linebreak;
use self::prepare::prepare;

/// Lays out a stream at the given width.
///
/// Returns the lines in order. Content after the last admissible break is
/// not part of any line, so the result is empty if no line can be completed.
pub fn layout(stream: &Stream, width: f64, measurer: &impl Measurer) -> Vec<Line> {
    Layouter::new(measurer).layout(stream, width).lines
}

/// Lays out streams with a fixed measurer.
///
/// Keeping a layouter around is useful to lay out the same content at
/// different widths, in particular with a [`MeasureCache`].
#[derive(Debug, Clone)]
pub struct Layouter<M> {
    measurer: M,
}

impl<M: Measurer> Layouter<M> {
    /// Creates a layouter that measures with `measurer`.
    pub fn new(measurer: M) -> Self {
        Self { measurer }
    }

    /// The measurer in use.
    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Lays out a stream at the given width.
    #[tracing::instrument(skip_all, fields(width = width))]
    pub fn layout(&self, stream: &Stream, width: f64) -> Paragraph {
        tracing::debug!(items = stream.len(), "laying out paragraph");
        let p = prepare(stream, width, &self.measurer);
        let breaks = linebreak(&p);
        let lines = finalize(&p, &breaks);
        Paragraph { breaks, lines }
    }
}

/// A laid out paragraph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    /// How the stream was broken.
    pub breaks: Breaks,
    /// The positioned lines, one per break.
    pub lines: Vec<Line>,
}

impl Paragraph {
    /// The total score of the layout. Higher is better, zero is perfect.
    pub fn score(&self) -> f64 {
        self.breaks.score()
    }

    /// The index of the first item that is not on any line.
    ///
    /// This is the length of the stream unless a word too wide for the line
    /// made the remaining breaks unreachable.
    pub fn end(&self) -> usize {
        self.breaks.last().map_or(0, |b| b.end + 1)
    }
}
