use std::cell::RefCell;

use ecow::EcoString;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::measure::Measure;

/// Measures the content of a token stream.
///
/// Both methods must be deterministic for the duration of a layout pass:
/// the same word or scale must always yield the same measure.
pub trait Measurer {
    /// The measure of a word.
    fn word(&self, text: &str) -> Measure;

    /// The measure of a space scaled by `scale`.
    fn space(&self, scale: f64) -> Measure;
}

impl<M: Measurer + ?Sized> Measurer for &M {
    fn word(&self, text: &str) -> Measure {
        (**self).word(text)
    }

    fn space(&self, scale: f64) -> Measure {
        (**self).space(scale)
    }
}

/// A [`Measurer`] made from a pair of closures.
#[derive(Debug, Copy, Clone)]
pub struct FnMeasurer<W, S> {
    pub word: W,
    pub space: S,
}

impl<W, S> FnMeasurer<W, S>
where
    W: Fn(&str) -> Measure,
    S: Fn(f64) -> Measure,
{
    /// Creates a measurer from a word and a space measurement function.
    pub fn new(word: W, space: S) -> Self {
        Self { word, space }
    }
}

impl<W, S> Measurer for FnMeasurer<W, S>
where
    W: Fn(&str) -> Measure,
    S: Fn(f64) -> Measure,
{
    fn word(&self, text: &str) -> Measure {
        (self.word)(text)
    }

    fn space(&self, scale: f64) -> Measure {
        (self.space)(scale)
    }
}

/// How elastic inter-word spaces are, relative to a baseline space width.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceConfig {
    /// Ratio of the baseline to which a space may shrink.
    pub shrink: f64,
    /// Ratio of the baseline a space takes at rest.
    pub width: f64,
    /// Ratio of the baseline to which a space may stretch.
    pub stretch: f64,
}

impl SpaceConfig {
    /// The measure of a space of the given baseline width.
    pub fn measure(&self, baseline: f64) -> Measure {
        Measure { shrink: self.shrink, width: self.width, stretch: self.stretch, height: 0.0 }
            * baseline
    }
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self { shrink: 0.5, width: 1.0, stretch: 2.0 }
    }
}

/// Memoizes the word measures of another [`Measurer`] by text.
///
/// Spaces are cheap to compute and pass through. The cache can be kept
/// across layout passes as long as the wrapped measurer's configuration does
/// not change; call [`clear`](Self::clear) otherwise.
#[derive(Debug)]
pub struct MeasureCache<M> {
    inner: M,
    words: RefCell<FxHashMap<EcoString, Measure>>,
}

impl<M: Measurer> MeasureCache<M> {
    /// Wraps a measurer with an empty cache.
    pub fn new(inner: M) -> Self {
        Self { inner, words: RefCell::new(FxHashMap::default()) }
    }

    /// The number of cached words.
    pub fn len(&self) -> usize {
        self.words.borrow().len()
    }

    /// Whether no word is cached.
    pub fn is_empty(&self) -> bool {
        self.words.borrow().is_empty()
    }

    /// Forgets all cached measures.
    pub fn clear(&self) {
        self.words.borrow_mut().clear();
    }
}

impl<M: Measurer> Measurer for MeasureCache<M> {
    fn word(&self, text: &str) -> Measure {
        if let Some(&measure) = self.words.borrow().get(text) {
            return measure;
        }

        let measure = self.inner.word(text);
        self.words.borrow_mut().insert(text.into(), measure);
        measure
    }

    fn space(&self, scale: f64) -> Measure {
        self.inner.space(scale)
    }
}
