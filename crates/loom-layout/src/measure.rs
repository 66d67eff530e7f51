use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use serde::{Deserialize, Serialize};

/// The elastic footprint of a run of inline content.
///
/// A measure describes how narrow (`shrink`), how wide at rest (`width`) and
/// how wide at most (`stretch`) a run can be set, plus the tallest box in it.
/// Well-formed word and space measures satisfy `shrink <= width <= stretch`.
/// This is not validated: measures come from the caller's measurement
/// callbacks.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    /// The smallest width the run can be compressed to.
    pub shrink: f64,
    /// The natural width of the run.
    pub width: f64,
    /// The largest width the run can be expanded to.
    pub stretch: f64,
    /// The height of the tallest box in the run.
    pub height: f64,
}

impl Measure {
    /// The empty measure.
    pub const fn zero() -> Self {
        Self { shrink: 0.0, width: 0.0, stretch: 0.0, height: 0.0 }
    }

    /// A rigid box of the given width that can neither shrink nor stretch.
    pub const fn fixed(width: f64) -> Self {
        Self::word(width, 0.0)
    }

    /// The measure of a rigid box with a height, such as a word.
    pub const fn word(width: f64, height: f64) -> Self {
        Self { shrink: width, width, stretch: width, height }
    }

    /// Whether this is the empty measure.
    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// The position along the run for a justification factor.
    ///
    /// `factor = -1` yields `shrink`, `factor = 0` yields `width` and
    /// `factor = +1` yields `stretch`. Factors in between interpolate linearly
    /// on the respective side of the natural width.
    pub fn at(&self, factor: f64) -> f64 {
        let span = if factor < 0.0 {
            self.width - self.shrink
        } else {
            self.stretch - self.width
        };
        span * factor + self.width
    }

    /// The justification factor that sets this run to exactly `width`, or
    /// `None` if the run cannot be compressed far enough.
    ///
    /// An exact natural fit counts as fully stretched (`1.0`). So does a run
    /// that would need to stretch but has no stretchability at all: such a line
    /// is set at its natural width and left underfull.
    pub fn factor(&self, width: f64) -> Option<f64> {
        if width < self.shrink {
            return None;
        }

        if width == self.width {
            return Some(1.0);
        }

        // delta > 0 => stretch, delta < 0 => shrink
        let delta = width - self.width;
        let diff = if delta >= 0.0 {
            self.stretch - self.width
        } else {
            // Non-zero: `width < self.width` and `width >= self.shrink`.
            self.width - self.shrink
        };

        if diff == 0.0 {
            return Some(1.0);
        }

        Some(delta / diff)
    }

    /// Forces the run to appear full at `width`.
    ///
    /// If the run cannot stretch to `width`, its stretch is raised to it, and
    /// so is its natural width if that is smaller.
    pub fn fill(&mut self, width: f64) {
        if width > self.stretch {
            self.stretch = width;
            if width > self.width {
                self.width = width;
            }
        }
    }
}

impl Add for Measure {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for Measure {
    fn add_assign(&mut self, rhs: Self) {
        self.shrink += rhs.shrink;
        self.width += rhs.width;
        self.stretch += rhs.stretch;
        self.height = self.height.max(rhs.height);
    }
}

impl Mul<f64> for Measure {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        Self {
            shrink: self.shrink * factor,
            width: self.width * factor,
            stretch: self.stretch * factor,
            height: self.height,
        }
    }
}

impl Sum for Measure {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}
