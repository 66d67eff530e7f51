use std::fmt::{self, Display, Formatter};
use std::ops::{BitOr, BitOrAssign};

use crate::stream::Item;

/// The glue requested between two pieces of content.
///
/// Both neighbours of a gap may ask for glue; the requests are combined
/// with `|` and the result is written to the stream once the right
/// neighbour arrives.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub enum Glue {
    /// No glue at all. Glues the neighbours together.
    #[default]
    None,
    /// A space, optionally allowing a break.
    Space { breaking: bool, scale: f64 },
    /// A mandatory break.
    Newline { fill: bool },
}

impl Glue {
    /// A breaking space.
    pub fn space() -> Self {
        Self::Space { breaking: true, scale: 1.0 }
    }

    /// A non-breaking space.
    pub fn nbspace() -> Self {
        Self::Space { breaking: false, scale: 1.0 }
    }

    /// A mandatory break.
    pub fn newline() -> Self {
        Self::Newline { fill: false }
    }

    /// A mandatory break that sets its line as if it were full.
    pub fn hfill() -> Self {
        Self::Newline { fill: true }
    }

    /// The stream item this glue turns into, if any.
    pub fn item(self) -> Option<Item> {
        match self {
            Self::None => None,
            Self::Space { breaking, scale } => Some(Item::Space { breaking, scale }),
            Self::Newline { fill } => Some(Item::Linebreak { fill }),
        }
    }
}

impl BitOr for Glue {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        use Glue::*;

        match (self, rhs) {
            // Nothing wins over anything else.
            (None, _) | (_, None) => None,

            // Contradictory: keep the break, content must not run off the line.
            (Space { breaking: false, .. }, Newline { fill })
            | (Newline { fill }, Space { breaking: false, .. }) => {
                tracing::warn!("newline requested next to a non-breaking space");
                Newline { fill }
            }

            // Newlines win over breaking spaces.
            (Newline { fill }, Space { breaking: true, .. })
            | (Space { breaking: true, .. }, Newline { fill }) => Newline { fill },

            (Newline { fill: a }, Newline { fill: b }) => Newline { fill: a | b },

            // Non-breaking wins over breaking, the wider space wins.
            (Space { breaking: a, scale: x }, Space { breaking: b, scale: y }) => {
                Space { breaking: a && b, scale: x.max(y) }
            }
        }
    }
}

impl BitOrAssign for Glue {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl Display for Glue {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.item() {
            Some(item) => item.fmt(f),
            None => Ok(()),
        }
    }
}
