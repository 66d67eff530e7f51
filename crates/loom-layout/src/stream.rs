use std::fmt::{self, Debug, Display, Formatter};
use std::ops::Deref;
use std::sync::Arc;

use ecow::EcoString;
use serde::{Deserialize, Serialize};

use crate::diag::{StrResult, bail};

/// One element of a token stream.
///
/// Optional content is encoded inline: a [`BranchEntry`](Self::BranchEntry)
/// is followed by the optional items, closed by a
/// [`BranchExit`](Self::BranchExit), which is followed by the items used when
/// the option is not taken. Both sides join afterwards:
///
/// ```text
/// normal items
/// BranchEntry(3)
///   optional item 1
///   optional item 2
/// BranchExit(1)
///   default item 1
/// both sides joined here
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Item {
    /// An atomic run of glyphs.
    Word { text: EcoString },
    /// Inter-word glue, optionally a candidate break position. Its measure
    /// is the baseline space scaled by `scale`.
    Space { breaking: bool, scale: f64 },
    /// A mandatory break. With `fill`, the line is set as if it were full.
    Linebreak { fill: bool },
    /// Starts an optional segment. Not taking it continues at `skip + 1`
    /// items after this one.
    BranchEntry { skip: usize },
    /// Ends an optional segment. Always continues at `skip + 1` items after
    /// this one, rejoining the stream behind the default content.
    BranchExit { skip: usize },
}

impl Item {
    /// A word.
    pub fn word(text: impl Into<EcoString>) -> Self {
        Self::Word { text: text.into() }
    }

    /// A breaking space of normal width.
    pub fn space() -> Self {
        Self::Space { breaking: true, scale: 1.0 }
    }

    /// A non-breaking space of normal width.
    pub fn nbsp() -> Self {
        Self::Space { breaking: false, scale: 1.0 }
    }

    /// A plain mandatory break.
    pub fn linebreak() -> Self {
        Self::Linebreak { fill: false }
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Word { text } => f.write_str(text),
            Self::Space { breaking: true, .. } => f.write_str("␣"),
            Self::Space { breaking: false, .. } => f.write_str("~"),
            Self::Linebreak { fill: false } => f.write_str("␤"),
            Self::Linebreak { fill: true } => f.write_str("␤⁺"),
            Self::BranchEntry { skip } => write!(f, "[{skip}"),
            Self::BranchExit { skip } => write!(f, "|{skip}]"),
        }
    }
}

/// A validated, immutable token stream.
///
/// Every skip length in the stream points at or before its end, so the
/// layout passes can jump around without bounds checks failing. Cloning is
/// cheap.
#[derive(Clone, PartialEq)]
pub struct Stream(Arc<[Item]>);

impl Stream {
    /// Validates the items and creates a stream from them.
    pub fn new(items: impl Into<Vec<Item>>) -> StrResult<Self> {
        let items = items.into();
        validate(&items)?;
        Ok(Self(items.into()))
    }

    /// The items of the stream.
    pub fn items(&self) -> &[Item] {
        &self.0
    }

    /// Whether the stream ends in a mandatory break, which guarantees that
    /// a layout of it ends with a complete last line.
    pub fn is_terminated(&self) -> bool {
        matches!(self.0.last(), Some(Item::Linebreak { .. }))
    }
}

impl Deref for Stream {
    type Target = [Item];

    fn deref(&self) -> &[Item] {
        &self.0
    }
}

impl Debug for Stream {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("Stream(")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            Display::fmt(item, f)?;
        }
        f.write_str(")")
    }
}

impl Serialize for Stream {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Stream {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<Item>::deserialize(deserializer)?;
        Self::new(items).map_err(serde::de::Error::custom)
    }
}

/// Checks that all jumps stay within the stream.
fn validate(items: &[Item]) -> StrResult<()> {
    let len = items.len();
    for (i, item) in items.iter().enumerate() {
        match *item {
            Item::BranchEntry { skip } if i + skip + 1 > len => {
                bail!(
                    "branch entry at index {} skips {} items past the end of the stream",
                    i,
                    i + skip + 1 - len,
                );
            }
            Item::BranchExit { skip } if i + skip + 1 > len => {
                bail!(
                    "branch exit at index {} skips {} items past the end of the stream",
                    i,
                    i + skip + 1 - len,
                );
            }
            Item::Space { scale, .. } if !scale.is_finite() || scale < 0.0 => {
                bail!("space at index {} has invalid scale {}", i, scale);
            }
            _ => {}
        }
    }
    Ok(())
}
