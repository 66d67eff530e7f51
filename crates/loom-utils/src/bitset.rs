use std::fmt::{self, Debug, Formatter};

use thin_vec::ThinVec;

/// The number of bits per chunk.
const BITS: usize = u64::BITS as usize;

/// A set of small bit indices, used to record which optional segments a line
/// includes.
///
/// Indices `< 64` are stored inline. Larger indices spill into a heap
/// allocated tail, so a line may contain any number of branches while the
/// common case stays allocation-free.
#[derive(Default, Clone, PartialEq, Eq, Hash)]
pub struct PathBits {
    /// Bits `0..64`.
    low: u64,
    /// Bits `64..`, one chunk per 64 indices. Never has trailing zero chunks.
    hi: ThinVec<u64>,
}

impl PathBits {
    /// Creates a new empty set.
    pub const fn new() -> Self {
        Self { low: 0, hi: ThinVec::new() }
    }

    /// Inserts an index into the set.
    pub fn insert(&mut self, index: usize) {
        if index < BITS {
            self.low |= 1 << index;
            return;
        }

        let chunk = index / BITS - 1;
        let within = index % BITS;
        if chunk >= self.hi.len() {
            self.hi.resize(chunk + 1, 0);
        }
        self.hi[chunk] |= 1 << within;
    }

    /// Returns a copy of the set with the index inserted.
    pub fn with(&self, index: usize) -> Self {
        let mut copy = self.clone();
        copy.insert(index);
        copy
    }

    /// Whether an index is present in the set.
    pub fn contains(&self, index: usize) -> bool {
        if index < BITS {
            return (self.low & (1 << index)) != 0;
        }

        let chunk = index / BITS - 1;
        let within = index % BITS;
        let Some(bits) = self.hi.get(chunk) else { return false };
        (bits & (1 << within)) != 0
    }

    /// Whether no index is present.
    pub fn is_empty(&self) -> bool {
        self.low == 0 && self.hi.is_empty()
    }

    /// Iterates over the present indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::once(self.low)
            .chain(self.hi.iter().copied())
            .enumerate()
            .flat_map(|(chunk, bits)| {
                (0..BITS)
                    .filter(move |within| bits & (1 << within) != 0)
                    .map(move |within| chunk * BITS + within)
            })
    }
}

impl Debug for PathBits {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_bits() {
        let mut set = PathBits::new();
        assert!(set.is_empty());
        assert!(!set.contains(0));
        assert!(!set.contains(5));
        set.insert(0);
        set.insert(1);
        set.insert(5);
        set.insert(64);
        set.insert(105);
        set.insert(208);
        assert!(!set.is_empty());
        assert!(set.contains(0));
        assert!(set.contains(1));
        assert!(!set.contains(2));
        assert!(set.contains(5));
        assert!(!set.contains(63));
        assert!(set.contains(64));
        assert!(!set.contains(65));
        assert!(!set.contains(104));
        assert!(set.contains(105));
        assert!(!set.contains(106));
        assert!(set.contains(208));
        assert!(!set.contains(209));
        assert_eq!(format!("{set:?}"), "[0, 1, 5, 64, 105, 208]");
    }

    #[test]
    fn test_path_bits_with_leaves_receiver_untouched() {
        let base = PathBits::new().with(3);
        let extended = base.with(70);
        assert!(!base.contains(70));
        assert!(extended.contains(3));
        assert!(extended.contains(70));
        assert_ne!(base, extended);
        assert_eq!(base, PathBits::new().with(3));
    }
}
