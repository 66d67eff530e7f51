use std::ops::Deref;

use loom_utils::PathBits;
use serde::Serialize;

use crate::measure::Measure;
use crate::prepare::Preparation;
use crate::stream::Item;

/// A chosen line, as determined by line breaking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Break {
    /// The index of the line's first item.
    pub start: usize,
    /// The index of the item the line breaks at. The line ends before it.
    pub end: usize,
    /// Which branches encountered on the line are taken, by their order of
    /// appearance on the line.
    #[serde(serialize_with = "serialize_path")]
    pub path: PathBits,
    /// How much the line is stretched (positive) or shrunk (negative).
    pub factor: f64,
    /// The total score of the paragraph up to and including this line.
    pub score: f64,
}

/// The chosen lines of a paragraph, in order.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Breaks(Vec<Break>);

impl Breaks {
    /// The total score of the layout. Higher is better, zero is perfect.
    pub fn score(&self) -> f64 {
        self.0.last().map_or(0.0, |b| b.score)
    }
}

impl Deref for Breaks {
    type Target = [Break];

    fn deref(&self) -> &[Break] {
        &self.0
    }
}

/// The best known way to reach a break position.
#[derive(Debug, Clone)]
struct Node {
    /// The position the line ending here starts at.
    prev: usize,
    /// Which branches that line takes.
    path: PathBits,
    factor: f64,
    /// The score of the best paragraph ending here.
    score: f64,
}

impl Node {
    /// The node at the start of the paragraph.
    fn start() -> Self {
        Self { prev: 0, path: PathBits::new(), factor: 0.0, score: 0.0 }
    }
}

/// The state of a scan for the ends of lines starting at `begin`.
#[derive(Clone)]
struct Scan {
    /// Accumulated since `begin`.
    measure: Measure,
    /// One bit for each branch taken so far on this line.
    path: PathBits,
    /// Where the line begins.
    begin: usize,
    /// The next item to look at.
    pos: usize,
    /// The score of the paragraph up to `begin`.
    score: f64,
    /// The number of branches encountered so far on this line.
    branches: usize,
}

impl Scan {
    fn new(begin: usize, score: f64) -> Self {
        Self {
            measure: Measure::zero(),
            path: PathBits::new(),
            begin,
            pos: begin,
            score,
            branches: 0,
        }
    }
}

/// Breaks the prepared paragraph into lines.
///
/// Every line scores minus the square of its justification factor and the
/// layout with the highest total score wins. Lines without content score
/// negative infinity. This uses dynamic programming:
/// each break position keeps the single best line ending there, and lines are
/// only started at positions that were reached by an earlier line.
///
/// Returns no breaks if no line can be completed, e.g. because the stream
/// does not end in a mandatory break and nothing fits.
#[tracing::instrument(skip_all, fields(items = p.items.len(), width = p.width))]
pub fn linebreak(p: &Preparation) -> Breaks {
    let limit = p.items.len();
    let mut nodes: Vec<Option<Node>> = vec![None; limit + 1];
    nodes[0] = Some(Node::start());

    // The furthest position any line could be ended at.
    let mut last = 0;
    for start in 0..limit {
        let Some(score) = nodes[start].as_ref().map(|node| node.score) else { continue };
        last = last.max(complete_line(p, &mut nodes, Scan::new(start, score)));
    }

    if last == 0 {
        tracing::debug!("no line could be completed");
        return Breaks::default();
    }

    // Retrace the best path.
    let mut breaks = vec![];
    while last > 0 {
        let Some(node) = nodes[last].take() else {
            unreachable!("break at {last} has no node");
        };
        breaks.push(Break {
            start: node.prev,
            end: last - 1,
            path: node.path,
            factor: node.factor,
            score: node.score,
        });
        last = node.prev;
    }

    breaks.reverse();
    tracing::debug!(lines = breaks.len(), "broke paragraph into lines");
    Breaks(breaks)
}

/// Scans forward from the beginning of a line, recording every admissible
/// line end it passes.
///
/// Both sides of a branch are explored: the taken side recursively, the
/// skipped side by continuing the scan. Returns the furthest position at which
/// a line could be ended, or `c.begin` if there is none.
fn complete_line(p: &Preparation, nodes: &mut [Option<Node>], mut c: Scan) -> usize {
    let mut last = c.begin;

    while c.pos < p.items.len() {
        let n = c.pos;
        match p.items[n] {
            Item::Word { .. } => c.measure += p.measures[n],
            Item::Space { breaking, .. } => {
                // The space is not part of the line ending before it.
                if breaking && relax(p, nodes, &c, n + 1) {
                    last = n + 1;
                }
                c.measure += p.measures[n];
            }
            Item::Linebreak { fill } => {
                if fill {
                    c.measure.fill(p.width);
                }
                if relax(p, nodes, &c, n + 1) {
                    last = n + 1;
                }
                return last;
            }
            Item::BranchEntry { skip } => {
                let taken = Scan {
                    pos: n + 1,
                    path: c.path.with(c.branches),
                    branches: c.branches + 1,
                    ..c.clone()
                };
                last = last.max(complete_line(p, nodes, taken));

                c.pos += skip;
                c.branches += 1;
            }
            Item::BranchExit { skip } => c.pos += skip,
        }

        // The minimum width only grows from here on.
        if c.measure.shrink > p.width {
            break;
        }

        c.pos += 1;
    }

    last
}

/// Tries to end the scanned line before `index`, keeping the better of this
/// and any previously found line ending there.
///
/// Returns whether the line fits at all.
fn relax(p: &Preparation, nodes: &mut [Option<Node>], c: &Scan, index: usize) -> bool {
    let Some(factor) = c.measure.factor(p.width) else { return false };

    // A line without content only wins if nothing else can end here.
    let score = if c.measure.width == 0.0 {
        f64::NEG_INFINITY
    } else {
        c.score - factor * factor
    };

    if nodes[index].as_ref().is_none_or(|other| score > other.score) {
        tracing::trace!(from = c.begin, to = index, factor, score, "relaxed break");
        nodes[index] = Some(Node { prev: c.begin, path: c.path.clone(), factor, score });
    }

    true
}

fn serialize_path<S: serde::Serializer>(path: &PathBits, s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(path.iter())
}
