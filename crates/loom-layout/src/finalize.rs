use crate::linebreak::{Break, Breaks};
use crate::line::{Line, Word};
use crate::measure::Measure;
use crate::prepare::Preparation;
use crate::stream::Item;

/// Turns the chosen breaks into positioned lines.
pub fn finalize(p: &Preparation, breaks: &Breaks) -> Vec<Line> {
    breaks.iter().map(|b| commit(p, b)).collect()
}

/// Replays the items of one line, following the branches it takes, and
/// positions its words at the line's justification factor.
fn commit(p: &Preparation, b: &Break) -> Line {
    let mut measure = Measure::zero();
    let mut line = Line::default();
    let mut branches = 0;
    let mut pos = b.start;

    while pos < b.end {
        match p.items[pos] {
            Item::Word { ref text } => {
                let m = p.measures[pos];
                line.words.push(Word { text: text.clone(), x: measure.at(b.factor) });
                line.height = line.height.max(m.height);
                measure += m;
            }
            Item::Space { .. } => measure += p.measures[pos],
            Item::BranchEntry { skip } => {
                if !b.path.contains(branches) {
                    pos += skip;
                }
                branches += 1;
            }
            Item::BranchExit { skip } => pos += skip,
            // Lines end at their first mandatory break.
            Item::Linebreak { .. } => {}
        }
        pos += 1;
    }

    line
}
