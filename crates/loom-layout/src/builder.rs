use std::fmt::{self, Display, Formatter};

use ecow::eco_format;

use crate::diag::StrResult;
use crate::glue::Glue;
use crate::stream::{Item, Stream};

/// A word together with the glue it requests on either side.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Atom<'a> {
    pub left: Glue,
    pub right: Glue,
    pub text: &'a str,
}

impl<'a> Atom<'a> {
    /// A word surrounded by breaking spaces.
    pub fn normal(text: &'a str) -> Self {
        Self { left: Glue::space(), right: Glue::space(), text }
    }
}

impl Display for Atom<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.left, self.text, self.right)
    }
}

/// Writes content into a token stream, resolving glue between neighbours
/// and encoding alternatives as branches.
#[derive(Debug, Clone, Default)]
pub struct StreamBuilder {
    /// Glue requested by the last piece of content, not yet written.
    state: Glue,
    items: Vec<Item>,
}

impl StreamBuilder {
    /// Creates an empty builder. Glue requested before the first word is
    /// dropped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a word.
    pub fn word(&mut self, atom: Atom) -> &mut Self {
        self.write_glue(atom.left);
        self.items.push(Item::word(atom.text));
        self.state = atom.right;
        self
    }

    /// Writes whitespace-separated words, joined by breaking spaces.
    pub fn text(&mut self, text: &str) -> &mut Self {
        for word in text.split_whitespace() {
            self.word(Atom::normal(word));
        }
        self
    }

    /// Combines additional glue into the pending glue.
    pub fn promote(&mut self, glue: Glue) -> &mut Self {
        self.state |= glue;
        self
    }

    /// Requests a mandatory break before the next word.
    pub fn newline(&mut self, fill: bool) -> &mut Self {
        self.promote(Glue::Newline { fill })
    }

    /// Writes alternative renditions of the same content.
    ///
    /// The closure adds one alternative per call to [`Branches::add`]. The
    /// first one is the default that is used when no branch is taken; the
    /// others are merged pairwise into nested branches. The glue pending after
    /// the alternatives is the combination of their trailing glue.
    pub fn branch(&mut self, f: impl FnOnce(&mut Branches)) -> &mut Self {
        let mut branches = Branches { state: self.state, ways: Vec::new() };
        f(&mut branches);

        let mut glue = Glue::space();
        let mut ways = branches.ways.into_iter().map(|(items, state)| {
            glue |= state;
            items
        });

        let Some(default) = ways.next() else { return self };
        let mut others: Vec<Vec<Item>> = ways.collect();

        // Merge the alternatives pairwise until one is left.
        while others.len() > 1 {
            for n in 0..others.len() / 2 {
                let Some(b) = others.pop() else { break };
                let a = std::mem::take(&mut others[n]);
                let mut merged = Vec::new();
                merge(&mut merged, a, b);
                others[n] = merged;
            }
        }

        match others.pop() {
            Some(taken) => merge(&mut self.items, default, taken),
            None => self.items.extend(default),
        }

        self.state = glue;
        self
    }

    /// Writes a word that may alternatively be hyphenated at one of the given
    /// byte offsets.
    ///
    /// The hyphenated alternatives end the line after the first part and a
    /// hyphen and continue the next line with the rest of the word.
    pub fn hyphenated(&mut self, atom: Atom, splits: &[usize]) -> &mut Self {
        let text = atom.text;
        let valid = |i: &usize| *i > 0 && *i < text.len() && text.is_char_boundary(*i);
        if !splits.iter().any(valid) {
            return self.word(atom);
        }

        self.branch(|alt| {
            alt.add(|b| {
                b.word(atom);
            });

            for &i in splits {
                if !valid(&i) {
                    continue;
                }

                let (head, tail) = text.split_at(i);
                let head = eco_format!("{head}-");
                alt.add(|b| {
                    b.word(Atom { left: atom.left, right: Glue::newline(), text: &head })
                        .word(Atom { left: Glue::newline(), right: atom.right, text: tail });
                });
            }
        })
    }

    /// Terminates the stream with a mandatory break and validates it.
    ///
    /// The break fills the line if the pending glue asks for it.
    pub fn finish(mut self) -> StrResult<Stream> {
        let fill = matches!(self.state, Glue::Newline { fill: true });
        if !self.items.is_empty() {
            self.items.push(Item::Linebreak { fill });
        }
        Stream::new(self.items)
    }

    /// Writes the glue pending between the last item and the next one.
    fn write_glue(&mut self, left: Glue) {
        if let Some(item) = (self.state | left).item() {
            self.items.push(item);
        }
    }
}

/// Collects the alternatives of a [branch](StreamBuilder::branch).
pub struct Branches {
    /// The glue pending before the branch.
    state: Glue,
    ways: Vec<(Vec<Item>, Glue)>,
}

impl Branches {
    /// Adds an alternative written by `f`.
    pub fn add(&mut self, f: impl FnOnce(&mut StreamBuilder)) -> &mut Self {
        let mut builder = StreamBuilder { state: self.state, items: Vec::new() };
        f(&mut builder);
        self.ways.push((builder.items, builder.state));
        self
    }
}

/// Writes `b` as an optional branch with `a` as its default.
///
/// An empty default still gets a branch, so that `b` stays optional. An
/// identical space at the end of both sides is hoisted behind the branch.
fn merge(out: &mut Vec<Item>, mut a: Vec<Item>, mut b: Vec<Item>) {
    if b.is_empty() {
        out.extend(a);
        return;
    }

    let shared_end = match (a.last(), b.last()) {
        (Some(x @ Item::Space { .. }), Some(y @ Item::Space { .. })) if x == y => {
            a.pop();
            b.pop()
        }
        _ => None,
    };

    out.push(Item::BranchEntry { skip: b.len() + 1 });
    out.extend(b);
    out.push(Item::BranchExit { skip: a.len() });
    out.extend(a);
    out.extend(shared_end);
}
