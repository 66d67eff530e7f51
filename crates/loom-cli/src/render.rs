use std::fmt::Display;

use ecow::EcoString;
use loom_layout::{Line, Surface, place};
use unicode_segmentation::UnicodeSegmentation;

/// Draws laid out lines onto a grid of character cells.
///
/// Word offsets are rounded to the nearest column and line offsets to the
/// nearest row. Overlapping words overwrite each other.
#[derive(Debug, Default, Clone)]
pub struct Grid {
    rows: Vec<Vec<EcoString>>,
}

impl Grid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// The rows of the grid, without trailing blanks.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.rows.iter().map(|cells| {
            let row: String = cells.iter().map(EcoString::as_str).collect();
            row.trim_end().to_owned()
        })
    }

    fn row(&mut self, y: f64) -> &mut Vec<EcoString> {
        let index = cell(y);
        if self.rows.len() <= index {
            self.rows.resize_with(index + 1, Vec::new);
        }
        &mut self.rows[index]
    }
}

impl Surface for Grid {
    fn draw_word(&mut self, x: f64, y: f64, text: &str) {
        let start = cell(x);
        let row = self.row(y);
        for (i, grapheme) in text.graphemes(true).enumerate() {
            let column = start + i;
            if row.len() <= column {
                row.resize(column + 1, EcoString::from(" "));
            }
            row[column] = grapheme.into();
        }
    }

    fn end_line(&mut self, y: f64, _: f64) {
        // Keep lines without words.
        self.row(y);
    }
}

/// Renders lines as text, one grid row per line at a leading of one.
pub fn grid(lines: &[Line], leading: f64) -> impl Display + use<> {
    let mut grid = Grid::new();
    place(lines, &mut grid, leading);
    loom_utils::display(move |f| {
        for (i, row) in grid.rows().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&row)?;
        }
        Ok(())
    })
}

/// Rounds a coordinate to a cell index.
fn cell(v: f64) -> usize {
    v.round().max(0.0) as usize
}
