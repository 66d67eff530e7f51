use crate::line::Line;

/// A target that finished lines are drawn onto.
pub trait Surface {
    /// Draws a word with its top-left corner at `(x, y)`.
    fn draw_word(&mut self, x: f64, y: f64, text: &str);

    /// Called after all words of a line have been drawn.
    fn end_line(&mut self, _y: f64, _height: f64) {}
}

/// Draws lines top to bottom, each `leading` times its own height below the
/// previous one.
///
/// Returns the total height of the placed lines.
pub fn place(lines: &[Line], surface: &mut impl Surface, leading: f64) -> f64 {
    let mut y = 0.0;
    for line in lines {
        for word in &line.words {
            surface.draw_word(word.x, y, &word.text);
        }
        surface.end_line(y, line.height);
        y += line.height * leading;
    }
    y
}
