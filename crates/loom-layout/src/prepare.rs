use crate::measure::Measure;
use crate::measurer::Measurer;
use crate::stream::{Item, Stream};

/// A token stream with the measures of all its items, ready for line
/// breaking at a fixed width.
///
/// Measuring happens once per pass, so the measurement callbacks are invoked
/// exactly once per word and space item regardless of how often the break
/// search visits it.
#[derive(Debug)]
pub struct Preparation<'a> {
    /// The items of the stream.
    pub items: &'a [Item],
    /// The measure of each item. Zero for items without content.
    pub measures: Vec<Measure>,
    /// The available line width.
    pub width: f64,
}

/// Measures all items of a stream.
pub fn prepare<'a>(stream: &'a Stream, width: f64, measurer: &impl Measurer) -> Preparation<'a> {
    let measures = stream
        .iter()
        .map(|item| match item {
            Item::Word { text } => measurer.word(text),
            Item::Space { scale, .. } => measurer.space(*scale),
            _ => Measure::zero(),
        })
        .collect();

    Preparation { items: stream.items(), measures, width }
}
