use std::io::{self, Write};

use loom_layout::diag::{Hint, HintedStrResult, HintedString, eco_format, error};
use loom_layout::{Item, Layouter, MeasureCache, Paragraph, Stream};
use serde::Serialize;

use crate::args::{Input, LayoutCommand, OutputFormat, SerializationFormat};
use crate::config::{Config, check_width};
use crate::metrics::Monospace;
use crate::{print_warning, read_input, render, serialize, text};

/// The layout of all paragraphs at one width.
#[derive(Debug, Serialize)]
struct Output {
    width: f64,
    paragraphs: Vec<Paragraph>,
}

/// Execute a layout command.
pub fn layout(command: &LayoutCommand) -> HintedStrResult<()> {
    let config = Config::resolve(command)?;
    let widths = match command.widths.as_slice() {
        [] => vec![config.text_width],
        widths => widths.to_vec(),
    };
    for &width in &widths {
        check_width(width)?;
    }

    let source = read_input(&command.input)?;
    let streams = if command.stream {
        parse_streams(&source, &command.input)?
    } else {
        text::paragraphs(&source, &command.text)?
    };

    // Words are measured once for all widths.
    let layouter = Layouter::new(MeasureCache::new(Monospace::new(config.space())));
    let outputs: Vec<Output> = widths
        .iter()
        .map(|&width| Output {
            width,
            paragraphs: streams.iter().map(|stream| layouter.layout(stream, width)).collect(),
        })
        .collect();

    tracing::info!(
        paragraphs = streams.len(),
        widths = widths.len(),
        words = layouter.measurer().len(),
        "laid out input",
    );

    for output in &outputs {
        for (i, (paragraph, stream)) in output.paragraphs.iter().zip(&streams).enumerate() {
            if let Some(warning) = cut_off(i, output.width, paragraph, stream) {
                tracing::warn!(paragraph = i, width = output.width, "paragraph is cut off");
                print_warning(&warning)
                    .map_err(|err| eco_format!("failed to print warning ({err})"))?;
            }
        }
    }

    let serialized = match command.format {
        OutputFormat::Text => text_output(&outputs, config.leading),
        OutputFormat::Json => serialize(&outputs, SerializationFormat::Json)?,
        OutputFormat::Yaml => serialize(&outputs, SerializationFormat::Yaml)?,
    };

    let mut out = io::stdout().lock();
    writeln!(out, "{serialized}").map_err(|err| eco_format!("failed to write output ({err})"))?;
    Ok(())
}

/// Describes the content of a paragraph that did not make it onto any line.
fn cut_off(
    index: usize,
    width: f64,
    paragraph: &Paragraph,
    stream: &Stream,
) -> Option<HintedString> {
    let end = paragraph.end();
    if end >= stream.len() {
        return None;
    }

    let mut warning = error!(
        "paragraph {} does not fit into width {}", index + 1, width;
        hint: "everything from item {} on is left out", end
    );

    if let Some(word) = stream[end..].iter().find_map(|item| match item {
        Item::Word { text } => Some(text),
        _ => None,
    }) {
        warning.hint(eco_format!("the word `{word}` may be wider than the line"));
    }

    Some(warning)
}

/// Parses paragraphs given as serialized token streams.
fn parse_streams(source: &str, input: &Input) -> HintedStrResult<Vec<Stream>> {
    serde_json::from_str(source)
        .map_err(|err| eco_format!("failed to parse token streams from {input} ({err})"))
        .hint("`loom stream` prints token streams in the expected format")
}

/// Renders the lines on a grid, paragraphs separated by blank lines.
fn text_output(outputs: &[Output], leading: f64) -> String {
    let mut blocks = vec![];
    for output in outputs {
        if outputs.len() > 1 {
            blocks.push(format!("# width {}", output.width));
        }
        for paragraph in &output.paragraphs {
            blocks.push(render::grid(&paragraph.lines, leading).to_string());
        }
    }
    blocks.join("\n\n")
}
