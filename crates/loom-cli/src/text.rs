use hypher::Lang;
use loom_layout::diag::HintedStrResult;
use loom_layout::{Atom, Stream, StreamBuilder};

use crate::args::TextArgs;
use crate::hyphenate;

/// Turns plain text into one token stream per paragraph.
///
/// Paragraphs are separated by blank lines. Within a paragraph, words are
/// separated by any whitespace, line breaks included.
pub fn paragraphs(text: &str, args: &TextArgs) -> HintedStrResult<Vec<Stream>> {
    let lang = args.hyphenate.as_deref().map(hyphenate::lang).transpose()?;

    let mut streams = vec![];
    let mut lines = text.lines().peekable();
    while lines.peek().is_some() {
        let mut builder = StreamBuilder::new();
        let mut empty = true;
        for line in lines.by_ref() {
            if line.trim().is_empty() {
                if empty {
                    continue;
                }
                break;
            }

            for word in line.split_whitespace() {
                write_word(&mut builder, word, lang);
            }
            empty = false;
        }

        if empty {
            continue;
        }

        builder.newline(args.fill_last);
        streams.push(builder.finish()?);
    }

    tracing::info!(paragraphs = streams.len(), "built token streams");
    Ok(streams)
}

fn write_word(builder: &mut StreamBuilder, word: &str, lang: Option<Lang>) {
    let atom = Atom::normal(word);
    match lang {
        Some(lang) => builder.hyphenated(atom, &hyphenate::splits(word, lang)),
        None => builder.word(atom),
    };
}
