use hypher::Lang;
use loom_layout::diag::{HintedStrResult, error};

/// Resolves a hyphenation language from its ISO 639-1 code.
pub fn lang(code: &str) -> HintedStrResult<Lang> {
    let lower = code.to_ascii_lowercase();
    lower
        .as_bytes()
        .try_into()
        .ok()
        .and_then(Lang::from_iso)
        .ok_or_else(|| {
            error!(
                "unsupported hyphenation language `{}`", code;
                hint: "use a two-letter ISO 639-1 code like `en` or `de`"
            )
        })
}

/// The byte offsets within a word at which it may be hyphenated.
///
/// Trailing punctuation is not hyphenated and stays with the last syllable.
pub fn splits(word: &str, lang: Lang) -> Vec<usize> {
    let trimmed = word.trim_end_matches(|c: char| !c.is_alphabetic());
    let mut offset = 0;
    let mut splits = vec![];
    for syllable in hypher::hyphenate(trimmed, lang) {
        offset += syllable.len();
        // Don't hyphenate after the final syllable.
        if offset < trimmed.len() {
            splits.push(offset);
        }
    }
    splits
}
