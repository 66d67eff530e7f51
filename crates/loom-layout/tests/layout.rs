use loom_layout::{
    Atom, FnMeasurer, Item, Layouter, Line, Measure, MeasureCache, Measurer, SpaceConfig,
    Stream, StreamBuilder, layout,
};

const TEXT: &str = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do \
                    eiusmod tempor incididunt ut labore et dolore magna aliqua";

/// One unit per character, spaces with the default elasticity.
fn mono() -> impl Measurer {
    FnMeasurer::new(
        |text: &str| Measure::word(text.chars().count() as f64, 1.0),
        |scale| SpaceConfig::default().measure(scale),
    )
}

fn texts(line: &Line) -> Vec<&str> {
    line.words.iter().map(|w| w.text.as_str()).collect()
}

fn paragraph(text: &str) -> Stream {
    let mut builder = StreamBuilder::new();
    builder.text(text);
    builder.finish().unwrap()
}

#[test]
fn test_one_line_with_room_to_spare() {
    let stream =
        Stream::new(vec![Item::word("a"), Item::space(), Item::word("bb"), Item::linebreak()])
            .unwrap();

    // Natural width 4, stretchable to 5. A third word would not fit.
    let lines = layout(&stream, 4.5, &mono());
    assert_eq!(lines.len(), 1);
    assert_eq!(texts(&lines[0]), ["a", "bb"]);
    assert_eq!(lines[0].words[0].x, 0.0);
    // The space is stretched halfway from 1 to 2.
    assert_eq!(lines[0].words[1].x, 1.0 + 1.5);
}

#[test]
fn test_two_lines_break_at_space() {
    let stream =
        Stream::new(vec![Item::word("a"), Item::space(), Item::word("bb"), Item::linebreak()])
            .unwrap();

    // Narrower than "a bb" at full shrink (3.5), wide enough for each word.
    let p = Layouter::new(mono()).layout(&stream, 3.0);
    assert_eq!(p.lines.len(), 2);
    assert_eq!(texts(&p.lines[0]), ["a"]);
    assert_eq!(texts(&p.lines[1]), ["bb"]);

    assert_eq!(p.breaks[0].end, 1);
    assert_eq!(p.breaks[0].factor, Measure::word(1.0, 1.0).factor(3.0).unwrap());
}

#[test]
fn test_overflowing_branch_is_excluded() {
    let stream = Stream::new(vec![
        Item::word("a"),
        Item::space(),
        Item::word("bb"),
        Item::BranchEntry { skip: 3 },
        Item::nbsp(),
        Item::word("cccc"),
        Item::BranchExit { skip: 0 },
        Item::linebreak(),
    ])
    .unwrap();

    // "a bb" fits exactly, "a bb cccc" cannot be shrunk enough.
    let p = Layouter::new(mono()).layout(&stream, 4.0);
    assert_eq!(p.lines.len(), 1);
    assert_eq!(texts(&p.lines[0]), ["a", "bb"]);
    assert!(p.breaks[0].path.is_empty());
    assert_eq!(p.breaks[0].factor, 1.0);
    assert_eq!(p.score(), -1.0);
}

#[test]
fn test_lines_are_admissible() {
    let stream = paragraph(TEXT);
    let space = SpaceConfig::default().measure(1.0);

    for width in 12..=40 {
        let width = width as f64;
        let lines = layout(&stream, width, &mono());
        assert!(!lines.is_empty());

        let words: usize = lines.iter().map(|line| line.words.len()).sum();
        assert_eq!(words, TEXT.split_whitespace().count(), "width {width}");

        for line in &lines {
            let glyphs: usize = line.words.iter().map(|w| w.text.chars().count()).sum();
            let shrink = glyphs as f64 + (line.words.len() - 1) as f64 * space.shrink;
            assert!(shrink <= width, "line {:?} overflows at {width}", texts(line));
        }
    }
}

#[test]
fn test_break_chain_starts_at_zero() {
    let stream = paragraph(TEXT);
    let p = Layouter::new(mono()).layout(&stream, 20.0);

    assert_eq!(p.breaks.len(), p.lines.len());
    assert_eq!(p.breaks[0].start, 0);
    for pair in p.breaks.windows(2) {
        assert!(pair[0].end < pair[1].start);
        assert_eq!(pair[0].end + 1, pair[1].start);
    }
    assert_eq!(p.breaks.last().unwrap().end, stream.len() - 1);
}

#[test]
fn test_layout_is_idempotent() {
    let stream = paragraph(TEXT);
    let measurer = mono();
    let a = layout(&stream, 23.0, &measurer);
    let b = layout(&stream, 23.0, &measurer);
    assert_eq!(a, b);
    assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
}

#[test]
fn test_fill_break_is_full() {
    let stream = Stream::new(vec![
        Item::word("short"),
        Item::space(),
        Item::word("line"),
        Item::Linebreak { fill: true },
    ])
    .unwrap();

    let p = Layouter::new(mono()).layout(&stream, 30.0);
    assert_eq!(p.breaks.len(), 1);
    assert_eq!(p.breaks[0].factor, 1.0);
    assert_eq!(p.score(), -1.0);
    // Filling stretches the content, it does not spread it over the line.
    assert_eq!(p.lines[0].words[1].x, 7.0);
}

#[test]
fn test_hyphenation_is_exclusive() {
    let mut builder = StreamBuilder::new();
    builder.text("aaa bb");
    builder.hyphenated(Atom::normal("breaking"), &[2, 5]);
    builder.text("cc dddd");
    let stream = builder.finish().unwrap();

    for width in 8..=24 {
        let lines = layout(&stream, width as f64, &mono());
        let words: Vec<&str> = lines.iter().flat_map(texts).collect();

        let whole = words.iter().filter(|&&w| w == "breaking").count();
        let heads = words.iter().filter(|w| w.ends_with('-')).count();
        let tails = words.iter().filter(|&&w| w == "eaking" || w == "ing").count();
        assert_eq!(whole + heads, 1, "width {width}: {words:?}");
        assert_eq!(heads, tails, "width {width}: {words:?}");

        let rejoined: String = words.iter().map(|w| w.trim_end_matches('-')).collect();
        assert_eq!(rejoined, "aaabbbreakingccdddd", "width {width}");
    }
}

#[test]
fn test_hyphenation_splits_overwide_word() {
    let mut builder = StreamBuilder::new();
    builder.text("aaaa");
    builder.hyphenated(Atom::normal("bbbbbbbb"), &[4]);
    let stream = builder.finish().unwrap();

    // The whole word is wider than a line, its halves are not.
    let p = Layouter::new(mono()).layout(&stream, 6.0);
    assert_eq!(p.lines.len(), 3);
    assert_eq!(texts(&p.lines[0]), ["aaaa"]);
    assert_eq!(texts(&p.lines[1]), ["bbbb-"]);
    assert_eq!(texts(&p.lines[2]), ["bbbb"]);
    assert!(p.breaks[0].path.contains(0));
}

#[test]
fn test_empty_default_keeps_alternative_optional() {
    let mut builder = StreamBuilder::new();
    builder.text("a");
    builder.branch(|alt| {
        alt.add(|_| {}).add(|b| {
            b.text("optional");
        });
    });
    builder.text("z");
    let stream = builder.finish().unwrap();

    // The alternative is wider than the line, so it must be skipped.
    let p = Layouter::new(mono()).layout(&stream, 4.0);
    assert_eq!(p.lines.len(), 1);
    assert_eq!(texts(&p.lines[0]), ["a", "z"]);
    assert!(p.breaks[0].path.is_empty());
}

#[test]
fn test_no_break_yields_no_lines() {
    let stream = Stream::new(vec![Item::word("unbreakable")]).unwrap();
    assert!(layout(&stream, 100.0, &mono()).is_empty());

    let stream = Stream::new(vec![Item::word("toolong"), Item::linebreak()]).unwrap();
    assert!(layout(&stream, 3.0, &mono()).is_empty());
}

#[test]
fn test_overwide_word_cuts_paragraph() {
    let stream = paragraph("aaa bbbbbbbbbbbbbbb ccc");
    let p = Layouter::new(mono()).layout(&stream, 10.0);
    assert_eq!(p.lines.len(), 1);
    assert_eq!(texts(&p.lines[0]), ["aaa"]);
    assert_eq!(p.end(), 2);
    assert_eq!(stream[p.end()], Item::word("bbbbbbbbbbbbbbb"));

    let p = Layouter::new(mono()).layout(&stream, 20.0);
    assert_eq!(p.end(), stream.len());
}

#[test]
fn test_cache_across_widths() {
    let stream = paragraph(TEXT);
    let layouter = Layouter::new(MeasureCache::new(mono()));

    let narrow = layouter.layout(&stream, 15.0);
    let cached = layouter.measurer().len();
    let wide = layouter.layout(&stream, 35.0);

    assert!(narrow.lines.len() > wide.lines.len());
    assert_eq!(layouter.measurer().len(), cached);
    assert_eq!(wide.lines, layout(&stream, 35.0, &mono()));
}
