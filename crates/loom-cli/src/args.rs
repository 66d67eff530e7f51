use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use clap::builder::{TypedValueParser, ValueParser};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

/// Sets text into justified lines.
#[derive(Debug, Clone, Parser)]
#[clap(name = "loom", version, author)]
pub struct CliArguments {
    /// The command to run
    #[command(subcommand)]
    pub command: Command,

    /// Sets the level of logging verbosity:
    /// -v = warning & error, -vv = info, -vvv = debug, -vvvv = trace
    #[clap(short, long, action = ArgAction::Count)]
    pub verbosity: u8,
}

/// What to do.
#[derive(Debug, Clone, Subcommand)]
#[command()]
pub enum Command {
    /// Lays out paragraphs of text into justified lines
    #[command(visible_alias = "l")]
    Layout(LayoutCommand),

    /// Prints the token streams built from paragraphs of text
    Stream(StreamCommand),
}

/// Lays out paragraphs of text into justified lines
#[derive(Debug, Clone, Parser)]
pub struct LayoutCommand {
    /// Path to the input file. Use `-` to read from stdin
    #[clap(value_parser = input_value_parser())]
    pub input: Input,

    /// The available line width in columns. Can be given multiple times to
    /// lay out the same input at several widths
    #[clap(short, long = "width", value_name = "WIDTH", action = ArgAction::Append)]
    pub widths: Vec<f64>,

    /// Path to a TOML configuration file
    #[clap(long = "config", env = "LOOM_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Overrides the configured leading, as a multiple of the line height
    #[clap(long = "leading")]
    pub leading: Option<f64>,

    /// Overrides how far a space may shrink
    #[clap(long = "space-shrink", value_name = "COLUMNS")]
    pub space_shrink: Option<f64>,

    /// Overrides the natural width of a space
    #[clap(long = "space-width", value_name = "COLUMNS")]
    pub space_width: Option<f64>,

    /// Overrides how far a space may stretch
    #[clap(long = "space-stretch", value_name = "COLUMNS")]
    pub space_stretch: Option<f64>,

    /// The format to emit the lines in
    #[clap(long = "format", default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Reads the input as JSON token streams instead of text
    #[clap(long = "stream")]
    pub stream: bool,

    /// Arguments for turning text into token streams.
    #[clap(flatten)]
    pub text: TextArgs,
}

/// Prints the token streams built from paragraphs of text
#[derive(Debug, Clone, Parser)]
pub struct StreamCommand {
    /// Path to the input file. Use `-` to read from stdin
    #[clap(value_parser = input_value_parser())]
    pub input: Input,

    /// The format to serialize the streams in
    #[clap(long = "format", default_value_t = SerializationFormat::Json)]
    pub format: SerializationFormat,

    /// Arguments for turning text into token streams.
    #[clap(flatten)]
    pub text: TextArgs,
}

/// Common arguments of layout and stream.
#[derive(Debug, Clone, Args)]
pub struct TextArgs {
    /// Inserts hyphenation opportunities for the given language, as an
    /// ISO 639-1 code like `en`
    #[clap(long = "hyphenate", value_name = "LANG")]
    pub hyphenate: Option<String>,

    /// Sets the last line of each paragraph as if it were full
    #[clap(long = "fill-last")]
    pub fill_last: bool,
}

/// An input that is either stdin or a real path.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Input {
    /// Stdin, represented by `-`.
    Stdin,
    /// A non-empty path.
    Path(PathBuf),
}

impl Display for Input {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Stdin => f.pad("stdin"),
            Self::Path(path) => path.display().fmt(f),
        }
    }
}

/// The clap value parser used by `LayoutCommand.input` and
/// `StreamCommand.input`.
fn input_value_parser() -> impl Into<ValueParser> {
    clap::builder::OsStringValueParser::new().try_map(|value| {
        if value.is_empty() {
            Err(clap::Error::new(clap::error::ErrorKind::InvalidValue))
        } else if value == "-" {
            Ok(Input::Stdin)
        } else {
            Ok(Input::Path(value.into()))
        }
    })
}

/// Which format to emit laid out lines in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Lines of text, justified on a grid of columns.
    Text,
    Json,
    Yaml,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.to_possible_value()
            .expect("no values are skipped")
            .get_name()
            .fmt(f)
    }
}

/// Which format to serialize data in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum SerializationFormat {
    Json,
    Yaml,
}

impl Display for SerializationFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.to_possible_value()
            .expect("no values are skipped")
            .get_name()
            .fmt(f)
    }
}
