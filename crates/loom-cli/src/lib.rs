pub mod args;
pub mod config;
pub mod hyphenate;
pub mod layout;
pub mod metrics;
pub mod render;
pub mod stream;
pub mod text;
pub mod tracing;

use std::cell::Cell;
use std::io::{self, IsTerminal, Read, Write};
use std::process::ExitCode;

use clap::Parser;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, ColorSpec, StandardStream, WriteColor};
use loom_layout::diag::{HintedString, StrResult, eco_format};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::args::{CliArguments, Input, SerializationFormat};

thread_local! {
    /// The CLI's exit code.
    pub static EXIT: Cell<ExitCode> = const { Cell::new(ExitCode::SUCCESS) };
}

/// The parsed commandline arguments.
pub static ARGS: Lazy<CliArguments> = Lazy::new(CliArguments::parse);

/// Ensure a failure exit code.
pub fn set_failed() {
    EXIT.with(|cell| cell.set(ExitCode::FAILURE));
}

/// Print an application-level error and its hints.
pub fn print_error(error: &HintedString) -> io::Result<()> {
    print_diagnostic("error", &term::Styles::default().header_error, error)
}

/// Print a warning and its hints.
pub fn print_warning(warning: &HintedString) -> io::Result<()> {
    print_diagnostic("warning", &term::Styles::default().header_warning, warning)
}

/// Print a diagnostic with the given severity label.
fn print_diagnostic(label: &str, spec: &ColorSpec, diag: &HintedString) -> io::Result<()> {
    let styles = term::Styles::default();
    let color = if io::stderr().is_terminal() { ColorChoice::Auto } else { ColorChoice::Never };
    let mut output = StandardStream::stderr(color);

    output.set_color(spec)?;
    write!(output, "{label}")?;
    output.reset()?;
    writeln!(output, ": {}", diag.message())?;

    for hint in diag.hints() {
        output.set_color(&styles.header_help)?;
        write!(output, "hint")?;
        output.reset()?;
        writeln!(output, ": {hint}")?;
    }

    Ok(())
}

/// Reads the whole input as UTF-8 text.
pub fn read_input(input: &Input) -> StrResult<String> {
    match input {
        Input::Stdin => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|err| eco_format!("failed to read from stdin ({err})"))?;
            Ok(buf)
        }
        Input::Path(path) => std::fs::read_to_string(path)
            .map_err(|err| eco_format!("failed to read {} ({err})", path.display())),
    }
}

/// Serialize data to the output format.
pub fn serialize(data: &impl Serialize, format: SerializationFormat) -> StrResult<String> {
    match format {
        SerializationFormat::Json => {
            serde_json::to_string_pretty(data).map_err(|e| eco_format!("{e}"))
        }
        SerializationFormat::Yaml => {
            serde_yaml::to_string(&data).map_err(|e| eco_format!("{e}"))
        }
    }
}
