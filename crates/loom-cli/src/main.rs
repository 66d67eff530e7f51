use std::process::ExitCode;

use loom_layout::diag::HintedStrResult;

use loom_cli::args::Command;
use loom_cli::{ARGS, EXIT, print_error, set_failed};

/// Entry point.
fn main() -> ExitCode {
    loom_cli::tracing::setup_tracing(&ARGS);

    let res = dispatch();

    if let Err(msg) = res {
        set_failed();
        print_error(&msg).expect("failed to print error");
    }

    EXIT.with(|cell| cell.get())
}

/// Execute the requested command.
fn dispatch() -> HintedStrResult<()> {
    match &ARGS.command {
        Command::Layout(command) => loom_cli::layout::layout(command)?,
        Command::Stream(command) => loom_cli::stream::stream(command)?,
    }

    Ok(())
}
