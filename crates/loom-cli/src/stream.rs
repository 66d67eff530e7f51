use loom_layout::diag::HintedStrResult;

use crate::args::StreamCommand;
use crate::{read_input, serialize, text};

/// Execute a stream command.
pub fn stream(command: &StreamCommand) -> HintedStrResult<()> {
    let source = read_input(&command.input)?;
    let streams = text::paragraphs(&source, &command.text)?;
    let serialized = serialize(&streams, command.format)?;
    println!("{serialized}");
    Ok(())
}
