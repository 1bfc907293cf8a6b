//! `/start` and `/help`.

use std::path::Path;

use crate::error::HandleError;
use crate::event::{ChatId, Command};
use crate::messages;
use crate::transport::Transport;

/// Reply to a command. `/start` reads the example template from disk first,
/// so a missing template fails the interaction before anything is sent.
pub fn respond(
    command: Command,
    chat: ChatId,
    example_path: &Path,
    transport: &dyn Transport,
) -> Result<(), HandleError> {
    match command {
        Command::Start => {
            let (file_name, bytes) = read_example(example_path)?;
            transport.send_text(chat, messages::WELCOME)?;
            transport.send_document(chat, &file_name, bytes)?;
            transport.send_text(chat, messages::EXAMPLE_CAPTION)?;
        }
        Command::Help => {
            transport.send_text(chat, messages::HELP)?;
        }
    }
    Ok(())
}

fn read_example(path: &Path) -> Result<(String, Vec<u8>), HandleError> {
    let bytes = std::fs::read(path).map_err(|e| HandleError::AssetMissing {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "example.csv".to_string());
    Ok((file_name, bytes))
}
