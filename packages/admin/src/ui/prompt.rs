//! Interactive prompts.

use rustyline::{DefaultEditor, error::ReadlineError};

use crate::error::AdminError;

/// Ask the operator for one line of text.
///
/// # Returns
///
/// `None` if the operator cancelled with Ctrl+C or Ctrl+D
pub fn ask(prompt: &str) -> Result<Option<String>, AdminError> {
    let mut rl = DefaultEditor::new().map_err(|e| AdminError::Terminal(e.to_string()))?;
    match rl.readline(prompt) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(AdminError::Terminal(e.to_string())),
    }
}
