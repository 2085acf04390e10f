//! `labrat escape` command implementation.

use std::io::Read;

use clap::Args;
use labrat_render::escape_html;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the escape command.
#[derive(Args)]
pub(crate) struct EscapeArgs {
    /// Text to escape (default: read stdin).
    text: Option<String>,
}

impl EscapeArgs {
    /// Execute the escape command.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let text = match self.text {
            Some(text) => text,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };
        Output::new().result(&escape_html(&text))?;
        Ok(())
    }
}
