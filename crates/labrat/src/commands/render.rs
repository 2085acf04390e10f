//! `labrat render` command implementation.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use labrat_config::{CliSettings, Config};
use labrat_feed::{Composer, Message, OffsetUnit, Post};

use crate::error::CliError;
use crate::output::Output;

/// Offset unit accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(super) enum UnitArg {
    /// UTF-8 bytes.
    Utf8,
    /// UTF-16 code units.
    Utf16,
    /// Unicode code points.
    CodePoint,
}

impl From<UnitArg> for OffsetUnit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Utf8 => Self::Utf8,
            UnitArg::Utf16 => Self::Utf16,
            UnitArg::CodePoint => Self::CodePoint,
        }
    }
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to the post JSON file (`-` reads stdin).
    post: PathBuf,

    /// Path to configuration file (default: auto-discover labrat.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Unit the post's entity indices are counted in (overrides config).
    #[arg(long, value_enum)]
    offset_unit: Option<UnitArg>,

    /// Base URL for profile and permalink anchors (overrides config).
    #[arg(long)]
    profile_base_url: Option<String>,

    /// Do not append the reply link.
    #[arg(long)]
    no_reply_link: bool,

    /// Fail instead of falling back to plain text when entities do not render.
    #[arg(long)]
    strict: bool,

    /// Print the message as JSON.
    #[arg(long)]
    json: bool,

    /// Enable verbose output (debug logs for every span).
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the post cannot be read or
    /// parsed, or (with `--strict`) its entities do not render.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            offset_unit: self.offset_unit.map(OffsetUnit::from),
            profile_base_url: self.profile_base_url.clone(),
            reply_link: self.no_reply_link.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::debug!(path = %path.display(), "loaded configuration");
        }

        let json = read_input(&self.post)?;
        let post = Post::from_json(&json)?;
        if post.is_reply() {
            output.warning("Post is a reply; the relay normally skips replies.");
        }

        let composer = Composer::new(config.composer_options());
        let message = if self.strict {
            composer.try_compose(&post)?
        } else {
            composer.compose(&post)
        };

        output.result(&format_message(&message, self.json)?)?;
        if !self.json {
            for url in &message.media_urls {
                output.info(&format!("media: {url}"));
            }
        }

        Ok(())
    }
}

/// Read the post JSON from `path`, or stdin for `-`.
pub(super) fn read_input(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Format `message` as plain markup or as a JSON object.
fn format_message(message: &Message, json: bool) -> Result<String, CliError> {
    if json {
        Ok(serde_json::to_string_pretty(message)?)
    } else {
        Ok(message.text.clone())
    }
}
