//! `labrat spans` command implementation.

use std::path::PathBuf;

use clap::Args;
use labrat_config::{CliSettings, Config};
use labrat_feed::{FeedError, OffsetUnit, Post, post_spans};
use labrat_render::Span;

use super::render::{UnitArg, read_input};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the spans command.
#[derive(Args)]
pub(crate) struct SpansArgs {
    /// Path to the post JSON file (`-` reads stdin).
    post: PathBuf,

    /// Path to configuration file (default: auto-discover labrat.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Unit the post's entity indices are counted in (overrides config).
    #[arg(long, value_enum)]
    offset_unit: Option<UnitArg>,
}

impl SpansArgs {
    /// Execute the spans command.
    ///
    /// Prints the post's entities as byte-offset spans, the form the
    /// renderer consumes.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the post cannot be read or
    /// parsed, or an entity's indices do not convert.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            offset_unit: self.offset_unit.map(OffsetUnit::from),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let post = Post::from_json(&read_input(&self.post)?)?;
        let spans = post_spans(&post, config.render.offset_unit).map_err(|source| FeedError::Render {
            id: post.id_str.clone(),
            source,
        })?;

        Output::new().result(&format_spans(&spans)?)?;
        Ok(())
    }
}

fn format_spans(spans: &[Span]) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(spans)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_format_spans() {
        let spans = vec![
            Span::mention(0, 5, "jack"),
            Span::link(6, 20, "https://example.com", "example.com"),
        ];
        let value: serde_json::Value = serde_json::from_str(&format_spans(&spans).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                { "start": 0, "end": 5, "kind": "mention", "handle": "jack" },
                {
                    "start": 6,
                    "end": 20,
                    "kind": "link",
                    "url": "https://example.com",
                    "display": "example.com"
                }
            ])
        );
    }

    #[test]
    fn test_format_no_spans() {
        assert_eq!(format_spans(&[]).unwrap(), "[]");
    }
}
