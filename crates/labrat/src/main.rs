//! labrat CLI - relay message renderer.
//!
//! Provides commands for:
//! - `render`: Compose the chat message for a feed post JSON file
//! - `escape`: Escape text for the chat platform's HTML mode
//! - `spans`: Show a post's entities as renderer byte-offset spans

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{EscapeArgs, RenderArgs, SpansArgs};
use output::Output;

/// labrat - relay bot message renderer.
#[derive(Parser)]
#[command(name = "labrat", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose the chat message for a feed post.
    Render(RenderArgs),
    /// Escape text for HTML parse mode.
    Escape(EscapeArgs),
    /// Show a post's entities as byte-offset spans.
    Spans(SpansArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let verbose = matches!(&cli.command, Commands::Render(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Escape(args) => args.execute(),
        Commands::Spans(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
