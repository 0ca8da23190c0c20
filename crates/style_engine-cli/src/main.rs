//! Command line front end for the style engine

use clap::Parser;

/// Reusable imports
mod prelude {
    pub use anyhow::{Context, Result, anyhow};
    pub use owo_colors::OwoColorize;
}

use prelude::*;

mod document;
mod minify;
mod options;

fn main() -> Result<()> {
    let cli = options::Cli::parse();

    if let Err(err) = simple_logger::init_with_level(cli.log_level()) {
        eprintln!("Failed to setup logger {err}");
    }

    let document = document::Document::read(&cli.input)
        .with_context(|| format!("Reading {}", cli.input.display()))?;
    let processor_options = cli.processor_options(document.options);

    let mut css = document.into_css(processor_options);
    if cli.minify {
        css = minify::minify_css(&css).context("Minifying css")?;
    }

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &css).with_context(|| format!("Writing {}", path.display()))?;
            eprintln!(
                "{} {}",
                "🎨 Wrote".bright_blue(),
                path.display().to_string().bold()
            );
        }
        None => print!("{css}"),
    }

    Ok(())
}
