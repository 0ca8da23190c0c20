//! Define cli and config options

use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;
use style_engine::ProcessorOptions;

/// Style engine CLI
///
/// Reads a json document of stores and rules, and prints the combined css.
#[derive(Parser)]
#[clap(version, about, author)]
pub(crate) struct Cli {
    /// The json document to read, `-` for stdin
    pub(crate) input: PathBuf,
    /// Write the css to this file instead of stdout
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,
    /// Keep selectors with identical declarations as separate rules
    #[arg(long)]
    pub(crate) no_optimize: bool,
    /// Use newlines and indentation in the output
    #[arg(long, conflicts_with = "compact")]
    pub(crate) pretty: bool,
    /// Output everything without extra whitespace
    #[arg(long)]
    pub(crate) compact: bool,
    /// Run the output through a css minifier
    #[arg(long)]
    pub(crate) minify: bool,
    /// Log more, can be repeated
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub(crate) verbose: u8,
}

/// The `options` section of the input document
#[derive(Deserialize, Default, Clone, Copy)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub(crate) struct DocumentOptions {
    /// Combine selectors with identical declarations
    pub(crate) optimize: Option<bool>,
    /// Prettify the output
    pub(crate) prettify: Option<bool>,
}

impl Cli {
    /// The log level selected by the `verbose` flag
    pub(crate) fn log_level(&self) -> log::Level {
        match self.verbose {
            0 => log::Level::Warn,
            1 => log::Level::Info,
            2 => log::Level::Debug,
            _ => log::Level::Trace,
        }
    }

    /// Resolve the processor options.
    ///
    /// Flags win over the document options, which win over the defaults.
    pub(crate) fn processor_options(&self, document: DocumentOptions) -> ProcessorOptions {
        let defaults = ProcessorOptions::default();

        let optimize = if self.no_optimize {
            false
        } else {
            document.optimize.unwrap_or(defaults.optimize)
        };

        let prettify = if self.pretty {
            true
        } else if self.compact {
            false
        } else {
            document.prettify.unwrap_or(defaults.prettify)
        };

        ProcessorOptions { optimize, prettify }
    }
}
