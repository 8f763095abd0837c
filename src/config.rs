//! Command line configuration.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::highlight::DEFAULT_THEME;
use crate::options::{LinkStyle, ParseOptions};

/// Command line configuration for mdnote.
#[derive(Debug, Clone, Parser)]
#[command(name = "mdnote", version, about, long_about = None)]
pub struct Config {
    /// Markdown file to render, reads stdin when omitted or "-"
    pub input: Option<PathBuf>,

    /// Output file, writes stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Render code blocks without the line-number gutter
    #[arg(long)]
    pub no_line_numbers: bool,

    /// How external links are presented
    #[arg(long, value_enum, default_value_t = LinkStyle::Footnote)]
    pub link_style: LinkStyle,

    /// Extra URL prefix whose links are left untouched (repeatable)
    #[arg(long = "exempt-prefix", value_name = "PREFIX")]
    pub exempt_prefixes: Vec<String>,

    /// Syntax highlighting theme for --stylesheet (InspiredGitHub, base16-ocean.dark, etc.)
    #[arg(long, default_value = DEFAULT_THEME)]
    pub theme: String,

    /// Write the syntax highlighting stylesheet to this path
    #[arg(long, value_name = "PATH")]
    pub stylesheet: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the input file does not exist or an exempt prefix
    /// is empty.
    pub fn validate(&self) -> Result<()> {
        if let Some(input) = self.input_path()
            && !input.is_file()
        {
            bail!("Input file does not exist: {}", input.display());
        }

        if self.exempt_prefixes.iter().any(|p| p.is_empty()) {
            bail!("Exempt prefix must not be empty");
        }

        Ok(())
    }

    /// Builds render options, adding extra exempt prefixes to the defaults.
    pub fn parse_options(&self) -> ParseOptions {
        let mut options = ParseOptions::new(!self.no_line_numbers, self.link_style);
        options
            .exempt_prefixes
            .extend(self.exempt_prefixes.iter().cloned());
        options
    }

    /// Reads markdown from the input file or stdin.
    ///
    /// # Errors
    ///
    /// Returns error if reading fails or the input is not UTF-8.
    pub fn read_input(&self) -> Result<String> {
        match self.input_path() {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read input: {}", path.display())),
            None => {
                let mut content = String::new();
                io::stdin()
                    .read_to_string(&mut content)
                    .context("Failed to read stdin")?;
                Ok(content)
            }
        }
    }

    /// Writes rendered HTML to the output file or stdout.
    ///
    /// # Errors
    ///
    /// Returns error if writing fails.
    pub fn write_output(&self, html: &str) -> Result<()> {
        match &self.output {
            Some(path) => fs::write(path, html)
                .with_context(|| format!("Failed to write output: {}", path.display())),
            None => {
                let mut stdout = io::stdout().lock();
                stdout
                    .write_all(html.as_bytes())
                    .and_then(|_| stdout.flush())
                    .context("Failed to write stdout")
            }
        }
    }

    /// Input path, or None when reading stdin.
    fn input_path(&self) -> Option<&Path> {
        self.input
            .as_deref()
            .filter(|path| *path != Path::new("-"))
    }
}
