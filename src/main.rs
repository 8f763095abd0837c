use anyhow::{Context, Result};
use mdnote::{Config, MarkdownRenderer};
use std::fs;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = Config::parse();

    // --verbose enables DEBUG, otherwise RUST_LOG or WARN; logs go to stderr
    let filter = if config.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    config.validate().context("Invalid configuration")?;

    let content = config.read_input()?;
    let renderer = MarkdownRenderer::new();
    let html = renderer
        .render(&content, &config.parse_options())
        .context("Failed to render markdown")?;
    config.write_output(&html)?;

    if let Some(path) = &config.stylesheet {
        let css = renderer.highlighter().stylesheet(&config.theme)?;
        fs::write(path, css)
            .with_context(|| format!("Failed to write stylesheet: {}", path.display()))?;
        tracing::info!(path = %path.display(), theme = %config.theme, "Wrote stylesheet");
    }

    Ok(())
}
