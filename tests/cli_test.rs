//! End-to-end tests for the mdnote binary.

use anyhow::Result;
use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn mdnote() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mdnote"))
}

/// Tests rendering a file into an output file.
#[test]
fn test_render_file_to_output() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    let input = dir.path().join("README.md");
    let output = dir.path().join("README.html");
    fs::write(
        &input,
        "# Title\n\n> [!tip]\n> Read [the book](https://doc.rust-lang.org/book/).\n",
    )?;

    // Act
    let status = mdnote().arg(&input).arg("-o").arg(&output).status()?;

    // Assert
    assert!(status.success());
    let html = fs::read_to_string(&output)?;
    assert!(html.contains("<h1>Title</h1>"));
    assert!(html.contains("note-callout callout-tip"), "{}", html);
    assert!(html.contains("the book<sup>[1]</sup>"), "{}", html);
    assert!(html.ends_with("</ol></section>"));
    Ok(())
}

/// Tests reading stdin and writing stdout with inline links.
#[test]
fn test_stdin_to_stdout_inline() -> Result<()> {
    // Arrange
    let mut child = mdnote()
        .args(["--link-style", "inline", "--no-line-numbers"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // Act
    child
        .stdin
        .take()
        .expect("Stdin should be piped")
        .write_all(b"[Docs](https://docs.rs)\n\n```\ncode\n```\n")?;
    let output = child.wait_with_output()?;

    // Assert
    assert!(output.status.success());
    let html = String::from_utf8(output.stdout)?;
    assert!(html.contains("Docs[https://docs.rs]"), "{}", html);
    assert!(html.contains("<section class=\"code-section\"><pre><code>code\n"));
    assert!(!html.contains("footnotes"));
    Ok(())
}

/// Tests writing the highlight stylesheet.
#[test]
fn test_writes_stylesheet() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    let input = dir.path().join("doc.md");
    let output = dir.path().join("doc.html");
    let css = dir.path().join("highlight.css");
    fs::write(&input, "text")?;

    // Act
    let status = mdnote()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--stylesheet")
        .arg(&css)
        .args(["--theme", "base16-ocean.dark"])
        .status()?;

    // Assert
    assert!(status.success());
    assert!(fs::read_to_string(&css)?.contains(".hljs-"));
    Ok(())
}

/// Tests failure on a missing input file.
#[test]
fn test_missing_input_fails() -> Result<()> {
    // Act
    let output = mdnote().arg("no-such-file.md").output()?;

    // Assert
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "{}", stderr);
    Ok(())
}
