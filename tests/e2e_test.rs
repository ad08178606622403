//! End-to-end tests for the issueblog binary.

mod common;

use anyhow::Result;
use common::{SITE_TOML, issues_json, raw_issue, sample_theme, write_file};
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn issueblog() -> Command {
    Command::new(env!("CARGO_BIN_EXE_issueblog"))
}

/// Tests full binary execution from an issue dump with the built-in theme.
#[test]
fn test_binary_builtin_theme() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    let config = write_file(dir.path(), "blog.toml", SITE_TOML)?;
    let issues = write_file(
        dir.path(),
        "issues.json",
        &issues_json(&[
            raw_issue(1, "Hello World", "Hi there.", &["intro"]),
            raw_issue(2, "Draft", "wip", &["draft"]),
        ]),
    )?;
    let output = dir.path().join("dist");

    // Act
    let result = issueblog()
        .arg("--config")
        .arg(&config)
        .arg("--issues")
        .arg(&issues)
        .arg("-o")
        .arg(&output)
        .output()?;

    // Assert
    assert!(
        result.status.success(),
        "Binary failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    assert!(output.join("index.html").is_file());
    assert!(output.join("1-hello-world.html").is_file());
    assert!(output.join("label-intro.html").is_file());
    assert!(output.join("assets/style.css").is_file());
    assert!(!output.join("2-draft.html").exists());

    let index = fs::read_to_string(output.join("index.html"))?;
    assert!(index.contains("Jane's Notes"));

    Ok(())
}

/// Tests binary execution with the sample theme directory.
#[test]
fn test_binary_sample_theme() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    let config = write_file(dir.path(), "blog.toml", SITE_TOML)?;
    let issues = write_file(
        dir.path(),
        "issues.json",
        &issues_json(&[raw_issue(3, "Themed", "Body.", &[])]),
    )?;
    let output = dir.path().join("out");

    // Act
    let status = issueblog()
        .arg("-c")
        .arg(&config)
        .arg("--theme")
        .arg(sample_theme())
        .arg("--issues")
        .arg(&issues)
        .arg("--output")
        .arg(&output)
        .status()?;

    // Assert
    assert!(status.success());
    assert!(output.join("3-themed.html").is_file());
    assert!(output.join("archive.html").is_file());
    assert!(output.join("plain.css").is_file());
    let feed = fs::read_to_string(output.join("atom.xml"))?;
    assert!(feed.contains("<title>Themed</title>"));

    Ok(())
}

/// Tests binary rejects a missing site configuration.
#[test]
fn test_binary_missing_config() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;

    // Act
    let result = issueblog()
        .arg("--config")
        .arg(dir.path().join("missing.toml"))
        .arg("-o")
        .arg(dir.path().join("dist"))
        .output()?;

    // Assert
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Invalid configuration"), "stderr: {}", stderr);
    assert!(!dir.path().join("dist").exists());

    Ok(())
}
