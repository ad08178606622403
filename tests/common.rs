//! Shared test utilities for integration tests.
//!
//! Provides builders for raw issues and site configuration, plus helpers
//! for writing issue dumps the way the GitHub API returns them.

#![allow(dead_code)]

use anyhow::Result;
use chrono::{TimeZone, Utc};
use issueblog::SiteConfig;
use issueblog::issue::{RawIssue, RawLabel, RawUser};
use std::fs;
use std::path::{Path, PathBuf};

/// Repository owner used by all fixtures.
pub const OWNER: &str = "jane";

/// Repository name used by all fixtures.
pub const REPO: &str = "notes";

/// Tracker base URL of the fixture repository.
pub const ISSUES_URL: &str = "https://github.com/jane/notes/issues/";

/// Site configuration TOML for the fixture repository.
pub const SITE_TOML: &str = r#"
[site]
title = "Jane's Notes"
author = "Jane"
mail = "jane@example.com"
description = "Things I learned"

[repository]
owner = "jane"
name = "notes"

[custom]
twitter = "@jane"
"#;

/// Parses the fixture site configuration.
pub fn site_config() -> SiteConfig {
    SITE_TOML.parse().expect("Fixture config should parse")
}

/// Creates raw issue authored by the repository owner.
///
/// # Arguments
///
/// * `number`: Issue number; also used as day of January 2024 for creation
/// * `title`: Issue title
/// * `body`: Markdown body
/// * `labels`: Label names
///
/// # Returns
///
/// Raw issue as the GitHub API would deliver it
pub fn raw_issue(number: u64, title: &str, body: &str, labels: &[&str]) -> RawIssue {
    RawIssue {
        number,
        title: title.to_string(),
        body: Some(body.to_string()),
        created_at: Utc
            .with_ymd_and_hms(2024, 1, (number % 28 + 1) as u32, 9, 0, 0)
            .unwrap(),
        html_url: format!("{}{}", ISSUES_URL, number),
        labels: labels
            .iter()
            .map(|name| RawLabel {
                name: name.to_string(),
            })
            .collect(),
        user: Some(RawUser {
            login: OWNER.to_string(),
        }),
        pull_request: None,
    }
}

/// Renders raw issues as a GitHub issues API response.
pub fn issues_json(issues: &[RawIssue]) -> String {
    let entries: Vec<serde_json::Value> = issues
        .iter()
        .map(|issue| {
            serde_json::json!({
                "number": issue.number,
                "title": issue.title,
                "body": issue.body,
                "created_at": issue.created_at.to_rfc3339(),
                "html_url": issue.html_url,
                "labels": issue.labels.iter().map(|l| serde_json::json!({"name": l.name})).collect::<Vec<_>>(),
                "user": issue.author().map(|login| serde_json::json!({"login": login})),
            })
        })
        .collect();
    serde_json::Value::Array(entries).to_string()
}

/// Writes a file below `dir`, returning its path.
///
/// # Errors
///
/// Returns error if the file cannot be written
pub fn write_file(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

/// Path of the sample theme shipped with the repository.
pub fn sample_theme() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("themes/plain")
}
