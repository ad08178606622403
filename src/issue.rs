//! Raw and transformed issue records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::slug::slugify;

/// Issue record as delivered by the GitHub REST API.
///
/// Only the fields the blog needs are decoded; everything else in the
/// payload is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIssue {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub labels: Vec<RawLabel>,
    #[serde(default)]
    pub user: Option<RawUser>,
    /// Present when the entry is a pull request
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl RawIssue {
    /// Returns whether the API entry describes a pull request.
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    /// Returns login of the issue author, if reported.
    pub fn author(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.login.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLabel {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUser {
    pub login: String,
}

/// Label attached to a published issue.
///
/// Labels are value objects: two labels with the same name are equal.
#[derive(Debug, Clone, Eq, Serialize)]
pub struct Label {
    pub name: String,
    /// Page listing every issue with this label
    pub link: String,
}

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let link = format!("label-{}.html", name);
        Self { name, link }
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Hash for Label {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Issue ready for page generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    /// Relative page name, `<number>-<slug>.html`
    pub link: String,
    /// Rendered body HTML
    pub content: String,
    /// Inner HTML of the first paragraph of `content`
    pub summary: String,
    pub labels: Vec<Label>,
    /// Issue page on GitHub
    pub github_link: String,
    pub created: DateTime<Utc>,
}

impl Issue {
    /// Returns whether the issue carries a label with given name.
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label.name == name)
    }
}

/// Builds the page name for an issue.
pub fn issue_link(number: u64, title: &str) -> String {
    format!("{}-{}.html", number, slugify(title))
}
