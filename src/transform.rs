//! Conversion of raw tracker issues into publishable issues.

use tracing::debug;

use crate::html;
use crate::issue::{Issue, Label, RawIssue, issue_link};
use crate::markdown::MarkdownRenderer;

/// Label that keeps an issue out of the blog entirely.
pub const DRAFT_LABEL: &str = "draft";

/// Transforms raw issues in source order.
///
/// Issues without a title or carrying the [`DRAFT_LABEL`] are omitted; the
/// remaining ones keep their relative order.
///
/// # Arguments
///
/// * `raw`: Issues as delivered by the issue source
/// * `markdown`: Renderer for issue bodies
///
/// # Returns
///
/// Published issues, cross-links not yet rewritten
pub fn transform_issues(raw: &[RawIssue], markdown: &MarkdownRenderer) -> Vec<Issue> {
    raw.iter()
        .filter_map(|issue| transform_issue(issue, markdown))
        .collect()
}

/// Transforms a single raw issue.
///
/// # Returns
///
/// `None` when the issue has an empty title or is labeled as draft
pub fn transform_issue(raw: &RawIssue, markdown: &MarkdownRenderer) -> Option<Issue> {
    if raw.title.is_empty() {
        debug!(number = raw.number, "Skipping issue without title");
        return None;
    }

    let mut labels = Vec::with_capacity(raw.labels.len());
    for raw_label in &raw.labels {
        if raw_label.name == DRAFT_LABEL {
            debug!(number = raw.number, "Skipping draft issue");
            return None;
        }
        labels.push(Label::new(raw_label.name.as_str()));
    }

    let content = markdown.render(raw.body.as_deref().unwrap_or_default());
    let summary = extract_summary(raw.number, &content);

    Some(Issue {
        number: raw.number,
        link: issue_link(raw.number, &raw.title),
        title: raw.title.clone(),
        content,
        summary,
        labels,
        github_link: raw.html_url.clone(),
        created: raw.created_at,
    })
}

fn extract_summary(number: u64, content: &str) -> String {
    match html::first_paragraph(content) {
        Ok(Some(paragraph)) => paragraph,
        Ok(None) => String::new(),
        Err(err) => {
            debug!(number, error = %err, "No summary, first paragraph could not be serialized");
            String::new()
        }
    }
}
