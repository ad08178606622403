//! Issue listing components

use maud::{Markup, PreEscaped, html};

use crate::issue::{Issue, Label};

use super::labels::label_chips;

/// Wraps issue rows in list container
///
/// # Arguments
///
/// * `rows`: Markup containing individual issue row elements
///
/// # Returns
///
/// Issue list wrapper with rows
pub fn issue_table(rows: Markup) -> Markup {
    html! {
        section class="issue-list" {
            (rows)
        }
    }
}

/// Renders single issue row
///
/// Displays title, date, summary and labels. The summary is rendered HTML
/// and is inserted unescaped.
///
/// # Arguments
///
/// * `issue`: Issue to list
/// * `formatted_date`: Pre-formatted timestamp string
/// * `selected`: Label of the current page, if any
///
/// # Returns
///
/// Issue row markup linking to the issue page
pub fn issue_row(issue: &Issue, formatted_date: &str, selected: Option<&Label>) -> Markup {
    html! {
        article class="issue-row" {
            header {
                a href=(issue.link) class="issue-title" { (issue.title) }
                time class="issue-date" datetime=(issue.created.to_rfc3339()) { (formatted_date) }
            }
            @if !issue.summary.is_empty() {
                div class="issue-summary markdown-body" { (PreEscaped(&issue.summary)) }
            }
            (label_chips(&issue.labels, selected))
        }
    }
}
