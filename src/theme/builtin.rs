//! Built-in maud theme, used when no theme directory is given.

use maud::{Markup, PreEscaped, html};

use super::{Asset, PageContext, Template, TemplateRenderer};
use crate::assets::{STYLESHEET, css_assets};
use crate::components::issue_list::{issue_row, issue_table};
use crate::components::labels::label_chips;
use crate::components::layout::page_wrapper;
use crate::components::nav::breadcrumb;
use crate::error::{Error, Result};
use crate::issue::Issue;
use crate::util::{format_date, format_relative};

/// Renders the default pages without any template files.
///
/// Knows the `issue.html` and `index.html` templates; layouts are ignored
/// since every page carries the same wrapper.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTheme;

impl BuiltinTheme {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for BuiltinTheme {
    fn render(&self, template: &Template, context: &PageContext<'_>) -> Result<String> {
        let markup = match (template.source.as_str(), context.issue) {
            ("issue.html", Some(issue)) => issue_page(issue, context),
            ("issue.html", None) => {
                return Err(Error::render(&template.target, "issue page without issue"));
            }
            ("index.html", _) => index_page(context),
            (other, _) => {
                return Err(Error::render(
                    &template.target,
                    format!("built-in theme has no template {}", other),
                ));
            }
        };
        Ok(markup.into_string())
    }

    fn assets(&self) -> Result<Vec<Asset>> {
        Ok(css_assets())
    }
}

/// Renders one issue with full content.
fn issue_page(issue: &Issue, context: &PageContext<'_>) -> Markup {
    let site_title = &context.site.title;

    page_wrapper(
        &issue.title,
        site_title,
        &[STYLESHEET],
        html! {
            (breadcrumb(site_title, &issue.title))
            article class="issue" {
                header class="issue-header" {
                    h1 { (issue.title) }
                    div class="issue-meta" {
                        time datetime=(issue.created.to_rfc3339()) title=(format_date(issue.created)) {
                            (format_relative(issue.created, context.today))
                        }
                        " by " (context.site.author)
                    }
                    (label_chips(&issue.labels, None))
                }
                div class="issue-content markdown-body" {
                    (PreEscaped(&issue.content))
                }
                @if !issue.github_link.is_empty() {
                    footer class="issue-discuss" {
                        a href=(issue.github_link) { "Discuss on GitHub" }
                    }
                }
            }
        },
    )
}

/// Renders issue list, for the index and for label pages.
fn index_page(context: &PageContext<'_>) -> Markup {
    let site_title = &context.site.title;
    let heading = context
        .selected_label
        .map(|label| format!("Posts labeled {}", label.name));

    let rows = html! {
        @for issue in &context.issues {
            (issue_row(issue, &format_date(issue.created), context.selected_label))
        }
    };

    page_wrapper(
        heading.as_deref().unwrap_or(site_title),
        site_title,
        &[STYLESHEET],
        html! {
            @if let Some(heading) = &heading {
                (breadcrumb(site_title, heading))
                h1 { (heading) }
            } @else if let Some(description) = &context.site.description {
                p class="site-description" { (description) }
            }
            @if context.issues.is_empty() {
                p class="empty" { "Nothing published yet." }
            } @else {
                (issue_table(rows))
            }
        },
    )
}
