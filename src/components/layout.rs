//! Page layout wrapper component

use maud::{DOCTYPE, Markup, html};

use crate::feed::FEED_FILE;

/// Wraps page content with standard HTML structure
///
/// Provides consistent DOCTYPE, head, site header and footer across all
/// built-in pages. The head advertises the Atom feed so readers can
/// discover it from any page.
///
/// # Arguments
///
/// * `title`: Page title text (without suffix)
/// * `site_title`: Blog title, appended to the page title and shown in the header
/// * `stylesheets`: CSS file paths to include
/// * `body`: Page-specific body markup
///
/// # Returns
///
/// Complete HTML document with wrapped content
pub fn page_wrapper(title: &str, site_title: &str, stylesheets: &[&str], body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if title == site_title {
                    title { (site_title) }
                } @else {
                    title { (title) " - " (site_title) }
                }
                link rel="alternate" type="application/atom+xml" title=(site_title) href=(FEED_FILE);
                @for stylesheet in stylesheets {
                    link rel="stylesheet" href=(stylesheet);
                }
            }
            body {
                header class="site-header" {
                    a href="index.html" class="site-title" { (site_title) }
                }
                main class="container" {
                    (body)
                }
                (footer())
            }
        }
    }
}

fn footer() -> Markup {
    html! {
        footer class="site-footer" {
            a href=(FEED_FILE) { "Atom feed" }
            span class="footer-separator" { "·" }
            span { "Generated by issueblog" }
        }
    }
}
