//! Navigation breadcrumb component

use maud::{Markup, html};

/// Renders breadcrumb navigation
///
/// Shows the way back to the index from an issue or label page.
///
/// # Arguments
///
/// * `site_title`: Blog title for the root breadcrumb link
/// * `current`: Title of the current page
///
/// # Returns
///
/// Breadcrumb navigation markup
pub fn breadcrumb(site_title: &str, current: &str) -> Markup {
    html! {
        nav class="breadcrumb" {
            a href="index.html" class="breadcrumb-link" { (site_title) }
            span class="breadcrumb-separator" { "/" }
            span class="breadcrumb-current" { (current) }
        }
    }
}
