//! Label chip components

use maud::{Markup, html};

use crate::issue::Label;

/// Renders labels as links to their label pages
///
/// # Arguments
///
/// * `labels`: Labels of one issue
/// * `selected`: Label of the current page, highlighted when present
///
/// # Returns
///
/// Label list markup, empty when there are no labels
pub fn label_chips(labels: &[Label], selected: Option<&Label>) -> Markup {
    html! {
        @if !labels.is_empty() {
            ul class="labels" {
                @for label in labels {
                    li {
                        @if selected == Some(label) {
                            a href=(label.link) class="label label-active" { (label.name) }
                        } @else {
                            a href=(label.link) class="label" { (label.name) }
                        }
                    }
                }
            }
        }
    }
}
