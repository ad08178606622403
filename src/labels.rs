//! Grouping of published issues by label.

use std::collections::HashMap;

use crate::issue::{Issue, Label};

/// Issues sharing one label, rendered as one page.
#[derive(Debug, Clone)]
pub struct LabelPage<'a> {
    /// First label instance seen with this name
    pub label: &'a Label,
    /// Issues carrying the label, in publication order
    pub issues: Vec<&'a Issue>,
}

impl LabelPage<'_> {
    /// Output file of the page.
    pub fn target(&self) -> &str {
        &self.label.link
    }
}

/// Label pages of a set of published issues.
///
/// Pages are ordered by the first appearance of their label.
#[derive(Debug, Clone, Default)]
pub struct LabelIndex<'a> {
    pages: Vec<LabelPage<'a>>,
    by_name: HashMap<&'a str, usize>,
}

impl<'a> LabelIndex<'a> {
    /// Groups issues by label.
    ///
    /// An issue with N labels shows up on N pages, and only once per page
    /// even if its label list repeats a name.
    pub fn build(issues: &'a [Issue]) -> Self {
        let mut index = Self::default();

        for issue in issues {
            for label in &issue.labels {
                let slot = match index.by_name.get(label.name.as_str()) {
                    Some(&slot) => slot,
                    None => {
                        index.pages.push(LabelPage {
                            label,
                            issues: Vec::new(),
                        });
                        let slot = index.pages.len() - 1;
                        index.by_name.insert(label.name.as_str(), slot);
                        slot
                    }
                };

                let page = &mut index.pages[slot];
                if !page.issues.last().is_some_and(|last| std::ptr::eq(*last, issue)) {
                    page.issues.push(issue);
                }
            }
        }

        index
    }

    /// Returns page for given label name.
    pub fn get(&self, name: &str) -> Option<&LabelPage<'a>> {
        self.by_name.get(name).map(|&slot| &self.pages[slot])
    }

    /// Returns all pages.
    pub fn pages(&self) -> &[LabelPage<'a>] {
        &self.pages
    }

    /// Number of label pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns whether no issue carries a label.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
