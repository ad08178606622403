//! Rewriting of links between issues of the same repository.
//!
//! Issue bodies often point at other issues through their GitHub URL. Once
//! the blog is generated those links should stay inside the blog, so every
//! anchor pointing at `https://github.com/<owner>/<repo>/issues/<number>`
//! is redirected to the generated page of that issue, provided it was
//! published.

use std::collections::HashMap;
use tracing::warn;

use crate::error::ParseError;
use crate::html;
use crate::issue::Issue;

/// Resolves issue tracker URLs to generated page names.
pub struct CrossLinker<'a> {
    issues_url: &'a str,
    links: HashMap<u64, String>,
}

impl<'a> CrossLinker<'a> {
    /// Creates resolver over the published issues.
    ///
    /// # Arguments
    ///
    /// * `issues_url`: Tracker base URL, `https://github.com/<owner>/<repo>/issues/`
    /// * `issues`: Published issues; the first issue with a number wins
    pub fn new(issues_url: &'a str, issues: &[Issue]) -> Self {
        let mut links = HashMap::with_capacity(issues.len());
        for issue in issues {
            links
                .entry(issue.number)
                .or_insert_with(|| issue.link.clone());
        }
        Self { issues_url, links }
    }

    /// Resolves an href to the page of a published issue.
    ///
    /// Only the part after the tracker base URL is considered. Spaces and
    /// slashes around it are trimmed and the rest must parse as a number,
    /// so fragments and query strings leave the link unresolved.
    ///
    /// # Returns
    ///
    /// Page name of the linked issue, `None` for any other link
    pub fn resolve(&self, href: &str) -> Option<&str> {
        let rest = href.strip_prefix(self.issues_url)?;
        let number: u64 = rest.trim_matches(|c: char| c == ' ' || c == '/').parse().ok()?;
        self.links.get(&number).map(String::as_str)
    }

    /// Rewrites all resolvable anchors of an HTML fragment.
    ///
    /// # Errors
    ///
    /// Returns error if the rewritten fragment cannot be serialized
    pub fn rewrite(&self, content: &str) -> Result<String, ParseError> {
        html::rewrite_links(content, |href| self.resolve(href).map(str::to_string))
    }
}

/// Rewrites cross-links in the content of every issue in place.
///
/// Content that cannot be re-serialized is left as it was.
///
/// # Arguments
///
/// * `issues`: Published issues
/// * `issues_url`: Tracker base URL, `https://github.com/<owner>/<repo>/issues/`
pub fn rewrite_cross_links(issues: &mut [Issue], issues_url: &str) {
    let linker = CrossLinker::new(issues_url, issues);

    for issue in issues.iter_mut() {
        match linker.rewrite(&issue.content) {
            Ok(content) => issue.content = content,
            Err(err) => warn!(
                number = issue.number,
                error = %err,
                "Keeping original content, cross-links not rewritten"
            ),
        }
    }
}
