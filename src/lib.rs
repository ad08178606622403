//! Static blog generator for GitHub issue trackers.
//!
//! Every open issue of a repository becomes a blog post. Issue bodies are
//! rendered from markdown, links between issues are pointed at the
//! generated pages, and the posts are published with an index, one page per
//! label and an Atom feed.

mod assets;
pub mod components;
pub mod config;
pub mod crosslink;
pub mod error;
pub mod feed;
pub mod html;
pub mod issue;
pub mod labels;
mod markdown;
pub mod output;
pub mod site;
pub mod slug;
pub mod source;
pub mod theme;
pub mod transform;
mod util;

pub use config::{Config, Repository, SiteConfig, SiteMeta};
pub use crosslink::{CrossLinker, rewrite_cross_links};
pub use error::{Error, ParseError, Result};
pub use feed::{FEED_FILE, Feed};
pub use issue::{Issue, Label, RawIssue};
pub use labels::{LabelIndex, LabelPage};
pub use markdown::MarkdownRenderer;
pub use output::{DirSink, MemorySink, OutputSink};
pub use site::{BuildReport, SiteBuilder};
pub use source::{GithubSource, IssueSource, JsonFileSource, retain_authors};
pub use theme::{BuiltinTheme, JinjaTheme, PageContext, Template, TemplateRenderer, ThemeConfig};
pub use transform::{transform_issue, transform_issues};
pub use util::format_relative;
