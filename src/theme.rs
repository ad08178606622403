//! Themes and template rendering.
//!
//! A theme turns a [`PageContext`] into an HTML page. Directory themes are
//! rendered with minijinja ([`JinjaTheme`]); without a theme directory the
//! built-in maud pages are used ([`BuiltinTheme`]).

mod builtin;
mod jinja;

pub use builtin::BuiltinTheme;
pub use jinja::JinjaTheme;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::config::{Repository, SiteConfig, SiteMeta};
use crate::error::{Error, Result};
use crate::issue::{Issue, Label};

/// Template reference from a theme manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Template file, relative to the theme directory
    pub source: String,
    /// Layout wrapping the rendered template as `content`
    #[serde(default)]
    pub layout: Option<String>,
    /// Output file; per-issue and per-label pages set their own
    #[serde(default)]
    pub target: String,
}

impl Template {
    /// Creates template without layout.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            layout: None,
            target: target.into(),
        }
    }

    /// Wraps template in given layout.
    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    /// Returns copy writing to another target.
    pub fn retarget(&self, target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..self.clone()
        }
    }

    fn default_issue() -> Self {
        Template::new("issue.html", "").with_layout("layout.html")
    }

    fn default_index() -> Self {
        Template::new("index.html", "index.html").with_layout("layout.html")
    }
}

/// Theme manifest, `theme.toml` in the theme directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default = "Template::default_issue")]
    pub issue: Template,
    #[serde(default = "Template::default_index")]
    pub index: Template,
    /// Label pages; the index template is used when absent
    #[serde(default)]
    pub label: Option<Template>,
    /// Additional pages rendered over all issues
    #[serde(default)]
    pub pages: Vec<Template>,
    /// Static files copied verbatim to the output
    #[serde(default)]
    pub assets: Vec<String>,
    /// Free-form theme settings
    #[serde(default)]
    pub extra: BTreeMap<String, toml::Value>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            issue: Template::default_issue(),
            index: Template::default_index(),
            label: None,
            pages: Vec::new(),
            assets: Vec::new(),
            extra: BTreeMap::new(),
        }
    }
}

impl ThemeConfig {
    /// Manifest file name inside a theme directory.
    pub const MANIFEST: &'static str = "theme.toml";

    /// Loads manifest of a theme directory.
    ///
    /// A directory without manifest uses the default template names.
    ///
    /// # Errors
    ///
    /// Returns error if the manifest cannot be read, decoded or names a
    /// page without target
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let path = dir.join(Self::MANIFEST);

        if !path.exists() {
            let name = dir
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("default")
                .to_string();
            return Ok(Self {
                name,
                ..Self::default()
            });
        }

        let text = fs::read_to_string(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        text.parse()
    }

    /// Template for label pages.
    pub fn label_template(&self) -> &Template {
        self.label.as_ref().unwrap_or(&self.index)
    }
}

impl std::str::FromStr for ThemeConfig {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let config: ThemeConfig = toml::from_str(text)?;

        if config.index.target.is_empty() {
            return Err(Error::Config("index template needs a target".to_string()));
        }
        if let Some(page) = config.pages.iter().find(|page| page.target.is_empty()) {
            return Err(Error::Config(format!(
                "page template {} needs a target",
                page.source
            )));
        }
        Ok(config)
    }
}

/// Data available to templates.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext<'a> {
    pub site: &'a SiteMeta,
    pub repository: &'a Repository,
    /// Public base URL of the blog
    pub base_url: String,
    /// Generation time
    pub today: DateTime<Utc>,
    /// Issues shown on the page
    pub issues: Vec<&'a Issue>,
    /// Set on issue pages
    pub issue: Option<&'a Issue>,
    /// Set on label pages
    pub selected_label: Option<&'a Label>,
    pub custom: &'a BTreeMap<String, toml::Value>,
    pub theme: &'a ThemeConfig,
}

impl<'a> PageContext<'a> {
    /// Creates context without issues.
    pub fn new(config: &'a SiteConfig, theme: &'a ThemeConfig, today: DateTime<Utc>) -> Self {
        Self {
            site: &config.site,
            repository: &config.repository,
            base_url: config.base_url(),
            today,
            issues: Vec::new(),
            issue: None,
            selected_label: None,
            custom: &config.custom,
            theme,
        }
    }

    /// Sets issues listed on the page.
    pub fn with_issues(mut self, issues: impl IntoIterator<Item = &'a Issue>) -> Self {
        self.issues = issues.into_iter().collect();
        self
    }

    pub fn with_issue(mut self, issue: &'a Issue) -> Self {
        self.issue = Some(issue);
        self.issues = vec![issue];
        self
    }

    pub fn with_label(mut self, label: &'a Label) -> Self {
        self.selected_label = Some(label);
        self
    }
}

/// Static file shipped by a theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Output path relative to the site root
    pub path: String,
    pub contents: Vec<u8>,
}

/// Renders theme templates.
pub trait TemplateRenderer {
    /// Renders template, wrapped in its layout when it has one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the template is missing or fails
    fn render(&self, template: &Template, context: &PageContext<'_>) -> Result<String>;

    /// Static files to copy next to the generated pages.
    ///
    /// # Errors
    ///
    /// Returns error if an asset cannot be read
    fn assets(&self) -> Result<Vec<Asset>> {
        Ok(Vec::new())
    }
}
