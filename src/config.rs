//! Command line and site configuration.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Command line configuration for issueblog.
#[derive(Debug, Clone, Parser)]
#[command(name = "issueblog", version, about, long_about = None)]
pub struct Config {
    /// Site configuration file
    #[arg(short, long, default_value = "blog.toml")]
    pub config: PathBuf,

    /// Theme directory (built-in theme when omitted)
    #[arg(short, long)]
    pub theme: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "dist")]
    pub output: PathBuf,

    /// Read issues from a JSON file instead of the GitHub API
    #[arg(long)]
    pub issues: Option<PathBuf>,

    /// Open generated index in a browser
    #[arg(long)]
    pub open: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the site config, the theme directory or the issue
    /// file does not exist.
    pub fn validate(&self) -> Result<()> {
        if !self.config.is_file() {
            return Err(Error::Config(format!(
                "site config does not exist: {}",
                self.config.display()
            )));
        }
        if let Some(theme) = &self.theme
            && !theme.is_dir()
        {
            return Err(Error::Config(format!(
                "theme directory does not exist: {}",
                theme.display()
            )));
        }
        if let Some(issues) = &self.issues
            && !issues.is_file()
        {
            return Err(Error::Config(format!(
                "issue file does not exist: {}",
                issues.display()
            )));
        }
        Ok(())
    }
}

/// Site configuration file contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site: SiteMeta,
    pub repository: Repository,
    /// Free-form values handed to templates as `custom`
    #[serde(default)]
    pub custom: BTreeMap<String, toml::Value>,
}

/// Blog metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteMeta {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub mail: Option<String>,
    /// One line description, used as feed subtitle
    #[serde(default)]
    pub description: Option<String>,
    /// Public base URL, defaults to the GitHub Pages URL of the repository
    #[serde(default)]
    pub url: Option<String>,
}

/// Repository whose issues make up the blog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub owner: String,
    pub name: String,
    /// Logins whose issues are published; everyone when empty
    #[serde(default)]
    pub authors: Vec<String>,
}

impl Repository {
    /// Issue tracker base URL, `https://github.com/<owner>/<name>/issues/`.
    pub fn issues_url(&self) -> String {
        format!("https://github.com/{}/{}/issues/", self.owner, self.name)
    }

    /// GitHub Pages URL of the repository.
    pub fn pages_url(&self) -> String {
        format!("https://{}.github.io/{}", self.owner, self.name)
    }
}

impl SiteConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or decoded
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }

    /// Public base URL of the blog without trailing slash.
    pub fn base_url(&self) -> String {
        match &self.site.url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => self.repository.pages_url(),
        }
    }
}

impl std::str::FromStr for SiteConfig {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(text)?;
        if config.repository.owner.is_empty() || config.repository.name.is_empty() {
            return Err(Error::Config(
                "repository owner and name must not be empty".to_string(),
            ));
        }
        Ok(config)
    }
}
