//! Directory themes rendered with minijinja.

use minijinja::value::Value;
use minijinja::{Environment, context, path_loader};
use std::fs;
use std::path::{Path, PathBuf};

use super::{Asset, PageContext, Template, ThemeConfig, TemplateRenderer};
use crate::error::{Error, Result};

/// Theme loaded from a directory of minijinja templates.
///
/// Templates are looked up relative to the theme directory. Files ending in
/// `.html` are autoescaped, so rendered markdown must be emitted with the
/// `safe` filter.
#[derive(Debug)]
pub struct JinjaTheme {
    dir: PathBuf,
    env: Environment<'static>,
    assets: Vec<String>,
}

impl JinjaTheme {
    /// Creates theme reading templates from `dir`.
    ///
    /// # Arguments
    ///
    /// * `dir`: Theme directory
    /// * `config`: Theme manifest, providing the asset list
    pub fn new(dir: impl Into<PathBuf>, config: &ThemeConfig) -> Self {
        let dir = dir.into();
        let mut env = Environment::new();
        env.set_loader(path_loader(&dir));
        env.add_filter("date", ext::date);
        env.add_filter("ago", ext::ago);

        Self {
            dir,
            env,
            assets: config.assets.clone(),
        }
    }

    /// Theme directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn render_named(&self, name: &str, target: &str, context: Value) -> Result<String> {
        let template = self
            .env
            .get_template(name)
            .map_err(|e| Error::render(target, e))?;
        template.render(context).map_err(|e| Error::render(target, e))
    }
}

impl TemplateRenderer for JinjaTheme {
    fn render(&self, template: &Template, context: &PageContext<'_>) -> Result<String> {
        let page = Value::from_serialize(context);
        let body = self.render_named(&template.source, &template.target, page.clone())?;

        match &template.layout {
            Some(layout) => self.render_named(
                layout,
                &template.target,
                context! { content => Value::from_safe_string(body), ..page },
            ),
            None => Ok(body),
        }
    }

    fn assets(&self) -> Result<Vec<Asset>> {
        self.assets
            .iter()
            .map(|path| {
                let source = self.dir.join(path);
                let contents = fs::read(&source).map_err(|e| Error::Io {
                    path: source,
                    source: e,
                })?;
                Ok(Asset {
                    path: path.clone(),
                    contents,
                })
            })
            .collect()
    }
}

mod ext {
    use chrono::{DateTime, Utc};
    use minijinja::value::Value;
    use std::fmt::Write;
    use minijinja::{Error, ErrorKind, State};

    use crate::util::format_relative;

    const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

    fn parse(value: &str) -> Result<DateTime<Utc>, Error> {
        value.parse::<DateTime<Utc>>().map_err(|e| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("failed to parse {value}: {e}"),
            )
        })
    }

    /// `{{ issue.created | date("%d %b %Y") }}`
    pub fn date(value: &str, fmt: Option<&str>) -> Result<String, Error> {
        let time = parse(value)?;
        let fmt = fmt.unwrap_or(DEFAULT_DATE_FORMAT);

        // chrono reports unknown specifiers as a formatting error
        let mut out = String::new();
        write!(out, "{}", time.format(fmt)).map_err(|_| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("invalid date format {fmt:?}"),
            )
        })?;
        Ok(out)
    }

    /// `{{ issue.created | ago }}`, relative to the page's `today`.
    pub fn ago(state: &State, value: &str) -> Result<String, Error> {
        let then = parse(value)?;
        let now = match state.lookup("today").as_ref().and_then(Value::as_str) {
            Some(today) => parse(today)?,
            None => Utc::now(),
        };
        Ok(format_relative(then, now))
    }
}
