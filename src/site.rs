//! Site generation pipeline.
//!
//! Ties the pieces together: issues are transformed and cross-linked, then
//! every page, the feed and the theme assets are rendered and handed to an
//! [`OutputSink`]. The first failure aborts the build; files written before
//! it stay where they are.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::SiteConfig;
use crate::crosslink::rewrite_cross_links;
use crate::error::{Error, Result};
use crate::feed::{FEED_FILE, Feed};
use crate::issue::{Issue, RawIssue};
use crate::labels::LabelIndex;
use crate::markdown::MarkdownRenderer;
use crate::output::OutputSink;
use crate::theme::{PageContext, Template, TemplateRenderer, ThemeConfig};
use crate::transform::transform_issues;

/// Summary of a finished build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildReport {
    /// Published issues
    pub issues: usize,
    /// Label pages
    pub labels: usize,
    /// Files handed to the sink
    pub files: usize,
}

/// Builds the blog from raw issues.
pub struct SiteBuilder<'a> {
    config: &'a SiteConfig,
    theme: &'a ThemeConfig,
    renderer: &'a dyn TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl<'a> SiteBuilder<'a> {
    /// Creates builder.
    ///
    /// # Arguments
    ///
    /// * `config`: Site configuration
    /// * `theme`: Theme manifest naming the templates to render
    /// * `renderer`: Renderer for the theme's templates
    pub fn new(
        config: &'a SiteConfig,
        theme: &'a ThemeConfig,
        renderer: &'a dyn TemplateRenderer,
    ) -> Self {
        Self {
            config,
            theme,
            renderer,
            markdown: MarkdownRenderer::new(),
        }
    }

    /// Builds the site, using the current time as generation time.
    ///
    /// # Errors
    ///
    /// Returns the first render or write error
    pub fn build(&self, raw: &[RawIssue], sink: &mut dyn OutputSink) -> Result<BuildReport> {
        self.build_at(raw, sink, Utc::now())
    }

    /// Builds the site with a fixed generation time.
    ///
    /// # Arguments
    ///
    /// * `raw`: Issues in tracker order
    /// * `sink`: Destination of generated files
    /// * `today`: Generation time, shared by all pages and the feed
    ///
    /// # Returns
    ///
    /// Counts of published issues, label pages and written files
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - A template fails to render
    /// - The feed contains text XML cannot represent
    /// - A file cannot be written
    pub fn build_at(
        &self,
        raw: &[RawIssue],
        sink: &mut dyn OutputSink,
        today: DateTime<Utc>,
    ) -> Result<BuildReport> {
        let issues = self.prepare_issues(raw);
        info!(
            published = issues.len(),
            skipped = raw.len() - issues.len(),
            "Transformed issues"
        );

        let mut writer = CountingSink { sink, files: 0 };
        let base = PageContext::new(self.config, self.theme, today);

        for issue in &issues {
            let template = self.theme.issue.retarget(&issue.link);
            self.render_page(&mut writer, &template, &base.clone().with_issue(issue))?;
        }

        let feed = Feed::build(&issues, self.config, today).to_atom()?;
        writer.write(FEED_FILE, feed.as_bytes())?;

        let all = base.clone().with_issues(&issues);
        self.render_page(&mut writer, &self.theme.index, &all)?;

        let labels = LabelIndex::build(&issues);
        let label_template = self.theme.label_template();
        for page in labels.pages() {
            let context = base
                .clone()
                .with_issues(page.issues.iter().copied())
                .with_label(page.label);
            self.render_page(&mut writer, &label_template.retarget(page.target()), &context)?;
        }

        for template in &self.theme.pages {
            self.render_page(&mut writer, template, &all)?;
        }

        for asset in self.renderer.assets()? {
            writer.write(&asset.path, &asset.contents)?;
        }

        let report = BuildReport {
            issues: issues.len(),
            labels: labels.len(),
            files: writer.files,
        };
        info!(
            issues = report.issues,
            labels = report.labels,
            files = report.files,
            "Site generated"
        );
        Ok(report)
    }

    /// Transforms raw issues and rewrites links between them.
    pub fn prepare_issues(&self, raw: &[RawIssue]) -> Vec<Issue> {
        let mut issues = transform_issues(raw, &self.markdown);
        rewrite_cross_links(&mut issues, &self.config.repository.issues_url());
        issues
    }

    fn render_page(
        &self,
        writer: &mut CountingSink<'_>,
        template: &Template,
        context: &PageContext<'_>,
    ) -> Result<()> {
        if template.target.is_empty() {
            return Err(Error::render(&template.source, "template has no target"));
        }
        let html = self.renderer.render(template, context)?;
        debug!(page = %template.target, source = %template.source, "Rendered page");
        writer.write(&template.target, html.as_bytes())
    }
}

struct CountingSink<'s> {
    sink: &'s mut dyn OutputSink,
    files: usize,
}

impl CountingSink<'_> {
    fn write(&mut self, path: &str, contents: &[u8]) -> Result<()> {
        self.sink.write(path, contents)?;
        self.files += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::RawLabel;
    use crate::output::MemorySink;
    use crate::theme::BuiltinTheme;
    use chrono::TimeZone;

    fn config() -> SiteConfig {
        "[site]\ntitle = \"Notes\"\nauthor = \"Jane\"\n[repository]\nowner = \"o\"\nname = \"r\"\n"
            .parse()
            .expect("Should parse config")
    }

    fn raw(number: u64, title: &str, body: &str, labels: &[&str]) -> RawIssue {
        RawIssue {
            number,
            title: title.to_string(),
            body: Some(body.to_string()),
            created_at: Utc.with_ymd_and_hms(2024, 1, number as u32, 0, 0, 0).unwrap(),
            html_url: format!("https://github.com/o/r/issues/{}", number),
            labels: labels
                .iter()
                .map(|name| RawLabel {
                    name: name.to_string(),
                })
                .collect(),
            ..RawIssue::default()
        }
    }

    /// Records every render call instead of producing HTML.
    #[derive(Default)]
    struct RecordingTheme {
        calls: std::cell::RefCell<Vec<(String, String, usize, Option<String>)>>,
    }

    impl TemplateRenderer for RecordingTheme {
        fn render(&self, template: &Template, context: &PageContext<'_>) -> Result<String> {
            self.calls.borrow_mut().push((
                template.source.clone(),
                template.target.clone(),
                context.issues.len(),
                context.selected_label.map(|label| label.name.clone()),
            ));
            Ok(template.source.clone())
        }
    }

    struct FailingTheme;

    impl TemplateRenderer for FailingTheme {
        fn render(&self, template: &Template, _: &PageContext<'_>) -> Result<String> {
            Err(Error::render(&template.target, "boom"))
        }
    }

    /// Stores writes in memory and fails the given write, counting from one.
    struct FailingSink {
        inner: MemorySink,
        fail_on: usize,
        attempts: Vec<String>,
    }

    impl FailingSink {
        fn new(fail_on: usize) -> Self {
            Self {
                inner: MemorySink::new(),
                fail_on,
                attempts: Vec::new(),
            }
        }
    }

    impl OutputSink for FailingSink {
        fn write(&mut self, path: &str, contents: &[u8]) -> Result<()> {
            self.attempts.push(path.to_string());
            if self.attempts.len() == self.fail_on {
                return Err(Error::Write {
                    path: path.into(),
                    source: std::io::Error::new(std::io::ErrorKind::StorageFull, "disk full"),
                });
            }
            self.inner.write(path, contents)
        }
    }

    #[test]
    fn test_build_order_and_targets() {
        // Arrange
        let config = config();
        let theme = ThemeConfig {
            pages: vec![Template::new("about.html", "about.html")],
            ..ThemeConfig::default()
        };
        let renderer = RecordingTheme::default();
        let mut sink = MemorySink::new();
        let raw = vec![
            raw(1, "One", "first", &["rust"]),
            raw(2, "Two", "second", &["rust", "web"]),
        ];

        // Act
        let report = SiteBuilder::new(&config, &theme, &renderer)
            .build(&raw, &mut sink)
            .expect("Should build");

        // Assert
        let targets: Vec<String> = renderer
            .calls
            .borrow()
            .iter()
            .map(|call| call.1.clone())
            .collect();
        assert_eq!(
            targets,
            vec![
                "1-one.html",
                "2-two.html",
                "index.html",
                "label-rust.html",
                "label-web.html",
                "about.html"
            ]
        );
        assert_eq!(report, BuildReport { issues: 2, labels: 2, files: 7 });
        assert!(sink.get(FEED_FILE).is_some());
    }

    #[test]
    fn test_label_pages_get_members_and_selected_label() {
        // Arrange
        let config = config();
        let theme = ThemeConfig::default();
        let renderer = RecordingTheme::default();
        let raw = vec![
            raw(1, "One", "", &["bug"]),
            raw(2, "Two", "", &[]),
            raw(3, "Three", "", &["bug"]),
        ];

        // Act
        SiteBuilder::new(&config, &theme, &renderer)
            .build(&raw, &mut MemorySink::new())
            .unwrap();

        // Assert
        let calls = renderer.calls.borrow();
        let label = calls
            .iter()
            .find(|call| call.1 == "label-bug.html")
            .expect("Should render label page");
        assert_eq!(label.0, "index.html", "Falls back to the index template");
        assert_eq!(label.2, 2);
        assert_eq!(label.3.as_deref(), Some("bug"));
        let index = calls.iter().find(|call| call.1 == "index.html").unwrap();
        assert_eq!(index.2, 3);
        assert_eq!(index.3, None);
    }

    #[test]
    fn test_prepare_issues_rewrites_cross_links() {
        // Arrange
        let config = config();
        let theme = ThemeConfig::default();
        let raw = vec![
            raw(1, "Hello World", "See <https://github.com/o/r/issues/3>", &[]),
            raw(3, "Other", "text", &[]),
        ];

        // Act
        let issues = SiteBuilder::new(&config, &theme, &BuiltinTheme).prepare_issues(&raw);

        // Assert
        assert!(issues[0].content.contains(r#"href="3-other.html""#));
    }

    #[test]
    fn test_render_error_aborts_build() {
        // Arrange
        let config = config();
        let theme = ThemeConfig::default();
        let mut sink = MemorySink::new();
        let raw = vec![raw(1, "One", "", &[])];

        // Act
        let result = SiteBuilder::new(&config, &theme, &FailingTheme).build(&raw, &mut sink);

        // Assert
        assert!(matches!(result, Err(Error::Render { target, .. }) if target == "1-one.html"));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_empty_build_writes_index_and_feed() {
        // Arrange
        let config = config();
        let theme = ThemeConfig::default();
        let mut sink = MemorySink::new();

        // Act
        let report = SiteBuilder::new(&config, &theme, &BuiltinTheme)
            .build(&[], &mut sink)
            .unwrap();

        // Assert
        assert_eq!(report.issues, 0);
        assert_eq!(report.labels, 0);
        let paths: Vec<&str> = sink.paths().collect();
        assert_eq!(paths, vec!["assets/style.css", "atom.xml", "index.html"]);
    }

    #[test]
    fn test_write_error_aborts_build() {
        // Arrange: third write is the feed, after both issue pages
        let config = config();
        let theme = ThemeConfig::default();
        let renderer = RecordingTheme::default();
        let mut sink = FailingSink::new(3);
        let raw = vec![raw(1, "One", "", &["bug"]), raw(2, "Two", "", &[])];

        // Act
        let result = SiteBuilder::new(&config, &theme, &renderer).build(&raw, &mut sink);

        // Assert
        assert!(
            matches!(&result, Err(Error::Write { path, .. }) if path.to_str() == Some(FEED_FILE)),
            "Unexpected result: {:?}",
            result
        );
        let written: Vec<&str> = sink.inner.paths().collect();
        assert_eq!(written, vec!["1-one.html", "2-two.html"]);
        assert_eq!(
            sink.attempts,
            vec!["1-one.html", "2-two.html", FEED_FILE],
            "Nothing is written after the failure"
        );
        let rendered: Vec<String> = renderer
            .calls
            .borrow()
            .iter()
            .map(|call| call.1.clone())
            .collect();
        assert_eq!(rendered, vec!["1-one.html", "2-two.html"]);
    }
}
