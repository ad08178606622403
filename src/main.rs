use anyhow::{Context, Result};
use issueblog::{
    BuiltinTheme, Config, DirSink, GithubSource, IssueSource, JinjaTheme, JsonFileSource,
    SiteBuilder, SiteConfig, TemplateRenderer, ThemeConfig, retain_authors,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter.
const LOG_VAR: &str = "ISSUEBLOG_LOG";

fn init_tracing(verbose: bool) {
    let filter = std::env::var(LOG_VAR).unwrap_or_else(|_| {
        if verbose {
            "issueblog=debug".to_string()
        } else {
            "issueblog=info".to_string()
        }
    });
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::new(filter))
        .try_init();
}

/// Loads theme manifest and renderer for the selected theme.
fn load_theme(config: &Config) -> Result<(ThemeConfig, Box<dyn TemplateRenderer>)> {
    match &config.theme {
        Some(dir) => {
            let theme = ThemeConfig::load(dir)
                .with_context(|| format!("Failed to load theme: {}", dir.display()))?;
            info!(theme = %theme.name, dir = %dir.display(), "Using theme");
            let renderer: Box<dyn TemplateRenderer> =
                Box::new(JinjaTheme::new(dir.clone(), &theme));
            Ok((theme, renderer))
        }
        None => {
            info!("Using built-in theme");
            let renderer: Box<dyn TemplateRenderer> = Box::new(BuiltinTheme::new());
            Ok((ThemeConfig::default(), renderer))
        }
    }
}

/// Selects where issues come from: a saved JSON file or the GitHub API.
fn issue_source(config: &Config, site: &SiteConfig) -> Result<Box<dyn IssueSource>> {
    let source: Box<dyn IssueSource> = match &config.issues {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(
            GithubSource::from_env(&site.repository).context("Failed to create GitHub client")?,
        ),
    };
    Ok(source)
}

fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(config.verbose);
    config.validate().context("Invalid configuration")?;

    let site = SiteConfig::load(&config.config)
        .with_context(|| format!("Failed to load site config: {}", config.config.display()))?;
    let (theme, renderer) = load_theme(&config)?;

    let mut raw = issue_source(&config, &site)?
        .fetch()
        .context("Failed to load issues")?;
    retain_authors(&mut raw, &site.repository.authors);
    info!(count = raw.len(), "Loaded issues");

    let mut sink = DirSink::create(&config.output).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.output.display()
        )
    })?;
    let report = SiteBuilder::new(&site, &theme, renderer.as_ref())
        .build(&raw, &mut sink)
        .context("Failed to generate site")?;

    let index = config.output.join(&theme.index.target);
    println!(
        "Generated {} posts, {} label pages, {} files in {}",
        report.issues,
        report.labels,
        report.files,
        config.output.display()
    );

    if config.open
        && let Err(e) = open::that(&index)
    {
        warn!(path = %index.display(), error = %e, "Failed to open browser");
    }

    Ok(())
}
