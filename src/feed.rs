//! Atom feed generation.

use chrono::{DateTime, SecondsFormat, Utc};
use maud::{Markup, PreEscaped, html};

use crate::config::SiteConfig;
use crate::error::{Error, Result};
use crate::issue::Issue;

/// Output file of the feed.
pub const FEED_FILE: &str = "atom.xml";

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";
const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// Feed author.
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub name: String,
    pub email: Option<String>,
}

/// One published issue in the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub title: String,
    pub link: String,
    /// Summary HTML
    pub description: String,
    pub created: DateTime<Utc>,
}

/// Syndication feed of the blog.
#[derive(Debug, Clone, PartialEq)]
pub struct Feed {
    pub title: String,
    pub link: String,
    pub description: Option<String>,
    pub author: Author,
    pub created: DateTime<Utc>,
    pub entries: Vec<Entry>,
}

impl Feed {
    /// Builds feed with one entry per issue, keeping issue order.
    ///
    /// # Arguments
    ///
    /// * `issues`: Published issues
    /// * `config`: Site configuration providing title, author and base URL
    /// * `now`: Generation time, used as feed update time
    pub fn build(issues: &[Issue], config: &SiteConfig, now: DateTime<Utc>) -> Self {
        let base = config.base_url();

        Self {
            title: config.site.title.clone(),
            link: base.clone(),
            description: config.site.description.clone(),
            author: Author {
                name: config.site.author.clone(),
                email: config.site.mail.clone(),
            },
            created: now,
            entries: issues
                .iter()
                .map(|issue| Entry {
                    title: issue.title.clone(),
                    link: format!("{}/{}", base, issue.link),
                    description: issue.summary.clone(),
                    created: issue.created,
                })
                .collect(),
        }
    }

    /// Serializes feed as Atom XML.
    ///
    /// # Errors
    ///
    /// Returns error if any text contains characters XML cannot represent
    pub fn to_atom(&self) -> Result<String> {
        self.check_xml_text()?;
        Ok(self.atom_markup().into_string())
    }

    fn atom_markup(&self) -> Markup {
        html! {
            (PreEscaped(XML_DECLARATION))
            feed xmlns=(ATOM_NS) {
                title { (self.title) }
                id { (self.link) }
                link href=(self.link) rel="alternate" {}
                @if let Some(description) = &self.description {
                    subtitle { (description) }
                }
                updated { (timestamp(self.created)) }
                (author(&self.author))
                @for item in &self.entries {
                    entry {
                        title { (item.title) }
                        link href=(item.link) rel="alternate" {}
                        id { (item.link) }
                        published { (timestamp(item.created)) }
                        updated { (timestamp(item.created)) }
                        (author(&self.author))
                        summary type="html" { (item.description) }
                    }
                }
            }
        }
    }

    fn check_xml_text(&self) -> Result<()> {
        let mut texts = vec![self.title.as_str(), self.link.as_str(), self.author.name.as_str()];
        texts.extend(self.description.as_deref());
        texts.extend(self.author.email.as_deref());
        for entry in &self.entries {
            texts.extend([
                entry.title.as_str(),
                entry.link.as_str(),
                entry.description.as_str(),
            ]);
        }

        match texts.into_iter().find(|text| !text.chars().all(is_xml_char)) {
            Some(text) => Err(Error::render(
                FEED_FILE,
                format!("text is not representable in XML: {:?}", text),
            )),
            None => Ok(()),
        }
    }
}

fn author(author: &Author) -> Markup {
    html! {
        author {
            name { (author.name) }
            @if let Some(email) = &author.email {
                email { (email) }
            }
        }
    }
}

fn timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Characters allowed by the XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}
