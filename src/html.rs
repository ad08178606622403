//! HTML document handling for rendered issue bodies.
//!
//! Rendered markdown is parsed as an HTML5 fragment with html5ever, so
//! implied end tags, stray comments and unbalanced markup resolve the way a
//! browser resolves them. Two document operations are built on the tree:
//! reading the inner HTML of the first paragraph and rewriting anchor
//! targets.

use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{ParseOpts, QualName, local_name, namespace_url, ns, parse_fragment};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

use crate::error::ParseError;

/// Parsed HTML fragment.
pub struct Fragment {
    /// Synthetic `<html>` element holding the fragment's nodes
    root: Handle,
}

impl Fragment {
    /// Parses fragment in `<body>` context.
    ///
    /// Parsing never fails; malformed markup is repaired per HTML5 rules.
    pub fn parse(html: &str) -> Self {
        let dom = parse_fragment(
            RcDom::default(),
            ParseOpts::default(),
            QualName::new(None, ns!(html), local_name!("body")),
            Vec::new(),
        )
        .one(html);

        let root = dom
            .document
            .children
            .borrow()
            .first()
            .cloned()
            .unwrap_or_else(|| dom.document.clone());
        Self { root }
    }

    /// Returns first HTML element with the given tag name, in document order.
    pub fn find_first(&self, tag: &str) -> Option<Handle> {
        descendants(&self.root)
            .into_iter()
            .find(|node| is_element(node, tag))
    }

    /// Returns all HTML elements with the given tag name, in document order.
    pub fn elements(&self, tag: &str) -> Vec<Handle> {
        descendants(&self.root)
            .into_iter()
            .filter(|node| is_element(node, tag))
            .collect()
    }

    /// Serializes the fragment back to HTML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_html(&self) -> Result<String, ParseError> {
        inner_html(&self.root)
    }
}

/// Serializes the children of a node.
///
/// # Errors
///
/// Returns error if serialization fails
pub fn inner_html(node: &Handle) -> Result<String, ParseError> {
    let mut bytes = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };
    serialize(&mut bytes, &SerializableHandle::from(node.clone()), opts)
        .map_err(|e| ParseError::Serialize(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ParseError::Serialize(e.to_string()))
}

/// Returns attribute value of an element, entities decoded.
pub fn attribute(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == name)
            .map(|attr| String::from(&*attr.value)),
        _ => None,
    }
}

/// Replaces value of an existing attribute.
///
/// # Returns
///
/// Whether the element carried the attribute
pub fn set_attribute(node: &Handle, name: &str, value: &str) -> bool {
    let NodeData::Element { attrs, .. } = &node.data else {
        return false;
    };
    match attrs
        .borrow_mut()
        .iter_mut()
        .find(|attr| &*attr.name.local == name)
    {
        Some(attr) => {
            attr.value = StrTendril::from_slice(value);
            true
        }
        None => false,
    }
}

fn is_element(node: &Handle, tag: &str) -> bool {
    matches!(&node.data, NodeData::Element { name, .. }
        if name.ns == ns!(html) && &*name.local == tag)
}

/// All nodes below `root` in document order.
fn descendants(root: &Handle) -> Vec<Handle> {
    let mut nodes = Vec::new();
    let mut stack: Vec<Handle> = root.children.borrow().iter().rev().cloned().collect();

    while let Some(node) = stack.pop() {
        stack.extend(node.children.borrow().iter().rev().cloned());
        nodes.push(node);
    }
    nodes
}

/// Returns inner HTML of the first `<p>` element.
///
/// # Returns
///
/// `None` when the fragment has no paragraph
///
/// # Errors
///
/// Returns error if the paragraph cannot be serialized
pub fn first_paragraph(html: &str) -> Result<Option<String>, ParseError> {
    Fragment::parse(html)
        .find_first("p")
        .map(|paragraph| inner_html(&paragraph))
        .transpose()
}

/// Rewrites `href` values of `<a>` elements.
///
/// `resolve` receives the decoded href and returns the replacement, or
/// `None` to keep the link. When no link changes the input is returned as
/// is; otherwise the whole fragment is re-serialized.
///
/// # Errors
///
/// Returns error if the rewritten fragment cannot be serialized
pub fn rewrite_links<F>(html: &str, mut resolve: F) -> Result<String, ParseError>
where
    F: FnMut(&str) -> Option<String>,
{
    let fragment = Fragment::parse(html);
    let mut changed = false;

    for anchor in fragment.elements("a") {
        let Some(href) = attribute(&anchor, "href") else {
            continue;
        };
        if let Some(target) = resolve(&href)
            && target != href
        {
            changed |= set_attribute(&anchor, "href", &target);
        }
    }

    if !changed {
        return Ok(html.to_string());
    }
    fragment.to_html()
}

/// Escapes HTML special characters.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Decodes the entities produced by [`escape`] and by comrak.
pub fn unescape(html: &str) -> String {
    if !html.contains('&') {
        return html.to_string();
    }
    html.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_paragraph_basic() {
        // Arrange
        let html = "<h1>Title</h1>\n<p>First <em>para</em></p>\n<p>Second</p>";

        // Act
        let result = first_paragraph(html).expect("Should serialize");

        // Assert
        assert_eq!(result.as_deref(), Some("First <em>para</em>"));
    }

    #[test]
    fn test_first_paragraph_with_attributes() {
        let html = "<p align=\"center\">Centered</p>";
        assert_eq!(first_paragraph(html).unwrap().as_deref(), Some("Centered"));
    }

    #[test]
    fn test_first_paragraph_ignores_similar_tags() {
        // Arrange
        let html = "<pre><code>x</code></pre><param name=\"a\"><p>Real</p>";

        // Act
        let result = first_paragraph(html).unwrap();

        // Assert
        assert_eq!(result.as_deref(), Some("Real"), "<pre> and <param> are not paragraphs");
    }

    #[test]
    fn test_first_paragraph_missing() {
        let html = "<ul><li>item</li></ul>";
        assert_eq!(first_paragraph(html).unwrap(), None);
        assert_eq!(first_paragraph("").unwrap(), None);
    }

    #[test]
    fn test_first_paragraph_implied_end_tag() {
        // Arrange: a new <p> closes the open one
        let html = "<p>Intro\n<p>Second paragraph with <a href=\"https://example.com\">x</a></p>\n";

        // Act
        let result = first_paragraph(html).unwrap();

        // Assert
        assert_eq!(result.as_deref(), Some("Intro\n"));
    }

    #[test]
    fn test_first_paragraph_closed_by_block() {
        let html = "<p>Lead<div>block</div>";
        assert_eq!(first_paragraph(html).unwrap().as_deref(), Some("Lead"));
    }

    #[test]
    fn test_first_paragraph_unclosed_at_end() {
        let html = "<p>Runs to the end";
        assert_eq!(first_paragraph(html).unwrap().as_deref(), Some("Runs to the end"));
    }

    #[test]
    fn test_first_paragraph_inside_comment_skipped() {
        let html = "<!-- <p>hidden</p> --><p>shown</p>";
        assert_eq!(first_paragraph(html).unwrap().as_deref(), Some("shown"));
    }

    #[test]
    fn test_first_paragraph_nested() {
        let html = "<blockquote><p>Quoted</p></blockquote><p>After</p>";
        assert_eq!(first_paragraph(html).unwrap().as_deref(), Some("Quoted"));
    }

    #[test]
    fn test_rewrite_links_basic() {
        // Arrange
        let html = "<p>See <a href=\"https://x/1\">one</a> and <a href=\"https://y\">y</a></p>";

        // Act
        let result = rewrite_links(html, |href| (href == "https://x/1").then(|| "1-one.html".to_string()))
            .expect("Should serialize");

        // Assert
        assert_eq!(
            result,
            "<p>See <a href=\"1-one.html\">one</a> and <a href=\"https://y\">y</a></p>"
        );
    }

    #[test]
    fn test_rewrite_links_single_quoted() {
        let html = "<a href='https://x/1' title=t>one</a>";
        let result = rewrite_links(html, |_| Some("1.html".to_string())).unwrap();
        assert_eq!(result, "<a href=\"1.html\" title=\"t\">one</a>");
    }

    #[test]
    fn test_rewrite_links_skips_other_elements() {
        // Arrange
        let html = "<link href=\"https://x/1\"><img src=\"https://x/1\"><area href=\"https://x/1\">";

        // Act
        let result = rewrite_links(html, |_| Some("changed".to_string())).unwrap();

        // Assert
        assert_eq!(result, html, "Only anchors are rewritten");
    }

    #[test]
    fn test_rewrite_links_without_href() {
        let html = "<a name=\"top\">anchor</a>";
        let result = rewrite_links(html, |_| Some("changed".to_string())).unwrap();
        assert_eq!(result, html);
    }

    #[test]
    fn test_rewrite_links_unchanged_input_returned_verbatim() {
        // Arrange: markup the serializer would normalize
        let html = "<p>Quote &quot;x&quot; <a href='https://y'>y</a>";

        // Act
        let result = rewrite_links(html, |_| None).unwrap();

        // Assert
        assert_eq!(result, html);
    }

    #[test]
    fn test_rewrite_links_decodes_entities() {
        // Arrange
        let html = "<a href=\"https://x/?a=1&amp;b=2\">q</a>";
        let mut seen = Vec::new();

        // Act
        let result = rewrite_links(html, |href| {
            seen.push(href.to_string());
            None
        })
        .unwrap();

        // Assert
        assert_eq!(seen, vec!["https://x/?a=1&b=2"]);
        assert_eq!(result, html);
    }

    #[test]
    fn test_rewrite_links_escapes_replacement() {
        let html = "<a href=\"https://x\">q</a>";
        let result = rewrite_links(html, |_| Some("a&b\".html".to_string())).unwrap();
        assert_eq!(result, "<a href=\"a&amp;b&quot;.html\">q</a>");
    }

    #[test]
    fn test_rewrite_links_survives_stray_markup() {
        // Arrange: unterminated comment after a valid link
        let html = "<p>See <a href=\"https://x/1\">one</a></p>\n<div>a <!-- b</div>\n";

        // Act
        let result = rewrite_links(html, |_| Some("1-one.html".to_string())).unwrap();

        // Assert
        assert!(result.contains("<a href=\"1-one.html\">one</a>"), "{}", result);
    }

    #[test]
    fn test_attribute_helpers() {
        // Arrange
        let fragment = Fragment::parse("<a href=\"x\" class=\"c\">t</a>");
        let anchor = fragment.find_first("a").expect("Should find anchor");

        // Act
        let replaced = set_attribute(&anchor, "href", "y");
        let missing = set_attribute(&anchor, "rel", "z");

        // Assert
        assert!(replaced);
        assert!(!missing);
        assert_eq!(attribute(&anchor, "href").as_deref(), Some("y"));
        assert_eq!(attribute(&anchor, "class").as_deref(), Some("c"));
        assert_eq!(attribute(&anchor, "rel"), None);
    }

    #[test]
    fn test_escape_roundtrip() {
        let text = "<a href=\"x\">'&'</a>";
        assert_eq!(unescape(&escape(text)), text);
    }
}
