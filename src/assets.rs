//! CSS asset bundling

use crate::theme::Asset;

const BASE: &str = include_str!("../assets/base.css");
const LAYOUT: &str = include_str!("../assets/components/layout.css");
const ISSUE_LIST: &str = include_str!("../assets/components/issue-list.css");
const ISSUE_PAGE: &str = include_str!("../assets/page-issue.css");
const MARKDOWN: &str = include_str!("../assets/markdown.css");

/// Stylesheet written by the built-in theme.
pub const STYLESHEET: &str = "assets/style.css";

/// Returns bundled CSS assets of the built-in theme
pub fn css_assets() -> Vec<Asset> {
    vec![bundled(
        STYLESHEET,
        &[BASE, LAYOUT, ISSUE_LIST, ISSUE_PAGE, MARKDOWN],
    )]
}

fn bundled(name: &str, parts: &[&str]) -> Asset {
    Asset {
        path: name.to_string(),
        contents: parts.join("\n").into_bytes(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_assets_bundle_all_parts() {
        // Act
        let assets = css_assets();

        // Assert
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].path, STYLESHEET);
        let css = String::from_utf8(assets[0].contents.clone()).unwrap();
        assert!(css.contains(".site-header"));
        assert!(css.contains(".issue-row"));
        assert!(css.contains(".markdown-body pre"));
    }
}
