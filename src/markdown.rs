//! Markdown rendering with GitHub Flavored Markdown support.
//!
//! Issue bodies are written in GFM. This module renders them with comrak
//! (tables, strikethrough, autolinks, task lists) and highlights fenced code
//! blocks with syntect.

mod renderer;

pub use renderer::MarkdownRenderer;
