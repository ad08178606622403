//! Reusable HTML components for the built-in theme
//!
//! Maud component functions shared by the issue and index pages. Each
//! component renders one UI element with consistent styling so the pages
//! only compose them.

pub mod issue_list;
pub mod labels;
pub mod layout;
pub mod nav;
