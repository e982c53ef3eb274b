//! # sheetblog-core
//!
//! Core types for a blog whose content lives in a published spreadsheet.
//!
//! This crate provides:
//! - The `Post` record and its canonical field table
//! - The in-memory post collection with list/detail/label queries
//! - Reader preferences behind an injectable storage backend
//! - Site configuration and error types

/// In-memory post collection and pagination.
pub mod collection;
/// Site configuration.
pub mod config;
/// Error types and result aliases.
pub mod error;
/// Header label to canonical field mapping.
pub mod fields;
/// The post record.
pub mod post;
/// Reader preferences (theme, accent color, columns).
pub mod prefs;

/// Re-export collection types.
pub use collection::{PostCollection, PostPage, DEFAULT_PAGE_SIZE, DEFAULT_RELATED_LIMIT};
/// Re-export site configuration.
pub use config::SiteConfig;
/// Re-export core error types.
pub use error::{BlogError, BlogResult};
/// Re-export the canonical field enum.
pub use fields::CanonicalField;
/// Re-export post types.
pub use post::{Post, PostKind, PUBLISH_STATUS};
/// Re-export preference types.
pub use prefs::{
    FileStore, MemoryStore, Palette, PreferenceContext, PreferenceStore, Preferences, ThemeColor,
};
