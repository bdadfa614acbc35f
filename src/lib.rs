//! structnav: navigable timeline rendering for structural media metadata.
//!
//! A media section (a reel, a file) may carry a hierarchical description of its contents:
//! groups of timed segments, nested arbitrarily. This crate walks that tree, numbers every
//! segment depth-first, resolves each segment's media fragment and emits the HTML fragment a
//! page template embeds as the section's navigation panel.
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod error;
pub mod formats;
pub mod fragment;
pub mod html;
pub mod manifest;
pub mod render;
pub mod section;
pub mod urls;
pub mod walker;

pub use error::{Error, Result};
