//! Format trait and implementations for structural metadata documents.
//!
//! Structure trees reach the renderer either as the XML dialect media repositories store
//! (`Item`/`Div`/`Span`) or as an equivalent JSON tree. Both produce the same
//! [`StructuralNode`] model.

pub mod json;
pub mod xml;

use crate::section::StructuralNode;
use crate::Result;

/// Parser for one serialisation of a structure tree.
pub trait Format {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Parse `source` into the tree root, or `None` if the document holds no structure.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed, contains nodes that are neither groups nor
    /// segments, or nests deeper than `max_depth`.
    fn parse(&self, source: &str, max_depth: usize) -> Result<Option<StructuralNode>>;
}

#[must_use]
/// Pick a format by sniffing the first significant character.
pub fn detect(source: &str) -> &'static dyn Format {
    if source.trim_start().starts_with(['{', '[']) {
        &json::JsonFormat
    } else {
        &xml::XmlFormat
    }
}

/// Parse a structure document of either format. Blank input has no structure.
///
/// # Errors
///
/// Propagates the chosen format's parse errors.
pub fn parse_structure(source: &str, max_depth: usize) -> Result<Option<StructuralNode>> {
    if source.trim().is_empty() {
        return Ok(None);
    }
    let format = detect(source);
    tracing::debug!(format = format.name(), "parsing structure");
    format.parse(source, max_depth)
}
