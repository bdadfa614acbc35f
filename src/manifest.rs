//! JSON description of a media object and its sections.
//!
//! The manifest is how sections reach the renderer outside a host application. Structure may be
//! inlined as an XML string, inlined as a JSON tree, or kept in a separate file next to the
//! manifest.

use crate::formats::json::JsonNode;
use crate::formats::parse_structure;
use crate::section::{FileFormat, Section, StructuralNode};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A media object with its ordered sections.
pub struct Manifest {
    /// Media object identifier.
    pub id: String,
    #[serde(default)]
    /// Sections in display order.
    pub sections: Vec<SectionEntry>,
    #[serde(skip)]
    /// Directory relative structure files are resolved against.
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Serialised form of a [`Section`].
pub struct SectionEntry {
    /// Section identifier.
    pub id: String,
    #[serde(default)]
    /// Display label.
    pub label: Option<String>,
    #[serde(default)]
    /// Duration in milliseconds.
    pub duration: Option<u64>,
    #[serde(default = "default_file_format")]
    /// Stored format name, `Sound` for audio.
    pub file_format: String,
    #[serde(default)]
    /// Stable share link.
    pub permalink: Option<String>,
    #[serde(default)]
    /// Inline structure.
    pub structure: Option<StructureSource>,
    #[serde(default)]
    /// Path of a structure document, relative to the manifest.
    pub structure_file: Option<PathBuf>,
}

fn default_file_format() -> String {
    "Moving image".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
/// Inline structure, either a document string or a JSON tree.
pub enum StructureSource {
    /// XML (or JSON) text.
    Document(String),
    /// Structure tree given directly as JSON.
    Tree(JsonNode),
}

impl Manifest {
    /// Read a manifest from disk; structure files resolve against its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid manifest.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut manifest: Self = serde_json::from_str(&contents)?;
        manifest.base_dir = path.parent().map(Path::to_path_buf);
        Ok(manifest)
    }

    /// Build render-ready sections, parsing every structure document.
    ///
    /// Entries without an identifier are skipped.
    ///
    /// # Errors
    ///
    /// Returns the first structure read or parse failure.
    pub fn sections(&self, max_depth: usize) -> Result<Vec<Section>> {
        let mut sections = Vec::with_capacity(self.sections.len());
        for entry in &self.sections {
            if entry.id.trim().is_empty() {
                tracing::warn!(media_object = %self.id, "skipping section without an id");
                continue;
            }
            sections.push(Section {
                id: entry.id.clone(),
                media_object_id: self.id.clone(),
                label: entry.label.clone(),
                duration: entry.duration,
                file_format: FileFormat::from_name(&entry.file_format),
                permalink: entry.permalink.clone(),
                structure: self.structure_for(entry, max_depth)?,
            });
        }
        Ok(sections)
    }

    fn structure_for(
        &self,
        entry: &SectionEntry,
        max_depth: usize,
    ) -> Result<Option<StructuralNode>> {
        match (&entry.structure, &entry.structure_file) {
            (Some(StructureSource::Tree(tree)), _) => tree.clone().into_node(max_depth).map(Some),
            (Some(StructureSource::Document(document)), _) => parse_structure(document, max_depth),
            (None, Some(file)) => {
                let path = match &self.base_dir {
                    Some(dir) if file.is_relative() => dir.join(file),
                    _ => file.clone(),
                };
                tracing::debug!(path = %path.display(), "reading structure file");
                parse_structure(&fs::read_to_string(path)?, max_depth)
            }
            (None, None) => Ok(None),
        }
    }
}

#[cfg(test)]
#[path = "tests/manifest.rs"]
mod tests;
