//! JSON structure trees.
//!
//! A node with a `children` array is a group, anything else is a segment:
//!
//! ```json
//! {"label": "Concert", "children": [
//!     {"label": "Overture", "begin": "0", "end": "4:10"}
//! ]}
//! ```

use crate::formats::Format;
use crate::section::StructuralNode;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Serialised form of a structure node.
pub struct JsonNode {
    #[serde(default)]
    /// Heading or segment title.
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Segment begin time.
    pub begin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Segment end time.
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Present (possibly empty) on groups only.
    pub children: Option<Vec<JsonNode>>,
}

impl JsonNode {
    /// Convert into the tree model, refusing trees deeper than `max_depth`.
    ///
    /// Documents parsed from text are also bounded by `serde_json`'s nesting limit of 128. Each
    /// tree level costs an object and an array, so trees deeper than 63 levels fail as
    /// [`Error::Json`] before this check is reached.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DepthExceeded`] if the tree is too deep.
    pub fn into_node(self, max_depth: usize) -> Result<StructuralNode> {
        self.convert(0, max_depth)
    }

    fn convert(self, depth: usize, max_depth: usize) -> Result<StructuralNode> {
        if depth > max_depth {
            return Err(Error::DepthExceeded { limit: max_depth });
        }
        match self.children {
            Some(children) => Ok(StructuralNode::Group {
                label: self.label,
                children: children
                    .into_iter()
                    .map(|child| child.convert(depth + 1, max_depth))
                    .collect::<Result<Vec<_>>>()?,
            }),
            None => Ok(StructuralNode::Leaf {
                label: self.label,
                begin: self.begin,
                end: self.end,
            }),
        }
    }
}

/// serde backed parser for JSON structure trees.
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &'static str {
        "json"
    }

    fn parse(&self, source: &str, max_depth: usize) -> Result<Option<StructuralNode>> {
        let root: Option<JsonNode> = serde_json::from_str(source)?;
        root.map(|node| node.into_node(max_depth)).transpose()
    }
}
