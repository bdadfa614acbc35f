//! Depth-first traversal turning a structure tree into numbered list entries.
//!
//! Track numbers belong to leaves only. The counter is threaded through the recursion and handed
//! back with each fragment, so siblings continue where the previous subtree stopped:
//!
//! ```text
//! Item                     (root, not numbered)
//! ├── Div "Side A"         (heading only)
//! │   ├── Span "Intro"     1
//! │   └── Span "Theme"     2
//! └── Span "Coda"          3
//! ```

use crate::fragment::{self, TimeRange};
use crate::html::{escape, Link};
use crate::section::{Section, StructuralNode};
use crate::urls::UrlBuilder;
use crate::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Markup for a subtree together with the counter value after its last leaf.
pub struct RenderedFragment {
    /// Concatenated `<li>` entries.
    pub markup: String,
    /// Track number of the last leaf visited, or the seed if there were none.
    pub track_number: usize,
}

/// Walks one section's structure tree.
pub struct TreeWalker<'a, U: UrlBuilder + ?Sized> {
    section: &'a Section,
    urls: &'a U,
    current: bool,
    max_depth: usize,
}

impl<'a, U: UrlBuilder + ?Sized> TreeWalker<'a, U> {
    #[must_use]
    /// Prepare a walk over `section`; `current` marks every leaf as part of the playing stream.
    pub fn new(section: &'a Section, urls: &'a U, current: bool, max_depth: usize) -> Self {
        Self {
            section,
            urls,
            current,
            max_depth,
        }
    }

    /// Walk a structure root.
    ///
    /// A group root contributes only its children, numbered from 1. A lone leaf is numbered from
    /// `index`, so it carries the same number as the section it stands for.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DepthExceeded`] if the tree nests deeper than the configured limit.
    pub fn walk_root(&self, root: &StructuralNode, index: usize) -> Result<RenderedFragment> {
        match root {
            StructuralNode::Group { children, .. } => self.walk_children(children, 0, 1),
            StructuralNode::Leaf { .. } => self.walk(root, index),
        }
    }

    /// Render `node` and its descendants, numbering leaves after `track_number`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DepthExceeded`] if the tree nests deeper than the configured limit.
    pub fn walk(&self, node: &StructuralNode, track_number: usize) -> Result<RenderedFragment> {
        self.visit(node, track_number, 0)
    }

    fn walk_children(
        &self,
        children: &[StructuralNode],
        mut track_number: usize,
        depth: usize,
    ) -> Result<RenderedFragment> {
        let mut markup = String::new();
        for child in children {
            let rendered = self.visit(child, track_number, depth)?;
            markup.push_str(&rendered.markup);
            track_number = rendered.track_number;
        }
        Ok(RenderedFragment {
            markup,
            track_number,
        })
    }

    fn visit(
        &self,
        node: &StructuralNode,
        track_number: usize,
        depth: usize,
    ) -> Result<RenderedFragment> {
        if depth > self.max_depth {
            return Err(Error::DepthExceeded {
                limit: self.max_depth,
            });
        }
        match node {
            StructuralNode::Group { label, children } => {
                let inner = self.walk_children(children, track_number, depth + 1)?;
                Ok(RenderedFragment {
                    markup: format!(
                        "<li>{}</li><li><ul>{}</ul></li>",
                        escape(label),
                        inner.markup
                    ),
                    track_number: inner.track_number,
                })
            }
            StructuralNode::Leaf { label, begin, end } => {
                let track_number = track_number + 1;
                let range = fragment::resolve(begin.as_deref(), end.as_deref(), self.section);
                Ok(RenderedFragment {
                    markup: self.leaf_entry(label, track_number, &range),
                    track_number,
                })
            }
        }
    }

    fn leaf_entry(&self, label: &str, track_number: usize, range: &TimeRange) -> String {
        let section = self.section;
        let t = range.query_value();
        let native_url = format!(
            "{}?t={t}",
            self.urls.playback_url(&section.media_object_id, &section.id)
        );
        let url = format!("{}?t={t}", self.urls.share_link(section));
        tracing::trace!(section = %section.id, track_number, fragment = %t, "leaf");

        let mut link = Link::new(
            format!(
                "{track_number}. {label} ({})",
                fragment::duration_label(range)
            ),
            url,
        )
        .id(format!("{}-{track_number}", section.id))
        .class("playable")
        .class("wrap");
        if self.current {
            link = link.class("current-stream");
        }
        let link = link
            .data("segment", section.id.as_str())
            .data("is_video", section.file_format.is_video().to_string())
            .data("native_url", native_url)
            .data("fragmentbegin", fragment::format_seconds(range.start))
            .data("fragmentend", fragment::format_seconds(range.end));
        format!("<li class=\"stream-li\">{}</li>", link.render())
    }
}

#[cfg(test)]
#[path = "tests/walker.rs"]
mod tests;
