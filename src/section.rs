//! Section representation for structurally described media.
//!
//! A section is one ordered unit of a media object, typically a single reel or file. It may carry
//! a structure tree whose groups organise timed segments; the tree is read-only for the duration
//! of a render.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Kind of media the section's file holds.
pub enum FileFormat {
    /// Audio-only content.
    Sound,
    /// Anything with a picture track.
    MovingImage,
}

impl FileFormat {
    #[must_use]
    /// Map a stored format name onto a kind; everything other than `Sound` is treated as video.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("sound") {
            Self::Sound
        } else {
            Self::MovingImage
        }
    }

    #[must_use]
    /// Whether client-side players should treat the section as video.
    pub fn is_video(self) -> bool {
        self != Self::Sound
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Node in a section's structure tree.
pub enum StructuralNode {
    /// Labelled container of further nodes. Never numbered and never timed.
    Group {
        /// Heading text shown above the nested list.
        label: String,
        /// Ordered children; may be empty.
        children: Vec<StructuralNode>,
    },
    /// Timed segment, the only kind of node that receives a track number.
    Leaf {
        /// Segment title.
        label: String,
        /// Raw begin time string (`H:MM:SS.sss`, `MM:SS` or seconds), if given.
        begin: Option<String>,
        /// Raw end time string, if given.
        end: Option<String>,
    },
}

impl StructuralNode {
    #[must_use]
    /// Label of either variant.
    pub fn label(&self) -> &str {
        match self {
            Self::Group { label, .. } | Self::Leaf { label, .. } => label,
        }
    }

    #[must_use]
    /// Number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Group { children, .. } => children.iter().map(Self::leaf_count).sum(),
            Self::Leaf { .. } => 1,
        }
    }
}

#[derive(Clone, Debug)]
/// One playable unit of a media object, supplied by the caller per render.
pub struct Section {
    /// Section identifier, unique within the repository.
    pub id: String,
    /// Identifier of the owning media object.
    pub media_object_id: String,
    /// Display label; the identifier is shown when absent.
    pub label: Option<String>,
    /// Total duration in milliseconds, when known.
    pub duration: Option<u64>,
    /// Audio or video.
    pub file_format: FileFormat,
    /// Stable share link overriding the generated one.
    pub permalink: Option<String>,
    /// Root of the structure tree, `None` when no structural metadata is attached.
    pub structure: Option<StructuralNode>,
}

impl Section {
    #[must_use]
    /// Label used for the flat, structure-less entry.
    pub fn stream_label(&self) -> &str {
        self.label
            .as_deref()
            .filter(|label| !label.trim().is_empty())
            .unwrap_or(&self.id)
    }

    #[must_use]
    /// Whether the section has no structural metadata to walk.
    pub fn has_structure(&self) -> bool {
        self.structure.is_some()
    }
}
