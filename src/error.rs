//! Error type shared by parsing, rendering and configuration loading.
//!
//! Time strings never produce errors: they degrade to zero. What does fail is input the renderer
//! cannot interpret without guessing, such as an element that is neither a group nor a segment.

/// Failures raised while loading, parsing or rendering structural metadata.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading a manifest, structure or configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON manifest or JSON structure document was malformed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The structure document could not be parsed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of what went wrong.
        message: String,
    },

    /// An element that is neither a group (`Div`) nor a segment (`Span`/`Item`).
    #[error("Unknown structural node: <{name}>")]
    UnknownNode {
        /// Element name as written in the document.
        name: String,
    },

    /// The structure nests deeper than the configured limit.
    #[error("Structure exceeds maximum depth of {limit}")]
    DepthExceeded {
        /// Configured maximum nesting depth.
        limit: usize,
    },

    /// The configuration file was present but invalid.
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    #[must_use]
    /// Create a new Parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }
}

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
