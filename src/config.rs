//! Configuration for deployment-wide rendering preferences.
//!
//! Specifically, we try to find a structnav.toml, and if present we load settings from there.
//! This provides the URL base, LTI availability, progress indicators and the nesting limit.

use crate::render::{RenderContext, DEFAULT_MAX_DEPTH};
use crate::{Error, Result};
use facet::Facet;
use std::fs;
use std::path::Path;

/// File looked up in the working directory by [`Config::load`].
pub const CONFIG_FILE: &str = "structnav.toml";

#[derive(Facet, Clone, Debug)]
/// Preferences loaded from structnav.toml or falling back to defaults.
pub struct Config {
    #[facet(default = String::new())]
    /// Scheme and host prefixed to generated URLs; empty for relative links.
    pub base_url: String,
    #[facet(default = false)]
    /// Embed LTI deep links in section headers.
    pub lti_enabled: bool,
    #[facet(default = false)]
    /// Reserve space for an upload/processing progress indicator.
    pub show_progress: bool,
    #[facet(default = DEFAULT_MAX_DEPTH)]
    /// Maximum structure nesting accepted before rendering aborts.
    pub max_depth: usize,
}

impl Config {
    /// Load configuration from structnav.toml in the working directory if present.
    ///
    /// Without a file every field takes its `#[facet(default)]` value.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is not valid configuration.
    pub fn load() -> Result<Self> {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            Self::load_from(path)
        } else {
            Self::parse("")
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse TOML text; omitted keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the text is not valid configuration.
    pub fn parse(contents: &str) -> Result<Self> {
        facet_toml::from_str::<Self>(contents).map_err(|e| Error::Config(e.to_string()))
    }

    #[must_use]
    /// Render context for a viewer, combining these preferences with per-request facts.
    pub fn render_context(
        &self,
        current_stream: Option<String>,
        can_create_playlist: bool,
    ) -> RenderContext {
        RenderContext {
            current_stream,
            can_create_playlist,
            lti_enabled: self.lti_enabled,
            max_depth: self.max_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::render::DEFAULT_MAX_DEPTH;
    use crate::Error;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = Config::parse("").unwrap();
        assert_eq!(cfg.base_url, "");
        assert!(!cfg.lti_enabled);
        assert!(!cfg.show_progress);
        assert_eq!(cfg.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "base_url = \"https://av.example.org\"\nlti_enabled = true\nmax_depth = 8"
        )
        .unwrap();

        let cfg = Config::load_from(file.path()).unwrap();
        assert_eq!(cfg.base_url, "https://av.example.org");
        assert!(cfg.lti_enabled);
        assert_eq!(cfg.max_depth, 8);

        let context = cfg.render_context(Some("s1".to_string()), true);
        assert!(context.lti_enabled);
        assert!(context.can_create_playlist);
        assert_eq!(context.max_depth, 8);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            Config::parse("max_depth = \"deep\""),
            Err(Error::Config(_))
        ));
    }
}
