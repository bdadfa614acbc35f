//! URL construction for playable entries.
//!
//! The renderer never decides where things live; it asks a [`UrlBuilder`]. [`Routes`] is the
//! default, laying URLs out under a configurable base.

use crate::section::Section;

/// Source of every URL embedded in rendered navigation.
pub trait UrlBuilder {
    /// Internal playback page for one section of a media object.
    fn playback_url(&self, media_object_id: &str, section_id: &str) -> String;
    /// Public link a viewer can share.
    fn share_link(&self, section: &Section) -> String;
    /// Download endpoint for the section's file.
    fn download_url(&self, media_object_id: &str, section_id: &str) -> String;
    /// LTI deep-link callback targeting the section.
    fn lti_share_link(&self, section_id: &str) -> String;
}

#[derive(Clone, Debug, Default)]
/// Conventional route layout rooted at `base_url` (which may be empty for relative paths).
pub struct Routes {
    /// Scheme and host prefix, without a trailing slash.
    pub base_url: String,
}

impl Routes {
    #[must_use]
    /// Routes under `base_url`; a trailing slash is tolerated.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl UrlBuilder for Routes {
    fn playback_url(&self, media_object_id: &str, section_id: &str) -> String {
        format!(
            "{}/media_objects/{media_object_id}/section/{section_id}",
            self.base_url
        )
    }

    fn share_link(&self, section: &Section) -> String {
        match section.permalink.as_deref() {
            Some(permalink) if !permalink.trim().is_empty() => permalink.to_string(),
            _ => format!("{}/master_files/{}", self.base_url, section.id),
        }
    }

    fn download_url(&self, media_object_id: &str, section_id: &str) -> String {
        format!(
            "{}/download",
            self.playback_url(media_object_id, section_id)
        )
    }

    fn lti_share_link(&self, section_id: &str) -> String {
        format!(
            "{}/users/auth/lti/callback?target_id={section_id}",
            self.base_url
        )
    }
}
