//! Section navigation panels.
//!
//! Each section becomes one panel. The shape depends on its structure:
//!
//! - no structure: a single entry playing the whole section;
//! - a container root: a collapsible panel listing every group and segment;
//! - a lone segment root: the panel shell around that one entry, without a toggle.
//!
//! The section currently playing is expanded and marked; all others render collapsed.

use crate::fragment;
use crate::html::{escape, Link};
use crate::section::{Section, StructuralNode};
use crate::urls::UrlBuilder;
use crate::walker::TreeWalker;
use crate::Result;

/// Default limit on structure nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Clone, Debug)]
/// Facts about the viewer and deployment that shape every panel.
pub struct RenderContext {
    /// Identifier of the section being played, if any.
    pub current_stream: Option<String>,
    /// Whether the viewer may add sections to a playlist.
    pub can_create_playlist: bool,
    /// Whether an LTI provider is configured, enabling deep links.
    pub lti_enabled: bool,
    /// Structure nesting limit.
    pub max_depth: usize,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            current_stream: None,
            can_create_playlist: false,
            lti_enabled: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Renders navigation panels for the sections of a media object.
pub struct StructureRenderer<'a, U: UrlBuilder + ?Sized> {
    urls: &'a U,
    context: RenderContext,
}

impl<'a, U: UrlBuilder + ?Sized> StructureRenderer<'a, U> {
    #[must_use]
    /// Renderer resolving URLs through `urls`.
    pub fn new(urls: &'a U, context: RenderContext) -> Self {
        Self { urls, context }
    }

    #[must_use]
    /// Whether `section` is the one currently playing.
    pub fn is_current(&self, section: &Section) -> bool {
        self.context.current_stream.as_deref() == Some(section.id.as_str())
    }

    /// Render the panel for `section`, shown at zero-based position `index`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DepthExceeded`] if the structure nests too deeply.
    pub fn render(&self, section: &Section, index: usize, show_progress: bool) -> Result<String> {
        let current = self.is_current(section);
        tracing::debug!(
            section = %section.id,
            index,
            current,
            structured = section.has_structure(),
            "rendering section"
        );
        let heading_open = self.heading_open(section, index, show_progress);
        let heading_close = heading_close(show_progress);
        let walker = TreeWalker::new(section, self.urls, current, self.context.max_depth);

        match &section.structure {
            None => {
                let label = format!("{}. {}", index + 1, section.stream_label());
                let link = self.section_link(section, current, label).render();
                Ok(format!(
                    "{heading_open}<ul><li class=\"stream-li\">{link}</li></ul>{heading_close}"
                ))
            }
            Some(root @ StructuralNode::Group { label, .. }) => {
                let contents = walker.walk_root(root, index)?;
                let link = self
                    .section_link(section, current, format!("{}. {label}", index + 1))
                    .render();
                let expanded = if current { "true" } else { "false" };
                let minus_hidden = if current { "" } else { " hidden" };
                let plus_hidden = if current { " hidden" } else { "" };
                let collapse_in = if current { " in" } else { "" };

                Ok(format!(
                    "{heading_open}<button class=\"fa fa-minus-square{minus_hidden}\" data-toggle=\"collapse\" \
                     data-target=\"#section{index}\" aria-expanded=\"{expanded}\" \
                     aria-controls=\"collapse{index}\"></button>\
                     <button class=\"fa fa-plus-square{plus_hidden}\" data-toggle=\"collapse\" \
                     data-target=\"#section{index}\" aria-expanded=\"{expanded}\" \
                     aria-controls=\"collapse{index}\"></button>\
                     <ul><li>{link}</li></ul>{heading_close}\
                     <div id=\"section{index}\" class=\"panel-collapse collapse{collapse_in}\" \
                     role=\"tabpanel\" aria-labelledby=\"heading{index}\">\
                     <div class=\"panel-body\"><ul>{}</ul></div></div>",
                    contents.markup
                ))
            }
            Some(root @ StructuralNode::Leaf { .. }) => {
                let contents = walker.walk_root(root, index)?;
                Ok(format!(
                    "{heading_open}<ul>{}</ul>{heading_close}",
                    contents.markup
                ))
            }
        }
    }

    /// Render every section in order and concatenate the panels.
    ///
    /// # Errors
    ///
    /// Stops at the first section that fails to render.
    pub fn render_sections(&self, sections: &[Section], show_progress: bool) -> Result<String> {
        let mut out = String::new();
        for (index, section) in sections.iter().enumerate() {
            out.push_str(&self.render(section, index, show_progress)?);
        }
        Ok(out)
    }

    fn heading_open(&self, section: &Section, index: usize, show_progress: bool) -> String {
        let indented = if show_progress {
            " progress-indented"
        } else {
            ""
        };
        let playlist_button = if self.context.can_create_playlist {
            format!(
                "<button type=\"button\" title=\"Add section to playlist\" \
                 aria-label=\"Add section to playlist\" \
                 class=\"structure_add_to_playlist outline_on btn btn-primary\" \
                 data-scope=\"master_file\" data-masterfile-id=\"{}\"></button>",
                escape(&section.id)
            )
        } else {
            String::new()
        };
        let download_url = self
            .urls
            .download_url(&section.media_object_id, &section.id);
        format!(
            "<div class=\"panel-heading\" role=\"tab\" id=\"heading{index}\" \
             data-media-object-id=\"{}\" data-section-id=\"{}\">\
             <h4 class=\"panel-title{indented}\">{playlist_button}\
             <a title=\"Download\" href=\"{}\" target=\"_blank\" class=\"section-download-link\">\
             <i class=\"fa fa-download\" aria-hidden=\"true\"></i></a>",
            escape(&section.media_object_id),
            escape(&section.id),
            escape(&download_url)
        )
    }

    /// Top-level entry covering the whole section: `{prefix} ({duration})` linking to `t=0,end`.
    fn section_link(&self, section: &Section, current: bool, prefix: String) -> Link {
        let formatted = section.duration.map(fragment::format_milliseconds);
        let label = match &formatted {
            Some(duration) => format!("{prefix} ({duration})"),
            None => prefix,
        };
        let href = format!(
            "{}?t=0,{}",
            self.urls.share_link(section),
            formatted.unwrap_or_default()
        );

        let mut link = Link::new(label, href)
            .id(format!("section-title-{}", section.id))
            .class("playable")
            .class("wrap");
        if current {
            link = link.class("current-stream").class("current-section");
        }
        let mut link = link
            .data("segment", section.id.as_str())
            .data("is_video", section.file_format.is_video().to_string())
            .data("share_link", self.urls.share_link(section))
            .data(
                "native_url",
                self.urls
                    .playback_url(&section.media_object_id, &section.id),
            );
        if self.context.lti_enabled {
            link = link.data("lti_share_link", self.urls.lti_share_link(&section.id));
        }
        link
    }
}

fn heading_close(show_progress: bool) -> &'static str {
    if show_progress {
        "<div class=\"status-detail alert\" style=\"display: none\"></div></h4></div>"
    } else {
        "</h4></div>"
    }
}

#[must_use]
/// Whether section navigation is pointless: nothing to list, or one section without structure.
pub fn hide_sections(sections: &[Section]) -> bool {
    match sections {
        [] => true,
        [only] => !only.has_structure(),
        _ => false,
    }
}

#[cfg(test)]
#[path = "tests/render.rs"]
mod tests;
