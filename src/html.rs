//! Minimal HTML building blocks: escaping and the anchor tag used by every playable entry.

use std::fmt::Write;

#[must_use]
/// Escape text for use in element content or a double-quoted attribute value.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Clone, Debug, Default)]
/// Anchor element with `data-*` attributes, rendered in insertion order.
pub struct Link {
    label: String,
    href: String,
    id: Option<String>,
    classes: Vec<String>,
    data: Vec<(String, String)>,
}

impl Link {
    #[must_use]
    /// Start a link with its visible label and target.
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            ..Self::default()
        }
    }

    #[must_use]
    /// Set the DOM id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    /// Append a CSS class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    #[must_use]
    /// Append a `data-{key}` attribute; underscores in the key become dashes.
    pub fn data(mut self, key: &str, value: impl Into<String>) -> Self {
        self.data.push((key.replace('_', "-"), value.into()));
        self
    }

    #[must_use]
    /// Serialise to markup.
    pub fn render(&self) -> String {
        let mut out = format!("<a href=\"{}\"", escape(&self.href));
        if let Some(id) = &self.id {
            let _ = write!(out, " id=\"{}\"", escape(id));
        }
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.join(" ")));
        }
        for (key, value) in &self.data {
            let _ = write!(out, " data-{key}=\"{}\"", escape(value));
        }
        let _ = write!(out, ">{}</a>", escape(&self.label));
        out
    }
}
