//! XML structure documents parsed with tree-sitter-xml.
//!
//! The dialect has three element kinds:
//!
//! ```xml
//! <Item label="Concert">
//!   <Div label="Act I">
//!     <Span label="Overture" begin="0" end="4:10"/>
//!   </Div>
//!   <Span label="Encore" begin="1:02:00"/>
//! </Item>
//! ```
//!
//! The first `Item` is the root. With element children it is a container; without, it is the
//! single segment standing for the whole section.

use crate::formats::Format;
use crate::section::StructuralNode;
use crate::{Error, Result};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// Tree-sitter backed parser for `Item`/`Div`/`Span` documents.
pub struct XmlFormat;

impl XmlFormat {
    const ELEMENT_QUERY: &'static str = "(element) @element";

    fn language() -> tree_sitter::Language {
        tree_sitter_xml::LANGUAGE_XML.into()
    }
}

impl Format for XmlFormat {
    fn name(&self) -> &'static str {
        "xml"
    }

    fn parse(&self, source: &str, max_depth: usize) -> Result<Option<StructuralNode>> {
        let language = Self::language();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| Error::parse(e.to_string()))?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| Error::parse("parser returned no tree"))?;
        let document = tree.root_node();
        if document.has_error() {
            return Err(Error::parse(format!(
                "malformed XML near byte {}",
                first_error(document).map_or(0, |node| node.start_byte())
            )));
        }

        let query =
            Query::new(&language, Self::ELEMENT_QUERY).map_err(|e| Error::parse(e.to_string()))?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, document, source.as_bytes());

        // Matches arrive in document order, so the first Item found is the outermost one.
        while let Some(m) = matches.next() {
            for capture in m.captures {
                let element = Element::read(capture.node, source)?;
                if element.name.eq_ignore_ascii_case("item") {
                    return build(&element, source, 0, max_depth).map(Some);
                }
            }
        }
        Ok(None)
    }
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(Node::has_error)
        .find_map(first_error)
}

/// An element's tag name and attributes, with handles to its child elements.
struct Element<'tree> {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node<'tree>>,
}

impl<'tree> Element<'tree> {
    fn read(node: Node<'tree>, source: &str) -> Result<Self> {
        let mut cursor = node.walk();
        let tag = node
            .named_children(&mut cursor)
            .find(|child| matches!(child.kind(), "STag" | "EmptyElemTag"))
            .ok_or_else(|| Error::parse("element without a start tag"))?;

        let mut name = None;
        let mut attributes = Vec::new();
        let mut tag_cursor = tag.walk();
        for part in tag.named_children(&mut tag_cursor) {
            match part.kind() {
                "Name" if name.is_none() => name = Some(text(part, source)?.to_string()),
                "Attribute" => attributes.push(attribute(part, source)?),
                _ => {}
            }
        }
        let name = name.ok_or_else(|| Error::parse("element without a name"))?;

        let mut children = Vec::new();
        child_elements(node, &mut children);
        Ok(Self {
            name,
            attributes,
            children,
        })
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }

    fn label(&self) -> String {
        self.attribute("label").unwrap_or_default().to_string()
    }
}

fn text<'s>(node: Node<'_>, source: &'s str) -> Result<&'s str> {
    node.utf8_text(source.as_bytes())
        .map_err(|e| Error::parse(e.to_string()))
}

fn attribute(node: Node<'_>, source: &str) -> Result<(String, String)> {
    let mut cursor = node.walk();
    let mut key = None;
    let mut value = None;
    for part in node.named_children(&mut cursor) {
        match part.kind() {
            "Name" => key = Some(text(part, source)?.to_string()),
            "AttValue" => value = Some(decode_entities(unquote(text(part, source)?))),
            _ => {}
        }
    }
    match (key, value) {
        (Some(key), Some(value)) => Ok((key, value)),
        _ => Err(Error::parse("incomplete attribute")),
    }
}

/// Collect the nearest `element` descendants, looking through wrapper nodes such as `content`.
fn child_elements<'tree>(node: Node<'tree>, out: &mut Vec<Node<'tree>>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "element" => out.push(child),
            "STag" | "ETag" | "EmptyElemTag" => {}
            _ => child_elements(child, out),
        }
    }
}

fn build(
    element: &Element<'_>,
    source: &str,
    depth: usize,
    max_depth: usize,
) -> Result<StructuralNode> {
    if depth > max_depth {
        return Err(Error::DepthExceeded { limit: max_depth });
    }
    let kind = element.name.to_ascii_lowercase();
    match kind.as_str() {
        // Below the root an item is always a segment; its children are ignored.
        "item" if depth > 0 || element.children.is_empty() => Ok(leaf(element)),
        "item" | "div" => {
            let children = element
                .children
                .iter()
                .map(|node| build(&Element::read(*node, source)?, source, depth + 1, max_depth))
                .collect::<Result<Vec<_>>>()?;
            Ok(StructuralNode::Group {
                label: element.label(),
                children,
            })
        }
        "span" => Ok(leaf(element)),
        _ => Err(Error::UnknownNode {
            name: element.name.clone(),
        }),
    }
}

fn leaf(element: &Element<'_>) -> StructuralNode {
    StructuralNode::Leaf {
        label: element.label(),
        begin: element.attribute("begin").map(str::to_string),
        end: element.attribute("end").map(str::to_string),
    }
}

fn unquote(raw: &str) -> &str {
    raw.strip_prefix(['"', '\''])
        .and_then(|inner| inner.strip_suffix(['"', '\'']))
        .unwrap_or(raw)
}

#[must_use]
/// Replace the predefined XML entities and numeric character references.
///
/// Unrecognised references are kept verbatim.
pub fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let Some(semi) = tail.find(';') else {
            rest = tail;
            break;
        };
        let entity = &tail[1..semi];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                .and_then(char::from_u32),
        };
        if let Some(c) = decoded {
            out.push(c);
        } else {
            out.push_str(&tail[..=semi]);
        }
        rest = &tail[semi + 1..];
    }
    // Either no ampersand remains or the last one is unterminated.
    out.push_str(rest);
    out
}

#[cfg(test)]
#[path = "../tests/xml.rs"]
mod tests;
