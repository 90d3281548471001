//! Host SVG document: an element tree read with `quick-xml`, with just
//! enough editing to rewrite path geometry.
//!
//! Elements, text and CDATA sections are kept in document order, and text
//! keeps its whitespace and entity references byte for byte. Comments,
//! declarations, and processing instructions are dropped. Attribute values
//! are unescaped on read and escaped again on write.

use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use warpath_core::SegmentKind;

use crate::error::SvgError;
use crate::normalize::normalize;
use crate::shapes::{SHAPE_ELEMENTS, geometry_attributes, shape_path_data};

/// Handle to a node of an [`SvgDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Element(Element),
    /// Character data exactly as it appeared in the markup.
    Text(String),
    CData(String),
}

#[derive(Debug, Clone, PartialEq)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<NodeId>,
}

/// A parsed SVG document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SvgDocument {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

fn xml_error(error: impl Display) -> SvgError {
    SvgError::Document(error.to_string())
}

impl SvgDocument {
    /// Parse an SVG document.
    ///
    /// # Errors
    ///
    /// - [`SvgError::Document`] if the markup cannot be tokenized.
    /// - [`SvgError::UnbalancedTag`] if end tags do not match start tags.
    pub fn parse(content: &str) -> Result<Self, SvgError> {
        let mut reader = Reader::from_str(content);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = false;
        let decoder = reader.decoder();
        let decode = |bytes: &[u8]| decoder.decode(bytes).map(Cow::into_owned).map_err(xml_error);

        let mut document = Self::default();
        let mut open: Vec<NodeId> = Vec::new();

        loop {
            match reader.read_event().map_err(xml_error)? {
                Event::Start(ref e) => {
                    let id = document.push_element(e, &decode, open.last().copied())?;
                    open.push(id);
                }
                Event::Empty(ref e) => {
                    document.push_element(e, &decode, open.last().copied())?;
                }
                Event::End(ref e) => {
                    let name = decode(e.name().as_ref())?;
                    match open.pop() {
                        Some(id) if document.name(id) == Some(name.as_str()) => {}
                        _ => return Err(SvgError::UnbalancedTag(format!("/{name}"))),
                    }
                }
                Event::Text(ref e) => {
                    if let Some(&parent) = open.last() {
                        document.push_text(&decode(&**e)?, parent);
                    }
                }
                Event::GeneralRef(ref e) => {
                    if let Some(&parent) = open.last() {
                        document.push_text(&format!("&{};", decode(&**e)?), parent);
                    }
                }
                Event::CData(ref e) => {
                    if let Some(&parent) = open.last() {
                        document.push_node(Node::CData(decode(&**e)?), Some(parent));
                    }
                }
                Event::Eof => break,
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
        }

        if let Some(&id) = open.last() {
            let name = document.name(id).unwrap_or_default().to_owned();
            return Err(SvgError::UnbalancedTag(name));
        }
        Ok(document)
    }

    fn push_element<D>(
        &mut self,
        start: &BytesStart<'_>,
        decode: &D,
        parent: Option<NodeId>,
    ) -> Result<NodeId, SvgError>
    where
        D: Fn(&[u8]) -> Result<String, SvgError>,
    {
        let name = decode(start.name().as_ref())?;
        let mut attributes = Vec::new();
        for attr in start.attributes().with_checks(false) {
            let attr = attr.map_err(xml_error)?;
            let key = decode(attr.key.as_ref())?;
            let value = attr.unescape_value().map_err(xml_error)?.into_owned();
            attributes.push((key, value));
        }
        Ok(self.push_node(
            Node::Element(Element {
                name,
                attributes,
                children: Vec::new(),
            }),
            parent,
        ))
    }

    /// Append text to `parent`, extending a text node that is already last.
    fn push_text(&mut self, text: &str, parent: NodeId) {
        let last = self
            .element(parent)
            .and_then(|element| element.children.last().copied());
        if let Some(Node::Text(existing)) = last.and_then(|id| self.nodes.get_mut(id.0)) {
            existing.push_str(text);
            return;
        }
        self.push_node(Node::Text(text.to_owned()), Some(parent));
    }

    fn push_node(&mut self, node: Node, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        match parent.and_then(|p| self.element_mut(p)) {
            Some(element) => element.children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    fn element(&self, id: NodeId) -> Option<&Element> {
        match self.nodes.get(id.0)? {
            Node::Element(element) => Some(element),
            Node::Text(_) | Node::CData(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match self.nodes.get_mut(id.0)? {
            Node::Element(element) => Some(element),
            Node::Text(_) | Node::CData(_) => None,
        }
    }

    /// Every element, in document order.
    pub fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|&id| self.element(id).is_some())
    }

    /// Tag name of an element.
    #[must_use]
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.name.as_str())
    }

    /// Value of an element's attribute.
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing any existing value.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        let Some(element) = self.element_mut(id) else {
            return;
        };
        let value = value.into();
        match element.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => element.attributes.push((name.to_owned(), value)),
        }
    }

    /// Remove an attribute if present.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(element) = self.element_mut(id) {
            element.attributes.retain(|(key, _)| key != name);
        }
    }

    /// All `path` elements, in document order.
    #[must_use]
    pub fn path_nodes(&self) -> Vec<NodeId> {
        self.elements()
            .filter(|&id| self.name(id) == Some("path"))
            .collect()
    }

    /// Path data of a `path` element (the `d` attribute).
    #[must_use]
    pub fn geometry(&self, id: NodeId) -> Option<&str> {
        self.attribute(id, "d")
    }

    /// Replace the path data of a `path` element.
    pub fn set_geometry(&mut self, id: NodeId, d: impl Into<String>) {
        self.set_attribute(id, "d", d);
    }

    /// Rewrite every basic shape element as an equivalent `path`.
    ///
    /// Returns the number of elements converted.
    pub fn flatten_shapes(&mut self) -> usize {
        let shapes: Vec<NodeId> = self
            .elements()
            .filter(|&id| self.name(id).is_some_and(|name| SHAPE_ELEMENTS.contains(&name)))
            .collect();

        for &id in &shapes {
            let Some(element) = self.element(id) else {
                continue;
            };
            let name = element.name.clone();
            let d = shape_path_data(&name, |key| self.attribute(id, key)).unwrap_or_default();

            for key in geometry_attributes(&name) {
                self.remove_attribute(id, key);
            }
            self.set_geometry(id, d);
            if let Some(element) = self.element_mut(id) {
                element.name = "path".to_owned();
            }
            log::debug!("converted <{name}> to <path>");
        }
        shapes.len()
    }

    /// Normalize the data of every `path` element to `curve_type`.
    ///
    /// A `path` without a `d` attribute is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns the first [`SvgError`] from [`normalize`]; elements before it
    /// have already been rewritten.
    pub fn normalize_paths(&mut self, curve_type: SegmentKind) -> Result<(), SvgError> {
        for id in self.path_nodes() {
            let d = normalize(self.geometry(id).unwrap_or_default(), curve_type)?;
            self.set_geometry(id, d);
        }
        Ok(())
    }

    fn write_node(&self, f: &mut Formatter<'_>, id: NodeId) -> fmt::Result {
        let element = match self.nodes.get(id.0) {
            None => return Ok(()),
            Some(Node::Text(text)) => return f.write_str(text),
            Some(Node::CData(data)) => return write!(f, "<![CDATA[{data}]]>"),
            Some(Node::Element(element)) => element,
        };

        write!(f, "<{}", element.name)?;
        for (key, value) in &element.attributes {
            write!(f, " {key}=\"{}\"", escape_attribute(value))?;
        }
        if element.children.is_empty() {
            return f.write_str("/>");
        }
        f.write_str(">")?;
        for &child in &element.children {
            self.write_node(f, child)?;
        }
        write!(f, "</{}>", element.name)
    }
}

impl Display for SvgDocument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, &root) in self.roots.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            self.write_node(f, root)?;
        }
        Ok(())
    }
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}
