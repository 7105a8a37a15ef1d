//! Owned XML element tree
//!
//! [`Element`] is the unit exchanged with the property factory and produced by
//! `generate_xml`. Serialization is canonical so generated elements can be
//! compared byte-for-byte:
//!
//! - attributes are written in insertion order
//! - an element with neither text nor children is written as `<tag/>`
//! - CDATA text is written as `<![CDATA[...]]>`, split into adjacent
//!   sections wherever the payload contains `]]>`
//! - text escapes `&`, `<` and `>`; attribute values also escape `"`
//! - no declaration and no indentation

use std::borrow::Cow;

use indexmap::IndexMap;
use quick_xml::escape::partial_escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::{Reader, Writer};
use serde::Serialize;

use crate::error::XmlError;

/// Text content of an element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Text {
    /// Escaped character data
    Plain(String),
    /// `<![CDATA[...]]>` section
    CData(String),
}

impl Text {
    /// Raw text regardless of representation
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(text) | Self::CData(text) => text,
        }
    }

    fn push_str(&mut self, more: &str) {
        match self {
            Self::Plain(text) | Self::CData(text) => text.push_str(more),
        }
    }
}

/// XML element with ordered attributes
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Element {
    tag: String,
    attributes: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<Text>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Element>,
}

impl Element {
    /// Create an empty element
    #[inline]
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Element tag name
    #[inline]
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Set (or overwrite) an attribute, keeping its original position
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Builder form of [`Element::set_attribute`]
    #[inline]
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Attribute value by name
    #[inline]
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Attributes in document order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Raw text content, if any
    #[inline]
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_ref().map(Text::as_str)
    }

    /// Text content with its representation
    #[inline]
    #[must_use]
    pub fn text_node(&self) -> Option<&Text> {
        self.text.as_ref()
    }

    /// Set escaped text content
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(Text::Plain(text.into()));
    }

    /// Set CDATA text content
    pub fn set_cdata(&mut self, text: impl Into<String>) {
        self.text = Some(Text::CData(text.into()));
    }

    /// Builder form of [`Element::set_text`]
    #[inline]
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Builder form of [`Element::set_cdata`]
    #[inline]
    #[must_use]
    pub fn with_cdata(mut self, text: impl Into<String>) -> Self {
        self.set_cdata(text);
        self
    }

    /// Append a child element
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Builder form of [`Element::push_child`]
    #[inline]
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    /// Child elements in document order
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Children with the given tag
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    /// First child with the given tag
    #[inline]
    #[must_use]
    pub fn find_child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.tag == tag)
    }

    /// This element and all its descendants, depth-first in document order
    #[must_use]
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        let mut pending = vec![self];
        while let Some(element) = pending.pop() {
            out.push(element);
            pending.extend(element.children.iter().rev());
        }
        out
    }

    /// Parse the root element of an XML document
    ///
    /// Whitespace-only text is dropped and surrounding text is trimmed.
    /// Comments, declarations and processing instructions are skipped.
    ///
    /// # Errors
    /// Returns error if the input is not well-formed or has no root element
    pub fn parse(source: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(err) => return Err(XmlError::malformed(reader.error_position(), err)),
            };

            match event {
                Event::Start(start) => {
                    let element = Self::from_start(&start)?;
                    tracing::trace!("Open <{}> at depth {}", element.tag, stack.len());
                    stack.push(element);
                }
                Event::Empty(start) => {
                    let element = Self::from_start(&start)?;
                    if let Some(root) = attach(&mut stack, element) {
                        return Ok(root);
                    }
                }
                Event::End(end) => {
                    let element = stack.pop().ok_or_else(|| {
                        XmlError::Unbalanced(String::from_utf8_lossy(end.name().as_ref()).into_owned())
                    })?;
                    if let Some(root) = attach(&mut stack, element) {
                        return Ok(root);
                    }
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        let unescaped = text
                            .unescape()
                            .map_err(|err| XmlError::malformed(reader.buffer_position(), err))?;
                        current.append_text(Text::Plain(unescaped.into_owned()));
                    }
                }
                Event::CData(cdata) => {
                    if let Some(current) = stack.last_mut() {
                        let raw = String::from_utf8(cdata.into_inner().into_owned())
                            .map_err(|err| XmlError::malformed(reader.buffer_position(), err))?;
                        current.append_text(Text::CData(raw));
                    }
                }
                Event::Eof => {
                    return match stack.pop() {
                        Some(open) => Err(XmlError::Unbalanced(open.tag)),
                        None => Err(XmlError::NoRoot),
                    };
                }
                _ => {}
            }
        }
    }

    /// Canonical serialization
    ///
    /// # Errors
    /// Returns error if the writer fails
    pub fn to_xml(&self) -> Result<String, XmlError> {
        let mut writer = Writer::new(Vec::new());
        self.write_to(&mut writer)?;
        String::from_utf8(writer.into_inner()).map_err(XmlError::write)
    }

    fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<(), XmlError> {
        let mut start = BytesStart::new(self.tag.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute(Attribute {
                key: QName(key.as_bytes()),
                value: Cow::Owned(escape_attribute(value).into_bytes()),
            });
        }

        if self.text.is_none() && self.children.is_empty() {
            return writer.write_event(Event::Empty(start)).map_err(XmlError::write);
        }

        writer.write_event(Event::Start(start)).map_err(XmlError::write)?;

        match &self.text {
            Some(Text::Plain(text)) => writer
                .write_event(Event::Text(BytesText::from_escaped(partial_escape(text.as_str()))))
                .map_err(XmlError::write)?,
            Some(Text::CData(text)) => {
                for section in cdata_sections(text) {
                    writer
                        .write_event(Event::CData(BytesCData::new(section)))
                        .map_err(XmlError::write)?;
                }
            }
            None => {}
        }

        for child in &self.children {
            child.write_to(writer)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(self.tag.as_str())))
            .map_err(XmlError::write)
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let tag = std::str::from_utf8(start.name().as_ref())
            .map_err(|err| XmlError::Malformed(err.to_string()))?
            .to_string();
        let mut element = Self::new(tag);

        for attribute in start.attributes() {
            let attribute = attribute.map_err(|err| XmlError::Malformed(err.to_string()))?;
            let key = std::str::from_utf8(attribute.key.as_ref())
                .map_err(|err| XmlError::Malformed(err.to_string()))?
                .to_string();
            let value = attribute
                .unescape_value()
                .map_err(|err| XmlError::Malformed(err.to_string()))?
                .into_owned();
            element.attributes.insert(key, value);
        }

        Ok(element)
    }

    fn append_text(&mut self, text: Text) {
        match &mut self.text {
            Some(existing) => existing.push_str(text.as_str()),
            None => self.text = Some(text),
        }
    }
}

/// Escape `&`, `<`, `>` and `"`; single quotes stay literal
fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Split a CDATA payload so no section contains `]]>`
///
/// `a]]>b` becomes `a]]` and `>b`; the parser joins adjacent sections back.
fn cdata_sections(text: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut rest = text;
    while let Some(end) = rest.find("]]>") {
        sections.push(&rest[..end + 2]);
        rest = &rest[end + 2..];
    }
    sections.push(rest);
    sections
}

/// Attach a finished element to its parent; returns it when it is the root
fn attach(stack: &mut [Element], element: Element) -> Option<Element> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            None
        }
        None => Some(element),
    }
}
