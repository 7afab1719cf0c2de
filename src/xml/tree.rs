//! Element tree built from `quick-xml` events.

use quick_xml::Reader;
use quick_xml::events::Event;

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Child element.
    Element(Element),
    /// Text content (unescaped).
    Text(String),
    /// CDATA section (raw).
    CData(String),
    /// Comment (without the `<!--`/`-->` markers).
    Comment(String),
}

/// An XML element with ordered attributes and children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag name.
    pub name: String,
    /// Attributes in document order.
    pub attrs: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

/// A parsed XML document.
///
/// Serialization always emits the `<?xml version='1.0' encoding='UTF-8'?>`
/// declaration the platform's data files carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Root element (usually `<odoo>`).
    pub root: Element,
}

impl Element {
    /// Create an empty element with the given tag name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Get an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing any existing value.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.attrs.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name.to_string(), value));
        }
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let idx = self.attrs.iter().position(|(k, _)| k == name)?;
        Some(self.attrs.remove(idx).1)
    }

    /// Concatenated text content of direct `Text`/`CData` children.
    ///
    /// Returns `None` when the element has no text children at all, so
    /// callers can distinguish `<field/>` from `<field></field>` text.
    pub fn text(&self) -> Option<String> {
        let mut out = String::new();
        let mut found = false;
        for child in &self.children {
            match child {
                Node::Text(t) | Node::CData(t) => {
                    out.push_str(t);
                    found = true;
                }
                _ => {}
            }
        }
        found.then_some(out)
    }

    /// Replace all text children with a single CDATA section.
    pub fn set_text_cdata(&mut self, text: impl Into<String>) {
        self.children
            .retain(|c| !matches!(c, Node::Text(_) | Node::CData(_)));
        self.children.insert(0, Node::CData(text.into()));
    }

    /// Iterate over direct child elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Iterate mutably over direct child elements.
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// First direct child `<field>` with the given `name` attribute.
    pub fn field(&self, name: &str) -> Option<&Element> {
        self.child_elements()
            .find(|e| e.name == "field" && e.attr("name") == Some(name))
    }

    /// Mutable variant of [`Element::field`].
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.child_elements_mut()
            .find(|e| e.name == "field" && e.attr("name") == Some(name))
    }

    /// Text content of a direct child field, if present.
    pub fn field_text(&self, name: &str) -> Option<String> {
        self.field(name).and_then(Element::text)
    }

    /// Remove direct child elements matching the predicate, returning them.
    pub fn remove_children_where<F>(&mut self, mut pred: F) -> Vec<Element>
    where
        F: FnMut(&Element) -> bool,
    {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.children.len());
        for child in self.children.drain(..) {
            match child {
                Node::Element(e) if pred(&e) => removed.push(e),
                other => kept.push(other),
            }
        }
        self.children = kept;
        removed
    }

    /// Collect all descendant elements with the given tag name, depth-first.
    pub fn descendants(&self, tag: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        for child in self.child_elements() {
            if child.name == tag {
                out.push(child);
            }
            out.extend(child.descendants(tag));
        }
        out
    }

    /// Apply `f` to every descendant element with the given tag name.
    pub fn for_each_descendant_mut<F>(&mut self, tag: &str, f: &mut F)
    where
        F: FnMut(&mut Element),
    {
        for child in self.child_elements_mut() {
            if child.name == tag {
                f(child);
            }
            child.for_each_descendant_mut(tag, f);
        }
    }
}

impl Document {
    /// Parse a document from a string.
    pub fn parse(content: &str) -> Result<Self, quick_xml::Error> {
        let mut reader = Reader::from_str(content);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    stack.push(element_from_tag(&e)?);
                }
                Event::Empty(e) => {
                    let element = element_from_tag(&e)?;
                    attach(&mut stack, &mut root, Node::Element(element));
                }
                Event::End(_) => {
                    if let Some(done) = stack.pop() {
                        attach(&mut stack, &mut root, Node::Element(done));
                    }
                }
                Event::Text(t) => {
                    let text = t.unescape()?.into_owned();
                    // Whitespace between elements is indentation, not content.
                    if !text.trim().is_empty() {
                        attach(&mut stack, &mut root, Node::Text(text));
                    }
                }
                Event::CData(c) => {
                    let raw = String::from_utf8_lossy(&c.into_inner()).into_owned();
                    attach(&mut stack, &mut root, Node::CData(raw));
                }
                Event::Comment(c) => {
                    let text = c.unescape()?.into_owned();
                    attach(&mut stack, &mut root, Node::Comment(text));
                }
                Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        // Mismatched end tags are rejected by the reader itself; guard
        // against a document with no element at all.
        root.ok_or_else(|| {
            quick_xml::Error::Io(std::sync::Arc::new(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "document has no root element",
            )))
        })
        .map(|root| Self { root })
    }

    /// All `<record>` elements in document order.
    pub fn records(&self) -> Vec<&Element> {
        self.root.descendants("record")
    }

    /// Apply `f` to every `<record>` element.
    pub fn for_each_record_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Element),
    {
        self.root.for_each_descendant_mut("record", &mut f);
    }

    /// Serialize back to a string with declaration and 2-space indentation.
    pub fn to_xml(&self) -> String {
        let mut out = String::from("<?xml version='1.0' encoding='UTF-8'?>\n");
        write_element(&self.root, 0, &mut out);
        out.push('\n');
        out
    }
}

fn element_from_tag(tag: &quick_xml::events::BytesStart<'_>) -> Result<Element, quick_xml::Error> {
    let name = String::from_utf8_lossy(tag.name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for attr in tag.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attrs.push((key, value));
    }
    Ok(Element {
        name,
        attrs,
        children: Vec::new(),
    })
}

fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if let Node::Element(e) = node {
        if root.is_none() {
            *root = Some(e);
        }
    }
    // Text/comments outside the root element are dropped.
}

fn write_element(el: &Element, depth: usize, out: &mut String) {
    let pad = "  ".repeat(depth);
    out.push_str(&pad);
    out.push('<');
    out.push_str(&el.name);
    for (k, v) in &el.attrs {
        out.push(' ');
        out.push_str(k);
        out.push_str("=\"");
        out.push_str(&escape_attr(v));
        out.push('"');
    }

    if el.children.is_empty() {
        out.push_str("/>");
        return;
    }

    let has_element_children = el
        .children
        .iter()
        .any(|c| matches!(c, Node::Element(_) | Node::Comment(_)));

    out.push('>');
    if has_element_children {
        for child in &el.children {
            out.push('\n');
            match child {
                Node::Element(e) => write_element(e, depth + 1, out),
                Node::Text(t) => {
                    out.push_str(&"  ".repeat(depth + 1));
                    out.push_str(&escape_text(t));
                }
                Node::CData(t) => {
                    out.push_str(&"  ".repeat(depth + 1));
                    write_cdata(t, out);
                }
                Node::Comment(t) => {
                    out.push_str(&"  ".repeat(depth + 1));
                    out.push_str("<!--");
                    out.push_str(t);
                    out.push_str("-->");
                }
            }
        }
        out.push('\n');
        out.push_str(&pad);
    } else {
        // Text-only content stays inline: <field name="x">value</field>
        for child in &el.children {
            match child {
                Node::Text(t) => out.push_str(&escape_text(t)),
                Node::CData(t) => write_cdata(t, out),
                Node::Element(_) | Node::Comment(_) => {}
            }
        }
    }
    out.push_str("</");
    out.push_str(&el.name);
    out.push('>');
}

fn write_cdata(text: &str, out: &mut String) {
    out.push_str("<![CDATA[");
    out.push_str(text);
    out.push_str("]]>");
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
