// Copyright (C) 2021 Scott Lamb <slamb@slamb.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A small owned node tree implementing [`NodeView`].
//!
//! This is for callers (and tests) without a DOM of their own. Constructors
//! mirror the DOM's `createElementNS` / `setAttributeNS` naming rules: a
//! qualified name `p:local` is split into prefix and local name.

use crate::node::{AttrRef, ElementRef, NodeRef, NodeView};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    Document(Document),
    DocumentFragment(Vec<Node>),
    DocumentType(DocumentType),
    Element(Element),
    Text(String),
    CDataSection(String),
    Comment(String),
    ProcessingInstruction { target: String, data: String },
}

impl Node {
    pub fn text(data: impl Into<String>) -> Self {
        Node::Text(data.into())
    }

    pub fn comment(data: impl Into<String>) -> Self {
        Node::Comment(data.into())
    }

    pub fn cdata(data: impl Into<String>) -> Self {
        Node::CDataSection(data.into())
    }

    pub fn processing_instruction(target: impl Into<String>, data: impl Into<String>) -> Self {
        Node::ProcessingInstruction {
            target: target.into(),
            data: data.into(),
        }
    }

    pub fn doctype(
        name: impl Into<String>,
        public_id: impl Into<String>,
        system_id: impl Into<String>,
    ) -> Self {
        Node::DocumentType(DocumentType {
            name: name.into(),
            public_id: public_id.into(),
            system_id: system_id.into(),
        })
    }
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

impl From<Document> for Node {
    fn from(d: Document) -> Self {
        Node::Document(d)
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// Returns the first element child, if any.
    pub fn document_element(&self) -> Option<&Element> {
        self.children.iter().find_map(|c| match c {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DocumentType {
    pub name: String,
    pub public_id: String,
    pub system_id: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Element {
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    pub local_name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,

    /// Content of an XHTML `template` element; serialized in place of `children`.
    pub template_content: Option<Box<Node>>,
}

impl Element {
    /// Creates an element in the null namespace.
    pub fn new(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            prefix: None,
            local_name: local_name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            template_content: None,
        }
    }

    /// Creates an element from a namespace and a possibly-prefixed qualified name.
    pub fn new_ns(namespace: Option<&str>, qualified_name: &str) -> Self {
        let (prefix, local_name) = split_qualified_name(qualified_name);
        Self {
            namespace: non_empty(namespace),
            prefix,
            ..Self::new(local_name)
        }
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_template_content(mut self, content: Vec<Node>) -> Self {
        self.template_content = Some(Box::new(Node::DocumentFragment(content)));
        self
    }

    /// Sets a null-namespace attribute, replacing any existing one of the same name.
    pub fn set_attribute(&mut self, local_name: &str, value: impl Into<String>) {
        self.set(Attribute::new(local_name, value));
    }

    /// Sets a namespaced attribute, replacing any existing one with the same
    /// namespace and local name (its prefix is replaced too).
    pub fn set_attribute_ns(
        &mut self,
        namespace: Option<&str>,
        qualified_name: &str,
        value: impl Into<String>,
    ) {
        self.set(Attribute::new_ns(namespace, qualified_name, value));
    }

    fn set(&mut self, attribute: Attribute) {
        match self
            .attributes
            .iter_mut()
            .find(|a| a.namespace == attribute.namespace && a.local_name == attribute.local_name)
        {
            Some(existing) => *existing = attribute,
            None => self.attributes.push(attribute),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attribute {
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    pub local_name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(local_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            namespace: None,
            prefix: None,
            local_name: local_name.into(),
            value: value.into(),
        }
    }

    pub fn new_ns(namespace: Option<&str>, qualified_name: &str, value: impl Into<String>) -> Self {
        let (prefix, local_name) = split_qualified_name(qualified_name);
        Self {
            namespace: non_empty(namespace),
            prefix,
            local_name: local_name.to_owned(),
            value: value.into(),
        }
    }

    /// Creates an `xmlns` (for an empty `prefix`) or `xmlns:prefix` declaration.
    pub fn xmlns(prefix: &str, namespace: impl Into<String>) -> Self {
        if prefix.is_empty() {
            Self::new_ns(Some(crate::XMLNS_NS), "xmlns", namespace)
        } else {
            Self::new_ns(Some(crate::XMLNS_NS), &format!("xmlns:{}", prefix), namespace)
        }
    }
}

fn split_qualified_name(qualified_name: &str) -> (Option<String>, &str) {
    match qualified_name.split_once(':') {
        Some((prefix, local_name)) => (Some(prefix.to_owned()), local_name),
        None => (None, qualified_name),
    }
}

fn non_empty(namespace: Option<&str>) -> Option<String> {
    namespace.filter(|ns| !ns.is_empty()).map(str::to_owned)
}

impl NodeView for Node {
    fn view(&self) -> NodeRef<'_, Self> {
        match self {
            Node::Document(d) => NodeRef::Document {
                children: d.children.iter().collect(),
                has_document_element: d.document_element().is_some(),
            },
            Node::DocumentFragment(children) => NodeRef::DocumentFragment {
                children: children.iter().collect(),
            },
            Node::DocumentType(d) => NodeRef::DocumentType {
                name: &d.name,
                public_id: &d.public_id,
                system_id: &d.system_id,
            },
            Node::Element(e) => NodeRef::Element(ElementRef {
                namespace: e.namespace.as_deref(),
                prefix: e.prefix.as_deref(),
                local_name: &e.local_name,
                attributes: e
                    .attributes
                    .iter()
                    .map(|a| AttrRef {
                        namespace: a.namespace.as_deref(),
                        prefix: a.prefix.as_deref(),
                        local_name: &a.local_name,
                        value: &a.value,
                    })
                    .collect(),
                children: e.children.iter().collect(),
                template_content: e.template_content.as_deref(),
            }),
            Node::Text(t) => NodeRef::Text(t),
            Node::CDataSection(t) => NodeRef::CDataSection(t),
            Node::Comment(t) => NodeRef::Comment(t),
            Node::ProcessingInstruction { target, data } => {
                NodeRef::ProcessingInstruction { target, data }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_names_split() {
        let e = Element::new_ns(Some(crate::XHTML_NS), "html:br");
        assert_eq!(e.prefix.as_deref(), Some("html"));
        assert_eq!(e.local_name, "br");

        let a = Attribute::xmlns("p", "urn:p");
        assert_eq!(a.namespace.as_deref(), Some(crate::XMLNS_NS));
        assert_eq!(a.prefix.as_deref(), Some("xmlns"));
        assert_eq!(a.local_name, "p");

        let a = Attribute::xmlns("", "urn:p");
        assert_eq!(a.prefix, None);
        assert_eq!(a.local_name, "xmlns");
    }

    #[test]
    fn set_attribute_replaces() {
        let mut e = Element::new("root");
        e.set_attribute("attr", "a");
        e.set_attribute_ns(Some("urn:x"), "x:attr", "b");
        e.set_attribute("attr", "c");
        assert_eq!(e.attributes.len(), 2);
        assert_eq!(e.attributes[0].value, "c");
        assert_eq!(e.attributes[1].value, "b");
    }

    #[test]
    fn document_element() {
        let d = Document::new(vec![
            Node::comment("c"),
            Element::new("root").into(),
        ]);
        assert_eq!(d.document_element().map(|e| &*e.local_name), Some("root"));
        assert!(Document::default().document_element().is_none());
    }
}
