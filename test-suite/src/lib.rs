// Copyright (C) 2021 Scott Lamb <slamb@slamb.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpers for tests which reparse serialized output with `xml-rs`.

use xml::reader::{ParserConfig, XmlEvent};
use xml_serializer::tree::{Attribute, Document, Element, Node};

fn reader(input: &str) -> xml::reader::EventReader<&[u8]> {
    ParserConfig::new()
        .trim_whitespace(false)
        .whitespace_to_characters(true)
        .cdata_to_characters(false)
        .ignore_comments(false)
        .create_reader(input.as_bytes())
}

fn non_empty(namespace: Option<String>) -> Option<String> {
    namespace.filter(|ns| !ns.is_empty())
}

/// Parses `input` into a [`Document`] node.
///
/// `xml-rs` reports namespace declarations separately from attributes, so
/// the resulting elements carry only their resolved names and ordinary
/// attributes; the serializer must recreate any declarations.
pub fn parse(input: &str) -> Result<Node, xml::reader::Error> {
    let mut stack: Vec<Element> = Vec::new();
    let mut top = Vec::new();
    for event in reader(input) {
        let node = match event? {
            XmlEvent::StartElement {
                name, attributes, ..
            } => {
                let mut e = Element::new(name.local_name);
                e.namespace = non_empty(name.namespace);
                e.prefix = name.prefix;
                e.attributes = attributes
                    .into_iter()
                    .map(|a| Attribute {
                        namespace: non_empty(a.name.namespace),
                        prefix: a.name.prefix,
                        local_name: a.name.local_name,
                        value: a.value,
                    })
                    .collect();
                stack.push(e);
                continue;
            }
            XmlEvent::EndElement { .. } => match stack.pop() {
                Some(e) => Node::Element(e),
                None => continue,
            },
            XmlEvent::Characters(t) | XmlEvent::Whitespace(t) => Node::Text(t),
            XmlEvent::CData(t) => Node::CDataSection(t),
            XmlEvent::Comment(t) => Node::Comment(t),
            XmlEvent::ProcessingInstruction { name, data } => {
                Node::processing_instruction(name, data.unwrap_or_default())
            }
            _ => continue,
        };
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => top.push(node),
        }
    }
    Ok(Node::Document(Document::new(top)))
}

/// Returns the document element of a tree returned by [`parse`].
pub fn root(doc: &Node) -> Option<&Element> {
    match doc {
        Node::Document(d) => d.document_element(),
        _ => None,
    }
}

/// Concatenates the text and CDATA content of `element`'s descendants.
pub fn text_content(element: &Element) -> String {
    fn walk(nodes: &[Node], out: &mut String) {
        for n in nodes {
            match n {
                Node::Text(t) | Node::CDataSection(t) => out.push_str(t),
                Node::Element(e) => walk(&e.children, out),
                _ => {}
            }
        }
    }
    let mut out = String::new();
    walk(&element.children, &mut out);
    out
}
