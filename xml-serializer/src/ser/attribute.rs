// Copyright (C) 2021 Scott Lamb <slamb@slamb.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Attribute prefixes and values.

use std::collections::HashSet;

use super::{escape, ErrorKind, Walk};
use crate::namespaces::{LocalPrefixMap, PrefixMap};
use crate::node::ElementRef;
use crate::{Error, ExpandedNameRef, XMLNS_NS, XML_NS};

impl Walk {
    /// Appends the element's attributes, declaring any namespaces they need.
    ///
    /// Unlike elements, a namespaced attribute always needs a prefix: the
    /// default namespace never applies to attributes.
    pub(super) fn attributes<N>(
        &mut self,
        element: &ElementRef<'_, N>,
        map: &mut PrefixMap,
        local_prefixes: &LocalPrefixMap,
        ignore_namespace_definition_attr: bool,
    ) -> Result<(), Error> {
        let mut seen = HashSet::new();
        for attr in &element.attributes {
            let name = ExpandedNameRef::new(attr.namespace, attr.local_name);
            let describe = || format!("attribute {}", name);
            self.check(seen.insert(name), ErrorKind::DuplicateAttribute, describe)?;

            let mut candidate = None;
            if let Some(ns) = attr.namespace {
                candidate = map.preferred_prefix(ns, attr.prefix).map(str::to_owned);
                if ns == XMLNS_NS {
                    let redundant = match attr.prefix {
                        None => ignore_namespace_definition_attr,
                        Some(_) => {
                            local_prefixes.get(attr.local_name) != Some(attr.value)
                                && map.contains(attr.value, attr.local_name)
                        }
                    };
                    if attr.value == XML_NS || redundant {
                        continue;
                    }
                    self.check(
                        attr.value != XMLNS_NS && !(attr.prefix.is_some() && attr.value.is_empty()),
                        ErrorKind::InvalidNamespaceDeclaration,
                        describe,
                    )?;
                    if attr.prefix == Some("xmlns") {
                        candidate = Some("xmlns".to_owned());
                    }
                } else if candidate.is_none() {
                    let prefix = map.generate_prefix(ns, &mut self.prefix_index);
                    self.check(
                        escape::all_chars(ns),
                        ErrorKind::InvalidAttributeValue,
                        describe,
                    )?;
                    self.out.push_str(" xmlns:");
                    self.out.push_str(&prefix);
                    self.out.push_str("=\"");
                    escape::write_attribute_value(&mut self.out, ns);
                    self.out.push('"');
                    candidate = Some(prefix);
                }
            }

            self.check(
                !attr.local_name.contains(':')
                    && escape::is_name(attr.local_name)
                    && !(attr.local_name == "xmlns" && attr.namespace.is_none()),
                ErrorKind::InvalidAttributeName,
                describe,
            )?;
            self.check(
                escape::all_chars(attr.value),
                ErrorKind::InvalidAttributeValue,
                describe,
            )?;
            self.out.push(' ');
            if let Some(prefix) = candidate {
                self.out.push_str(&prefix);
                self.out.push(':');
            }
            self.out.push_str(attr.local_name);
            self.out.push_str("=\"");
            escape::write_attribute_value(&mut self.out, attr.value);
            self.out.push('"');
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::{Attribute, Document, Element, Node};
    use crate::{serialize, ErrorKind, XMLNS_NS, XML_NS};
    use assert_matches::assert_matches;

    fn init() {
        let _ = env_logger::Builder::new().is_test(true).try_init();
    }

    fn lenient(node: impl Into<Node>) -> String {
        serialize(&node.into()).to_string().unwrap()
    }

    fn strict_kind(node: impl Into<Node>) -> Result<String, ErrorKind> {
        serialize(&node.into())
            .require_well_formed(true)
            .to_string()
            .map_err(|e| e.kind())
    }

    /// Two attributes in one undeclared namespace share a single generated prefix.
    #[test]
    fn generated_prefix_memoized() {
        init();
        let mut root = Element::new("root")
            .with_child(Element::new("child1").with_child(Node::text("value1")));
        root.set_attribute_ns(Some("https://example.com/"), "attribute1", "value");
        root.set_attribute_ns(Some("https://example.com/"), "attribute2", "value");
        let doc = Document::new(vec![root.into()]);
        assert_eq!(
            lenient(doc),
            r#"<root xmlns:ns1="https://example.com/" ns1:attribute1="value" ns1:attribute2="value"><child1>value1</child1></root>"#
        );
    }

    /// Generated prefixes are unique across the whole document.
    #[test]
    fn generated_prefixes_not_reused_across_siblings() {
        init();
        let mut a = Element::new("a");
        a.set_attribute_ns(Some("urn:x"), "attr", "1");
        let mut b = Element::new("b");
        b.set_attribute_ns(Some("urn:x"), "attr", "2");
        let root = Element::new("root").with_child(a).with_child(b);
        assert_eq!(
            lenient(root),
            r#"<root><a xmlns:ns1="urn:x" ns1:attr="1"/><b xmlns:ns2="urn:x" ns2:attr="2"/></root>"#
        );
    }

    #[test]
    fn custom_prefixes() {
        init();
        let root = Element::new("element")
            .with_attribute(Attribute::xmlns("prefix", "https://example.com/"))
            .with_attribute(Attribute::new_ns(
                Some("https://example.com/"),
                "prefix:hasOwnProperty",
                "value",
            ));
        assert_eq!(
            lenient(root),
            r#"<element xmlns:prefix="https://example.com/" prefix:hasOwnProperty="value"/>"#
        );
    }

    /// A declaration repeating one inherited from an ancestor is dropped.
    #[test]
    fn inherited_declaration_dropped() {
        init();
        let root = Element::new("root")
            .with_attribute(Attribute::xmlns("p", "urn:p"))
            .with_child(
                Element::new("child")
                    .with_attribute(Attribute::xmlns("p", "urn:p"))
                    .with_attribute(Attribute::new_ns(Some("urn:p"), "p:a", "1")),
            );
        assert_eq!(
            lenient(root),
            r#"<root xmlns:p="urn:p"><child p:a="1"/></root>"#
        );
    }

    #[test]
    fn descendants_reuse_generated_prefix() {
        init();
        let mut child = Element::new("child");
        child.set_attribute_ns(Some("urn:x"), "b", "2");
        let mut root = Element::new("root").with_child(child);
        root.set_attribute_ns(Some("urn:x"), "a", "1");
        assert_eq!(
            lenient(root),
            r#"<root xmlns:ns1="urn:x" ns1:a="1"><child ns1:b="2"/></root>"#
        );
    }

    #[test]
    fn requested_prefix_preferred() {
        init();
        let root = Element::new("root")
            .with_attribute(Attribute::xmlns("a", "urn:x"))
            .with_attribute(Attribute::xmlns("b", "urn:x"))
            .with_attribute(Attribute::new_ns(Some("urn:x"), "b:one", "1"))
            .with_attribute(Attribute::new_ns(Some("urn:x"), "c:two", "2"));
        assert_eq!(
            lenient(root),
            r#"<root xmlns:a="urn:x" xmlns:b="urn:x" b:one="1" a:two="2"/>"#
        );
    }

    #[test]
    fn xml_attributes() {
        init();
        let root = Element::new("root").with_attribute(Attribute::new_ns(
            Some(XML_NS),
            "xml:lang",
            "en",
        ));
        assert_eq!(lenient(root), r#"<root xml:lang="en"/>"#);
    }

    #[test]
    fn values_escaped() {
        init();
        let mut root = Element::new("root");
        root.set_attribute("attr", "\t");
        assert_eq!(lenient(root.clone()), r#"<root attr="&#9;"/>"#);
        root.set_attribute("attr", "\n");
        assert_eq!(lenient(root.clone()), r#"<root attr="&#xA;"/>"#);
        root.set_attribute("attr", "\r");
        assert_eq!(lenient(root.clone()), r#"<root attr="&#xD;"/>"#);
        root.set_attribute("attr", "a\"b&c<d");
        assert_eq!(lenient(root), r#"<root attr="a&quot;b&amp;c&lt;d"/>"#);
    }

    #[test]
    fn strict_names() {
        init();
        let mut e = Element::new("root").with_attribute(Attribute::new("ok", "1"));
        e.attributes[0].local_name = "a:b".to_owned();
        assert_eq!(lenient(e.clone()), r#"<root a:b="1"/>"#);
        assert_matches!(strict_kind(e), Err(ErrorKind::InvalidAttributeName));
        assert_matches!(
            strict_kind(Element::new("root").with_attribute(Attribute::new("xmlns", "urn:x"))),
            Err(ErrorKind::InvalidAttributeName)
        );
        assert_matches!(
            strict_kind(Element::new("root").with_attribute(Attribute::new("1a", "x"))),
            Err(ErrorKind::InvalidAttributeName)
        );
    }

    #[test]
    fn strict_values() {
        init();
        assert_matches!(
            strict_kind(Element::new("root").with_attribute(Attribute::new("a", "\u{0}"))),
            Err(ErrorKind::InvalidAttributeValue)
        );
        assert_eq!(
            strict_kind(Element::new("root").with_attribute(Attribute::new("a", "\t"))),
            Ok(r#"<root a="&#9;"/>"#.to_owned())
        );
    }

    #[test]
    fn duplicates() {
        init();
        let e = Element::new("root")
            .with_attribute(Attribute::new("a", "1"))
            .with_attribute(Attribute::new("a", "2"));
        assert_eq!(lenient(e.clone()), r#"<root a="1" a="2"/>"#);
        assert_matches!(strict_kind(e), Err(ErrorKind::DuplicateAttribute));

        // Same local name in different namespaces is fine.
        let e = Element::new("root")
            .with_attribute(Attribute::new("a", "1"))
            .with_attribute(Attribute::new_ns(Some("urn:x"), "x:a", "2"));
        assert_eq!(
            strict_kind(e),
            Ok(r#"<root a="1" xmlns:ns1="urn:x" ns1:a="2"/>"#.to_owned())
        );
    }

    #[test]
    fn strict_declarations() {
        init();
        assert_matches!(
            strict_kind(Element::new("root").with_attribute(Attribute::xmlns("p", ""))),
            Err(ErrorKind::InvalidNamespaceDeclaration)
        );
        assert_matches!(
            strict_kind(Element::new("root").with_attribute(Attribute::xmlns("p", XMLNS_NS))),
            Err(ErrorKind::InvalidNamespaceDeclaration)
        );
        assert_eq!(
            lenient(Element::new("root").with_attribute(Attribute::xmlns("p", ""))),
            r#"<root xmlns:p=""/>"#
        );
    }
}
