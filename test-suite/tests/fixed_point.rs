// Copyright (C) 2021 Scott Lamb <slamb@slamb.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serializing, reparsing, and serializing again yields identical output.

use test_suite::parse;
use xml_serializer::serialize;
use xml_serializer::tree::{Element, Node};

fn init() {
    let _ = env_logger::Builder::new().is_test(true).try_init();
}

fn assert_fixed_point(tree: Element) {
    let first = serialize(&Node::from(tree))
        .require_well_formed(true)
        .to_string()
        .unwrap();
    let reparsed = parse(&first).unwrap();
    let second = serialize(&reparsed)
        .require_well_formed(true)
        .to_string()
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn plain() {
    init();
    assert_fixed_point(
        Element::new("root")
            .with_child(Element::new("child1").with_child(Node::text("value1 & <more>")))
            .with_child(Node::comment(" note "))
            .with_child(Node::processing_instruction("pi", "data"))
            .with_child(Element::new("empty")),
    );
}

#[test]
fn default_namespace_reset() {
    init();
    assert_fixed_point(
        Element::new("root").with_child(
            Element::new_ns(Some("urn:foo"), "another")
                .with_child(Element::new("child1").with_child(Node::text("value1"))),
        ),
    );
}

#[test]
fn prefixes() {
    init();
    let mut leaf = Element::new_ns(Some("urn:q"), "q:leaf");
    leaf.set_attribute_ns(Some("urn:p"), "p:attr", "v");
    assert_fixed_point(
        Element::new_ns(Some("urn:p"), "p:root")
            .with_child(Element::new_ns(Some("urn:p"), "p:child").with_child(leaf))
            .with_child(Element::new_ns(Some("urn:d"), "defaulted")),
    );
}

#[test]
fn generated_prefixes() {
    init();
    let mut root = Element::new("root");
    root.set_attribute_ns(Some("https://example.com/"), "attribute1", "value");
    root.set_attribute_ns(Some("https://example.com/"), "attribute2", "value");
    let mut child = Element::new("child");
    child.set_attribute_ns(Some("urn:other"), "a", "\t\n");
    assert_fixed_point(root.with_child(child));
}
