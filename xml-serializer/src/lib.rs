// Copyright (C) 2021 Scott Lamb <slamb@slamb.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serializes an already-built DOM-style node tree into XML text.
//!
//! The tree itself is supplied by the caller through the [`NodeView`] trait;
//! [`tree`] has a small owned implementation. Serialization follows the
//! [DOM Parsing "XML serialization"
//! algorithm](https://w3c.github.io/DOM-Parsing/#xml-serialization): it picks
//! a prefix for every element and attribute, emits whatever `xmlns`
//! declarations are needed to keep the output namespace-well-formed, and
//! escapes character data. With `require_well_formed` set, input that can't
//! be represented as well-formed XML is rejected rather than written
//! best-effort.

pub mod namespaces;
pub mod node;
pub mod ser;
pub mod tree;

pub use node::{AttrRef, ElementRef, NodeRef, NodeView};
pub use ser::{
    serialize, serialize_to_string, serialize_with_options, Error, ErrorKind, SerializeOptions,
    Serializer,
};

/// The namespace bound to the reserved `xml` prefix.
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// The namespace of `xmlns` and `xmlns:*` declaration attributes.
pub const XMLNS_NS: &str = "http://www.w3.org/2000/xmlns/";

/// The XHTML namespace, which gets HTML-compatible empty-element handling.
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// A reference to an "expanded name": namespace and local name.
///
/// See [Namespaces in XML 1.1 (Second Edition) section 2.1: Basic
/// Concepts](https://www.w3.org/TR/2006/REC-xml-names11-20060816/#concepts).
/// The null namespace is represented by the empty string.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ExpandedNameRef<'a> {
    pub namespace: &'a str,
    pub local_name: &'a str,
}

impl<'a> ExpandedNameRef<'a> {
    pub(crate) fn new(namespace: Option<&'a str>, local_name: &'a str) -> Self {
        Self {
            namespace: namespace.unwrap_or(""),
            local_name,
        }
    }
}

impl<'a> std::fmt::Display for ExpandedNameRef<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.local_name)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.local_name)
        }
    }
}
