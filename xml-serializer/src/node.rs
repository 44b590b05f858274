// Copyright (C) 2021 Scott Lamb <slamb@slamb.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only access to the tree being serialized.

/// A node in a caller-owned tree.
///
/// The serializer never mutates the tree; it only asks each node for a
/// borrowed [`NodeRef`] describing its kind and the fields serialization
/// needs. Implementations should return children and attributes in document
/// order.
pub trait NodeView: Sized {
    fn view(&self) -> NodeRef<'_, Self>;
}

/// A borrowed description of one node.
#[derive(Debug)]
pub enum NodeRef<'a, N> {
    Document {
        children: Vec<&'a N>,

        /// True iff one of `children` is an element.
        has_document_element: bool,
    },
    DocumentFragment {
        children: Vec<&'a N>,
    },
    DocumentType {
        name: &'a str,
        public_id: &'a str,
        system_id: &'a str,
    },
    Element(ElementRef<'a, N>),
    Text(&'a str),
    CDataSection(&'a str),
    Comment(&'a str),
    ProcessingInstruction {
        target: &'a str,
        data: &'a str,
    },
}

#[derive(Debug)]
pub struct ElementRef<'a, N> {
    pub namespace: Option<&'a str>,
    pub prefix: Option<&'a str>,
    pub local_name: &'a str,
    pub attributes: Vec<AttrRef<'a>>,
    pub children: Vec<&'a N>,

    /// The content fragment of an XHTML `template` element, if any.
    pub template_content: Option<&'a N>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AttrRef<'a> {
    pub namespace: Option<&'a str>,
    pub prefix: Option<&'a str>,
    pub local_name: &'a str,
    pub value: &'a str,
}
