// Copyright (C) 2021 Scott Lamb <slamb@slamb.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serialization from a [`NodeView`] tree to an XML string.

mod attribute;
mod element;
mod escape;

use log::debug;

use crate::namespaces::{PrefixIndex, PrefixMap};
use crate::node::{NodeRef, NodeView};

/// The rule an input violated; see [`Error::kind`].
///
/// Apart from [`ErrorKind::NoDocumentElement`], each is a well-formedness
/// check only made when [`SerializeOptions::require_well_formed`] is set.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A document has no element child.
    NoDocumentElement,

    /// An element's local name contains `:` or isn't an XML `Name`.
    InvalidElementName,

    /// An element has the reserved prefix `xmlns`.
    ReservedPrefix,

    /// An attribute's local name contains `:`, isn't an XML `Name`, or is
    /// `xmlns` outside the XMLNS namespace.
    InvalidAttributeName,

    /// Two attributes of one element share a namespace and local name.
    DuplicateAttribute,

    /// An attribute value or namespace URI contains a non-`Char`.
    InvalidAttributeValue,

    /// A namespace declaration binds the XMLNS namespace or undeclares a prefix.
    InvalidNamespaceDeclaration,

    /// Text contains a non-`Char`.
    InvalidText,

    /// A CDATA section contains a non-`Char` or `]]>`.
    InvalidCData,

    /// A comment contains a non-`Char` or `--`, or ends with `-`.
    InvalidComment,

    /// A processing instruction target contains `:` or is `xml` in any case.
    InvalidTarget,

    /// Processing instruction data contains a non-`Char` or `?>`.
    InvalidData,

    /// A doctype public id contains a character outside `PubidChar`.
    InvalidPublicId,

    /// A doctype system id contains a non-`Char`.
    InvalidSystemId,

    /// A system id contains both `"` and `'`, so neither can quote it.
    UnrepresentableSystemId,
}

impl ErrorKind {
    fn description(self) -> &'static str {
        match self {
            ErrorKind::NoDocumentElement => "document has no document element",
            ErrorKind::InvalidElementName => "element local name is not a valid XML name",
            ErrorKind::ReservedPrefix => "elements can't have the xmlns prefix",
            ErrorKind::InvalidAttributeName => "attribute local name is not a valid XML name",
            ErrorKind::DuplicateAttribute => "duplicate attribute",
            ErrorKind::InvalidAttributeValue => "attribute value contains invalid characters",
            ErrorKind::InvalidNamespaceDeclaration => "invalid namespace declaration",
            ErrorKind::InvalidText => "text contains invalid characters",
            ErrorKind::InvalidCData => "CDATA section contains invalid characters or \"]]>\"",
            ErrorKind::InvalidComment => {
                "comment contains invalid characters or hyphens in illegal places"
            }
            ErrorKind::InvalidTarget => "processing instruction target is not well formed",
            ErrorKind::InvalidData => "processing instruction data is not well formed",
            ErrorKind::InvalidPublicId => "doctype public id contains invalid characters",
            ErrorKind::InvalidSystemId => "doctype system id contains invalid characters",
            ErrorKind::UnrepresentableSystemId => {
                "doctype system id contains both quotation marks and apostrophes"
            }
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.description().fmt(f)
    }
}

/// An error while serializing.
///
/// No partial output is available on error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    kind: ErrorKind,

    /// A short human-readable description of the offending node.
    node: String,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, node: impl Into<String>) -> Self {
        let node = node.into();
        debug!("rejecting {}: {}", &node, kind);
        Error { kind, node }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Describes the node which caused the error, e.g. `element {urn:foo}bar`.
    pub fn node(&self) -> &str {
        &self.node
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{} ({})", self.kind, self.node)
    }
}

/// Options for a serialization; defaults to lenient mode.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SerializeOptions {
    /// When true, input that would produce XML which isn't well formed is
    /// rejected. When false, it's serialized on a best-effort basis.
    pub require_well_formed: bool,
}

impl SerializeOptions {
    #[inline]
    pub fn require_well_formed(self, require_well_formed: bool) -> Self {
        Self {
            require_well_formed,
        }
    }
}

/// Serializer for a node and its descendants; returned by [`serialize`].
#[derive(Copy, Clone)]
pub struct Serializer<'a, N> {
    root: &'a N,
    options: SerializeOptions,
}

impl<'a, N: NodeView> Serializer<'a, N> {
    /// Sets if input must be well-formed; defaults to false.
    #[inline]
    pub fn require_well_formed(self, require_well_formed: bool) -> Self {
        Self {
            options: self.options.require_well_formed(require_well_formed),
            ..self
        }
    }

    #[inline]
    pub fn options(self, options: SerializeOptions) -> Self {
        Self { options, ..self }
    }

    /// Serializes to a `String`.
    pub fn to_string(self) -> Result<String, Error> {
        let mut walk = Walk {
            out: String::new(),
            require_well_formed: self.options.require_well_formed,
            prefix_index: PrefixIndex::default(),
        };
        walk.node(self.root, None, &PrefixMap::default())?;
        Ok(walk.out)
    }
}

/// Serializes the given node, which may be of any kind.
///
/// ```
/// use xml_serializer::{serialize, tree::{Element, Node}};
/// let root = Element::new("root").with_child(Node::text("a < b"));
/// let out = serialize(&Node::from(root)).to_string().unwrap();
/// assert_eq!(out, "<root>a &lt; b</root>");
/// ```
#[inline]
pub fn serialize<N: NodeView>(root: &N) -> Serializer<'_, N> {
    Serializer {
        root,
        options: SerializeOptions::default(),
    }
}

pub fn serialize_with_options<N: NodeView>(
    root: &N,
    options: &SerializeOptions,
) -> Result<String, Error> {
    serialize(root).options(*options).to_string()
}

/// Serializes in lenient mode, as DOM `XMLSerializer.serializeToString` does.
pub fn serialize_to_string<N: NodeView>(root: &N) -> Result<String, Error> {
    serialize(root).to_string()
}

/// State for a single serialization.
struct Walk {
    out: String,
    require_well_formed: bool,
    prefix_index: PrefixIndex,
}

impl Walk {
    /// Fails with `kind` if in well-formed mode and `ok` is false.
    fn check(&self, ok: bool, kind: ErrorKind, node: impl FnOnce() -> String) -> Result<(), Error> {
        if self.require_well_formed && !ok {
            return Err(Error::new(kind, node()));
        }
        Ok(())
    }

    /// Appends `node`, given the namespace and prefixes in scope from its ancestors.
    fn node<'a, N: NodeView>(
        &mut self,
        node: &'a N,
        namespace: Option<&'a str>,
        map: &PrefixMap,
    ) -> Result<(), Error> {
        match node.view() {
            NodeRef::Document {
                children,
                has_document_element,
            } => {
                self.check(has_document_element, ErrorKind::NoDocumentElement, || {
                    "document".to_owned()
                })?;
                for child in children {
                    self.node(child, namespace, map)?;
                }
            }
            NodeRef::DocumentFragment { children } => {
                for child in children {
                    self.node(child, namespace, map)?;
                }
            }
            NodeRef::DocumentType {
                name,
                public_id,
                system_id,
            } => self.doctype(name, public_id, system_id)?,
            NodeRef::Element(e) => self.element(&e, namespace, map)?,
            NodeRef::Text(data) => {
                self.check(escape::all_chars(data), ErrorKind::InvalidText, || {
                    format!("text {:?}", data)
                })?;
                escape::write_text(&mut self.out, data);
            }
            NodeRef::CDataSection(data) => {
                self.check(
                    escape::all_chars(data) && !data.contains("]]>"),
                    ErrorKind::InvalidCData,
                    || format!("CDATA section {:?}", data),
                )?;
                self.out.push_str("<![CDATA[");
                self.out.push_str(data);
                self.out.push_str("]]>");
            }
            NodeRef::Comment(data) => {
                self.check(
                    escape::all_chars(data) && !data.contains("--") && !data.ends_with('-'),
                    ErrorKind::InvalidComment,
                    || format!("comment {:?}", data),
                )?;
                self.out.push_str("<!--");
                self.out.push_str(data);
                self.out.push_str("-->");
            }
            NodeRef::ProcessingInstruction { target, data } => {
                self.check(
                    !target.contains(':') && !target.eq_ignore_ascii_case("xml"),
                    ErrorKind::InvalidTarget,
                    || format!("processing instruction {:?}", target),
                )?;
                self.check(
                    escape::all_chars(data) && !data.contains("?>"),
                    ErrorKind::InvalidData,
                    || format!("processing instruction {:?}", target),
                )?;
                self.out.push_str("<?");
                self.out.push_str(target);
                self.out.push(' ');
                self.out.push_str(data);
                self.out.push_str("?>");
            }
        }
        Ok(())
    }

    fn doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> Result<(), Error> {
        let describe = || format!("doctype {:?}", name);
        self.check(
            escape::is_pubid_literal(public_id),
            ErrorKind::InvalidPublicId,
            describe,
        )?;
        self.check(
            escape::all_chars(system_id),
            ErrorKind::InvalidSystemId,
            describe,
        )?;
        self.check(
            !(system_id.contains('"') && system_id.contains('\'')),
            ErrorKind::UnrepresentableSystemId,
            describe,
        )?;
        self.out.push_str("<!DOCTYPE ");
        self.out.push_str(name);
        if !public_id.is_empty() {
            self.out.push_str(" PUBLIC \"");
            self.out.push_str(public_id);
            self.out.push('"');
        } else if !system_id.is_empty() {
            self.out.push_str(" SYSTEM");
        }
        if !system_id.is_empty() {
            self.out.push_str(" \"");
            self.out.push_str(system_id);
            self.out.push('"');
        }
        self.out.push('>');
        Ok(())
    }
}
