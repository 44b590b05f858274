// Copyright (C) 2021 Scott Lamb <slamb@slamb.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Element start tags: qualified name choice and namespace declarations.

use log::trace;

use super::{escape, ErrorKind, Walk};
use crate::namespaces::{LocalPrefixMap, PrefixMap};
use crate::node::{ElementRef, NodeView};
use crate::{Error, ExpandedNameRef, XHTML_NS, XMLNS_NS, XML_NS};

/// XHTML elements which are written as `<name />` when they have no children.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "menuitem", "meta", "param", "source", "track", "wbr",
];

/// Records the element's own `xmlns:*` declarations into `map` and `local_prefixes`.
///
/// Returns the value of its first `xmlns` (default namespace) declaration, if any.
fn record_namespace_information<'a, N>(
    element: &ElementRef<'a, N>,
    map: &mut PrefixMap,
    local_prefixes: &mut LocalPrefixMap,
) -> Option<&'a str> {
    let mut default_namespace = None;
    for attr in &element.attributes {
        if attr.namespace != Some(XMLNS_NS) {
            continue;
        }
        if attr.prefix.is_none() {
            if default_namespace.is_none() {
                default_namespace = Some(attr.value);
            }
            continue;
        }
        if attr.value == XML_NS || map.contains(attr.value, attr.local_name) {
            continue;
        }
        map.add(attr.value, attr.local_name);
        local_prefixes.insert(attr.local_name, attr.value);
    }
    default_namespace
}

/// The empty string in a default namespace declaration means the null namespace.
fn non_empty(namespace: &str) -> Option<&str> {
    if namespace.is_empty() {
        None
    } else {
        Some(namespace)
    }
}

impl Walk {
    pub(super) fn element<'a, N: NodeView>(
        &mut self,
        element: &ElementRef<'a, N>,
        inherited_namespace: Option<&'a str>,
        map: &PrefixMap,
    ) -> Result<(), Error> {
        let ns = element.namespace;
        let local_name = element.local_name;
        let describe = || format!("element {}", ExpandedNameRef::new(ns, local_name));
        self.check(
            !local_name.contains(':') && escape::is_name(local_name),
            ErrorKind::InvalidElementName,
            describe,
        )?;

        let mut map = map.clone();
        let mut local_prefixes = LocalPrefixMap::default();
        let local_default_namespace =
            record_namespace_information(element, &mut map, &mut local_prefixes);
        let mut ignore_namespace_definition_attr = false;
        let mut child_namespace = inherited_namespace;

        self.out.push('<');
        let qualified_name = if inherited_namespace == ns {
            if local_default_namespace.is_some() {
                ignore_namespace_definition_attr = true;
            }
            let qualified_name = if ns == Some(XML_NS) {
                format!("xml:{}", local_name)
            } else {
                local_name.to_owned()
            };
            self.out.push_str(&qualified_name);
            qualified_name
        } else {
            let prefix = element.prefix;
            let mut candidate = ns
                .and_then(|ns| map.preferred_prefix(ns, prefix))
                .map(str::to_owned);
            if prefix == Some("xmlns") {
                self.check(false, ErrorKind::ReservedPrefix, describe)?;
                candidate = Some("xmlns".to_owned());
            }
            if let Some(candidate) = candidate {
                if let Some(d) = local_default_namespace {
                    if d != XML_NS {
                        child_namespace = non_empty(d);
                    }
                }
                let qualified_name = format!("{}:{}", candidate, local_name);
                self.out.push_str(&qualified_name);
                qualified_name
            } else if let Some(prefix) = prefix {
                let ns_key = ns.unwrap_or("");
                let prefix = if local_prefixes.conflicts(prefix, ns_key) {
                    map.generate_prefix(ns_key, &mut self.prefix_index)
                } else {
                    map.add(ns_key, prefix);
                    prefix.to_owned()
                };
                let qualified_name = format!("{}:{}", prefix, local_name);
                self.out.push_str(&qualified_name);
                self.out.push_str(" xmlns:");
                self.out.push_str(&prefix);
                self.namespace_value(ns_key, describe)?;
                if let Some(d) = local_default_namespace {
                    child_namespace = non_empty(d);
                }
                qualified_name
            } else if local_default_namespace.is_none() || local_default_namespace != ns {
                ignore_namespace_definition_attr = true;
                child_namespace = ns;
                self.out.push_str(local_name);
                self.out.push_str(" xmlns");
                self.namespace_value(ns.unwrap_or(""), describe)?;
                local_name.to_owned()
            } else {
                child_namespace = ns;
                self.out.push_str(local_name);
                local_name.to_owned()
            }
        };
        trace!(
            "starting {} (inherited namespace {:?}, children inherit {:?})",
            &qualified_name,
            inherited_namespace,
            child_namespace
        );

        self.attributes(
            element,
            &mut map,
            &local_prefixes,
            ignore_namespace_definition_attr,
        )?;

        let is_xhtml = ns == Some(XHTML_NS);
        if element.children.is_empty() {
            if is_xhtml && VOID_ELEMENTS.contains(&local_name) {
                self.out.push_str(" />");
                return Ok(());
            }
            if !is_xhtml {
                self.out.push_str("/>");
                return Ok(());
            }
        }
        self.out.push('>');
        match element.template_content {
            Some(content) if is_xhtml && local_name == "template" => {
                self.node(content, child_namespace, &map)?
            }
            _ => {
                for &child in &element.children {
                    self.node(child, child_namespace, &map)?;
                }
            }
        }
        self.out.push_str("</");
        self.out.push_str(&qualified_name);
        self.out.push('>');
        trace!("ending {}", &qualified_name);
        Ok(())
    }

    /// Appends `="namespace"` for a namespace declaration made on behalf of an element.
    fn namespace_value(
        &mut self,
        namespace: &str,
        describe: impl FnOnce() -> String,
    ) -> Result<(), Error> {
        self.check(
            escape::all_chars(namespace),
            ErrorKind::InvalidAttributeValue,
            describe,
        )?;
        self.out.push_str("=\"");
        escape::write_attribute_value(&mut self.out, namespace);
        self.out.push('"');
        Ok(())
    }
}
