// Copyright (C) 2021 Scott Lamb <slamb@slamb.org>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Namespace prefix bookkeeping used while walking the tree.
//!
//! Throughout, a namespace is keyed by its URI, with the null namespace
//! coalesced to the empty string.

use std::collections::BTreeMap;

use log::debug;

use crate::XML_NS;

/// A mapping from namespace to the prefixes in scope for it.
///
/// Each element takes a copy of its parent's map, so additions made while
/// serializing one element are only visible to its own attributes and
/// descendants.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrefixMap(
    /// Candidate prefixes for each namespace, in order of declaration.
    BTreeMap<String, Vec<String>>,
);

impl Default for PrefixMap {
    /// Returns a map holding only the reserved `xml` binding.
    fn default() -> Self {
        let mut map = BTreeMap::new();
        map.insert(XML_NS.to_owned(), vec!["xml".to_owned()]);
        PrefixMap(map)
    }
}

impl PrefixMap {
    /// Returns true iff `prefix` is already a candidate for `namespace`.
    pub fn contains(&self, namespace: &str, prefix: &str) -> bool {
        self.0
            .get(namespace)
            .map(|candidates| candidates.iter().any(|p| p == prefix))
            .unwrap_or(false)
    }

    /// Picks the prefix to use for `namespace`.
    ///
    /// Returns `preferred` if it's a candidate, else the earliest-declared
    /// candidate, else `None`.
    pub fn preferred_prefix(&self, namespace: &str, preferred: Option<&str>) -> Option<&str> {
        let candidates = self.0.get(namespace)?;
        if let Some(preferred) = preferred {
            if let Some(p) = candidates.iter().find(|p| *p == preferred) {
                return Some(p.as_str());
            }
        }
        candidates.first().map(String::as_str)
    }

    /// Appends `prefix` to the candidates for `namespace`.
    pub fn add(&mut self, namespace: &str, prefix: &str) {
        self.0
            .entry(namespace.to_owned())
            .or_default()
            .push(prefix.to_owned());
    }

    /// Mints a fresh `ns<N>` prefix, registering it as a candidate for `namespace`.
    pub fn generate_prefix(&mut self, namespace: &str, index: &mut PrefixIndex) -> String {
        let prefix = format!("ns{}", index.next());
        debug!("generated prefix {} for namespace {:?}", &prefix, namespace);
        self.add(namespace, &prefix);
        prefix
    }
}

/// The prefixes declared by `xmlns:*` attributes on a single element.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LocalPrefixMap(
    /// A mapping from prefix to the namespace it was declared for.
    BTreeMap<String, String>,
);

impl LocalPrefixMap {
    pub fn insert(&mut self, prefix: &str, namespace: &str) {
        self.0.insert(prefix.to_owned(), namespace.to_owned());
    }

    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.0.get(prefix).map(String::as_str)
    }

    /// Returns true iff `prefix` was declared here for something other than `namespace`.
    pub fn conflicts(&self, prefix: &str, namespace: &str) -> bool {
        matches!(self.get(prefix), Some(declared) if declared != namespace)
    }
}

/// The counter behind generated prefixes.
///
/// One is shared by an entire serialization so generated prefixes are unique
/// document-wide. It starts at 1 and never decreases.
#[derive(Debug, Eq, PartialEq)]
pub struct PrefixIndex(u32);

impl Default for PrefixIndex {
    fn default() -> Self {
        PrefixIndex(1)
    }
}

impl PrefixIndex {
    /// Returns the current value and advances the counter.
    fn next(&mut self) -> u32 {
        let i = self.0;
        self.0 += 1;
        i
    }
}
