//! Schema tree
//!
//! [`SchemaDefinition`] is the finished artifact: a mapping from key to either
//! a leaf [`SchemaNode`] or a nested definition. Keys are kept in order so two
//! definitions built from the same calls serialize identically.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::path::Path;

use super::{ArrayNode, BooleanNode, NumberNode, SchemaNode, StringNode};
use crate::error::{Error, Result, read_file, write_file};

/// A value stored under one key of a [`SchemaDefinition`]
///
/// Nodes always carry a string `kind` tag while object entries map keys to
/// further maps, so the untagged representation is unambiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaEntry {
    Node(SchemaNode),
    Object(SchemaDefinition),
}

impl SchemaEntry {
    #[must_use]
    pub fn as_node(&self) -> Option<&SchemaNode> {
        match self {
            SchemaEntry::Node(node) => Some(node),
            SchemaEntry::Object(_) => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&SchemaDefinition> {
        match self {
            SchemaEntry::Object(def) => Some(def),
            SchemaEntry::Node(_) => None,
        }
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, SchemaEntry::Object(_))
    }
}

impl From<SchemaNode> for SchemaEntry {
    fn from(node: SchemaNode) -> Self {
        SchemaEntry::Node(node)
    }
}

macro_rules! entry_from_node {
    ($($node:ty),* $(,)?) => {
        $(
            impl From<$node> for SchemaEntry {
                fn from(node: $node) -> Self {
                    SchemaEntry::Node(node.into())
                }
            }
        )*
    };
}

entry_from_node!(StringNode, NumberNode, BooleanNode, ArrayNode);

impl From<SchemaDefinition> for SchemaEntry {
    fn from(def: SchemaDefinition) -> Self {
        SchemaEntry::Object(def)
    }
}

/// A (possibly nested) mapping of keys to schema entries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaDefinition {
    entries: BTreeMap<String, SchemaEntry>,
}

impl SchemaDefinition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Map access
    // =========================================================================

    /// Insert or overwrite an entry, returning the previous one
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        entry: impl Into<SchemaEntry>,
    ) -> Option<SchemaEntry> {
        self.entries.insert(key.into(), entry.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<SchemaEntry> {
        self.entries.remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top-level keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, SchemaEntry> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> btree_map::IterMut<'_, String, SchemaEntry> {
        self.entries.iter_mut()
    }

    // =========================================================================
    // Path access
    // =========================================================================

    /// Look up an entry by dotted path (e.g. `"database.pool.size"`)
    ///
    /// The path is split on every `.`; keys that themselves contain dots can
    /// only be reached through [`iter`](Self::iter).
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&SchemaEntry> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.entries.get(first)?;
        for segment in segments {
            current = current.as_object()?.entries.get(segment)?;
        }
        Some(current)
    }

    /// Look up a leaf node by dotted path
    #[must_use]
    pub fn node(&self, path: &str) -> Option<&SchemaNode> {
        self.get(path).and_then(SchemaEntry::as_node)
    }

    /// Look up a nested object by dotted path
    #[must_use]
    pub fn object(&self, path: &str) -> Option<&SchemaDefinition> {
        self.get(path).and_then(SchemaEntry::as_object)
    }

    /// Like [`node`](Self::node), but reports a missing path as an error
    pub fn require_node(&self, path: &str) -> Result<&SchemaNode> {
        self.node(path).ok_or_else(|| Error::PathNotFound(path.to_string()))
    }

    /// Every leaf node with its dotted path, in key order
    ///
    /// Array item schemas are part of their array node and are not listed.
    #[must_use]
    pub fn leaves(&self) -> Vec<(String, &SchemaNode)> {
        let mut out = Vec::new();
        self.collect_leaves("", &mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a SchemaNode)>) {
        for (key, entry) in &self.entries {
            let path = join_path(prefix, key);
            match entry {
                SchemaEntry::Node(node) => out.push((path, node)),
                SchemaEntry::Object(def) => def.collect_leaves(&path, out),
            }
        }
    }

    /// Paths of string fields marked secret
    #[must_use]
    pub fn secret_paths(&self) -> Vec<String> {
        self.leaves()
            .into_iter()
            .filter(|(_, node)| node.is_secret())
            .map(|(path, _)| path)
            .collect()
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Parse(e.to_string()))
    }

    /// Write the schema as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        write_file(path, self.to_json_pretty()?)?;
        log::debug!("Schema written to {}", path.display());
        Ok(())
    }

    /// Read a schema previously written with [`save`](Self::save)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let schema = Self::from_json(&read_file(path)?)?;
        log::debug!(
            "Schema loaded from {} ({} top-level entries)",
            path.display(),
            schema.len()
        );
        Ok(schema)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Toml(e.to_string()))
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Toml(e.to_string()))
    }

    #[cfg(feature = "yaml")]
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

impl<'a> IntoIterator for &'a SchemaDefinition {
    type Item = (&'a String, &'a SchemaEntry);
    type IntoIter = btree_map::Iter<'a, String, SchemaEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for SchemaDefinition {
    type Item = (String, SchemaEntry);
    type IntoIter = btree_map::IntoIter<String, SchemaEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<SchemaEntry>> FromIterator<(K, V)> for SchemaDefinition {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<SchemaEntry>> Extend<(K, V)> for SchemaDefinition {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

pub(crate) fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

// =============================================================================
// Tests
// =============================================================================
