//! Fluent schema builder
//!
//! This module contains [`SchemaBuilder`], the root and nested-object builder,
//! and the typed field builders it hands out.
//!
//! Builders move by value through the chain. A field builder owns its parent
//! until [`end`](StringField::end) writes the node back and returns the parent,
//! so a whole schema reads as one expression:
//!
//! ```
//! use confkit::{schema, StringNode};
//!
//! let def = schema()
//!     .string("name").default("my-app").end()
//!     .object("database", |db| {
//!         db.string("host").env("DB_HOST").default("localhost").required().end()
//!             .number("port").default(5432).integer().end()
//!     })
//!     .array("tags", StringNode::new())
//!     .build();
//!
//! assert!(def.node("database.host").is_some());
//! assert!(def.node("tags").is_some());
//! ```

mod field;

pub use field::{BooleanField, NumberField, StringField};

use crate::schema::{ArrayNode, SchemaDefinition, SchemaEntry};

/// Create a fresh root builder
///
/// This is the entry point for describing a schema.
#[must_use]
pub fn schema() -> SchemaBuilder {
    SchemaBuilder::new()
}

/// Builder for a root or nested schema mapping
///
/// A root builder has no parent key and [`build`](Self::build) returns its
/// mapping as is. A nested builder (handed to the closure of
/// [`object`](Self::object)) remembers the key it was created for and
/// packages its mapping under that key, which is the fragment the enclosing
/// builder folds in.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    schema: SchemaDefinition,
    parent_key: Option<String>,
}

impl SchemaBuilder {
    /// Create a root builder with no parent
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn scoped(parent_key: String) -> Self {
        Self {
            schema: SchemaDefinition::new(),
            parent_key: Some(parent_key),
        }
    }

    // =========================================================================
    // Field factories
    // =========================================================================

    /// Start a string field under `key`
    ///
    /// Keys are not validated; an existing entry is overwritten when the
    /// field is ended.
    pub fn string(self, key: impl Into<String>) -> StringField {
        StringField::new(self, key.into())
    }

    /// Start a number field under `key`
    pub fn number(self, key: impl Into<String>) -> NumberField {
        NumberField::new(self, key.into())
    }

    /// Start a boolean field under `key`
    pub fn boolean(self, key: impl Into<String>) -> BooleanField {
        BooleanField::new(self, key.into())
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Define a nested object under `key`
    ///
    /// `define` receives a fresh builder scoped to `key` and returns it once
    /// populated. Its finished subtree is folded into this builder under
    /// `key`, so nesting composes to any depth:
    ///
    /// ```
    /// use confkit::schema;
    ///
    /// let def = schema()
    ///     .object("x", |b| b.object("y", |c| c.string("z").required().end()))
    ///     .build();
    ///
    /// assert!(def.node("x.y.z").unwrap().is_required());
    /// ```
    #[must_use]
    pub fn object<F>(mut self, key: impl Into<String>, define: F) -> Self
    where
        F: FnOnce(SchemaBuilder) -> SchemaBuilder,
    {
        let key = key.into();
        let nested = define(Self::scoped(key.clone()));

        // A closure may hand back a builder it made itself; only a builder
        // scoped to this key packages its mapping as a fragment.
        let subtree = if nested.parent_key.as_deref() == Some(key.as_str()) {
            match nested.build().remove(&key) {
                Some(SchemaEntry::Object(def)) => def,
                _ => SchemaDefinition::new(),
            }
        } else {
            nested.schema
        };

        log::debug!("Folding object '{}' ({} entries)", key, subtree.len());
        self.insert_entry(key, SchemaEntry::Object(subtree));
        self
    }

    /// Add an array field under `key` whose elements follow `items`
    ///
    /// `items` is a pre-built node or definition; there is no fluent builder
    /// for array elements.
    #[must_use]
    pub fn array(self, key: impl Into<String>, items: impl Into<SchemaEntry>) -> Self {
        self.array_node(key, ArrayNode::of(items))
    }

    /// Add a pre-configured array node under `key`
    #[must_use]
    pub fn array_node(mut self, key: impl Into<String>, node: ArrayNode) -> Self {
        self.insert_entry(key.into(), node.into());
        self
    }

    /// Insert or overwrite `value` at `key` in this builder's mapping
    #[must_use]
    pub fn add_to_schema(mut self, key: impl Into<String>, value: impl Into<SchemaEntry>) -> Self {
        self.insert_entry(key.into(), value.into());
        self
    }

    fn insert_entry(&mut self, key: String, entry: SchemaEntry) {
        if self.schema.insert(key.clone(), entry).is_some() {
            log::trace!("Schema entry '{key}' overwritten");
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Key this builder packages itself under, if it is nested
    #[must_use]
    pub fn parent_key(&self) -> Option<&str> {
        self.parent_key.as_deref()
    }

    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.parent_key.is_some()
    }

    /// Number of entries written so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.schema.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schema.is_empty()
    }

    // =========================================================================
    // Terminal
    // =========================================================================

    /// Finish the builder
    ///
    /// A root builder returns its mapping. A nested builder returns a
    /// single-entry mapping `{parent_key: mapping}`.
    #[must_use]
    pub fn build(self) -> SchemaDefinition {
        match self.parent_key {
            Some(parent_key) => {
                let mut fragment = SchemaDefinition::new();
                fragment.insert(parent_key, self.schema);
                fragment
            }
            None => self.schema,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{SchemaNode, StringNode};

    #[test]
    fn test_root_build_returns_local_mapping() {
        let def = schema().string("a").end().boolean("b").end().build();

        assert_eq!(def.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_nested_build_returns_fragment() {
        let nested = SchemaBuilder::scoped("db".into()).string("host").end();
        assert!(nested.is_nested());
        assert_eq!(nested.parent_key(), Some("db"));

        let fragment = nested.build();
        assert_eq!(fragment.len(), 1);
        assert!(fragment.node("db.host").is_some());
    }

    #[test]
    fn test_object_accepts_foreign_builder() {
        let def = schema()
            .object("server", |_| schema().string("host").end())
            .build();

        assert!(def.node("server.host").is_some());
        assert_eq!(def.len(), 1);
    }

    #[test]
    fn test_object_with_key_equal_to_inner_field() {
        let def = schema().object("name", |b| b.string("name").end()).build();

        assert!(matches!(def.node("name.name"), Some(SchemaNode::String(_))));
    }

    #[test]
    fn test_empty_object() {
        let def = schema().object("empty", |b| b).build();
        assert!(def.object("empty").unwrap().is_empty());
    }

    #[test]
    fn test_add_to_schema_overwrites() {
        let builder = schema()
            .add_to_schema("x", StringNode::new())
            .add_to_schema("x", SchemaDefinition::new());

        assert_eq!(builder.len(), 1);
        assert!(builder.build().object("x").is_some());
    }
}
