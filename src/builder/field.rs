//! Typed field builders
//!
//! Each builder wraps one node, mutates it through chained setters and writes
//! it back into the owning [`SchemaBuilder`] on [`end`](StringField::end).
//! Setters never check each other: `min(10).max(5)` is accepted here and left
//! for the consuming engine (or [`SchemaDefinition::validate_schema`]) to judge.

use super::SchemaBuilder;
use crate::schema::{
    BooleanNode, NumberCheck, NumberNode, SchemaDefinition, SchemaNode, StringNode,
};

/// Setters and terminal operations shared by every field builder
macro_rules! field_builder_common {
    ($builder:ident, $variant:ident) => {
        impl $builder {
            pub(crate) fn new(parent: SchemaBuilder, key: String) -> Self {
                Self {
                    parent,
                    key,
                    node: Default::default(),
                }
            }

            /// Mark the field as required
            #[must_use]
            pub fn required(mut self) -> Self {
                self.node.meta.required = true;
                self
            }

            /// Bind the field to an environment variable
            #[must_use]
            pub fn env(mut self, variable: impl Into<String>) -> Self {
                self.node.meta.env = Some(variable.into());
                self
            }

            /// Set the help text
            #[must_use]
            pub fn description(mut self, text: impl Into<String>) -> Self {
                self.node.meta.description = Some(text.into());
                self
            }

            /// Key the field will be written under
            #[must_use]
            pub fn key(&self) -> &str {
                &self.key
            }

            /// Write the field into the owning builder and return it
            #[must_use]
            pub fn end(self) -> SchemaBuilder {
                self.parent
                    .add_to_schema(self.key, SchemaNode::$variant(self.node))
            }

            /// Shorthand for `end()` followed by the owner's `build()`
            #[must_use]
            pub fn build(self) -> SchemaDefinition {
                self.end().build()
            }
        }
    };
}

// =============================================================================
// String
// =============================================================================

/// Builder for a string field
#[derive(Debug)]
pub struct StringField {
    parent: SchemaBuilder,
    key: String,
    node: StringNode,
}

field_builder_common!(StringField, String);

impl StringField {
    #[must_use]
    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.node.default = Some(value.into());
        self
    }

    /// Regex the value must match
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.node.pattern = Some(pattern.into());
        self
    }

    /// Restrict the value to a fixed set
    #[must_use]
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.node.one_of = Some(values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn min_length(mut self, len: usize) -> Self {
        self.node.min_length = Some(len);
        self
    }

    #[must_use]
    pub fn max_length(mut self, len: usize) -> Self {
        self.node.max_length = Some(len);
        self
    }

    /// Mark the value as sensitive so consumers redact it
    #[must_use]
    pub fn secret(mut self) -> Self {
        self.node.secret = true;
        self
    }

    /// Node accumulated so far
    #[must_use]
    pub fn node(&self) -> &StringNode {
        &self.node
    }
}

// =============================================================================
// Number
// =============================================================================

/// Builder for a numeric field
#[derive(Debug)]
pub struct NumberField {
    parent: SchemaBuilder,
    key: String,
    node: NumberNode,
}

field_builder_common!(NumberField, Number);

impl NumberField {
    #[must_use]
    pub fn default(mut self, value: impl Into<f64>) -> Self {
        self.node.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn min(mut self, val: f64) -> Self {
        self.node.min = Some(val);
        self
    }

    #[must_use]
    pub fn max(mut self, val: f64) -> Self {
        self.node.max = Some(val);
        self
    }

    /// Attach a built-in check
    #[must_use]
    pub fn validate(mut self, check: NumberCheck) -> Self {
        self.node.push_check(check);
        self
    }

    #[must_use]
    pub fn integer(self) -> Self {
        self.validate(NumberCheck::Integer)
    }

    #[must_use]
    pub fn positive(self) -> Self {
        self.validate(NumberCheck::Positive)
    }

    #[must_use]
    pub fn non_negative(self) -> Self {
        self.validate(NumberCheck::NonNegative)
    }

    /// Node accumulated so far
    #[must_use]
    pub fn node(&self) -> &NumberNode {
        &self.node
    }
}

// =============================================================================
// Boolean
// =============================================================================

/// Builder for a boolean field
#[derive(Debug)]
pub struct BooleanField {
    parent: SchemaBuilder,
    key: String,
    node: BooleanNode,
}

field_builder_common!(BooleanField, Boolean);

impl BooleanField {
    #[must_use]
    pub fn default(mut self, value: bool) -> Self {
        self.node.default = Some(value);
        self
    }

    /// Let the loader coerce strings such as `"yes"` or `"1"`
    #[must_use]
    pub fn coerce(mut self) -> Self {
        self.node.coerce = true;
        self
    }

    /// Node accumulated so far
    #[must_use]
    pub fn node(&self) -> &BooleanNode {
        &self.node
    }
}

// =============================================================================
// Tests
// =============================================================================
