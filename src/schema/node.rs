//! Schema node types
//!
//! A [`SchemaNode`] describes one leaf configuration field. Each kind carries
//! only the constraints that make sense for it, so a consumer matching on the
//! node gets compile-time exhaustiveness instead of a bag of optional fields.
//!
//! Nodes serialize as maps tagged with `kind`:
//!
//! ```
//! use confkit::{NumberNode, SchemaNode};
//!
//! let port = SchemaNode::Number(NumberNode::new().min(1.0).max(65535.0).integer());
//! let json = serde_json::to_value(&port).unwrap();
//!
//! assert_eq!(json["kind"], "number");
//! assert_eq!(json["validate"][0], "integer");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::SchemaEntry;

fn is_false(value: &bool) -> bool {
    !*value
}

// =============================================================================
// Node Kinds
// =============================================================================

/// Kind of a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    String,
    Number,
    Boolean,
    Array,
}

impl NodeKind {
    /// Lowercase name, as written in the `kind` tag
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::String => "string",
            NodeKind::Number => "number",
            NodeKind::Boolean => "boolean",
            NodeKind::Array => "array",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Common Field Metadata
// =============================================================================

/// Settings shared by every node kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMeta {
    /// The value must be present after loading
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,

    /// Name of the environment variable the value may come from
    #[serde(
        rename = "envBinding",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub env: Option<String>,

    /// Human-readable help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// =============================================================================
// Numeric Checks
// =============================================================================

/// Built-in numeric predicates
///
/// These are named rather than stored as closures so the schema tree stays
/// serializable and inspectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberCheck {
    /// Value has no fractional part
    Integer,
    /// Value is strictly greater than zero
    Positive,
    /// Value is zero or greater
    NonNegative,
}

impl NumberCheck {
    /// Evaluate the predicate against a value
    #[must_use]
    pub fn check(self, value: f64) -> bool {
        match self {
            NumberCheck::Integer => value.is_finite() && value.fract() == 0.0,
            NumberCheck::Positive => value > 0.0,
            NumberCheck::NonNegative => value >= 0.0,
        }
    }

    /// Short description used in docs and lint messages
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            NumberCheck::Integer => "integer",
            NumberCheck::Positive => "positive",
            NumberCheck::NonNegative => "non-negative",
        }
    }
}

// =============================================================================
// Kind-Specific Nodes
// =============================================================================

/// A string field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringNode {
    #[serde(flatten)]
    pub meta: FieldMeta,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Regex the value must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Allowed values
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    /// Sensitive value, redacted by consumers
    #[serde(default, skip_serializing_if = "is_false")]
    pub secret: bool,
}

impl StringNode {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// A numeric field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberNode {
    #[serde(flatten)]
    pub meta: FieldMeta,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validate: Vec<NumberCheck>,
}

impl NumberNode {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lower bound
    #[must_use]
    pub fn min(mut self, val: f64) -> Self {
        self.min = Some(val);
        self
    }

    /// Set the upper bound
    #[must_use]
    pub fn max(mut self, val: f64) -> Self {
        self.max = Some(val);
        self
    }

    /// Add a built-in check; adding the same check twice is a no-op
    #[must_use]
    pub fn check(mut self, check: NumberCheck) -> Self {
        self.push_check(check);
        self
    }

    #[must_use]
    pub fn integer(self) -> Self {
        self.check(NumberCheck::Integer)
    }

    pub(crate) fn push_check(&mut self, check: NumberCheck) {
        if !self.validate.contains(&check) {
            self.validate.push(check);
        }
    }
}

/// A boolean field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BooleanNode {
    #[serde(flatten)]
    pub meta: FieldMeta,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,

    /// Accept string spellings such as `"true"`/`"0"` upstream
    #[serde(default, skip_serializing_if = "is_false")]
    pub coerce: bool,
}

impl BooleanNode {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// An array field wrapping a pre-built item schema
///
/// There is no fluent item builder: build the item separately (a node
/// constructor or a nested [`SchemaBuilder::build`](crate::SchemaBuilder::build))
/// and wrap it here.
///
/// ```
/// use confkit::{ArrayNode, StringNode};
///
/// let hosts = ArrayNode::of(StringNode::new())
///     .env("APP_HOSTS")
///     .default_items(["localhost"]);
///
/// assert_eq!(hosts.meta.env.as_deref(), Some("APP_HOSTS"));
/// assert_eq!(hosts.default.as_ref().map(Vec::len), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayNode {
    #[serde(flatten)]
    pub meta: FieldMeta,

    /// Shape of every element
    pub items: Box<SchemaEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Vec<Value>>,
}

impl ArrayNode {
    /// Wrap an item schema
    pub fn of(items: impl Into<SchemaEntry>) -> Self {
        Self {
            meta: FieldMeta::default(),
            items: Box::new(items.into()),
            default: None,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.meta.required = true;
        self
    }

    #[must_use]
    pub fn env(mut self, variable: impl Into<String>) -> Self {
        self.meta.env = Some(variable.into());
        self
    }

    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.meta.description = Some(text.into());
        self
    }

    /// Set the default element list
    #[must_use]
    pub fn default_items<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.default = Some(items.into_iter().map(Into::into).collect());
        self
    }
}

// =============================================================================
// Schema Node
// =============================================================================

/// Descriptor for one leaf configuration field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SchemaNode {
    String(StringNode),
    Number(NumberNode),
    Boolean(BooleanNode),
    Array(ArrayNode),
}

impl SchemaNode {
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            SchemaNode::String(_) => NodeKind::String,
            SchemaNode::Number(_) => NodeKind::Number,
            SchemaNode::Boolean(_) => NodeKind::Boolean,
            SchemaNode::Array(_) => NodeKind::Array,
        }
    }

    /// Shared settings of this node
    #[must_use]
    pub fn meta(&self) -> &FieldMeta {
        match self {
            SchemaNode::String(node) => &node.meta,
            SchemaNode::Number(node) => &node.meta,
            SchemaNode::Boolean(node) => &node.meta,
            SchemaNode::Array(node) => &node.meta,
        }
    }

    pub(crate) fn meta_mut(&mut self) -> &mut FieldMeta {
        match self {
            SchemaNode::String(node) => &mut node.meta,
            SchemaNode::Number(node) => &mut node.meta,
            SchemaNode::Boolean(node) => &mut node.meta,
            SchemaNode::Array(node) => &mut node.meta,
        }
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.meta().required
    }

    #[must_use]
    pub fn env(&self) -> Option<&str> {
        self.meta().env.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.meta().description.as_deref()
    }

    /// Only string nodes can be secret
    #[must_use]
    pub fn is_secret(&self) -> bool {
        matches!(self, SchemaNode::String(node) if node.secret)
    }

    /// Default value as JSON, if one is set
    #[must_use]
    pub fn default_value(&self) -> Option<Value> {
        match self {
            SchemaNode::String(node) => node.default.clone().map(Value::String),
            SchemaNode::Number(node) => node.default.map(Value::from),
            SchemaNode::Boolean(node) => node.default.map(Value::Bool),
            SchemaNode::Array(node) => node.default.clone().map(Value::Array),
        }
    }
}

impl From<StringNode> for SchemaNode {
    fn from(node: StringNode) -> Self {
        SchemaNode::String(node)
    }
}

impl From<NumberNode> for SchemaNode {
    fn from(node: NumberNode) -> Self {
        SchemaNode::Number(node)
    }
}

impl From<BooleanNode> for SchemaNode {
    fn from(node: BooleanNode) -> Self {
        SchemaNode::Boolean(node)
    }
}

impl From<ArrayNode> for SchemaNode {
    fn from(node: ArrayNode) -> Self {
        SchemaNode::Array(node)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_node_serializes_only_set_fields() {
        let node = SchemaNode::String(StringNode {
            meta: FieldMeta {
                required: true,
                env: Some("DB_HOST".into()),
                description: None,
            },
            default: Some("localhost".into()),
            ..Default::default()
        });

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            json!({
                "kind": "string",
                "required": true,
                "envBinding": "DB_HOST",
                "default": "localhost"
            })
        );
    }

    #[test]
    fn test_string_constraint_field_names() {
        let node = SchemaNode::String(StringNode {
            one_of: Some(vec!["a".into(), "b".into()]),
            min_length: Some(1),
            max_length: Some(8),
            secret: true,
            ..Default::default()
        });

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["enum"], json!(["a", "b"]));
        assert_eq!(json["minLength"], 1);
        assert_eq!(json["maxLength"], 8);
        assert_eq!(json["secret"], true);
    }

    #[test]
    fn test_number_checks() {
        assert!(NumberCheck::Integer.check(3.0));
        assert!(!NumberCheck::Integer.check(3.5));
        assert!(!NumberCheck::Integer.check(f64::NAN));
        assert!(NumberCheck::Positive.check(0.1));
        assert!(!NumberCheck::Positive.check(0.0));
        assert!(NumberCheck::NonNegative.check(0.0));
        assert!(!NumberCheck::NonNegative.check(-1.0));
    }

    #[test]
    fn test_number_check_is_deduplicated() {
        let node = NumberNode::new().integer().integer();
        assert_eq!(node.validate, vec![NumberCheck::Integer]);
    }

    #[test]
    fn test_array_node_nests_item_kind() {
        let node = SchemaNode::Array(ArrayNode::of(StringNode::new()));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json, json!({"kind": "array", "items": {"kind": "string"}}));
    }

    #[test]
    fn test_node_accessors() {
        let node = SchemaNode::Boolean(BooleanNode {
            default: Some(true),
            coerce: true,
            ..Default::default()
        });

        assert_eq!(node.kind(), NodeKind::Boolean);
        assert_eq!(node.default_value(), Some(Value::Bool(true)));
        assert!(!node.is_required());
        assert!(!node.is_secret());
        assert_eq!(node.env(), None);
    }

    #[test]
    fn test_deserialize_tagged_node() {
        let node: SchemaNode = serde_json::from_value(json!({
            "kind": "number",
            "min": 1.0,
            "validate": ["positive", "non_negative"]
        }))
        .unwrap();

        match node {
            SchemaNode::Number(number) => {
                assert_eq!(number.min, Some(1.0));
                assert_eq!(
                    number.validate,
                    vec![NumberCheck::Positive, NumberCheck::NonNegative]
                );
            }
            other => panic!("expected number node, got {other:?}"),
        }
    }
}
