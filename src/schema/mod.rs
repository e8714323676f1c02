//! Schema tree types
//!
//! This module contains the data produced by the builder:
//! - `SchemaNode` - One leaf field (string, number, boolean or array)
//! - `SchemaDefinition` - A nested mapping of keys to nodes or objects
//! - `ConfigSchema` - Trait for types that describe their own configuration

mod definition;
mod node;

pub use definition::{SchemaDefinition, SchemaEntry};
pub use node::{
    ArrayNode, BooleanNode, FieldMeta, NodeKind, NumberCheck, NumberNode, SchemaNode, StringNode,
};

pub(crate) use definition::join_path;

/// Trait for types that describe their configuration schema
///
/// Usually derived with `#[derive(ConfigSchema)]` (requires the `derive`
/// feature), but it can be implemented by hand with the builder:
///
/// ```
/// use confkit::{schema, ConfigSchema, SchemaDefinition};
///
/// struct Server;
///
/// impl ConfigSchema for Server {
///     fn schema() -> SchemaDefinition {
///         schema()
///             .string("host").default("0.0.0.0").env("SERVER_HOST").end()
///             .number("port").default(8080).integer().end()
///             .build()
///     }
/// }
///
/// assert_eq!(Server::schema().len(), 2);
/// ```
pub trait ConfigSchema {
    /// Build the schema for this type
    fn schema() -> SchemaDefinition;
}

// Empty schema, for code that is generic over an optional schema
impl ConfigSchema for () {
    fn schema() -> SchemaDefinition {
        SchemaDefinition::new()
    }
}
