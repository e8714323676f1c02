//! # confkit - Configuration Schema Builder
//!
//! A fluent builder for declarative configuration schemas. Describe the shape
//! of your configuration (field kinds, defaults, environment variable
//! bindings, constraints) and get back a [`SchemaDefinition`] tree that a
//! loader or validator can consume.
//!
//! ## Features
//!
//! - **Fluent Builder**: Chain field definitions, nest objects to any depth
//! - **Typed Nodes**: String, number, boolean and array nodes, each with only its own constraints
//! - **Environment Bindings**: Bind fields to variables by hand or derive names from a prefix
//! - **Secret Fields**: Mark values with `.secret()` so consumers can redact them
//! - **Schema Linting**: Opt-in checks for contradictory constraints and broken patterns
//! - **Docs Generation**: Markdown reference straight from the schema
//! - **Serialization**: JSON out of the box, TOML and YAML behind features
//!
//! ## Quick Start
//!
//! ```rust
//! use confkit::schema;
//!
//! let def = schema()
//!     .string("host").env("DB_HOST").default("localhost").required().end()
//!     .number("port").env("DB_PORT").default(5432).min(1.0).max(65535.0).integer().end()
//!     .boolean("debug").coerce().end()
//!     .build();
//!
//! let host = def.node("host").unwrap();
//! assert_eq!(host.env(), Some("DB_HOST"));
//! assert!(host.is_required());
//! ```
//!
//! ## Nested Objects
//!
//! `object` hands a fresh builder to a closure and folds whatever it defines
//! under the given key:
//!
//! ```rust
//! use confkit::schema;
//!
//! let def = schema()
//!     .object("database", |db| {
//!         db.string("url").env("DATABASE_URL").secret().required().end()
//!             .object("pool", |pool| {
//!                 pool.number("max_size").default(10).positive().integer().end()
//!             })
//!     })
//!     .build();
//!
//! assert!(def.node("database.pool.max_size").is_some());
//! assert_eq!(def.secret_paths(), vec!["database.url"]);
//! ```
//!
//! ## Arrays
//!
//! Arrays wrap a pre-built item schema:
//!
//! ```rust
//! use confkit::{schema, ArrayNode, StringNode};
//!
//! let endpoint = schema().string("url").required().end().number("weight").end().build();
//!
//! let def = schema()
//!     .array("tags", StringNode::new())
//!     .array("endpoints", endpoint)
//!     .array_node("hosts", ArrayNode::of(StringNode::new()).env("APP_HOSTS").required())
//!     .build();
//!
//! assert_eq!(def.len(), 3);
//! ```
//!
//! ## Checking a Schema
//!
//! Building never fails; contradictions are left for the consumer. Call
//! [`SchemaDefinition::validate_schema`] when you want them caught early:
//!
//! ```rust
//! use confkit::schema;
//!
//! let def = schema().number("workers").min(10.0).max(5.0).end().build();
//! assert!(def.validate_schema().is_err());
//! ```
//!
//! ## Environment Prefixes
//!
//! ```rust
//! use confkit::schema;
//!
//! let def = schema()
//!     .object("ui", |ui| ui.string("theme").default("dark").end())
//!     .build()
//!     .with_env_prefix("myapp");
//!
//! assert_eq!(def.node("ui.theme").unwrap().env(), Some("MYAPP_UI_THEME"));
//! ```

// Core modules
mod builder;
mod docs;
mod env;
mod error;
mod lint;

// Grouped modules
pub mod schema;

// Re-exports from core
pub use builder::{BooleanField, NumberField, SchemaBuilder, StringField, schema};
pub use docs::{DocsConfig, generate_docs, generate_docs_for};
pub use env::{EnvBinding, env_var_name};
pub use error::{Error, Result};
pub use lint::SchemaIssue;

// Re-exports from schema
pub use schema::{
    ArrayNode, BooleanNode, ConfigSchema, FieldMeta, NodeKind, NumberCheck, NumberNode,
    SchemaDefinition, SchemaEntry, SchemaNode, StringNode,
};

// Derive macro re-export (requires `derive` feature)
/// Derive macro for generating `ConfigSchema` implementations.
///
/// # Example
///
/// ```rust,ignore
/// use confkit::DeriveConfigSchema;
///
/// #[derive(Default, DeriveConfigSchema)]
/// #[config(env_prefix = "APP")]
/// struct ServerConfig {
///     /// Address to bind
///     #[config(env = "SERVER_HOST", required)]
///     host: String,
///
///     #[config(min = 1, max = 65535)]
///     port: u16,
/// }
/// ```
#[cfg(feature = "derive")]
pub use confkit_derive::ConfigSchema as DeriveConfigSchema;
