//! Common test utilities for confkit integration tests
//!
//! Provides shared schemas and helper functions.

#![allow(dead_code)]

use confkit::{ArrayNode, SchemaDefinition, StringNode, schema};

/// Install a test logger once; later calls are no-ops
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// =============================================================================
// Test Schemas
// =============================================================================

/// A schema covering every node kind and two levels of nesting
pub fn app_schema() -> SchemaDefinition {
    schema()
        .string("name")
        .default("demo")
        .description("Application name")
        .end()
        .boolean("debug")
        .env("APP_DEBUG")
        .default(false)
        .coerce()
        .end()
        .object("server", |server| {
            server
                .string("host")
                .env("SERVER_HOST")
                .default("0.0.0.0")
                .end()
                .number("port")
                .env("SERVER_PORT")
                .default(8080)
                .min(1.0)
                .max(65535.0)
                .integer()
                .end()
                .object("tls", |tls| {
                    tls.boolean("enabled")
                        .default(false)
                        .end()
                        .string("key")
                        .env("TLS_KEY")
                        .secret()
                        .end()
                })
        })
        .object("database", |db| {
            db.string("url")
                .env("DATABASE_URL")
                .required()
                .secret()
                .end()
                .number("pool_size")
                .default(10)
                .positive()
                .integer()
                .end()
        })
        .array_node(
            "allowed_origins",
            ArrayNode::of(StringNode::new())
                .env("ALLOWED_ORIGINS")
                .default_items(["*"]),
        )
        .build()
}

/// Leaf paths of a schema, in key order
pub fn leaf_paths(def: &SchemaDefinition) -> Vec<String> {
    def.leaves().into_iter().map(|(path, _)| path).collect()
}
