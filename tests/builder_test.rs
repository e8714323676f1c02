//! Builder Integration Tests
//!
//! Tests for how the fluent builder assembles a schema tree:
//! - Root-level fields and last-write-wins on duplicate keys
//! - Nested objects and arrays
//! - Field builders returning control to their parent
//! - Construction-time permissiveness

mod common;

use common::{app_schema, init_logging, leaf_paths};
use confkit::{NumberCheck, SchemaEntry, SchemaNode, StringNode, schema};
use serde_json::json;

// =============================================================================
// Root-Level Fields
// =============================================================================

#[test]
fn test_root_fields_are_all_present() {
    init_logging();

    let def = schema()
        .string("host")
        .end()
        .number("port")
        .end()
        .boolean("debug")
        .end()
        .build();

    assert_eq!(def.keys().collect::<Vec<_>>(), vec!["debug", "host", "port"]);
    assert!(matches!(def.node("host"), Some(SchemaNode::String(_))));
    assert!(matches!(def.node("port"), Some(SchemaNode::Number(_))));
    assert!(matches!(def.node("debug"), Some(SchemaNode::Boolean(_))));
}

#[test]
fn test_duplicate_key_last_write_wins() {
    init_logging();

    let def = schema()
        .string("mode")
        .default("first")
        .end()
        .number("other")
        .end()
        .boolean("mode")
        .default(true)
        .end()
        .build();

    assert_eq!(def.len(), 2);
    match def.node("mode") {
        Some(SchemaNode::Boolean(node)) => assert_eq!(node.default, Some(true)),
        other => panic!("expected boolean node, got {other:?}"),
    }
}

#[test]
fn test_empty_key_is_accepted() {
    let def = schema().string("").end().build();
    assert!(def.contains_key(""));
}

#[test]
fn test_empty_builder_builds_empty_schema() {
    assert!(schema().build().is_empty());
}

// =============================================================================
// Field Builders
// =============================================================================

#[test]
fn test_env_default_required_only() {
    let def = schema()
        .string("host")
        .env("DB_HOST")
        .default("localhost")
        .required()
        .end()
        .build();

    let node = def.node("host").unwrap();
    assert_eq!(
        serde_json::to_value(node).unwrap(),
        json!({
            "kind": "string",
            "envBinding": "DB_HOST",
            "default": "localhost",
            "required": true
        })
    );

    match node {
        SchemaNode::String(string) => {
            assert_eq!(string.pattern, None);
            assert_eq!(string.one_of, None);
            assert_eq!(string.min_length, None);
            assert_eq!(string.max_length, None);
            assert!(!string.secret);
            assert_eq!(string.meta.description, None);
        }
        other => panic!("expected string node, got {other:?}"),
    }
}

#[test]
fn test_string_constraints() {
    let def = schema()
        .string("level")
        .one_of(["trace", "debug", "info"])
        .pattern("^[a-z]+$")
        .min_length(4)
        .max_length(5)
        .description("Log level")
        .end()
        .string("token")
        .secret()
        .end()
        .build();

    let json = serde_json::to_value(&def).unwrap();
    assert_eq!(
        json["level"],
        json!({
            "kind": "string",
            "enum": ["trace", "debug", "info"],
            "pattern": "^[a-z]+$",
            "minLength": 4,
            "maxLength": 5,
            "description": "Log level"
        })
    );
    assert_eq!(json["token"], json!({"kind": "string", "secret": true}));
}

#[test]
fn test_number_constraints() {
    let def = schema()
        .number("workers")
        .default(4)
        .min(1.0)
        .max(64.0)
        .integer()
        .validate(NumberCheck::Positive)
        .end()
        .build();

    match def.node("workers") {
        Some(SchemaNode::Number(node)) => {
            assert_eq!(node.default, Some(4.0));
            assert_eq!(node.min, Some(1.0));
            assert_eq!(node.max, Some(64.0));
            assert_eq!(node.validate, vec![NumberCheck::Integer, NumberCheck::Positive]);
        }
        other => panic!("expected number node, got {other:?}"),
    }
}

#[test]
fn test_boolean_coerce() {
    let def = schema().boolean("verbose").coerce().default(false).build();

    assert_eq!(
        serde_json::to_value(def.node("verbose").unwrap()).unwrap(),
        json!({"kind": "boolean", "default": false, "coerce": true})
    );
}

#[test]
fn test_min_greater_than_max_is_accepted() {
    let def = schema().number("n").min(10.0).max(5.0).end().build();

    match def.node("n") {
        Some(SchemaNode::Number(node)) => {
            assert_eq!(node.min, Some(10.0));
            assert_eq!(node.max, Some(5.0));
        }
        other => panic!("expected number node, got {other:?}"),
    }
}

#[test]
fn test_field_build_shortcut() {
    let via_build = schema().string("a").end().string("b").required().build();
    let via_end = schema()
        .string("a")
        .end()
        .string("b")
        .required()
        .end()
        .build();
    assert_eq!(via_build, via_end);
}

// =============================================================================
// Nested Objects
// =============================================================================

#[test]
fn test_single_object() {
    let def = schema()
        .object("database", |db| db.string("a").end().number("b").end())
        .build();

    assert_eq!(def.len(), 1);
    let database = def.object("database").unwrap();
    assert_eq!(database.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    assert!(matches!(def.node("database.a"), Some(SchemaNode::String(_))));
    assert!(matches!(def.node("database.b"), Some(SchemaNode::Number(_))));
}

#[test]
fn test_two_levels_of_nesting() {
    let def = schema()
        .object("x", |b| b.object("y", |c| c.string("z").required().end()))
        .build();

    assert_eq!(
        serde_json::to_value(&def).unwrap(),
        json!({ "x": { "y": { "z": { "kind": "string", "required": true } } } })
    );
}

#[test]
fn test_object_and_siblings_coexist() {
    let def = schema()
        .string("before")
        .end()
        .object("middle", |m| m.boolean("flag").end())
        .string("after")
        .end()
        .build();

    assert_eq!(leaf_paths(&def), vec!["after", "before", "middle.flag"]);
}

#[test]
fn test_object_overwrites_field_with_same_key() {
    let def = schema()
        .string("db")
        .end()
        .object("db", |db| db.string("host").end())
        .build();

    assert!(def.object("db").is_some());
    assert!(def.node("db.host").is_some());
}

// =============================================================================
// Arrays
// =============================================================================

#[test]
fn test_array_of_strings() {
    let def = schema().array("tags", StringNode::new()).build();

    assert_eq!(
        serde_json::to_value(&def).unwrap(),
        json!({ "tags": { "kind": "array", "items": { "kind": "string" } } })
    );
}

#[test]
fn test_array_of_objects() {
    let item = schema()
        .string("url")
        .required()
        .end()
        .number("weight")
        .default(1)
        .end()
        .build();

    let def = schema().array("backends", item.clone()).build();

    match def.node("backends") {
        Some(SchemaNode::Array(array)) => {
            assert_eq!(*array.items, SchemaEntry::Object(item));
        }
        other => panic!("expected array node, got {other:?}"),
    }
}

#[test]
fn test_array_inside_nested_object() {
    let def = schema()
        .object("cors", |cors| cors.array("origins", StringNode::new()))
        .build();

    assert!(matches!(def.node("cors.origins"), Some(SchemaNode::Array(_))));
    assert_eq!(def.len(), 1);
}

// =============================================================================
// Shape Stability
// =============================================================================

#[test]
fn test_same_chain_builds_identical_schemas() {
    let first = app_schema();
    let second = app_schema();

    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn test_app_schema_paths() {
    assert_eq!(
        leaf_paths(&app_schema()),
        vec![
            "allowed_origins",
            "database.pool_size",
            "database.url",
            "debug",
            "name",
            "server.host",
            "server.port",
            "server.tls.enabled",
            "server.tls.key",
        ]
    );
}
