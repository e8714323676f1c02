//! Deep Nesting Tests
//!
//! Every nested builder packages its subtree under its own key and the
//! enclosing builder folds it one level up. These tests pin down that the
//! paths come out right at depth three and beyond, with siblings at every
//! level.

mod common;

use common::{init_logging, leaf_paths};
use confkit::{SchemaBuilder, SchemaNode, StringNode, schema};
use serde_json::json;

#[test]
fn test_three_levels() {
    init_logging();

    let def = schema()
        .object("a", |a| {
            a.object("b", |b| b.object("c", |c| c.number("d").min(1.0).end()))
        })
        .build();

    assert_eq!(
        serde_json::to_value(&def).unwrap(),
        json!({ "a": { "b": { "c": { "d": { "kind": "number", "min": 1.0 } } } } })
    );
}

#[test]
fn test_five_levels() {
    let def = schema()
        .object("l1", |l1| {
            l1.object("l2", |l2| {
                l2.object("l3", |l3| {
                    l3.object("l4", |l4| l4.object("l5", |l5| l5.boolean("leaf").end()))
                })
            })
        })
        .build();

    assert_eq!(leaf_paths(&def), vec!["l1.l2.l3.l4.l5.leaf"]);
    assert_eq!(def.len(), 1);
}

#[test]
fn test_siblings_at_every_level() {
    let def = schema()
        .string("root_field")
        .end()
        .object("a", |a| {
            a.string("a_before")
                .end()
                .object("b", |b| {
                    b.string("b_before")
                        .end()
                        .object("c", |c| c.string("c_only").end())
                        .string("b_after")
                        .end()
                })
                .string("a_after")
                .end()
        })
        .string("root_after")
        .end()
        .build();

    assert_eq!(
        leaf_paths(&def),
        vec![
            "a.a_after",
            "a.a_before",
            "a.b.b_after",
            "a.b.b_before",
            "a.b.c.c_only",
            "root_after",
            "root_field",
        ]
    );
}

#[test]
fn test_sibling_objects_at_depth() {
    let def = schema()
        .object("services", |services| {
            services
                .object("api", |api| {
                    api.object("limits", |limits| limits.number("rps").default(100).end())
                })
                .object("worker", |worker| {
                    worker.object("limits", |limits| limits.number("jobs").default(4).end())
                })
        })
        .build();

    assert!(def.node("services.api.limits.rps").is_some());
    assert!(def.node("services.worker.limits.jobs").is_some());
    assert!(def.node("services.api.limits.jobs").is_none());
}

#[test]
fn test_repeated_object_key_at_depth_overwrites() {
    let def = schema()
        .object("a", |a| {
            a.object("b", |b| b.object("c", |c| c.string("first").end()))
                .object("b", |b| b.object("c", |c| c.string("second").end()))
        })
        .build();

    assert_eq!(leaf_paths(&def), vec!["a.b.c.second"]);
}

#[test]
fn test_same_key_at_each_level() {
    let def = schema()
        .object("x", |x| x.object("x", |x| x.object("x", |x| x.string("x").end())))
        .build();

    assert!(matches!(def.node("x.x.x.x"), Some(SchemaNode::String(_))));
}

#[test]
fn test_arrays_at_depth() {
    let def = schema()
        .object("a", |a| {
            a.object("b", |b| b.object("c", |c| c.array("items", StringNode::new())))
        })
        .build();

    match def.node("a.b.c.items") {
        Some(SchemaNode::Array(array)) => {
            assert!(matches!(
                array.items.as_node(),
                Some(SchemaNode::String(_))
            ));
        }
        other => panic!("expected array node, got {other:?}"),
    }
}

#[test]
fn test_nested_builder_scope_is_visible_inside_closure() {
    let mut seen = Vec::new();
    let _ = schema()
        .object("outer", |outer| {
            seen.push(outer.parent_key().map(String::from));
            outer.object("inner", |inner: SchemaBuilder| {
                assert!(inner.is_nested());
                assert_eq!(inner.parent_key(), Some("inner"));
                inner
            })
        })
        .build();

    assert_eq!(seen, vec![Some("outer".to_string())]);
}

#[test]
fn test_definition_closure_runs_once_and_synchronously() {
    let mut calls = 0;
    let def = schema()
        .object("once", |b| {
            calls += 1;
            b.string("v").end()
        })
        .build();

    assert_eq!(calls, 1);
    assert!(def.node("once.v").is_some());
}
