//! Generate a Markdown reference for a schema and save the schema as JSON
//!
//! Run with: cargo run --example schema_docs

use confkit::{DocsConfig, SchemaDefinition, generate_docs, schema};

fn main() -> confkit::Result<()> {
    env_logger::init();

    let schema = schema()
        .object("cache", |cache| {
            cache
                .string("backend")
                .one_of(["memory", "redis"])
                .default("memory")
                .end()
                .number("ttl_seconds")
                .default(300)
                .non_negative()
                .integer()
                .end()
                .string("redis_password")
                .secret()
                .default("changeme")
                .end()
        })
        .object("log", |log| {
            log.string("level")
                .one_of(["error", "warn", "info", "debug"])
                .default("info")
                .end()
                .boolean("json")
                .coerce()
                .default(false)
                .end()
        })
        .build()
        .with_env_prefix("worker");

    let docs = generate_docs(
        &schema,
        DocsConfig::new()
            .with_title("Worker Configuration")
            .with_description("Settings read by the background worker."),
    );
    println!("{docs}");

    let path = std::env::temp_dir().join("worker-schema.json");
    schema.save(&path)?;
    let loaded = SchemaDefinition::load(&path)?;
    assert_eq!(loaded, schema);
    println!("Schema saved to {}", path.display());

    Ok(())
}
