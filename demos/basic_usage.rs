//! Basic usage: build a nested schema, check it, and print it as JSON
//!
//! Run with: cargo run --example basic_usage

use confkit::{ArrayNode, StringNode, schema};

fn main() -> confkit::Result<()> {
    env_logger::init();

    let schema = schema()
        .string("name")
        .default("demo")
        .description("Application name")
        .end()
        .boolean("debug")
        .env("APP_DEBUG")
        .coerce()
        .default(false)
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
            ArrayNode::of(StringNode::new()).default_items(["*"]),
        )
        .build();

    schema.validate_schema()?;

    println!("Fields:");
    for (path, node) in schema.leaves() {
        println!("  {path:<24} {}", node.kind());
    }

    println!("\nEnvironment:");
    for binding in schema.env_bindings() {
        let marker = if binding.secret { " (secret)" } else { "" };
        println!("  {} -> {}{marker}", binding.variable, binding.path);
    }

    println!("\n{}", schema.to_json_pretty()?);
    Ok(())
}
