//! Derive a schema from plain structs
//!
//! Run with: cargo run --example derive_usage --features derive

use confkit::{ConfigSchema, DeriveConfigSchema, DocsConfig, generate_docs_for};

#[derive(DeriveConfigSchema)]
#[config(env_prefix = "SHOP")]
#[allow(dead_code)]
struct ShopConfig {
    /// Public name of the shop
    name: String,

    #[config(min = 1, max = 65535)]
    port: u16,

    /// Currencies accepted at checkout
    currencies: Vec<String>,

    payments: PaymentsConfig,
}

#[derive(DeriveConfigSchema)]
#[allow(dead_code)]
struct PaymentsConfig {
    #[config(one_of = ["stripe", "adyen"])]
    provider: String,

    #[config(secret, required, no_default)]
    api_key: String,

    #[config(coerce)]
    sandbox: bool,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            name: "My Shop".into(),
            port: 3000,
            currencies: vec!["EUR".into(), "USD".into()],
            payments: PaymentsConfig::default(),
        }
    }
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            provider: "stripe".into(),
            api_key: String::new(),
            sandbox: true,
        }
    }
}

fn main() -> confkit::Result<()> {
    env_logger::init();

    let schema = ShopConfig::schema();
    for issue in schema.schema_issues() {
        eprintln!("warning: {issue}");
    }

    println!("{}", schema.to_json_pretty()?);
    println!("{}", generate_docs_for::<ShopConfig>(DocsConfig::new()));
    Ok(())
}
