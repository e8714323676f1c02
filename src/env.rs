//! Environment variable bindings
//!
//! Helpers for listing which fields read from which variables, and for
//! deriving variable names from field paths when a schema uses a common
//! prefix instead of naming every variable by hand.

use crate::schema::{SchemaDefinition, SchemaEntry, join_path};

/// One field bound to an environment variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvBinding {
    /// Dotted path of the field
    pub path: String,
    /// Variable name
    pub variable: String,
    /// Whether the field is marked secret
    pub secret: bool,
}

/// Get the environment variable name for a field path
///
/// Format: `{PREFIX}_{PATH}` (all uppercase, dots replaced by underscores).
/// An empty prefix yields just the path part.
///
/// ```
/// use confkit::env_var_name;
///
/// assert_eq!(env_var_name("myapp", "database.host"), "MYAPP_DATABASE_HOST");
/// assert_eq!(env_var_name("", "port"), "PORT");
/// ```
#[must_use]
pub fn env_var_name(prefix: &str, path: &str) -> String {
    let env_key = path.replace(['.', '-'], "_").to_uppercase();
    if prefix.is_empty() {
        env_key
    } else {
        format!("{}_{}", prefix.to_uppercase(), env_key)
    }
}

impl SchemaDefinition {
    /// All fields with an environment binding, in path order
    #[must_use]
    pub fn env_bindings(&self) -> Vec<EnvBinding> {
        self.leaves()
            .into_iter()
            .filter_map(|(path, node)| {
                node.env().map(|variable| EnvBinding {
                    variable: variable.to_string(),
                    secret: node.is_secret(),
                    path,
                })
            })
            .collect()
    }

    /// Bind every unbound field to a variable derived from `prefix` and its path
    ///
    /// Explicit bindings are left untouched. Array items are not bound since
    /// they have no path of their own.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        bind_unbound(&mut self, prefix, "");
        self
    }

    /// Fields that must be set and have neither a default nor a binding
    ///
    /// Such fields can only be satisfied by a source other than the
    /// environment, which is often a mistake worth surfacing in tooling.
    #[must_use]
    pub fn unsourced_required(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_unsourced(self, "", &mut out);
        out
    }
}

fn bind_unbound(def: &mut SchemaDefinition, env_prefix: &str, path_prefix: &str) {
    for (key, entry) in def.iter_mut() {
        let path = join_path(path_prefix, key);
        match entry {
            SchemaEntry::Node(node) => {
                if node.env().is_none() {
                    let variable = env_var_name(env_prefix, &path);
                    log::debug!("Derived env binding {variable} for '{path}'");
                    node.meta_mut().env = Some(variable);
                }
            }
            SchemaEntry::Object(nested) => bind_unbound(nested, env_prefix, &path),
        }
    }
}

fn collect_unsourced(def: &SchemaDefinition, prefix: &str, out: &mut Vec<String>) {
    for (key, entry) in def {
        let path = join_path(prefix, key);
        match entry {
            SchemaEntry::Node(node) => {
                if node.is_required() && node.env().is_none() && node.default_value().is_none() {
                    out.push(path);
                }
            }
            SchemaEntry::Object(nested) => collect_unsourced(nested, &path, out),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
