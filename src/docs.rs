//! Documentation generator for configuration schemas
//!
//! Generates a markdown reference from a finished [`SchemaDefinition`].

use crate::schema::{ConfigSchema, SchemaDefinition, SchemaEntry, SchemaNode};

const SECRET_MASK: &str = "********";

/// Configuration for docs generation
#[derive(Debug, Clone, Default)]
pub struct DocsConfig {
    /// Title for the documentation
    pub title: Option<String>,
    /// Description/introduction text
    pub description: Option<String>,
    /// Whether to group fields by their top-level object
    pub group_by_section: bool,
    /// Whether defaults of secret fields are printed as is
    pub show_secret_defaults: bool,
}

impl DocsConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            group_by_section: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// List every field under a single heading
    #[must_use]
    pub fn flat(mut self) -> Self {
        self.group_by_section = false;
        self
    }

    #[must_use]
    pub fn show_secret_defaults(mut self) -> Self {
        self.show_secret_defaults = true;
        self
    }
}

/// Generate markdown documentation for a type's schema
#[must_use]
pub fn generate_docs_for<T: ConfigSchema>(config: DocsConfig) -> String {
    generate_docs(&T::schema(), config)
}

/// Generate markdown documentation from a schema
#[must_use]
pub fn generate_docs(schema: &SchemaDefinition, config: DocsConfig) -> String {
    use std::fmt::Write;

    let mut output = String::new();

    // Title
    let title = config
        .title
        .clone()
        .unwrap_or_else(|| "Configuration Reference".to_string());
    writeln!(output, "# {title}\n").unwrap();

    // Description
    if let Some(desc) = &config.description {
        writeln!(output, "{desc}\n").unwrap();
    }

    // Root-level leaves have no section and sort first
    let mut fields: Vec<(Option<&str>, String, &SchemaNode)> = Vec::new();
    for (key, entry) in schema {
        match entry {
            SchemaEntry::Node(node) => fields.push((None, key.clone(), node)),
            SchemaEntry::Object(nested) => {
                for (path, node) in nested.leaves() {
                    fields.push((Some(key.as_str()), format!("{key}.{path}"), node));
                }
            }
        }
    }

    // Sort by section, then by path
    fields.sort_by(|(s1, p1, _), (s2, p2, _)| (s1, p1).cmp(&(s2, p2)));

    if config.group_by_section {
        let mut current_section: Option<Option<&str>> = None;

        for (section, path, node) in &fields {
            if current_section != Some(*section) {
                let label = section.map_or_else(|| "General".to_string(), capitalize);
                writeln!(output, "\n## {label}\n").unwrap();
                current_section = Some(*section);
            }

            format_field(&mut output, path, node, &config);
        }
    } else {
        output.push_str("## Fields\n\n");
        for (_, path, node) in &fields {
            format_field(&mut output, path, node, &config);
        }
    }

    output
}

fn format_field(out: &mut String, path: &str, node: &SchemaNode, config: &DocsConfig) {
    use std::fmt::Write;

    writeln!(out, "### `{path}`\n").unwrap();

    let mut badges = Vec::new();
    if node.is_required() {
        badges.push("Required");
    }
    if node.is_secret() {
        badges.push("Secret");
    }
    if !badges.is_empty() {
        writeln!(out, "{}\n", badges.join(" • ")).unwrap();
    }

    if let Some(desc) = node.description() {
        writeln!(out, "{desc}\n").unwrap();
    }

    out.push_str("| Property | Value |\n");
    out.push_str("|----------|-------|\n");
    writeln!(out, "| **Type** | {} |", format_type(node)).unwrap();

    if let Some(default) = node.default_value() {
        if node.is_secret() && !config.show_secret_defaults {
            writeln!(out, "| **Default** | `{SECRET_MASK}` |").unwrap();
        } else {
            writeln!(out, "| **Default** | `{}` |", format_value(&default)).unwrap();
        }
    }

    if let Some(variable) = node.env() {
        writeln!(out, "| **Environment** | `{variable}` |").unwrap();
    }

    match node {
        SchemaNode::String(string) => {
            if let Some(pattern) = &string.pattern {
                writeln!(out, "| **Pattern** | `{pattern}` |").unwrap();
            }
            match (string.min_length, string.max_length) {
                (Some(min), Some(max)) => writeln!(out, "| **Length** | {min} - {max} |").unwrap(),
                (Some(min), None) => writeln!(out, "| **Length** | at least {min} |").unwrap(),
                (None, Some(max)) => writeln!(out, "| **Length** | at most {max} |").unwrap(),
                (None, None) => {}
            }
        }
        SchemaNode::Number(number) => {
            match (number.min, number.max) {
                (Some(min), Some(max)) => writeln!(out, "| **Range** | {min} - {max} |").unwrap(),
                (Some(min), None) => writeln!(out, "| **Range** | at least {min} |").unwrap(),
                (None, Some(max)) => writeln!(out, "| **Range** | at most {max} |").unwrap(),
                (None, None) => {}
            }
            if !number.validate.is_empty() {
                let checks: Vec<_> = number.validate.iter().map(|c| c.describe()).collect();
                writeln!(out, "| **Checks** | {} |", checks.join(", ")).unwrap();
            }
        }
        SchemaNode::Boolean(boolean) => {
            if boolean.coerce {
                out.push_str("| **Coerce** | accepts string values |\n");
            }
        }
        SchemaNode::Array(_) => {}
    }

    out.push('\n');

    // Allowed values for enum strings
    if let SchemaNode::String(string) = node {
        if let Some(values) = &string.one_of {
            out.push_str("**Allowed values:**\n\n");
            for value in values {
                writeln!(out, "- `{value}`").unwrap();
            }
            out.push('\n');
        }
    }

    out.push_str("---\n\n");
}

fn format_type(node: &SchemaNode) -> String {
    match node {
        SchemaNode::String(_) => "String".to_string(),
        SchemaNode::Number(_) => "Number".to_string(),
        SchemaNode::Boolean(_) => "Boolean".to_string(),
        SchemaNode::Array(array) => match array.items.as_ref() {
            SchemaEntry::Node(item) => format!("Array of {}", format_type(item)),
            SchemaEntry::Object(_) => "Array of Object".to_string(),
        },
    }
}

fn format_value(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => format!("\"{s}\""),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => "null".to_string(),
        _ => v.to_string(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

// =============================================================================
// Tests
// =============================================================================
