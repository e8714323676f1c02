//! Schema consistency checks
//!
//! The builder accepts anything. These checks look at a finished schema and
//! report constraints that can never be satisfied, patterns that do not
//! compile, defaults that break their own field's rules and clashing
//! environment bindings. Nothing here runs automatically.

use std::collections::HashMap;

use regex::Regex;

use crate::error::{Error, Result};
use crate::schema::{NumberNode, SchemaDefinition, SchemaEntry, SchemaNode, StringNode, join_path};

/// A problem found in a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// Dotted path of the offending field (`[]` marks array items)
    pub path: String,
    pub reason: String,
}

impl SchemaIssue {
    fn new(path: &str, reason: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

impl From<SchemaIssue> for Error {
    fn from(issue: SchemaIssue) -> Self {
        Error::InvalidSchema {
            path: issue.path,
            reason: issue.reason,
        }
    }
}

impl SchemaDefinition {
    /// Check the schema and return the first problem as an error
    ///
    /// ```
    /// use confkit::schema;
    ///
    /// let ok = schema().number("port").min(1.0).max(65535.0).end().build();
    /// assert!(ok.validate_schema().is_ok());
    ///
    /// let bad = schema().number("port").min(10.0).max(5.0).end().build();
    /// assert!(bad.validate_schema().is_err());
    /// ```
    pub fn validate_schema(&self) -> Result<()> {
        match self.schema_issues().into_iter().next() {
            Some(issue) => Err(issue.into()),
            None => Ok(()),
        }
    }

    /// Every problem found in the schema, in path order
    #[must_use]
    pub fn schema_issues(&self) -> Vec<SchemaIssue> {
        let mut issues = Vec::new();
        lint_definition(self, "", &mut issues);

        // Same variable feeding two fields
        let mut seen: HashMap<String, String> = HashMap::new();
        for binding in self.env_bindings() {
            match seen.get(&binding.variable) {
                Some(first) => issues.push(SchemaIssue::new(
                    &binding.path,
                    format!(
                        "env variable {} is already bound to '{}'",
                        binding.variable, first
                    ),
                )),
                None => {
                    seen.insert(binding.variable, binding.path);
                }
            }
        }

        issues
    }
}

fn lint_definition(def: &SchemaDefinition, prefix: &str, issues: &mut Vec<SchemaIssue>) {
    for (key, entry) in def {
        let path = join_path(prefix, key);
        if key.is_empty() {
            issues.push(SchemaIssue::new(&path, "key is empty"));
        }
        lint_entry(entry, &path, issues);
    }
}

fn lint_entry(entry: &SchemaEntry, path: &str, issues: &mut Vec<SchemaIssue>) {
    match entry {
        SchemaEntry::Object(def) => lint_definition(def, path, issues),
        SchemaEntry::Node(node) => lint_node(node, path, issues),
    }
}

fn lint_node(node: &SchemaNode, path: &str, issues: &mut Vec<SchemaIssue>) {
    if let Some(variable) = node.env() {
        if !is_valid_env_name(variable) {
            issues.push(SchemaIssue::new(
                path,
                format!("'{variable}' is not a valid environment variable name"),
            ));
        }
    }

    match node {
        SchemaNode::String(string) => lint_string(string, path, issues),
        SchemaNode::Number(number) => lint_number(number, path, issues),
        SchemaNode::Boolean(_) => {}
        SchemaNode::Array(array) => {
            lint_entry(&array.items, &format!("{path}[]"), issues);
        }
    }
}

fn lint_string(node: &StringNode, path: &str, issues: &mut Vec<SchemaIssue>) {
    if let (Some(min), Some(max)) = (node.min_length, node.max_length) {
        if min > max {
            issues.push(SchemaIssue::new(
                path,
                format!("minLength ({min}) cannot be greater than maxLength ({max})"),
            ));
        }
    }

    let regex = match node.pattern.as_deref() {
        Some("") => {
            issues.push(SchemaIssue::new(path, "pattern cannot be empty string"));
            None
        }
        Some(pattern) => match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                issues.push(SchemaIssue::new(path, format!("invalid regex pattern: {e}")));
                None
            }
        },
        None => None,
    };

    if let Some(values) = &node.one_of {
        if values.is_empty() {
            issues.push(SchemaIssue::new(path, "enum has no allowed values"));
        }
    }

    let Some(default) = node.default.as_deref() else {
        return;
    };

    if let Some(values) = &node.one_of {
        if !values.is_empty() && !values.iter().any(|v| v == default) {
            issues.push(SchemaIssue::new(
                path,
                format!("default '{default}' is not one of the allowed values"),
            ));
        }
    }
    if let Some(re) = regex {
        if !re.is_match(default) {
            issues.push(SchemaIssue::new(
                path,
                format!("default does not match pattern: {}", re.as_str()),
            ));
        }
    }
    let len = default.chars().count();
    if node.min_length.is_some_and(|min| len < min)
        || node.max_length.is_some_and(|max| len > max)
    {
        issues.push(SchemaIssue::new(
            path,
            format!("default length {len} is outside the allowed length"),
        ));
    }
}

fn lint_number(node: &NumberNode, path: &str, issues: &mut Vec<SchemaIssue>) {
    if let (Some(min), Some(max)) = (node.min, node.max) {
        if min > max {
            issues.push(SchemaIssue::new(
                path,
                format!("min ({min}) cannot be greater than max ({max})"),
            ));
        }
    }

    let Some(default) = node.default else {
        return;
    };

    if let Some(min) = node.min {
        if default < min {
            issues.push(SchemaIssue::new(
                path,
                format!("default {default} is below min {min}"),
            ));
        }
    }
    if let Some(max) = node.max {
        if default > max {
            issues.push(SchemaIssue::new(
                path,
                format!("default {default} is above max {max}"),
            ));
        }
    }
    for check in &node.validate {
        if !check.check(default) {
            issues.push(SchemaIssue::new(
                path,
                format!("default {default} is not {}", check.describe()),
            ));
        }
    }
}

fn is_valid_env_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// =============================================================================
// Tests
// =============================================================================
