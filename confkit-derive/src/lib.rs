//! Derive macros for confkit
//!
//! This crate provides `#[derive(ConfigSchema)]`, which generates a
//! `confkit::ConfigSchema` implementation by driving the schema builder.
//!
//! # Usage
//!
//! ```text
//! use confkit::DeriveConfigSchema;
//!
//! #[derive(DeriveConfigSchema, Default)]
//! #[config(env_prefix = "APP")]
//! struct ServerConfig {
//!     /// Address to listen on
//!     #[config(env = "SERVER_HOST", required)]
//!     host: String,
//!
//!     #[config(min = 1, max = 65535)]
//!     port: u16,
//!
//!     database: DatabaseConfig, // nested, also derives ConfigSchema
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{
    Attribute, Data, DeriveInput, Expr, Fields, GenericArgument, Lit, Meta, PathArguments, Type,
    UnOp, parse_macro_input,
};

/// Derive macro for generating `ConfigSchema` implementations.
///
/// The struct must implement `Default`; field defaults are read from it.
///
/// # Attributes
///
/// ## Container attributes (`#[config(...)]`)
/// - `env_prefix = "APP"` - Bind every unbound field to `APP_{PATH}`
///
/// ## Field attributes (`#[config(...)]`)
/// - `rename = "key"` - Schema key (defaults to the field name)
/// - `env = "VAR"` - Environment variable binding
/// - `description = "..."` - Help text (defaults to the doc comment)
/// - `required` - Mark as required
/// - `no_default` - Do not record the `Default` value
/// - `skip` - Leave the field out of the schema
/// - strings: `secret`, `pattern = "..."`, `one_of = ["a", "b"]`,
///   `min_length = 1`, `max_length = 64`
/// - numbers: `min = 0`, `max = 100`, `positive`, `non_negative`
/// - booleans: `coerce`
///
/// Integer fields get the `integer` check automatically. `Option<T>` fields
/// never record a default. `Vec<T>` becomes an array of `T`'s kind. Any other
/// type is treated as a nested object and must implement `ConfigSchema`.
#[proc_macro_derive(ConfigSchema, attributes(config))]
pub fn derive_config_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let container_attrs = parse_container_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "ConfigSchema can only be derived for structs with named fields.\n\nExample:\n  #[derive(ConfigSchema)]\n  struct MyConfig {\n      field: Type,\n  }",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "ConfigSchema can only be derived for structs.\n\nTry: #[derive(ConfigSchema)] on a struct, not an enum or union.",
            ));
        }
    };

    let mut steps = Vec::new();

    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let attrs = parse_field_attrs(&field.attrs)?;

        // Skip fields marked with #[config(skip)]
        if attrs.skip {
            continue;
        }

        let key = attrs
            .rename
            .clone()
            .unwrap_or_else(|| field_name.unraw().to_string());
        let kind = FieldKind::classify(&field.ty);

        steps.push(generate_step(&key, field_name, &kind, &attrs, field.span())?);
    }

    let prefix_step = container_attrs.env_prefix.map(|prefix| {
        quote! { let schema = schema.with_env_prefix(#prefix); }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::confkit::ConfigSchema for #name #ty_generics #where_clause {
            fn schema() -> ::confkit::SchemaDefinition {
                #[allow(unused_variables)]
                let defaults = <#name #ty_generics as ::core::default::Default>::default();
                let builder = ::confkit::schema();
                #(let builder = #steps;)*
                let schema = builder.build();
                #prefix_step
                schema
            }
        }
    })
}

// =============================================================================
// Field classification
// =============================================================================

/// What a Rust field type maps to in the schema
enum FieldKind {
    Text,
    Integer,
    Float,
    Boolean,
    Nested(Type),
    Optional(Box<FieldKind>),
    List(Box<FieldKind>),
}

impl FieldKind {
    fn classify(ty: &Type) -> Self {
        if let Some(inner) = generic_inner(ty, "Option") {
            return FieldKind::Optional(Box::new(Self::classify(inner)));
        }
        if let Some(inner) = generic_inner(ty, "Vec") {
            return FieldKind::List(Box::new(Self::classify(inner)));
        }

        if let Type::Path(path) = ty {
            if let Some(ident) = path.path.get_ident() {
                match ident.to_string().as_str() {
                    "String" => return FieldKind::Text,
                    "bool" => return FieldKind::Boolean,
                    "i8" | "i16" | "i32" | "i64" | "isize" | "u8" | "u16" | "u32" | "u64"
                    | "usize" => return FieldKind::Integer,
                    "f32" | "f64" => return FieldKind::Float,
                    _ => {}
                }
            }
        }

        FieldKind::Nested(ty.clone())
    }
}

/// Inner type of `Wrapper<T>` when the last path segment is `wrapper`
fn generic_inner<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

// =============================================================================
// Code generation
// =============================================================================

fn generate_step(
    key: &str,
    field_name: &syn::Ident,
    kind: &FieldKind,
    attrs: &FieldAttrs,
    span: Span,
) -> syn::Result<TokenStream2> {
    let (kind, optional) = match kind {
        FieldKind::Optional(inner) => (inner.as_ref(), true),
        other => (other, false),
    };
    let record_default = !optional && !attrs.no_default;

    match kind {
        FieldKind::Text => {
            attrs.reject_except(&STRING_ATTRS, "string")?;
            let mut modifiers = attrs.common_modifiers();
            if record_default {
                let default = quote! { ::core::clone::Clone::clone(&defaults.#field_name) };
                modifiers.push(quote! { .default(#default) });
            }
            if let Some(pattern) = &attrs.pattern {
                modifiers.push(quote! { .pattern(#pattern) });
            }
            if !attrs.one_of.is_empty() {
                let values = &attrs.one_of;
                modifiers.push(quote! { .one_of([#(#values),*]) });
            }
            if let Some(min) = attrs.min_length {
                modifiers.push(quote! { .min_length(#min) });
            }
            if let Some(max) = attrs.max_length {
                modifiers.push(quote! { .max_length(#max) });
            }
            if attrs.secret {
                modifiers.push(quote! { .secret() });
            }
            Ok(quote! { builder.string(#key) #(#modifiers)* .end() })
        }
        FieldKind::Integer | FieldKind::Float => {
            attrs.reject_except(&NUMBER_ATTRS, "number")?;
            let mut modifiers = attrs.common_modifiers();
            if matches!(kind, FieldKind::Integer) {
                modifiers.push(quote! { .integer() });
            }
            if record_default {
                modifiers.push(quote! { .default(defaults.#field_name as f64) });
            }
            if let Some(min) = attrs.min {
                modifiers.push(quote! { .min(#min) });
            }
            if let Some(max) = attrs.max {
                modifiers.push(quote! { .max(#max) });
            }
            if attrs.positive {
                modifiers.push(quote! { .positive() });
            }
            if attrs.non_negative {
                modifiers.push(quote! { .non_negative() });
            }
            Ok(quote! { builder.number(#key) #(#modifiers)* .end() })
        }
        FieldKind::Boolean => {
            attrs.reject_except(&BOOLEAN_ATTRS, "boolean")?;
            let mut modifiers = attrs.common_modifiers();
            if record_default {
                modifiers.push(quote! { .default(defaults.#field_name) });
            }
            if attrs.coerce {
                modifiers.push(quote! { .coerce() });
            }
            Ok(quote! { builder.boolean(#key) #(#modifiers)* .end() })
        }
        FieldKind::Nested(ty) => {
            attrs.reject_except(&[], "nested object")?;
            if attrs.required || attrs.env.is_some() || attrs.description.is_some() {
                return Err(syn::Error::new(
                    span,
                    "nested objects only support #[config(rename)] and #[config(skip)]",
                ));
            }
            Ok(quote! {
                builder.add_to_schema(#key, <#ty as ::confkit::ConfigSchema>::schema())
            })
        }
        FieldKind::List(item) => {
            attrs.reject_except(&[], "array")?;
            let (item_expr, scalar) = match item.as_ref() {
                FieldKind::Text => (quote! { ::confkit::StringNode::new() }, true),
                FieldKind::Integer => (quote! { ::confkit::NumberNode::new().integer() }, true),
                FieldKind::Float => (quote! { ::confkit::NumberNode::new() }, true),
                FieldKind::Boolean => (quote! { ::confkit::BooleanNode::new() }, true),
                FieldKind::Nested(ty) => {
                    (quote! { <#ty as ::confkit::ConfigSchema>::schema() }, false)
                }
                FieldKind::Optional(_) | FieldKind::List(_) => {
                    return Err(syn::Error::new(
                        span,
                        "ConfigSchema supports Vec<T> of strings, numbers, booleans or nested structs only",
                    ));
                }
            };

            let mut modifiers = attrs.common_modifiers();
            if record_default && scalar {
                modifiers.push(quote! {
                    .default_items(::core::iter::Iterator::cloned(defaults.#field_name.iter()))
                });
            }
            Ok(quote! {
                builder.array_node(#key, ::confkit::ArrayNode::of(#item_expr) #(#modifiers)*)
            })
        }
        FieldKind::Optional(_) => Err(syn::Error::new(
            span,
            "ConfigSchema does not support nested Option<Option<T>>",
        )),
    }
}

// =============================================================================
// Attribute parsing
// =============================================================================

const STRING_ATTRS: [&str; 5] = ["secret", "pattern", "one_of", "min_length", "max_length"];
const NUMBER_ATTRS: [&str; 4] = ["min", "max", "positive", "non_negative"];
const BOOLEAN_ATTRS: [&str; 1] = ["coerce"];

/// Container-level attributes from #[config(...)]
#[derive(Default)]
struct ContainerAttrs {
    env_prefix: Option<String>,
}

/// Field-level attributes from #[config(...)]
#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    env: Option<String>,
    description: Option<String>,
    doc: Option<String>,
    required: bool,
    no_default: bool,
    skip: bool,
    secret: bool,
    pattern: Option<String>,
    one_of: Vec<String>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    min: Option<f64>,
    max: Option<f64>,
    positive: bool,
    non_negative: bool,
    coerce: bool,
    /// Kind-specific options that were set, with their spans
    specific: Vec<(String, Span)>,
}

impl FieldAttrs {
    /// Fail on the first kind-specific option not in `allowed`
    fn reject_except(&self, allowed: &[&str], kind: &str) -> syn::Result<()> {
        for (name, span) in &self.specific {
            if !allowed.contains(&name.as_str()) {
                return Err(syn::Error::new(
                    *span,
                    format!("#[config({name})] cannot be used on a {kind} field"),
                ));
            }
        }
        Ok(())
    }

    fn mark_specific(&mut self, name: &str, span: Span) {
        let is_specific = STRING_ATTRS
            .iter()
            .chain(NUMBER_ATTRS.iter())
            .chain(BOOLEAN_ATTRS.iter())
            .any(|s| *s == name);
        if is_specific {
            self.specific.push((name.to_string(), span));
        }
    }

    fn common_modifiers(&self) -> Vec<TokenStream2> {
        let mut modifiers = Vec::new();
        if self.required {
            modifiers.push(quote! { .required() });
        }
        if let Some(env) = &self.env {
            modifiers.push(quote! { .env(#env) });
        }
        if let Some(desc) = self.description.as_ref().or(self.doc.as_ref()) {
            modifiers.push(quote! { .description(#desc) });
        }
        modifiers
    }
}

fn config_metas(attr: &Attribute) -> syn::Result<Vec<Meta>> {
    let nested = attr.parse_args_with(
        syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated,
    )?;
    Ok(nested.into_iter().collect())
}

fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut result = ContainerAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("config") {
            continue;
        }
        for meta in config_metas(attr)? {
            match meta {
                Meta::NameValue(nv) if nv.path.is_ident("env_prefix") => {
                    result.env_prefix = Some(expect_str(&nv.value, "env_prefix", "\"APP\"")?);
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "unknown container attribute; expected #[config(env_prefix = \"...\")]",
                    ));
                }
            }
        }
    }

    Ok(result)
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut result = FieldAttrs::default();
    let mut doc_lines = Vec::new();

    for attr in attrs {
        // Doc comments become the description unless one is given
        if attr.path().is_ident("doc") {
            if let Meta::NameValue(nv) = &attr.meta {
                if let Expr::Lit(lit) = &nv.value {
                    if let Lit::Str(s) = &lit.lit {
                        let line = s.value().trim().to_string();
                        if !line.is_empty() {
                            doc_lines.push(line);
                        }
                    }
                }
            }
            continue;
        }

        if !attr.path().is_ident("config") {
            continue;
        }

        for meta in config_metas(attr)? {
            let span = meta.span();
            match meta {
                Meta::Path(path) => {
                    let Some(name) = path.get_ident().map(ToString::to_string) else {
                        return Err(syn::Error::new(span, "unknown config attribute"));
                    };
                    match name.as_str() {
                        "required" => result.required = true,
                        "no_default" => result.no_default = true,
                        "skip" => result.skip = true,
                        "secret" => result.secret = true,
                        "positive" => result.positive = true,
                        "non_negative" => result.non_negative = true,
                        "coerce" => result.coerce = true,
                        _ => {
                            return Err(syn::Error::new(
                                span,
                                format!("unknown config attribute `{name}`"),
                            ));
                        }
                    }
                    result.mark_specific(&name, span);
                }
                Meta::NameValue(nv) => {
                    let Some(name) = nv.path.get_ident().map(ToString::to_string) else {
                        return Err(syn::Error::new(span, "unknown config attribute"));
                    };
                    let value = &nv.value;
                    match name.as_str() {
                        "rename" => result.rename = Some(expect_str(value, "rename", "\"key\"")?),
                        "env" => result.env = Some(expect_str(value, "env", "\"MY_VAR\"")?),
                        "description" => {
                            result.description =
                                Some(expect_str(value, "description", "\"Help text\"")?);
                        }
                        "pattern" => {
                            result.pattern = Some(expect_str(value, "pattern", "\"^[a-z]+$\"")?);
                        }
                        "one_of" => result.one_of = expect_str_array(value)?,
                        "min_length" => {
                            result.min_length = Some(expect_usize(value, "min_length")?);
                        }
                        "max_length" => {
                            result.max_length = Some(expect_usize(value, "max_length")?);
                        }
                        "min" => result.min = Some(expect_number(value, "min")?),
                        "max" => result.max = Some(expect_number(value, "max")?),
                        _ => {
                            return Err(syn::Error::new(
                                span,
                                format!("unknown config attribute `{name}`"),
                            ));
                        }
                    }
                    result.mark_specific(&name, span);
                }
                Meta::List(list) => {
                    return Err(syn::Error::new_spanned(
                        list,
                        "unexpected list; use `one_of = [\"a\", \"b\"]` for allowed values",
                    ));
                }
            }
        }
    }

    if !doc_lines.is_empty() {
        result.doc = Some(doc_lines.join(" "));
    }

    Ok(result)
}

fn expect_str(value: &Expr, name: &str, example: &str) -> syn::Result<String> {
    if let Expr::Lit(lit) = value {
        if let Lit::Str(s) = &lit.lit {
            return Ok(s.value());
        }
    }
    Err(syn::Error::new_spanned(
        value,
        format!(
            "#[config({name})] must be a string literal.\n\nExample: #[config({name} = {example})]"
        ),
    ))
}

fn expect_str_array(value: &Expr) -> syn::Result<Vec<String>> {
    let Expr::Array(array) = value else {
        return Err(syn::Error::new_spanned(
            value,
            "#[config(one_of)] must be an array of string literals.\n\nExample: #[config(one_of = [\"debug\", \"info\"])]",
        ));
    };
    array
        .elems
        .iter()
        .map(|elem| expect_str(elem, "one_of", "[\"debug\", \"info\"]"))
        .collect()
}

fn expect_usize(value: &Expr, name: &str) -> syn::Result<usize> {
    if let Expr::Lit(lit) = value {
        if let Lit::Int(i) = &lit.lit {
            return i.base10_parse();
        }
    }
    Err(syn::Error::new_spanned(
        value,
        format!(
            "#[config({name})] must be a non-negative integer.\n\nExample: #[config({name} = 8)]"
        ),
    ))
}

fn expect_number(value: &Expr, name: &str) -> syn::Result<f64> {
    let parsed = match value {
        Expr::Lit(lit) => lit_to_f64(&lit.lit),
        Expr::Unary(unary) if matches!(unary.op, UnOp::Neg(_)) => match unary.expr.as_ref() {
            Expr::Lit(lit) => lit_to_f64(&lit.lit).map(|v| -v),
            _ => None,
        },
        _ => None,
    };
    parsed.ok_or_else(|| {
        syn::Error::new_spanned(
            value,
            format!("#[config({name})] must be a number.\n\nExample: #[config({name} = 0)]"),
        )
    })
}

fn lit_to_f64(lit: &Lit) -> Option<f64> {
    match lit {
        Lit::Float(f) => f.base10_parse().ok(),
        Lit::Int(i) => i.base10_parse::<i64>().ok().map(|v| v as f64),
        _ => None,
    }
}
