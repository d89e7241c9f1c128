//! `#[command]` proc macro for function-backed commands.
//!
//! The macro reads a function's parameters at compile time and generates a
//! constructor for the matching `CommandSpec`, so the signature is written
//! once.
//!
//! # Example
//!
//! ```rust,ignore
//! use subcmd_macros::command;
//!
//! /// Say hello
//! #[command(namespace = "demo")]
//! fn greet(
//!     name: String,
//!     #[arg(default = false, help = "shout it")] loud: bool,
//! ) -> String {
//!     if loud { name.to_uppercase() } else { name }
//! }
//!
//! // Generates:
//! // pub fn greet__command() -> Result<CommandSpec, RegistrationError> {
//! //     let __signature = Signature::new().arg("name").opt("loud", ...);
//! //     CommandSpec::builder("greet", __signature)
//! //         .description("Say hello")
//! //         .namespace("demo")
//! //         .arg(ArgSpec::new("loud").default(...).type_hint(TypeHint::Bool).help("shout it"))
//! //         .build(|__args| Ok(greet(__args.get("name")?, __args.get("loud")?)))
//! // }
//! ```
//!
//! # Command Attributes
//!
//! | Attribute | Type | Description |
//! |-----------|------|-------------|
//! | `name` | string | Command name, defaults to the function name |
//! | `namespace` | string | Namespace prefix |
//! | `description` | string | Description, defaults to the doc comment |
//!
//! # Parameter Attributes
//!
//! Parameters without an attribute are required. `#[arg(...)]` accepts:
//!
//! | Attribute | Type | Description |
//! |-----------|------|-------------|
//! | `default` | expression | Makes the parameter optional |
//! | `positional` | flag | Read the optional parameter positionally |
//! | `help` | string | Help text |
//! | `short` | char | Short flag |
//! | `metavar` | string | Value placeholder in help |
//!
//! Parameter types must implement `serde::Deserialize`; default expressions
//! must convert into `serde_json::Value`.
//!
//! # Return Type Handling
//!
//! | Return Type | Generated handler returns |
//! |-------------|---------------------------|
//! | `T` | `Ok(value)` |
//! | `Result<T, E>` | the result, with `E` converted into `anyhow::Error` |

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, FnArg, ItemFn, Lit, Meta, Pat, PatType, Result, Token, Type,
};

// =============================================================================
// Command-level attributes
// =============================================================================

/// Parsed command-level attributes from `#[command(...)]`
#[derive(Default)]
struct CommandAttrs {
    name: Option<String>,
    namespace: Option<String>,
    description: Option<String>,
}

impl Parse for CommandAttrs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attrs = CommandAttrs::default();

        if input.is_empty() {
            return Ok(attrs);
        }

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match meta {
                Meta::NameValue(nv) => {
                    let ident = nv.path.get_ident().map(|i| i.to_string());
                    match ident.as_deref() {
                        Some("name") => attrs.name = Some(parse_string_value(&nv.value)?),
                        Some("namespace") => {
                            attrs.namespace = Some(parse_string_value(&nv.value)?)
                        }
                        Some("description") => {
                            attrs.description = Some(parse_string_value(&nv.value)?)
                        }
                        Some(other) => {
                            return Err(Error::new(
                                nv.path.span(),
                                format!("unknown command attribute `{}`", other),
                            ));
                        }
                        None => return Err(Error::new(nv.path.span(), "expected identifier")),
                    }
                }
                other => {
                    return Err(Error::new(
                        other.span(),
                        "unexpected attribute format, use `key = \"value\"`",
                    ));
                }
            }
        }

        Ok(attrs)
    }
}

// =============================================================================
// Parameter-level attributes
// =============================================================================

/// Attributes for `#[arg(...)]`
#[derive(Default)]
struct ArgAttrs {
    default: Option<Expr>,
    positional: bool,
    help: Option<String>,
    short: Option<char>,
    metavar: Option<String>,
}

impl ArgAttrs {
    /// Whether anything beyond the default needs an `ArgSpec` override.
    fn has_overrides(&self) -> bool {
        self.help.is_some() || self.short.is_some() || self.metavar.is_some()
    }
}

/// Parsed parameter information
struct ParamInfo {
    name: String,
    ty: Type,
    attrs: ArgAttrs,
}

impl ParamInfo {
    fn needs_override(&self) -> bool {
        self.attrs.has_overrides() || type_hint_for(&self.ty).is_some()
    }
}

fn parse_string_value(expr: &Expr) -> Result<String> {
    if let Expr::Lit(expr_lit) = expr {
        if let Lit::Str(lit_str) = &expr_lit.lit {
            return Ok(lit_str.value());
        }
    }
    Err(Error::new(expr.span(), "expected string literal"))
}

fn parse_arg_attrs(attr: &Attribute) -> Result<ArgAttrs> {
    let mut attrs = ArgAttrs::default();

    if attr.meta.require_path_only().is_ok() {
        return Ok(attrs);
    }

    attr.parse_nested_meta(|meta| {
        let ident = meta.path.get_ident().map(|i| i.to_string());
        match ident.as_deref() {
            Some("default") => {
                attrs.default = Some(meta.value()?.parse()?);
            }
            Some("positional") => {
                attrs.positional = true;
            }
            Some("help") => {
                let value: Lit = meta.value()?.parse()?;
                match value {
                    Lit::Str(s) => attrs.help = Some(s.value()),
                    other => return Err(Error::new(other.span(), "expected string literal")),
                }
            }
            Some("short") => {
                let value: Lit = meta.value()?.parse()?;
                match value {
                    Lit::Char(c) => attrs.short = Some(c.value()),
                    other => return Err(Error::new(other.span(), "expected character literal")),
                }
            }
            Some("metavar") => {
                let value: Lit = meta.value()?.parse()?;
                match value {
                    Lit::Str(s) => attrs.metavar = Some(s.value()),
                    other => return Err(Error::new(other.span(), "expected string literal")),
                }
            }
            Some(other) => {
                return Err(Error::new(
                    meta.path.span(),
                    format!("unknown arg attribute `{}`", other),
                ));
            }
            None => return Err(Error::new(meta.path.span(), "expected identifier")),
        }
        Ok(())
    })?;

    if attrs.positional && attrs.default.is_none() {
        return Err(Error::new(
            attr.span(),
            "`positional` needs a `default`; required parameters are already positional",
        ));
    }

    Ok(attrs)
}

fn parse_param(pat_type: &PatType) -> Result<ParamInfo> {
    let name = match pat_type.pat.as_ref() {
        Pat::Ident(ident) => ident.ident.to_string(),
        other => {
            return Err(Error::new(
                other.span(),
                "expected identifier pattern for parameter",
            ))
        }
    };

    if matches!(pat_type.ty.as_ref(), Type::Reference(_)) {
        return Err(Error::new(
            pat_type.ty.span(),
            "#[command] parameters must be owned types",
        ));
    }

    let mut attrs = ArgAttrs::default();
    for attr in &pat_type.attrs {
        if attr.path().is_ident("arg") {
            attrs = parse_arg_attrs(attr)?;
        }
    }

    Ok(ParamInfo {
        name,
        ty: (*pat_type.ty).clone(),
        attrs,
    })
}

// =============================================================================
// Function analysis
// =============================================================================

/// Joins the first paragraph of the doc comment into one line.
fn doc_description(attrs: &[Attribute]) -> Option<String> {
    let mut lines = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let Meta::NameValue(nv) = &attr.meta {
            if let Ok(line) = parse_string_value(&nv.value) {
                lines.push(line.trim().to_string());
            }
        }
    }

    let paragraph: Vec<String> = lines
        .into_iter()
        .skip_while(|l| l.is_empty())
        .take_while(|l| !l.is_empty())
        .collect();

    if paragraph.is_empty() {
        None
    } else {
        Some(paragraph.join(" "))
    }
}

/// Extract the inner type from `Option<T>`
fn option_inner(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            if segment.ident != "Option" {
                return None;
            }
            if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                    return Some(inner);
                }
            }
        }
    }
    None
}

/// The parser coercion for primitive parameter types, looking through
/// `Option`.
fn type_hint_for(ty: &Type) -> Option<TokenStream> {
    let ty = option_inner(ty).unwrap_or(ty);
    let Type::Path(type_path) = ty else {
        return None;
    };
    let ident = type_path.path.get_ident()?.to_string();
    let hint = match ident.as_str() {
        "i8" | "i16" | "i32" | "i64" | "isize" | "u8" | "u16" | "u32" | "u64" | "usize" => {
            quote! { Int }
        }
        "f32" | "f64" => quote! { Float },
        "bool" => quote! { Bool },
        _ => return None,
    };
    Some(quote! { ::subcmd_dispatch::TypeHint::#hint })
}

/// Check if the return type is `Result<..>`
fn returns_result(fn_item: &ItemFn) -> bool {
    if let syn::ReturnType::Type(_, ty) = &fn_item.sig.output {
        if let Type::Path(type_path) = ty.as_ref() {
            if let Some(segment) = type_path.path.segments.last() {
                return segment.ident == "Result";
            }
        }
    }
    false
}

// =============================================================================
// Code generation
// =============================================================================

/// `Value::from(<default as ty>)`, so the default is checked against the
/// parameter type.
fn generate_default_value(param: &ParamInfo, expr: &Expr) -> TokenStream {
    let ty = &param.ty;
    let value = quote! {
        ::subcmd_dispatch::Value::from({ let __default: #ty = #expr; __default })
    };
    if param.attrs.positional {
        quote! { ::subcmd_dispatch::positional(#value) }
    } else {
        quote! { ::subcmd_dispatch::DefaultValue::from(#value) }
    }
}

fn generate_signature_step(param: &ParamInfo) -> TokenStream {
    let name = &param.name;
    match &param.attrs.default {
        Some(expr) => {
            let default = generate_default_value(param, expr);
            quote! { .opt(#name, #default) }
        }
        None => quote! { .arg(#name) },
    }
}

fn generate_arg_override(param: &ParamInfo) -> Option<TokenStream> {
    if !param.needs_override() {
        return None;
    }
    let name = &param.name;
    let mut arg = match &param.attrs.default {
        Some(expr) => {
            let default = generate_default_value(param, expr);
            quote! { ::subcmd_dispatch::ArgSpec::new(#name).default(#default) }
        }
        None => quote! { ::subcmd_dispatch::ArgSpec::new(#name) },
    };
    if let Some(hint) = type_hint_for(&param.ty) {
        arg = quote! { #arg.type_hint(#hint) };
    }
    if let Some(help) = &param.attrs.help {
        arg = quote! { #arg.help(#help) };
    }
    if let Some(short) = &param.attrs.short {
        arg = quote! { #arg.short(#short) };
    }
    if let Some(metavar) = &param.attrs.metavar {
        arg = quote! { #arg.metavar(#metavar) };
    }
    Some(quote! { .arg(#arg) })
}

fn generate_extraction(param: &ParamInfo) -> TokenStream {
    let ident = format_ident!("{}", param.name);
    let name = &param.name;
    let ty = &param.ty;
    quote! {
        let #ident: #ty = __args.get(#name)?;
    }
}

/// Main implementation of the #[command] macro
pub fn command_impl(attr: TokenStream, item: TokenStream) -> Result<TokenStream> {
    let fn_item: ItemFn = syn::parse2(item)?;
    let attrs: CommandAttrs = syn::parse2(attr)?;

    let fn_name = &fn_item.sig.ident;
    let fn_vis = &fn_item.vis;
    let constructor_name = format_ident!("{}__command", fn_name);

    if !fn_item.sig.generics.params.is_empty() {
        return Err(Error::new(
            fn_item.sig.generics.span(),
            "#[command] functions cannot be generic",
        ));
    }

    let mut params = Vec::new();
    for fn_arg in &fn_item.sig.inputs {
        match fn_arg {
            FnArg::Typed(pat_type) => params.push(parse_param(pat_type)?),
            FnArg::Receiver(_) => {
                return Err(Error::new(
                    fn_arg.span(),
                    "#[command] functions cannot have a self parameter; implement `Command` instead",
                ));
            }
        }
    }

    let command_name = attrs.name.unwrap_or_else(|| fn_name.to_string());
    let description = attrs
        .description
        .or_else(|| doc_description(&fn_item.attrs))
        .map(|d| quote! { .description(#d) });
    let namespace = attrs.namespace.map(|ns| quote! { .namespace(#ns) });

    let signature_steps: Vec<TokenStream> = params.iter().map(generate_signature_step).collect();
    let overrides: Vec<TokenStream> = params.iter().filter_map(generate_arg_override).collect();
    let extractions: Vec<TokenStream> = params.iter().map(generate_extraction).collect();
    let call_args: Vec<_> = params.iter().map(|p| format_ident!("{}", p.name)).collect();

    let call = if returns_result(&fn_item) {
        quote! { ::core::result::Result::Ok(#fn_name(#(#call_args),*)?) }
    } else {
        quote! { ::core::result::Result::Ok(#fn_name(#(#call_args),*)) }
    };

    // Strip #[arg] from the emitted function's parameters
    let mut clean_fn = fn_item.clone();
    for fn_arg in &mut clean_fn.sig.inputs {
        if let FnArg::Typed(pat_type) = fn_arg {
            pat_type.attrs.retain(|attr| !attr.path().is_ident("arg"));
        }
    }

    Ok(quote! {
        #clean_fn

        #[allow(non_snake_case)]
        #fn_vis fn #constructor_name() -> ::core::result::Result<
            ::subcmd_dispatch::CommandSpec,
            ::subcmd_dispatch::RegistrationError,
        > {
            let __signature = ::subcmd_dispatch::Signature::new()
                #(#signature_steps)*;
            ::subcmd_dispatch::CommandSpec::builder(#command_name, __signature)
                #description
                #namespace
                #(#overrides)*
                .build(|__args: &::subcmd_dispatch::Arguments| -> ::subcmd_dispatch::CallResult<_> {
                    #(#extractions)*
                    #call
                })
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_attrs() {
        let tokens: TokenStream = quote! {
            name = "hello", namespace = "demo", description = "Say hello"
        };

        let attrs: CommandAttrs = syn::parse2(tokens).unwrap();
        assert_eq!(attrs.name, Some("hello".to_string()));
        assert_eq!(attrs.namespace, Some("demo".to_string()));
        assert_eq!(attrs.description, Some("Say hello".to_string()));
    }

    #[test]
    fn test_parse_command_attrs_empty() {
        let attrs: CommandAttrs = syn::parse2(TokenStream::new()).unwrap();
        assert_eq!(attrs.name, None);
        assert_eq!(attrs.namespace, None);
    }

    #[test]
    fn test_parse_command_attrs_unknown() {
        let tokens: TokenStream = quote! { template = "x" };
        assert!(syn::parse2::<CommandAttrs>(tokens).is_err());
    }

    #[test]
    fn test_doc_description_first_paragraph() {
        let item: ItemFn = syn::parse_quote! {
            /// namespaced
            /// command
            ///
            /// More detail.
            fn f() {}
        };
        assert_eq!(
            doc_description(&item.attrs),
            Some("namespaced command".to_string())
        );
    }

    #[test]
    fn test_returns_result() {
        let item: ItemFn = syn::parse_quote! { fn f() -> Result<u8, E> { Ok(1) } };
        assert!(returns_result(&item));
        let item: ItemFn = syn::parse_quote! { fn f() -> u8 { 1 } };
        assert!(!returns_result(&item));
    }

    #[test]
    fn test_expansion_strips_arg_attrs() {
        let item = quote! {
            fn greet(name: String, #[arg(default = false, help = "shout")] loud: bool) -> String {
                name
            }
        };
        let out = command_impl(TokenStream::new(), item).unwrap().to_string();
        assert!(out.contains("greet__command"));
        assert!(out.contains(". opt (\"loud\""));
        assert!(out.contains(". help (\"shout\")"));
        assert!(!out.contains("# [arg"));
    }

    #[test]
    fn test_type_hint_for_primitives() {
        let hint = |ty: Type| type_hint_for(&ty).map(|t| t.to_string());
        assert!(hint(syn::parse_quote!(i64)).unwrap().ends_with("Int"));
        assert!(hint(syn::parse_quote!(Option<f64>)).unwrap().ends_with("Float"));
        assert!(hint(syn::parse_quote!(bool)).unwrap().ends_with("Bool"));
        assert_eq!(hint(syn::parse_quote!(String)), None);
        assert_eq!(hint(syn::parse_quote!(Vec<i64>)), None);
    }

    #[test]
    fn test_positional_requires_default() {
        let item = quote! { fn f(#[arg(positional)] x: String) -> String { x } };
        assert!(command_impl(TokenStream::new(), item).is_err());
    }

    #[test]
    fn test_rejects_references_and_receivers() {
        let item = quote! { fn f(x: &str) -> String { x.to_string() } };
        assert!(command_impl(TokenStream::new(), item).is_err());

        let item = quote! { fn f(&self) {} };
        assert!(command_impl(TokenStream::new(), item).is_err());
    }
}
