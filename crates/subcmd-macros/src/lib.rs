//! Proc macros for subcmd.
//!
//! # Available Macros
//!
//! - [`command`] - Derive a `CommandSpec` constructor from a plain function
//!
//! Generated code refers to `::subcmd_dispatch`, so crates using the macro
//! depend on `subcmd-dispatch` directly.
//!
//! For a working example, see `subcmd-macros/tests/command_macro.rs`.

mod command;

use proc_macro::TokenStream;

/// Turns a function into a registrable command.
///
/// Generates `<fn>__command()`, which returns
/// `Result<subcmd_dispatch::CommandSpec, subcmd_dispatch::RegistrationError>`.
/// Parameters without `#[arg(default = ..)]` are required; the doc comment's
/// first paragraph becomes the description.
///
/// ```rust,ignore
/// use subcmd_macros::command;
///
/// /// Add two numbers
/// #[command(namespace = "math")]
/// fn add(a: i64, #[arg(default = 1, help = "second operand")] b: i64) -> i64 {
///     a + b
/// }
///
/// registry.register(add__command()?);
/// ```
///
/// See the [module docs](crate) for the attribute reference.
#[proc_macro_attribute]
pub fn command(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr = proc_macro2::TokenStream::from(attr);
    let item = proc_macro2::TokenStream::from(item);
    command::command_impl(attr, item)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
