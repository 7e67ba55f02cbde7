#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros used across the forgehand workspace.
//!
//! Only one attribute lives here for now: [`macro@fh_error`], which turns a plain
//! enum into a `thiserror` error with context support.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for crate-level error enums.
///
/// Applied to an enum with named-field variants, it expands to:
///
/// * `#[derive(Debug, thiserror::Error)]` (skipping whichever is already derived).
/// * A companion `<Name>Ext<T>` trait with `.context(...)`, implemented for
///   `Result<T, Name>` and for `Result<T, Source>` of every variant that wraps a source error.
/// * `From<Source>` for each variant holding a `source` field (or a field tagged
///   `#[source]`/`#[from]`).
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }` variant exists.
/// * A module-private `format_context` helper for `#[error(...)]` strings.
///
/// # Requirements
///
/// * Variants use named fields; tuple and unit variants are rejected.
/// * A variant with a source must also carry `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[fh_derive::fh_error]
/// pub enum MarkerError {
///     #[error("I/O error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn probe(path: &std::path::Path) -> Result<(), MarkerError> {
///     std::fs::metadata(path).context("Probing the registration marker")?;
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn fh_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
