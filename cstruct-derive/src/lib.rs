//! Derive macro for `cstruct` records.
//!
//! Refer to the [`cstruct`](https://docs.rs/cstruct) crate for examples.
use {
    proc_macro::TokenStream,
    syn::{parse_macro_input, DeriveInput},
};

mod common;
mod packable;

/// Implement `Schema` and `Record` for a struct with named fields.
///
/// Fields are packed in declaration order. A field's schema defaults to its
/// own type; override it with `#[cstruct(with = "Int<u32, 3, BigEndian>")]`.
/// `#[cstruct(crate = "path")]` on the struct changes the path used to reach
/// the `cstruct` crate.
#[proc_macro_derive(Packable, attributes(cstruct))]
pub fn derive_packable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match packable::generate(input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.write_errors().into(),
    }
}
