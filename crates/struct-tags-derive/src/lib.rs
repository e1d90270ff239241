mod attrs;
mod describe_gen;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Implements `struct_tags::Describe` from the field list and `#[tag ...]` attributes.
#[proc_macro_derive(Tagged, attributes(tag))]
pub fn derive_tagged(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match describe_gen::generate_describe_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
