use proc_macro::TokenStream;

mod into_value;

/// Derives `qplate::IntoValue` for a struct with named fields.
///
/// The struct becomes a `Value::Map` keyed by field name, in declaration
/// order, which is the shape the `?a` placeholder expands into
/// `` `key` = value `` pairs.
#[proc_macro_derive(IntoValue, attributes(value))]
pub fn into_value_derive(input: TokenStream) -> TokenStream {
    into_value::into_value_derive_impl(input)
}
