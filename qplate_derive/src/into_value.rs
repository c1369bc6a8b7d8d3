use darling::{FromDeriveInput, FromField, FromMeta, ast};
use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, GenericParam, ext::IdentExt, parse_macro_input, parse_quote};

#[derive(FromDeriveInput)]
#[darling(attributes(value), supports(struct_named))]
struct IntoValueInput {
    ident: syn::Ident,
    generics: syn::Generics,
    data: ast::Data<(), IntoValueField>,
    #[darling(default)]
    rename_all: Option<RenameRule>,
}

#[derive(Debug, FromField)]
#[darling(attributes(value))]
struct IntoValueField {
    ident: Option<syn::Ident>,
    #[darling(default)]
    rename: Option<String>,
    #[darling(default)]
    skip: bool,
}

pub fn into_value_derive_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let info = match IntoValueInput::from_derive_input(&input) {
        Ok(v) => v,
        Err(e) => return e.write_errors().into(),
    };

    let struct_name = &info.ident;
    let mut generics = info.generics.clone();
    let type_params: Vec<syn::Ident> = generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(ty) => Some(ty.ident.clone()),
            _ => None,
        })
        .collect();
    {
        let where_clause = generics.make_where_clause();
        for param in &type_params {
            where_clause
                .predicates
                .push(parse_quote!(#param: ::qplate::IntoValue));
        }
    }
    let (impl_gen, ty_gen, where_clause) = generics.split_for_impl();

    // supports(struct_named) rejected everything else already
    let fields = info
        .data
        .take_struct()
        .map(|fields| fields.fields)
        .unwrap_or_default();

    let entries = fields.iter().filter(|field| !field.skip).filter_map(|field| {
        let ident = field.ident.as_ref()?;
        let name = ident.unraw().to_string();
        let key = match (&field.rename, info.rename_all) {
            (Some(rename), _) => rename.clone(),
            (None, Some(rule)) => rule.apply(&name),
            (None, None) => name,
        };

        Some(quote! {
            (
                ::qplate::SmolStr::new(#key),
                ::qplate::IntoValue::into_value(self.#ident),
            )
        })
    });

    quote! {
        impl #impl_gen ::qplate::IntoValue for #struct_name #ty_gen #where_clause {
            fn into_value(self) -> ::qplate::Value {
                ::qplate::Value::Map(
                    ::core::iter::IntoIterator::into_iter([#(#entries),*]).collect(),
                )
            }
        }
    }
    .into()
}

#[derive(Debug, Clone, Copy)]
enum RenameRule {
    SnakeCase,
    CamelCase,
    PascalCase,
    ScreamingSnakeCase,
    KebabCase,
}

impl FromMeta for RenameRule {
    fn from_string(value: &str) -> darling::Result<Self> {
        match value {
            "snake_case" => Ok(RenameRule::SnakeCase),
            "camelCase" => Ok(RenameRule::CamelCase),
            "PascalCase" => Ok(RenameRule::PascalCase),
            "SCREAMING_SNAKE_CASE" => Ok(RenameRule::ScreamingSnakeCase),
            "kebab-case" => Ok(RenameRule::KebabCase),
            _ => Err(darling::Error::unknown_value(value)),
        }
    }
}

impl RenameRule {
    fn apply(self, name: &str) -> String {
        match self {
            RenameRule::SnakeCase => name.to_snake_case(),
            RenameRule::CamelCase => name.to_lower_camel_case(),
            RenameRule::PascalCase => name.to_upper_camel_case(),
            RenameRule::ScreamingSnakeCase => name.to_shouty_snake_case(),
            RenameRule::KebabCase => name.to_kebab_case(),
        }
    }
}
