use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

use crate::attrs::FieldInfo;

pub fn generate_describe_impl(input: &DeriveInput) -> syn::Result<TokenStream> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(data) => {
            let fields: Vec<FieldInfo> = match &data.fields {
                Fields::Named(named) => named
                    .named
                    .iter()
                    .enumerate()
                    .map(|(index, field)| FieldInfo::from_field(field, index))
                    .collect::<syn::Result<_>>()?,
                Fields::Unnamed(unnamed) => unnamed
                    .unnamed
                    .iter()
                    .enumerate()
                    .map(|(index, field)| FieldInfo::from_field(field, index))
                    .collect::<syn::Result<_>>()?,
                Fields::Unit => Vec::new(),
            };
            struct_descriptor(&ident.to_string(), &fields)
        }
        Data::Enum(_) => quote! {
            ::struct_tags::TypeDescriptor::Other(::struct_tags::TypeKind::Enum)
        },
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                ident,
                "Tagged can only be derived for structs or enums, not unions",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics ::struct_tags::Describe for #ident #ty_generics #where_clause {
            fn type_descriptor() -> ::struct_tags::TypeDescriptor {
                #body
            }

            fn describe(&self) -> ::struct_tags::TypeDescriptor {
                <Self as ::struct_tags::Describe>::type_descriptor()
            }
        }
    })
}

fn struct_descriptor(struct_name: &str, fields: &[FieldInfo]) -> TokenStream {
    let field_descriptors = fields.iter().map(|field| {
        let FieldInfo { name, exported, tag } = field;
        quote! {
            ::struct_tags::FieldDescriptor {
                name: ::std::borrow::Cow::Borrowed(#name),
                exported: #exported,
                tag: ::std::borrow::Cow::Borrowed(#tag),
            }
        }
    });

    quote! {
        ::struct_tags::TypeDescriptor::Struct(::struct_tags::StructDescriptor {
            name: ::std::borrow::Cow::Borrowed(#struct_name),
            fields: ::std::vec![#(#field_descriptors),*],
        })
    }
}
