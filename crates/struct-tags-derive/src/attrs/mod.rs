//! Field attribute parsing for `#[derive(Tagged)]`.
//!
//! Two forms are accepted and may be mixed on one field:
//!
//! - `#[tag = r#"json:"age" default:"23""#]` keeps the metadata string verbatim.
//! - `#[tag(json = "age", default = "23")]` renders each pair as `key:"value"`.
//!
//! Fragments are joined with a single space in attribute order.

mod field_info;

pub use field_info::FieldInfo;

use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Attribute, Expr, ExprLit, Lit, Meta};

const TAG_ATTR: &str = "tag";

/// Collect the raw metadata string from a field's `#[tag ...]` attributes.
pub fn parse_field_tag(attrs: &[Attribute]) -> syn::Result<String> {
    let mut fragments: Vec<String> = Vec::new();

    for attr in attrs {
        if !attr.path().is_ident(TAG_ATTR) {
            continue;
        }

        match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => {
                    let raw = s.value();
                    let raw = raw.trim();
                    if !raw.is_empty() {
                        fragments.push(raw.to_string());
                    }
                }
                other => {
                    return Err(syn::Error::new(
                        other.span(),
                        "expected a string literal, e.g. #[tag = r#\"json:\"name\"\"#]",
                    ));
                }
            },
            Meta::List(_) => {
                attr.parse_nested_meta(|meta| {
                    let key = meta
                        .path
                        .get_ident()
                        .map(|ident| ident.unraw().to_string())
                        .ok_or_else(|| {
                            syn::Error::new(meta.path.span(), "tag names must be plain identifiers")
                        })?;
                    let value: Expr = meta.value()?.parse()?;
                    if let Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) = value {
                        fragments.push(render_pair(&key, &s.value()));
                        Ok(())
                    } else {
                        Err(syn::Error::new(
                            value.span(),
                            format!("expected string literal for tag `{key}`"),
                        ))
                    }
                })?;
            }
            Meta::Path(path) => {
                return Err(syn::Error::new(
                    path.span(),
                    "expected #[tag = \"...\"] or #[tag(name = \"value\")]",
                ));
            }
        }
    }

    Ok(fragments.join(" "))
}

/// Render one `key:"value"` pair, escaping the value.
fn render_pair(key: &str, value: &str) -> String {
    let mut out = String::with_capacity(key.len() + value.len() + 3);
    out.push_str(key);
    out.push_str(":\"");
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn tag_of(field: syn::Field) -> syn::Result<String> {
        parse_field_tag(&field.attrs)
    }

    #[test]
    fn verbatim_form() {
        let field: syn::Field = parse_quote! {
            #[tag = r#"json:"age" default:"23""#]
            pub age: u32
        };
        assert_eq!(tag_of(field).unwrap(), r#"json:"age" default:"23""#);
    }

    #[test]
    fn structured_form_escapes_values() {
        let field: syn::Field = parse_quote! {
            #[tag(json = "name,omitempty", desc = "say \"hi\"", r#type = "x")]
            pub name: String
        };
        assert_eq!(
            tag_of(field).unwrap(),
            r#"json:"name,omitempty" desc:"say \"hi\"" type:"x""#
        );
    }

    #[test]
    fn forms_are_joined_in_order() {
        let field: syn::Field = parse_quote! {
            #[doc = "ignored"]
            #[tag(json = "a")]
            #[tag = "yaml:\"b\""]
            pub a: String
        };
        assert_eq!(tag_of(field).unwrap(), r#"json:"a" yaml:"b""#);
    }

    #[test]
    fn rejects_bad_shapes() {
        let bare: syn::Field = parse_quote! { #[tag] pub a: String };
        assert!(tag_of(bare).is_err());

        let number: syn::Field = parse_quote! { #[tag(json = 1)] pub a: String };
        assert!(tag_of(number).is_err());

        let path: syn::Field = parse_quote! { #[tag(a::b = "x")] pub a: String };
        assert!(tag_of(path).is_err());
    }
}
