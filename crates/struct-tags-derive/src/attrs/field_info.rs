//! Processed field information for code generation.

use syn::ext::IdentExt;
use syn::{Field, Visibility};

use super::parse_field_tag;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: String,
    pub exported: bool,
    pub tag: String,
}

impl FieldInfo {
    /// Create FieldInfo from a named or tuple field. Tuple fields are named by index.
    pub fn from_field(field: &Field, index: usize) -> syn::Result<Self> {
        let name = match &field.ident {
            Some(ident) => ident.unraw().to_string(),
            None => index.to_string(),
        };

        Ok(Self {
            name,
            // only a bare `pub` is visible to every caller
            exported: matches!(field.vis, Visibility::Public(_)),
            tag: parse_field_tag(&field.attrs)?,
        })
    }
}
