use crate::describe::{StructDescriptor, TypeDescriptor};
use crate::error::TagError;
use crate::extract::extract;
use crate::types::ParsedTags;

/// Resolves a descriptor to the struct it describes, dereferencing at most one pointer level.
pub fn resolve_struct(descriptor: &TypeDescriptor) -> Result<&StructDescriptor, TagError> {
    match descriptor {
        TypeDescriptor::Struct(s) => Ok(s),
        TypeDescriptor::Pointer(None) => Err(TagError::nil_pointer()),
        TypeDescriptor::Pointer(Some(inner)) => match inner.as_ref() {
            TypeDescriptor::Struct(s) => Ok(s),
            TypeDescriptor::Pointer(None) => Err(TagError::nil_pointer()),
            _ => Err(TagError::invalid_input(descriptor.display_name())),
        },
        TypeDescriptor::Other(kind) => Err(TagError::invalid_input(kind.to_string())),
    }
}

/// Builds the per-field tag maps for a struct.
///
/// Unexported fields are skipped. Every exported field gets an entry, empty when
/// none of `tag_names` is present on it.
pub fn walk<S: AsRef<str>>(
    descriptor: &TypeDescriptor,
    tag_names: &[S],
) -> Result<ParsedTags, TagError> {
    let target = resolve_struct(descriptor)?;
    Ok(walk_struct(target, tag_names))
}

pub fn walk_struct<S: AsRef<str>>(target: &StructDescriptor, tag_names: &[S]) -> ParsedTags {
    let mut parsed = ParsedTags::with_capacity(target.fields.len());

    for field in &target.fields {
        if !field.exported {
            log::trace!("{}: skipping unexported field {}", target.name, field.name);
            continue;
        }

        let extraction = extract(&field.tag, tag_names);
        if !extraction.is_clean() {
            log::debug!(
                "{}.{}: skipped {} malformed tag segment(s)",
                target.name,
                field.name,
                extraction.skipped.len()
            );
        }
        log::trace!("{}.{}: found {} tag(s)", target.name, field.name, extraction.tags.len());
        parsed.insert(field.name.to_string(), extraction.tags);
    }

    parsed
}
