use std::fmt;

use crate::decode::{IniDecoder, TagValueDecoder};
use crate::describe::{Describe, TypeDescriptor};
use crate::error::TagError;
use crate::types::{DecodedInfo, ParsedTags, TagMap};
use crate::walk::walk;

/// Collects the tags named at construction from every exported field of a struct, and
/// decodes individual tag values on request.
///
/// Each `parse*` call replaces the stored result; a failed parse leaves it empty.
/// `parse*` takes `&mut self`, so sharing one parser across threads needs a lock.
pub struct TagParser {
    tag_names: Vec<String>,
    tags: ParsedTags,
    decoder: Box<dyn TagValueDecoder>,
}

impl TagParser {
    pub fn new<S: Into<String>>(tag_names: impl IntoIterator<Item = S>) -> Self {
        Self {
            tag_names: tag_names.into_iter().map(Into::into).collect(),
            tags: ParsedTags::new(),
            decoder: Box::new(IniDecoder::default()),
        }
    }

    pub fn with_decoder(mut self, decoder: impl TagValueDecoder + 'static) -> Self {
        self.set_decoder(decoder);
        self
    }

    /// Replaces the decoder used by [`TagParser::info`].
    pub fn set_decoder(&mut self, decoder: impl TagValueDecoder + 'static) {
        self.decoder = Box::new(decoder);
    }

    pub fn tag_names(&self) -> &[String] {
        &self.tag_names
    }

    /// Parses the struct (or pointer to struct) `value` describes.
    pub fn parse<T: Describe>(&mut self, value: &T) -> Result<(), TagError> {
        self.parse_descriptor(&value.describe())
    }

    /// Parses by type alone, without a value.
    pub fn parse_type<T: Describe>(&mut self) -> Result<(), TagError> {
        self.parse_descriptor(&T::type_descriptor())
    }

    pub fn parse_descriptor(&mut self, descriptor: &TypeDescriptor) -> Result<(), TagError> {
        match walk(descriptor, self.tag_names.as_slice()) {
            Ok(tags) => {
                self.tags = tags;
                Ok(())
            }
            Err(err) => {
                self.tags.clear();
                Err(err)
            }
        }
    }

    pub fn tags(&self) -> &ParsedTags {
        &self.tags
    }

    pub fn field(&self, field_name: &str) -> Option<&TagMap> {
        self.tags.get(field_name)
    }

    /// Decodes the raw value of `tag_name` on `field_name`.
    ///
    /// Returns `Ok(None)` when the field or the tag was not found by the last parse.
    pub fn info(&self, field_name: &str, tag_name: &str) -> Result<Option<DecodedInfo>, TagError> {
        let Some(raw) = self.tags.get(field_name).and_then(|tags| tags.get(tag_name)) else {
            return Ok(None);
        };
        self.decoder.decode(tag_name, raw).map(Some)
    }
}

impl fmt::Debug for TagParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagParser")
            .field("tag_names", &self.tag_names)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

/// Parses tags by type, without keeping a parser around.
pub fn parse_tags_from_type<T: Describe, S: AsRef<str>>(
    tag_names: &[S],
) -> Result<ParsedTags, TagError> {
    walk(&T::type_descriptor(), tag_names)
}

/// Parses tags from a value, without keeping a parser around.
pub fn parse_tags_from_value<T: Describe, S: AsRef<str>>(
    value: &T,
    tag_names: &[S],
) -> Result<ParsedTags, TagError> {
    walk(&value.describe(), tag_names)
}

pub fn parse_tags_from_descriptor<S: AsRef<str>>(
    descriptor: &TypeDescriptor,
    tag_names: &[S],
) -> Result<ParsedTags, TagError> {
    walk(descriptor, tag_names)
}
