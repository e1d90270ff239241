//! Per-field metadata tags for Rust structs.
//!
//! Fields carry raw metadata in the conventional `key:"value" key2:"value2"` syntax,
//! attached with `#[derive(Tagged)]` and `#[tag = "..."]` / `#[tag(key = "value")]`.
//! A [`TagParser`] picks the tag names it was built with out of every public field,
//! and decodes individual tag values on request with a pluggable [`TagValueDecoder`].
//!
//! ```
//! use struct_tags::{TagParser, Tagged};
//!
//! #[derive(Tagged)]
//! pub struct User {
//!     #[tag = r#"json:"age" default:"23""#]
//!     pub age: u32,
//!     #[tag(json = "name,omitempty", default = "inhere")]
//!     pub name: String,
//!     inner: String,
//! }
//!
//! let user = User { age: 0, name: String::new(), inner: String::new() };
//! let mut parser = TagParser::new(["json", "default"]);
//! parser.parse(&user).unwrap();
//!
//! assert_eq!(parser.tags()["age"].int("default"), 23);
//! assert!(!parser.tags().contains_key("inner"));
//!
//! let info = parser.info("name", "json").unwrap().unwrap();
//! assert_eq!(info.str("name"), "name");
//! assert_eq!(info.str("omitempty"), "true");
//! ```

extern crate self as struct_tags;

pub mod decode;
pub mod describe;
pub mod error;
pub mod extract;
pub mod parser;
pub mod types;
pub mod walk;

pub use decode::{
    IniDecoder, NamedDecoder, PositionalDecoder, PrimaryKey, TagValueDecoder, parse_tag_value_ini,
    parse_tag_value_named, positional_decoder,
};
pub use describe::{Describe, FieldDescriptor, StructDescriptor, TypeDescriptor, TypeKind};
pub use error::{ErrorKind, TagError};
pub use extract::{Extraction, Segment, extract, lookup, segments};
pub use parser::{
    TagParser, parse_tags_from_descriptor, parse_tags_from_type, parse_tags_from_value,
};
pub use types::{DecodedInfo, ParsedTags, StrMap, TagMap};
pub use walk::{resolve_struct, walk};

// Re-export the derive macro so users only need to depend on `struct-tags`
pub use struct_tags_derive::Tagged;
