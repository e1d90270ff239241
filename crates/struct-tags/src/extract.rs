//! Field tag extraction from `key:"value"` metadata strings.

use crate::types::TagMap;

/// One whitespace-separated unit of a metadata string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Entry { key: &'a str, value: String },
    /// Text that is not a `key:"value"` pair. `offset` is its byte position.
    Malformed { text: &'a str, offset: usize },
}

/// Iterator over the segments of a metadata string.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    raw: &'a str,
    pos: usize,
}

pub fn segments(raw: &str) -> Segments<'_> {
    Segments { raw, pos: 0 }
}

impl<'a> Segments<'a> {
    fn malformed_until_space(&mut self, start: usize) -> Segment<'a> {
        let bytes = self.raw.as_bytes();
        let mut end = start + 1;
        while end < bytes.len() && !bytes[end].is_ascii_whitespace() {
            end += 1;
        }
        self.pos = end;
        Segment::Malformed {
            text: &self.raw[start..end],
            offset: start,
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.raw.as_bytes();
        let mut i = self.pos;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            self.pos = i;
            return None;
        }

        let start = i;
        while i < bytes.len() && is_key_byte(bytes[i]) {
            i += 1;
        }
        if i == start || i + 1 >= bytes.len() || bytes[i] != b':' || bytes[i + 1] != b'"' {
            return Some(self.malformed_until_space(start));
        }
        let key = &self.raw[start..i];

        let value_start = i + 2;
        let mut j = value_start;
        while j < bytes.len() && bytes[j] != b'"' {
            if bytes[j] == b'\\' {
                j += 1;
            }
            j += 1;
        }
        if j >= bytes.len() {
            // unterminated quote swallows the rest
            self.pos = bytes.len();
            return Some(Segment::Malformed {
                text: &self.raw[start..],
                offset: start,
            });
        }

        self.pos = j + 1;
        Some(Segment::Entry {
            key,
            value: unquote(&self.raw[value_start..j]),
        })
    }
}

fn is_key_byte(b: u8) -> bool {
    b > b' ' && b != b':' && b != b'"' && b != 0x7f
}

/// Resolves backslash escapes inside a quoted tag value. Unknown escapes are kept verbatim.
fn unquote(quoted: &str) -> String {
    if !quoted.contains('\\') {
        return quoted.to_string();
    }
    let mut out = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(c @ ('\\' | '"' | '\'')) => out.push(c),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Result of extracting the requested tags from one field's metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub tags: TagMap,
    /// Segments that could not be read as `key:"value"`.
    pub skipped: Vec<String>,
}

impl Extraction {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Extracts the raw value of each requested tag name present in `raw`.
///
/// Absent names are omitted. When a name appears more than once the first occurrence wins.
/// Malformed segments are reported in [`Extraction::skipped`] and never abort the scan.
pub fn extract<S: AsRef<str>>(raw: &str, tag_names: &[S]) -> Extraction {
    let mut extraction = Extraction {
        tags: TagMap::with_capacity(tag_names.len()),
        skipped: Vec::new(),
    };

    for segment in segments(raw) {
        match segment {
            Segment::Entry { key, value } => {
                if extraction.tags.has(key) || !tag_names.iter().any(|name| name.as_ref() == key) {
                    continue;
                }
                extraction.tags.insert(key, value);
            }
            Segment::Malformed { text, offset } => {
                log::debug!("skipping malformed tag segment {text:?} at offset {offset}");
                extraction.skipped.push(text.to_string());
            }
        }
    }

    extraction
}

/// Looks up a single tag. `Some("")` means present but empty; `None` means absent.
pub fn lookup(raw: &str, tag_name: &str) -> Option<String> {
    segments(raw).find_map(|segment| match segment {
        Segment::Entry { key, value } if key == tag_name => Some(value),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_requested_tags_only() {
        let raw = r#"json:"name,omitempty" yaml:"name" default:"inhere""#;
        let got = extract(raw, &["json", "default"]);
        assert!(got.is_clean());
        assert_eq!(got.tags.len(), 2);
        assert_eq!(got.tags.get("json"), Some("name,omitempty"));
        assert_eq!(got.tags.get("default"), Some("inhere"));
        assert!(!got.tags.has("yaml"));
    }

    #[test]
    fn absent_and_empty_are_distinct() {
        let raw = r#"json:"" yaml:"x""#;
        assert_eq!(lookup(raw, "json"), Some(String::new()));
        assert_eq!(lookup(raw, "toml"), None);

        let got = extract(raw, &["json", "toml"]);
        assert_eq!(got.tags.get("json"), Some(""));
        assert!(!got.tags.has("toml"));
    }

    #[test]
    fn malformed_segments_are_skipped() {
        let raw = r#"broken json:"age" :"x" also:bad default:"23""#;
        let got = extract(raw, &["json", "default", "also"]);
        assert_eq!(got.tags.get("json"), Some("age"));
        assert_eq!(got.tags.get("default"), Some("23"));
        assert!(!got.tags.has("also"));
        assert_eq!(got.skipped, vec!["broken", r#":"x""#, "also:bad"]);
    }

    #[test]
    fn unterminated_value_ends_the_scan() {
        let got = extract(r#"json:"age" yaml:"open"#, &["json", "yaml"]);
        assert_eq!(got.tags.get("json"), Some("age"));
        assert!(!got.tags.has("yaml"));
        assert_eq!(got.skipped, vec![r#"yaml:"open"#]);
    }

    #[test]
    fn escapes_inside_values() {
        assert_eq!(lookup(r#"desc:"say \"hi\"""#, "desc").as_deref(), Some(r#"say "hi""#));
        assert_eq!(lookup(r#"re:"\d+""#, "re").as_deref(), Some(r"\d+"));
    }

    #[test]
    fn first_occurrence_wins() {
        let got = extract(r#"json:"a" json:"b""#, &["json"]);
        assert_eq!(got.tags.get("json"), Some("a"));
    }

    #[test]
    fn values_keep_inner_whitespace() {
        assert_eq!(
            lookup(r#"flag:" set your name ;n""#, "flag").as_deref(),
            Some(" set your name ;n")
        );
    }
}
