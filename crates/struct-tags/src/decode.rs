//! Tag value decoders: turn one raw tag value into a sub-key map.

use crate::error::TagError;
use crate::types::DecodedInfo;

/// Strategy for decoding a raw tag value.
pub trait TagValueDecoder {
    fn decode(&self, tag_name: &str, raw: &str) -> Result<DecodedInfo, TagError>;
}

impl<F> TagValueDecoder for F
where
    F: Fn(&str, &str) -> Result<DecodedInfo, TagError>,
{
    fn decode(&self, tag_name: &str, raw: &str) -> Result<DecodedInfo, TagError> {
        self(tag_name, raw)
    }
}

/// Key given to a leading token that has no `=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryKey {
    Fixed(String),
    /// Use the tag name being decoded.
    TagName,
}

impl Default for PrimaryKey {
    fn default() -> Self {
        PrimaryKey::Fixed("name".to_string())
    }
}

/// `key=value` items separated by a delimiter.
///
/// A bare leading token maps to the primary key; later bare tokens are flags set to `"true"`.
/// With the default settings `name,omitempty` decodes to `{name: name, omitempty: true}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniDecoder {
    delimiter: String,
    primary_key: PrimaryKey,
}

impl Default for IniDecoder {
    fn default() -> Self {
        Self::new(",")
    }
}

impl IniDecoder {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
            primary_key: PrimaryKey::default(),
        }
    }

    pub fn with_primary_key(mut self, primary_key: PrimaryKey) -> Self {
        self.primary_key = primary_key;
        self
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }
}

impl TagValueDecoder for IniDecoder {
    fn decode(&self, tag_name: &str, raw: &str) -> Result<DecodedInfo, TagError> {
        let primary = match &self.primary_key {
            PrimaryKey::Fixed(key) => key.as_str(),
            PrimaryKey::TagName => tag_name,
        };
        Ok(decode_ini(raw, &self.delimiter, primary))
    }
}

fn decode_ini(raw: &str, delimiter: &str, primary: &str) -> DecodedInfo {
    let mut info = DecodedInfo::new();
    if raw.trim().is_empty() {
        return info;
    }

    for (index, token) in raw.split(delimiter).map(str::trim).enumerate() {
        if token.is_empty() {
            // `,omitempty` leaves the primary value empty
            if index == 0 {
                info.insert(primary, "");
            }
            continue;
        }
        match token.split_once('=') {
            Some((key, value)) => {
                info.insert(key.trim(), value.trim());
            }
            None if index == 0 => {
                info.insert(primary, token);
            }
            None => {
                info.insert(token, "true");
            }
        }
    }
    info
}

/// Decodes `raw` with the INI rules, using `tag_name` as the key of a bare leading token.
///
/// This differs from [`IniDecoder::default`], which keys that token as `"name"`. The
/// equivalent decoder is `IniDecoder::new(delimiter).with_primary_key(PrimaryKey::TagName)`.
pub fn parse_tag_value_ini(tag_name: &str, raw: &str, delimiter: &str) -> DecodedInfo {
    decode_ini(raw, delimiter, tag_name)
}

/// Positional values mapped onto a fixed list of sub-key names.
///
/// `set your name;false;INHERE;n` with defines `desc, required, default, shorts`
/// yields one entry per define. Content past the last define stays in the last value.
/// A token shaped like `key=value` names its own sub-key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalDecoder {
    separator: String,
    defines: Vec<String>,
}

impl PositionalDecoder {
    pub fn new<S: Into<String>>(
        separator: impl Into<String>,
        defines: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            separator: separator.into(),
            defines: defines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn defines(&self) -> &[String] {
        &self.defines
    }

    fn named_override<'a>(&self, token: &'a str) -> Option<(&'a str, &'a str)> {
        let (key, value) = token.split_once('=')?;
        let key = key.trim();
        if key.is_empty()
            || key.contains(char::is_whitespace)
            || key.contains(self.separator.as_str())
        {
            return None;
        }
        Some((key, value.trim()))
    }
}

impl TagValueDecoder for PositionalDecoder {
    fn decode(&self, _tag_name: &str, raw: &str) -> Result<DecodedInfo, TagError> {
        let mut info = DecodedInfo::with_capacity(self.defines.len());
        if raw.trim().is_empty() || self.defines.is_empty() || self.separator.is_empty() {
            return Ok(info);
        }

        // explicitly named tokens win over positional ones, whatever their order
        let mut named: Vec<&str> = Vec::new();
        let tokens = raw.splitn(self.defines.len(), self.separator.as_str()).map(str::trim);
        for (define, token) in self.defines.iter().zip(tokens) {
            match self.named_override(token) {
                Some((key, value)) => {
                    named.push(key);
                    info.insert(key, value);
                }
                None if named.contains(&define.as_str()) => {}
                None => {
                    info.insert(define.as_str(), token);
                }
            }
        }
        Ok(info)
    }
}

pub fn positional_decoder<S: Into<String>>(
    separator: impl Into<String>,
    defines: impl IntoIterator<Item = S>,
) -> PositionalDecoder {
    PositionalDecoder::new(separator, defines)
}

/// Strict `KEY=VAL;KEY2=VAL2` items, optionally limited to a set of allowed keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedDecoder {
    allowed_keys: Vec<String>,
}

impl NamedDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow<S: Into<String>>(keys: impl IntoIterator<Item = S>) -> Self {
        Self {
            allowed_keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}

impl TagValueDecoder for NamedDecoder {
    fn decode(&self, tag_name: &str, raw: &str) -> Result<DecodedInfo, TagError> {
        parse_tag_value_named(tag_name, raw, &self.allowed_keys)
    }
}

/// Decodes `KEY=VAL` items split on `;`. Every non-empty item must contain `=`, and
/// when `allowed_keys` is non-empty every key must be one of them. `field` only labels errors.
pub fn parse_tag_value_named<S: AsRef<str>>(
    field: &str,
    raw: &str,
    allowed_keys: &[S],
) -> Result<DecodedInfo, TagError> {
    let mut info = DecodedInfo::new();
    for item in raw.split(';').map(str::trim).filter(|item| !item.is_empty()) {
        let Some((key, value)) = item.split_once('=') else {
            return Err(TagError::malformed_value(field, item));
        };
        let key = key.trim();
        if !allowed_keys.is_empty() && !allowed_keys.iter().any(|k| k.as_ref() == key) {
            return Err(TagError::unknown_key(field, key));
        }
        info.insert(key, value.trim());
    }
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn pairs(info: &DecodedInfo) -> Vec<(String, String)> {
        let mut out: Vec<_> = info.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        out.sort();
        out
    }

    #[test]
    fn ini_first_bare_token_is_the_name() {
        let info = IniDecoder::default().decode("json", "name,omitempty").unwrap();
        assert_eq!(info.len(), 2);
        assert_eq!(info.get("name"), Some("name"));
        assert_eq!(info.get("omitempty"), Some("true"));
    }

    #[test]
    fn ini_empty_leading_token_keeps_flags() {
        let info = IniDecoder::default().decode("json", ",omitempty").unwrap();
        assert_eq!(
            pairs(&info),
            vec![
                ("name".to_string(), String::new()),
                ("omitempty".to_string(), "true".to_string()),
            ]
        );

        let info = IniDecoder::default().decode("json", " , string ,").unwrap();
        assert_eq!(info.len(), 2);
        assert_eq!(info.str("name"), "");
        assert!(info.bool("string"));
        assert!(!info.has(""));
    }

    #[test]
    fn ini_key_value_items() {
        let info = IniDecoder::new(";").decode("default", "default=inhere").unwrap();
        assert_eq!(pairs(&info), vec![("default".to_string(), "inhere".to_string())]);

        let info = IniDecoder::new(";").decode("opt", " a = 1 ; flag ;b=x=y").unwrap();
        assert_eq!(info.get("a"), Some("1"));
        assert_eq!(info.get("flag"), Some("true"));
        assert_eq!(info.get("b"), Some("x=y"));
    }

    #[test]
    fn ini_primary_key_from_tag_name() {
        let decoder = IniDecoder::new(",").with_primary_key(PrimaryKey::TagName);
        let info = decoder.decode("json", "age,string").unwrap();
        assert_eq!(info.get("json"), Some("age"));
        assert_eq!(info.get("string"), Some("true"));

        let info = parse_tag_value_ini("yaml", "name,flow", ",");
        assert_eq!(info.get("yaml"), Some("name"));
        assert!(!info.has("name"));
        assert_eq!(
            info,
            IniDecoder::new(",")
                .with_primary_key(PrimaryKey::TagName)
                .decode("yaml", "name,flow")
                .unwrap()
        );
    }

    #[test]
    fn empty_values_decode_to_empty_maps() {
        assert!(IniDecoder::default().decode("json", "").unwrap().is_empty());
        assert!(IniDecoder::new(";").decode("json", "  ").unwrap().is_empty());
        assert!(positional_decoder(";", ["a", "b"]).decode("flag", "").unwrap().is_empty());
        assert!(NamedDecoder::new().decode("flag", "").unwrap().is_empty());
    }

    #[test]
    fn positional_defines() {
        let decoder = positional_decoder(";", ["desc", "required", "default", "shorts"]);
        let info = decoder.decode("flag", "set your name;false;INHERE;n").unwrap();
        assert_eq!(
            pairs(&info),
            vec![
                ("default".to_string(), "INHERE".to_string()),
                ("desc".to_string(), "set your name".to_string()),
                ("required".to_string(), "false".to_string()),
                ("shorts".to_string(), "n".to_string()),
            ]
        );
    }

    #[test]
    fn positional_surplus_and_shortfall() {
        let decoder = positional_decoder(";", ["desc", "required"]);
        let info = decoder.decode("flag", "name;true;extra;more").unwrap();
        assert_eq!(info.get("required"), Some("true;extra;more"));

        let decoder = positional_decoder(";", ["desc", "required", "default"]);
        let info = decoder.decode("flag", "only desc").unwrap();
        assert_eq!(info.len(), 1);
        assert_eq!(info.get("desc"), Some("only desc"));
    }

    #[test]
    fn positional_named_tokens_override() {
        let decoder = positional_decoder(";", ["desc", "required", "default"]);
        let info = decoder.decode("flag", "the name;default=guest;false").unwrap();
        assert_eq!(info.get("desc"), Some("the name"));
        assert_eq!(info.get("default"), Some("guest"));
        assert!(!info.has("required"));

        let info = decoder.decode("flag", "desc=named first;true;fallback").unwrap();
        assert_eq!(info.get("desc"), Some("named first"));
        assert_eq!(info.get("required"), Some("true"));
        assert_eq!(info.get("default"), Some("fallback"));

        let info = decoder.decode("flag", "set a name=x ok;true").unwrap();
        assert_eq!(info.get("desc"), Some("set a name=x ok"));
    }

    #[test]
    fn named_requires_key_value_items() {
        let err = parse_tag_value_named::<&str>("Name", "default=inhere;bare", &[]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedValue { item: "bare".into() });

        let err = NamedDecoder::allow(["default"])
            .decode("Name", "default=x;color=red")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownKey { key: "color".into() });

        let info = NamedDecoder::allow(["default", "required"])
            .decode("Name", "default= x ;required=1")
            .unwrap();
        assert_eq!(info.get("default"), Some("x"));
        assert!(info.bool("required"));
    }

    #[test]
    fn closures_are_decoders() {
        let upper = |_: &str, raw: &str| -> Result<DecodedInfo, TagError> {
            Ok([("value", raw.to_uppercase())].into_iter().collect())
        };
        assert_eq!(upper.decode("x", "abc").unwrap().get("value"), Some("ABC"));
    }
}
