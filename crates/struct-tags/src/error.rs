use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagError {
    pub type_name: Option<String>,
    pub field_name: Option<String>,
    pub kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The value handed to the walker does not describe a struct.
    InvalidInput { found: String },
    /// A pointer-like wrapper held nothing.
    NilPointer,
    /// A tag value item did not have the shape the decoder requires.
    MalformedValue { item: String },
    UnknownKey { key: String },
    Custom(String),
}

impl ErrorKind {
    /// Both non-struct input and nil pointers are reported to callers as invalid input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ErrorKind::InvalidInput { .. } | ErrorKind::NilPointer)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidInput { found } => {
                write!(
                    f,
                    "invalid input: expected a struct or a pointer to a struct, found {found}"
                )
            }
            ErrorKind::NilPointer => write!(f, "invalid input: pointer to struct is nil"),
            ErrorKind::MalformedValue { item } => {
                write!(f, "item '{item}' must match `KEY=VAL`")
            }
            ErrorKind::UnknownKey { key } => write!(f, "invalid key name '{key}'"),
            ErrorKind::Custom(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for TagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tag error")?;

        if let Some(ref ty) = self.type_name {
            write!(f, " in {ty}")?;
        }

        if let Some(ref field) = self.field_name {
            write!(f, " on field '{field}'")?;
        }

        write!(f, ": {}", self.kind)
    }
}

impl std::error::Error for TagError {}

impl TagError {
    pub fn invalid_input(found: impl Into<String>) -> Self {
        Self {
            type_name: None,
            field_name: None,
            kind: ErrorKind::InvalidInput { found: found.into() },
        }
    }

    pub fn nil_pointer() -> Self {
        Self {
            type_name: None,
            field_name: None,
            kind: ErrorKind::NilPointer,
        }
    }

    pub fn malformed_value(field_name: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            type_name: None,
            field_name: Some(field_name.into()),
            kind: ErrorKind::MalformedValue { item: item.into() },
        }
    }

    pub fn unknown_key(field_name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            type_name: None,
            field_name: Some(field_name.into()),
            kind: ErrorKind::UnknownKey { key: key.into() },
        }
    }

    pub fn custom(message: impl Into<String>) -> Self {
        Self {
            type_name: None,
            field_name: None,
            kind: ErrorKind::Custom(message.into()),
        }
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn is_invalid_input(&self) -> bool {
        self.kind.is_invalid_input()
    }
}
