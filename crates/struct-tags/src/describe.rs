//! Field descriptors: the shape information the walker reads instead of runtime reflection.
//!
//! Structs usually get their [`Describe`] impl from `#[derive(Tagged)]`; the builder
//! methods here cover hand-written descriptors.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Kind of a non-struct, non-pointer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeKind {
    Bool,
    Int,
    Uint,
    Float,
    Char,
    String,
    Slice,
    Map,
    Enum,
    Tuple,
    Unit,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeKind::Bool => "bool",
            TypeKind::Int => "int",
            TypeKind::Uint => "uint",
            TypeKind::Float => "float",
            TypeKind::Char => "char",
            TypeKind::String => "string",
            TypeKind::Slice => "slice",
            TypeKind::Map => "map",
            TypeKind::Enum => "enum",
            TypeKind::Tuple => "tuple",
            TypeKind::Unit => "unit",
        };
        f.write_str(name)
    }
}

/// One declared field of a struct.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDescriptor {
    pub name: Cow<'static, str>,
    /// Whether the field is visible outside its defining module (`pub`).
    pub exported: bool,
    /// Raw metadata in `key:"value" key2:"value2"` form.
    pub tag: Cow<'static, str>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<Cow<'static, str>>, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            exported: true,
            tag: tag.into(),
        }
    }

    pub fn private(name: impl Into<Cow<'static, str>>, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            exported: false,
            ..Self::new(name, tag)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructDescriptor {
    pub name: Cow<'static, str>,
    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

impl StructDescriptor {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeDescriptor {
    Struct(StructDescriptor),
    /// A pointer-like wrapper. `None` is a nil pointer.
    Pointer(Option<Box<TypeDescriptor>>),
    Other(TypeKind),
}

impl TypeDescriptor {
    pub fn pointer_to(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Pointer(Some(Box::new(inner)))
    }

    pub fn nil() -> Self {
        TypeDescriptor::Pointer(None)
    }

    /// Short human-readable name used in error messages.
    pub fn display_name(&self) -> String {
        match self {
            TypeDescriptor::Struct(s) => s.name.to_string(),
            TypeDescriptor::Pointer(Some(inner)) => format!("*{}", inner.display_name()),
            TypeDescriptor::Pointer(None) => "nil pointer".to_string(),
            TypeDescriptor::Other(kind) => kind.to_string(),
        }
    }
}

impl From<StructDescriptor> for TypeDescriptor {
    fn from(value: StructDescriptor) -> Self {
        TypeDescriptor::Struct(value)
    }
}

/// Provides the shape of a type, and of a particular value of it.
pub trait Describe {
    fn type_descriptor() -> TypeDescriptor
    where
        Self: Sized;

    /// Value-level descriptor. Differs from [`Describe::type_descriptor`] only for
    /// wrappers that can be empty, such as `Option`.
    fn describe(&self) -> TypeDescriptor;
}

macro_rules! impl_describe_kind {
    ($kind:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl Describe for $ty {
                fn type_descriptor() -> TypeDescriptor {
                    TypeDescriptor::Other($kind)
                }

                fn describe(&self) -> TypeDescriptor {
                    TypeDescriptor::Other($kind)
                }
            }
        )+
    };
}

impl_describe_kind!(TypeKind::Bool => bool);
impl_describe_kind!(TypeKind::Int => i8, i16, i32, i64, i128, isize);
impl_describe_kind!(TypeKind::Uint => u8, u16, u32, u64, u128, usize);
impl_describe_kind!(TypeKind::Float => f32, f64);
impl_describe_kind!(TypeKind::Char => char);
impl_describe_kind!(TypeKind::String => String, Cow<'static, str>);
impl_describe_kind!(TypeKind::Unit => ());

impl<T> Describe for Vec<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::Other(TypeKind::Slice)
    }

    fn describe(&self) -> TypeDescriptor {
        TypeDescriptor::Other(TypeKind::Slice)
    }
}

impl<T, const N: usize> Describe for [T; N] {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::Other(TypeKind::Slice)
    }

    fn describe(&self) -> TypeDescriptor {
        TypeDescriptor::Other(TypeKind::Slice)
    }
}

impl<K, V, S> Describe for HashMap<K, V, S> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::Other(TypeKind::Map)
    }

    fn describe(&self) -> TypeDescriptor {
        TypeDescriptor::Other(TypeKind::Map)
    }
}

impl<K, V> Describe for BTreeMap<K, V> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::Other(TypeKind::Map)
    }

    fn describe(&self) -> TypeDescriptor {
        TypeDescriptor::Other(TypeKind::Map)
    }
}

impl<A, B> Describe for (A, B) {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::Other(TypeKind::Tuple)
    }

    fn describe(&self) -> TypeDescriptor {
        TypeDescriptor::Other(TypeKind::Tuple)
    }
}

impl<T: Describe> Describe for Option<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::pointer_to(T::type_descriptor())
    }

    fn describe(&self) -> TypeDescriptor {
        match self {
            Some(inner) => TypeDescriptor::pointer_to(inner.describe()),
            None => TypeDescriptor::nil(),
        }
    }
}

macro_rules! impl_describe_pointer {
    ($($ptr:ident),+) => {
        $(
            impl<T: Describe> Describe for $ptr<T> {
                fn type_descriptor() -> TypeDescriptor {
                    TypeDescriptor::pointer_to(T::type_descriptor())
                }

                fn describe(&self) -> TypeDescriptor {
                    TypeDescriptor::pointer_to((**self).describe())
                }
            }
        )+
    };
}

impl_describe_pointer!(Box, Rc, Arc);

impl<T: Describe> Describe for &T {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::pointer_to(T::type_descriptor())
    }

    fn describe(&self) -> TypeDescriptor {
        TypeDescriptor::pointer_to((**self).describe())
    }
}
