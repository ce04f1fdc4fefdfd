// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The self-describing runtime value.
//!
//! A [`Variant`] is a tagged union over the built-in scalar kinds plus
//! homogeneous arrays of them. Every instance carries its own type tag,
//! independent of whatever data type the owning entity declares; the typed
//! value codec in the space layer reconciles the two.
//!
//! The bridge between host types and variants is the [`VariantScalar`]
//! trait: each supported host type maps to exactly one [`BuiltinType`] tag
//! and knows how to wrap itself into, and extract itself from, a variant.
//! New host types are supported by adding an implementation of this trait,
//! not by branching in the codec.
//!
//! ```
//! use strata_model::Variant;
//!
//! let v = Variant::from_scalar(11.11f32);
//! assert_eq!(v.to_scalar::<f32>().unwrap(), 11.11);
//! assert!(v.to_scalar::<bool>().is_err());
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ModelError, ModelResult};
use crate::names::{LocalizedText, QualifiedName};
use crate::nodeid::NodeId;
use crate::status::StatusCode;

// =============================================================================
// BuiltinType
// =============================================================================

/// Type tag of a built-in scalar kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinType {
    /// Boolean value.
    Boolean,
    /// Signed 8-bit integer.
    SByte,
    /// Unsigned 8-bit integer.
    Byte,
    /// Signed 16-bit integer.
    Int16,
    /// Unsigned 16-bit integer.
    UInt16,
    /// Signed 32-bit integer.
    Int32,
    /// Unsigned 32-bit integer.
    UInt32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 64-bit integer.
    UInt64,
    /// 32-bit IEEE 754 float.
    Float,
    /// 64-bit IEEE 754 double.
    Double,
    /// UTF-8 string.
    String,
    /// Date and time.
    DateTime,
    /// Globally unique identifier.
    Guid,
    /// Raw byte string.
    ByteString,
    /// Node identifier.
    NodeId,
    /// Status code.
    StatusCode,
    /// Namespace-qualified name.
    QualifiedName,
    /// Localized text.
    LocalizedText,
}

impl BuiltinType {
    /// Returns the protocol type id in the standard namespace.
    pub const fn type_id(&self) -> u32 {
        match self {
            Self::Boolean => 1,
            Self::SByte => 2,
            Self::Byte => 3,
            Self::Int16 => 4,
            Self::UInt16 => 5,
            Self::Int32 => 6,
            Self::UInt32 => 7,
            Self::Int64 => 8,
            Self::UInt64 => 9,
            Self::Float => 10,
            Self::Double => 11,
            Self::String => 12,
            Self::DateTime => 13,
            Self::Guid => 14,
            Self::ByteString => 15,
            Self::NodeId => 17,
            Self::StatusCode => 19,
            Self::QualifiedName => 20,
            Self::LocalizedText => 21,
        }
    }

    /// Returns the node id of the corresponding data-type entity.
    pub const fn data_type_id(&self) -> NodeId {
        NodeId::numeric(0, self.type_id())
    }

    /// Creates from the protocol type id.
    pub fn from_type_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(Self::Boolean),
            2 => Some(Self::SByte),
            3 => Some(Self::Byte),
            4 => Some(Self::Int16),
            5 => Some(Self::UInt16),
            6 => Some(Self::Int32),
            7 => Some(Self::UInt32),
            8 => Some(Self::Int64),
            9 => Some(Self::UInt64),
            10 => Some(Self::Float),
            11 => Some(Self::Double),
            12 => Some(Self::String),
            13 => Some(Self::DateTime),
            14 => Some(Self::Guid),
            15 => Some(Self::ByteString),
            17 => Some(Self::NodeId),
            19 => Some(Self::StatusCode),
            20 => Some(Self::QualifiedName),
            21 => Some(Self::LocalizedText),
            _ => None,
        }
    }

    /// Returns the display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::SByte => "SByte",
            Self::Byte => "Byte",
            Self::Int16 => "Int16",
            Self::UInt16 => "UInt16",
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
            Self::Int64 => "Int64",
            Self::UInt64 => "UInt64",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::String => "String",
            Self::DateTime => "DateTime",
            Self::Guid => "Guid",
            Self::ByteString => "ByteString",
            Self::NodeId => "NodeId",
            Self::StatusCode => "StatusCode",
            Self::QualifiedName => "QualifiedName",
            Self::LocalizedText => "LocalizedText",
        }
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =============================================================================
// Variant
// =============================================================================

/// A self-describing runtime value: one scalar of a built-in kind, or a
/// homogeneous array of one kind.
///
/// Arrays keep their element tag even when empty, so an empty array still
/// knows what it is an array *of*.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Variant {
    /// Boolean scalar.
    Boolean(bool),
    /// Signed 8-bit scalar.
    SByte(i8),
    /// Unsigned 8-bit scalar.
    Byte(u8),
    /// Signed 16-bit scalar.
    Int16(i16),
    /// Unsigned 16-bit scalar.
    UInt16(u16),
    /// Signed 32-bit scalar.
    Int32(i32),
    /// Unsigned 32-bit scalar.
    UInt32(u32),
    /// Signed 64-bit scalar.
    Int64(i64),
    /// Unsigned 64-bit scalar.
    UInt64(u64),
    /// 32-bit float scalar.
    Float(f32),
    /// 64-bit float scalar.
    Double(f64),
    /// String scalar.
    String(String),
    /// Timestamp scalar.
    DateTime(DateTime<Utc>),
    /// GUID scalar.
    Guid(Uuid),
    /// Byte string scalar.
    ByteString(Vec<u8>),
    /// Node id scalar.
    NodeId(NodeId),
    /// Status code scalar.
    StatusCode(StatusCode),
    /// Qualified name scalar.
    QualifiedName(QualifiedName),
    /// Localized text scalar.
    LocalizedText(LocalizedText),
    /// Homogeneous array of one built-in kind.
    Array {
        /// Element type tag, retained even for empty arrays.
        element: BuiltinType,
        /// The elements; every item carries the `element` tag.
        items: Vec<Variant>,
    },
}

impl Variant {
    /// Wraps a host scalar into a variant.
    pub fn from_scalar<T: VariantScalar>(value: T) -> Self {
        value.into_variant()
    }

    /// Builds an array variant from host values.
    ///
    /// The element tag is taken from the host type, so an empty source
    /// yields a correctly tagged empty array.
    pub fn from_array<T, I>(values: I) -> Self
    where
        T: VariantScalar,
        I: IntoIterator<Item = T>,
    {
        Self::Array {
            element: T::TYPE,
            items: values.into_iter().map(VariantScalar::into_variant).collect(),
        }
    }

    /// Extracts a host scalar, failing if the tag does not correspond to
    /// the host type.
    pub fn to_scalar<T: VariantScalar>(&self) -> ModelResult<T> {
        T::from_variant(self)
            .ok_or_else(|| ModelError::type_mismatch(T::TYPE.name(), self.type_name()))
    }

    /// Extracts a homogeneous array into host values, failing if this is
    /// not an array of the host type's tag.
    pub fn to_array<T: VariantScalar>(&self) -> ModelResult<Vec<T>> {
        let expected = format!("{}[]", T::TYPE.name());
        match self {
            Self::Array { element, items } if *element == T::TYPE => items
                .iter()
                .map(|item| {
                    T::from_variant(item)
                        .ok_or_else(|| ModelError::type_mismatch(&expected, item.type_name()))
                })
                .collect(),
            _ => Err(ModelError::type_mismatch(expected, self.type_name())),
        }
    }

    /// Returns the scalar type tag, or `None` for arrays.
    pub const fn scalar_type(&self) -> Option<BuiltinType> {
        match self {
            Self::Array { .. } => None,
            _ => Some(self.builtin_type()),
        }
    }

    /// Returns the element tag if this is an array.
    pub const fn array_element(&self) -> Option<BuiltinType> {
        match self {
            Self::Array { element, .. } => Some(*element),
            _ => None,
        }
    }

    /// Returns the tag governing type reconciliation: the scalar tag, or
    /// the element tag for arrays.
    pub const fn builtin_type(&self) -> BuiltinType {
        match self {
            Self::Boolean(_) => BuiltinType::Boolean,
            Self::SByte(_) => BuiltinType::SByte,
            Self::Byte(_) => BuiltinType::Byte,
            Self::Int16(_) => BuiltinType::Int16,
            Self::UInt16(_) => BuiltinType::UInt16,
            Self::Int32(_) => BuiltinType::Int32,
            Self::UInt32(_) => BuiltinType::UInt32,
            Self::Int64(_) => BuiltinType::Int64,
            Self::UInt64(_) => BuiltinType::UInt64,
            Self::Float(_) => BuiltinType::Float,
            Self::Double(_) => BuiltinType::Double,
            Self::String(_) => BuiltinType::String,
            Self::DateTime(_) => BuiltinType::DateTime,
            Self::Guid(_) => BuiltinType::Guid,
            Self::ByteString(_) => BuiltinType::ByteString,
            Self::NodeId(_) => BuiltinType::NodeId,
            Self::StatusCode(_) => BuiltinType::StatusCode,
            Self::QualifiedName(_) => BuiltinType::QualifiedName,
            Self::LocalizedText(_) => BuiltinType::LocalizedText,
            Self::Array { element, .. } => *element,
        }
    }

    /// Returns `true` if this is an array.
    #[inline]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array { .. })
    }

    /// Returns the array length, or `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Array { items, .. } => Some(items.len()),
            _ => None,
        }
    }

    /// Returns `true` if this is an array with no elements.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Array { items, .. } if items.is_empty())
    }

    /// Returns a human-readable type name, e.g. `Float` or `Double[]`.
    pub fn type_name(&self) -> String {
        match self {
            Self::Array { element, .. } => format!("{}[]", element.name()),
            _ => self.builtin_type().name().to_string(),
        }
    }
}

// =============================================================================
// VariantScalar
// =============================================================================

/// Maps one host type to one built-in type tag, both ways.
///
/// `from_variant` must return `None` for any variant whose tag is not
/// [`Self::TYPE`]; no implicit numeric widening or narrowing happens at
/// this layer.
pub trait VariantScalar: Sized {
    /// The built-in tag this host type corresponds to.
    const TYPE: BuiltinType;

    /// Wraps the host value into a variant carrying [`Self::TYPE`].
    fn into_variant(self) -> Variant;

    /// Extracts the host value if the variant carries [`Self::TYPE`].
    fn from_variant(variant: &Variant) -> Option<Self>;
}

macro_rules! impl_variant_scalar {
    ($($host:ty => $variant:ident),+ $(,)?) => {
        $(
            impl VariantScalar for $host {
                const TYPE: BuiltinType = BuiltinType::$variant;

                fn into_variant(self) -> Variant {
                    Variant::$variant(self)
                }

                fn from_variant(variant: &Variant) -> Option<Self> {
                    match variant {
                        Variant::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }
            }
        )+
    };
}

impl_variant_scalar! {
    bool => Boolean,
    i8 => SByte,
    u8 => Byte,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Float,
    f64 => Double,
    String => String,
    DateTime<Utc> => DateTime,
    Uuid => Guid,
    NodeId => NodeId,
    StatusCode => StatusCode,
    QualifiedName => QualifiedName,
    LocalizedText => LocalizedText,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_mapping_both_ways() {
        assert_eq!(Variant::from_scalar(true).to_scalar::<bool>().unwrap(), true);
        assert_eq!(Variant::from_scalar(42i32).to_scalar::<i32>().unwrap(), 42);
        assert_eq!(
            Variant::from_scalar("test".to_string())
                .to_scalar::<String>()
                .unwrap(),
            "test"
        );
        assert_eq!(
            Variant::from_scalar(11.11f32).to_scalar::<f32>().unwrap(),
            11.11
        );
    }

    #[test]
    fn scalar_extraction_rejects_wrong_tag() {
        let v = Variant::from_scalar(11.11f32);
        let err = v.to_scalar::<bool>().unwrap_err();
        assert_eq!(
            err,
            ModelError::type_mismatch("Boolean", "Float"),
        );
        assert!(v.to_scalar::<i32>().is_err());
        assert!(v.to_scalar::<f64>().is_err());
    }

    #[test]
    fn array_mapping_both_ways() {
        let source = vec![11.11f64, 22.22, 33.33];
        let v = Variant::from_array(source.clone());
        assert!(v.is_array());
        assert_eq!(v.len(), Some(3));
        assert_eq!(v.builtin_type(), BuiltinType::Double);
        assert_eq!(v.to_array::<f64>().unwrap(), source);
    }

    #[test]
    fn empty_array_keeps_element_tag() {
        let v = Variant::from_array(Vec::<u16>::new());
        assert_eq!(v.array_element(), Some(BuiltinType::UInt16));
        assert!(v.is_empty());
        assert_eq!(v.to_array::<u16>().unwrap(), Vec::<u16>::new());
        assert!(v.to_array::<i32>().is_err());
    }

    #[test]
    fn array_extraction_rejects_scalar_and_wrong_element() {
        let scalar = Variant::from_scalar(1i32);
        assert!(scalar.to_array::<i32>().is_err());

        let floats = Variant::from_array(vec![1.0f32]);
        assert!(floats.to_array::<f64>().is_err());
    }

    #[test]
    fn type_names_for_diagnostics() {
        assert_eq!(Variant::from_scalar(1.0f32).type_name(), "Float");
        assert_eq!(Variant::from_array(vec![1.0f64]).type_name(), "Double[]");
    }

    #[test]
    fn reconciliation_tag_agrees_with_shape_accessors() {
        let scalars = [
            Variant::from_scalar(true),
            Variant::from_scalar(1i8),
            Variant::from_scalar(1u8),
            Variant::from_scalar(1i16),
            Variant::from_scalar(1u16),
            Variant::from_scalar(1i32),
            Variant::from_scalar(1u32),
            Variant::from_scalar(1i64),
            Variant::from_scalar(1u64),
            Variant::from_scalar(1.0f32),
            Variant::from_scalar(1.0f64),
            Variant::from_scalar("s".to_string()),
            Variant::from_scalar(chrono::Utc::now()),
            Variant::from_scalar(Uuid::nil()),
            Variant::ByteString(vec![1, 2]),
            Variant::from_scalar(NodeId::numeric(0, 85)),
            Variant::from_scalar(StatusCode::GOOD),
            Variant::from_scalar(QualifiedName::standard("n")),
            Variant::from_scalar(LocalizedText::plain("t")),
        ];
        for v in scalars {
            assert_eq!(v.scalar_type(), Some(v.builtin_type()), "{}", v.type_name());
            assert_eq!(v.array_element(), None);
        }

        let array = Variant::from_array(vec![1u16, 2]);
        assert_eq!(array.scalar_type(), None);
        assert_eq!(array.array_element(), Some(BuiltinType::UInt16));
        assert_eq!(array.builtin_type(), BuiltinType::UInt16);
    }

    #[test]
    fn builtin_type_ids_round_trip() {
        for tag in [
            BuiltinType::Boolean,
            BuiltinType::SByte,
            BuiltinType::Byte,
            BuiltinType::Int16,
            BuiltinType::UInt16,
            BuiltinType::Int32,
            BuiltinType::UInt32,
            BuiltinType::Int64,
            BuiltinType::UInt64,
            BuiltinType::Float,
            BuiltinType::Double,
            BuiltinType::String,
            BuiltinType::DateTime,
            BuiltinType::Guid,
            BuiltinType::ByteString,
            BuiltinType::NodeId,
            BuiltinType::StatusCode,
            BuiltinType::QualifiedName,
            BuiltinType::LocalizedText,
        ] {
            assert_eq!(BuiltinType::from_type_id(tag.type_id()), Some(tag));
        }
        assert!(BuiltinType::from_type_id(0).is_none());
        assert!(BuiltinType::from_type_id(99).is_none());
    }

    #[test]
    fn serde_round_trip() {
        let v = Variant::from_array(vec![1i32, 2, 3]);
        let json = serde_json::to_string(&v).unwrap();
        let back: Variant = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
