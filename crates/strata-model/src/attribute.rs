// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Attribute metadata: node classes, attribute ids, value ranks and the
//! rank/array-dimensions invariant.
//!
//! The invariant enforced by [`validate_rank_dimensions`] couples two
//! attributes of one entity:
//!
//! - an unconstrained rank (`Any`, `Scalar`, `ScalarOrOneDimension`,
//!   `OneOrMoreDimensions`) admits no array dimensions at all;
//! - a fixed rank of N dimensions requires exactly N entries.
//!
//! An *empty* dimensions list is additionally compatible with every rank
//! when the rank itself is being assigned: a variable may declare
//! `TwoDimensions` before its dimensions are known. Assigning the
//! dimensions afterwards then requires the exact count. The two setters in
//! the space layer call the validator accordingly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

// =============================================================================
// NodeClass
// =============================================================================

/// Classification of an address-space entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeClass {
    /// Object node.
    Object,
    /// Variable node.
    Variable,
    /// Method node.
    Method,
    /// Object type node.
    ObjectType,
    /// Variable type node.
    VariableType,
    /// Reference type node.
    ReferenceType,
    /// Data type node.
    DataType,
    /// View node.
    View,
}

impl NodeClass {
    /// Returns the protocol bit-mask value.
    pub const fn value(&self) -> u32 {
        match self {
            Self::Object => 1,
            Self::Variable => 2,
            Self::Method => 4,
            Self::ObjectType => 8,
            Self::VariableType => 16,
            Self::ReferenceType => 32,
            Self::DataType => 64,
            Self::View => 128,
        }
    }

    /// Creates from the protocol bit-mask value.
    pub fn from_value(value: u32) -> Option<Self> {
        match value {
            1 => Some(Self::Object),
            2 => Some(Self::Variable),
            4 => Some(Self::Method),
            8 => Some(Self::ObjectType),
            16 => Some(Self::VariableType),
            32 => Some(Self::ReferenceType),
            64 => Some(Self::DataType),
            128 => Some(Self::View),
            _ => None,
        }
    }

    /// Returns `true` if entities of this class carry a runtime value and
    /// the value-typing attributes (data type, value rank, dimensions).
    #[inline]
    pub const fn has_value(&self) -> bool {
        matches!(self, Self::Variable | Self::VariableType)
    }
}

impl fmt::Display for NodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Object => "Object",
            Self::Variable => "Variable",
            Self::Method => "Method",
            Self::ObjectType => "ObjectType",
            Self::VariableType => "VariableType",
            Self::ReferenceType => "ReferenceType",
            Self::DataType => "DataType",
            Self::View => "View",
        };
        write!(f, "{name}")
    }
}

// =============================================================================
// AttributeId
// =============================================================================

/// Identifies one attribute of an entity in service requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeId {
    /// The entity's identifier.
    NodeId,
    /// The entity's classification.
    NodeClass,
    /// Namespace-qualified browse name.
    BrowseName,
    /// Localized display name.
    DisplayName,
    /// Localized description.
    Description,
    /// Bitmask of externally writable attributes.
    WriteMask,
    /// The runtime value (variables only).
    Value,
    /// Declared data type (variables only).
    DataType,
    /// Declared value rank (variables only).
    ValueRank,
    /// Declared array dimensions (variables only).
    ArrayDimensions,
    /// Access level bitmask (variables only).
    AccessLevel,
}

impl AttributeId {
    /// Returns the protocol attribute id.
    pub const fn id(&self) -> u32 {
        match self {
            Self::NodeId => 1,
            Self::NodeClass => 2,
            Self::BrowseName => 3,
            Self::DisplayName => 4,
            Self::Description => 5,
            Self::WriteMask => 6,
            Self::Value => 13,
            Self::DataType => 14,
            Self::ValueRank => 15,
            Self::ArrayDimensions => 16,
            Self::AccessLevel => 17,
        }
    }

    /// Returns `true` if this attribute only exists on value-bearing node
    /// classes (Variable, VariableType).
    #[inline]
    pub const fn requires_value_class(&self) -> bool {
        matches!(
            self,
            Self::Value | Self::DataType | Self::ValueRank | Self::ArrayDimensions | Self::AccessLevel
        )
    }
}

// =============================================================================
// ValueRank
// =============================================================================

/// Declared dimensionality constraint for a variable's value.
///
/// The numeric encodings follow the protocol: negative and zero values are
/// the unconstrained variants, positive values fix the dimension count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueRank {
    /// Scalar or array with one dimension (-3).
    ScalarOrOneDimension,
    /// Scalar or array of any dimensionality (-2).
    Any,
    /// Scalar only (-1).
    Scalar,
    /// Array with one or more dimensions (0).
    OneOrMoreDimensions,
    /// Array with exactly one dimension (1).
    OneDimension,
    /// Array with exactly two dimensions (2).
    TwoDimensions,
    /// Array with exactly three dimensions (3).
    ThreeDimensions,
}

impl ValueRank {
    /// Returns the protocol encoding.
    pub const fn value(&self) -> i32 {
        match self {
            Self::ScalarOrOneDimension => -3,
            Self::Any => -2,
            Self::Scalar => -1,
            Self::OneOrMoreDimensions => 0,
            Self::OneDimension => 1,
            Self::TwoDimensions => 2,
            Self::ThreeDimensions => 3,
        }
    }

    /// Creates from the protocol encoding.
    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            -3 => Some(Self::ScalarOrOneDimension),
            -2 => Some(Self::Any),
            -1 => Some(Self::Scalar),
            0 => Some(Self::OneOrMoreDimensions),
            1 => Some(Self::OneDimension),
            2 => Some(Self::TwoDimensions),
            3 => Some(Self::ThreeDimensions),
            _ => None,
        }
    }

    /// Returns the fixed dimension count, or `None` for the unconstrained
    /// variants.
    pub const fn fixed_dimensions(&self) -> Option<usize> {
        match self {
            Self::OneDimension => Some(1),
            Self::TwoDimensions => Some(2),
            Self::ThreeDimensions => Some(3),
            _ => None,
        }
    }

    /// Returns `true` if this rank admits a zero-length array value.
    ///
    /// Unconstrained ranks always do; fixed ranks only through an
    /// unbounded (0) dimension entry, which is checked separately.
    #[inline]
    pub const fn is_unconstrained(&self) -> bool {
        self.fixed_dimensions().is_none()
    }
}

impl Default for ValueRank {
    fn default() -> Self {
        Self::Any
    }
}

impl fmt::Display for ValueRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ScalarOrOneDimension => "ScalarOrOneDimension",
            Self::Any => "Any",
            Self::Scalar => "Scalar",
            Self::OneOrMoreDimensions => "OneOrMoreDimensions",
            Self::OneDimension => "OneDimension",
            Self::TwoDimensions => "TwoDimensions",
            Self::ThreeDimensions => "ThreeDimensions",
        };
        write!(f, "{name}")
    }
}

// =============================================================================
// Rank/dimensions invariant
// =============================================================================

/// Checks that an array-dimensions list is valid for a value rank.
///
/// Unconstrained ranks require an empty list; a fixed rank of N dimensions
/// requires exactly N entries (each entry 0 meaning unbounded in that
/// dimension). Callers assigning the *rank* while the stored dimensions
/// are still empty skip this check, see the module docs.
pub fn validate_rank_dimensions(rank: ValueRank, dimensions: &[u32]) -> ModelResult<()> {
    let valid = match rank.fixed_dimensions() {
        None => dimensions.is_empty(),
        Some(n) => dimensions.len() == n,
    };
    if valid {
        Ok(())
    } else {
        Err(ModelError::invalid_rank_dimensions(rank, dimensions))
    }
}

// =============================================================================
// Access level and write mask bits
// =============================================================================

/// Access level bitmask values for the AccessLevel attribute.
pub mod access_level {
    /// Value is readable.
    pub const CURRENT_READ: u8 = 0x01;
    /// Value is writable.
    pub const CURRENT_WRITE: u8 = 0x02;
    /// History of the value is readable.
    pub const HISTORY_READ: u8 = 0x04;
    /// History of the value is writable.
    pub const HISTORY_WRITE: u8 = 0x08;
}

/// Write mask bits naming the attributes an external client may mutate.
pub mod write_mask {
    /// AccessLevel attribute is writable.
    pub const ACCESS_LEVEL: u32 = 1 << 0;
    /// ArrayDimensions attribute is writable.
    pub const ARRAY_DIMENSIONS: u32 = 1 << 1;
    /// BrowseName attribute is writable.
    pub const BROWSE_NAME: u32 = 1 << 2;
    /// DataType attribute is writable.
    pub const DATA_TYPE: u32 = 1 << 4;
    /// Description attribute is writable.
    pub const DESCRIPTION: u32 = 1 << 5;
    /// DisplayName attribute is writable.
    pub const DISPLAY_NAME: u32 = 1 << 6;
    /// ValueRank attribute is writable.
    pub const VALUE_RANK: u32 = 1 << 19;
    /// WriteMask attribute is writable.
    pub const WRITE_MASK: u32 = 1 << 20;
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNCONSTRAINED: [ValueRank; 4] = [
        ValueRank::Any,
        ValueRank::Scalar,
        ValueRank::ScalarOrOneDimension,
        ValueRank::OneOrMoreDimensions,
    ];

    #[test]
    fn unconstrained_ranks_admit_only_empty_dimensions() {
        for rank in UNCONSTRAINED {
            assert!(validate_rank_dimensions(rank, &[]).is_ok(), "{rank}");
            assert!(validate_rank_dimensions(rank, &[1]).is_err(), "{rank}");
            assert!(validate_rank_dimensions(rank, &[1, 2]).is_err(), "{rank}");
            assert!(validate_rank_dimensions(rank, &[1, 2, 3]).is_err(), "{rank}");
        }
    }

    #[test]
    fn fixed_ranks_require_exact_count() {
        let cases = [
            (ValueRank::OneDimension, 1),
            (ValueRank::TwoDimensions, 2),
            (ValueRank::ThreeDimensions, 3),
        ];
        for (rank, n) in cases {
            for len in 0..=4usize {
                let dims = vec![1u32; len];
                let result = validate_rank_dimensions(rank, &dims);
                assert_eq!(result.is_ok(), len == n, "{rank} with {len} dims");
            }
        }
    }

    #[test]
    fn zero_entries_mean_unbounded_but_still_count() {
        assert!(validate_rank_dimensions(ValueRank::TwoDimensions, &[0, 0]).is_ok());
        assert!(validate_rank_dimensions(ValueRank::TwoDimensions, &[0]).is_err());
    }

    #[test]
    fn rank_encodings_round_trip() {
        for value in -3..=3 {
            let rank = ValueRank::from_value(value).unwrap();
            assert_eq!(rank.value(), value);
        }
        assert!(ValueRank::from_value(4).is_none());
        assert!(ValueRank::from_value(-4).is_none());
    }

    #[test]
    fn node_class_mask_round_trip() {
        for class in [
            NodeClass::Object,
            NodeClass::Variable,
            NodeClass::Method,
            NodeClass::ObjectType,
            NodeClass::VariableType,
            NodeClass::ReferenceType,
            NodeClass::DataType,
            NodeClass::View,
        ] {
            assert_eq!(NodeClass::from_value(class.value()), Some(class));
        }
        assert!(NodeClass::from_value(3).is_none());
    }

    #[test]
    fn value_bearing_classes() {
        assert!(NodeClass::Variable.has_value());
        assert!(NodeClass::VariableType.has_value());
        assert!(!NodeClass::Object.has_value());
        assert!(!NodeClass::Method.has_value());
    }
}
