// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The address-space service abstraction.
//!
//! [`AddressSpace`] is the seam between typed node handles and whatever
//! actually stores the entities. The in-process backend in
//! [`crate::memory`] implements it over a hash map; a remote client
//! implementing the same trait gets the entire handle API for free.
//!
//! All operations are synchronous and take `&self`; implementations are
//! expected to supply their own interior mutability and locking.

use serde::{Deserialize, Serialize};

use strata_model::{
    AttributeId, DataValue, LocalizedText, NodeClass, NodeId, QualifiedName, ValueRank,
};

use crate::error::{SpaceError, SpaceResult};

// =============================================================================
// AttributeValue
// =============================================================================

/// A non-Value attribute payload, tagged with its kind.
///
/// The generic attribute service moves these between handles and backends.
/// The Value attribute travels as a full [`DataValue`] through the
/// dedicated read/write operations instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum AttributeValue {
    /// Node class of the entity.
    NodeClass(NodeClass),
    /// Browse name, or a node id attribute payload's qualified name.
    QualifiedName(QualifiedName),
    /// Display name or description.
    LocalizedText(LocalizedText),
    /// Write mask or other 32-bit mask.
    UInt32(u32),
    /// Access level byte.
    Byte(u8),
    /// Node id payload, e.g. the declared data type.
    NodeId(NodeId),
    /// Value rank.
    ValueRank(ValueRank),
    /// Array dimensions list.
    ArrayDimensions(Vec<u32>),
    /// Full data value, carried when the generic path addresses the Value
    /// attribute directly.
    DataValue(DataValue),
}

impl AttributeValue {
    /// Returns the payload kind name for diagnostics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NodeClass(_) => "NodeClass",
            Self::QualifiedName(_) => "QualifiedName",
            Self::LocalizedText(_) => "LocalizedText",
            Self::UInt32(_) => "UInt32",
            Self::Byte(_) => "Byte",
            Self::NodeId(_) => "NodeId",
            Self::ValueRank(_) => "ValueRank",
            Self::ArrayDimensions(_) => "ArrayDimensions",
            Self::DataValue(_) => "DataValue",
        }
    }

    /// Extracts a node class payload.
    pub fn expect_node_class(self) -> SpaceResult<NodeClass> {
        match self {
            Self::NodeClass(v) => Ok(v),
            other => Err(SpaceError::type_mismatch("NodeClass", other.kind())),
        }
    }

    /// Extracts a qualified name payload.
    pub fn expect_qualified_name(self) -> SpaceResult<QualifiedName> {
        match self {
            Self::QualifiedName(v) => Ok(v),
            other => Err(SpaceError::type_mismatch("QualifiedName", other.kind())),
        }
    }

    /// Extracts a localized text payload.
    pub fn expect_localized_text(self) -> SpaceResult<LocalizedText> {
        match self {
            Self::LocalizedText(v) => Ok(v),
            other => Err(SpaceError::type_mismatch("LocalizedText", other.kind())),
        }
    }

    /// Extracts a 32-bit mask payload.
    pub fn expect_u32(self) -> SpaceResult<u32> {
        match self {
            Self::UInt32(v) => Ok(v),
            other => Err(SpaceError::type_mismatch("UInt32", other.kind())),
        }
    }

    /// Extracts an access level byte payload.
    pub fn expect_byte(self) -> SpaceResult<u8> {
        match self {
            Self::Byte(v) => Ok(v),
            other => Err(SpaceError::type_mismatch("Byte", other.kind())),
        }
    }

    /// Extracts a node id payload.
    pub fn expect_node_id(self) -> SpaceResult<NodeId> {
        match self {
            Self::NodeId(v) => Ok(v),
            other => Err(SpaceError::type_mismatch("NodeId", other.kind())),
        }
    }

    /// Extracts a value rank payload.
    pub fn expect_value_rank(self) -> SpaceResult<ValueRank> {
        match self {
            Self::ValueRank(v) => Ok(v),
            other => Err(SpaceError::type_mismatch("ValueRank", other.kind())),
        }
    }

    /// Extracts an array dimensions payload.
    pub fn expect_array_dimensions(self) -> SpaceResult<Vec<u32>> {
        match self {
            Self::ArrayDimensions(v) => Ok(v),
            other => Err(SpaceError::type_mismatch("ArrayDimensions", other.kind())),
        }
    }

    /// Extracts a full data value payload.
    pub fn expect_data_value(self) -> SpaceResult<DataValue> {
        match self {
            Self::DataValue(v) => Ok(v),
            other => Err(SpaceError::type_mismatch("DataValue", other.kind())),
        }
    }
}

// =============================================================================
// AddressSpace
// =============================================================================

/// A store of attribute-bearing entities addressed by [`NodeId`].
///
/// Implementations own validation of the attribute invariants: node-class
/// gating of value-class attributes and the rank/dimensions rule. Handles
/// in [`crate::node`] layer type reconciliation on top.
pub trait AddressSpace {
    /// Reads a non-Value attribute of the entity.
    ///
    /// Fails with [`SpaceError::NodeNotFound`] if the id does not resolve
    /// and [`SpaceError::InvalidNodeClass`] if the attribute is a
    /// value-class attribute the entity does not carry.
    fn get_attribute(&self, node_id: &NodeId, attribute: AttributeId)
        -> SpaceResult<AttributeValue>;

    /// Writes a non-Value attribute of the entity.
    ///
    /// The same resolution and node-class rules as
    /// [`AddressSpace::get_attribute`] apply. Writing `ValueRank` or
    /// `ArrayDimensions` additionally validates the rank/dimensions
    /// invariant against the other half of the pair.
    fn set_attribute(
        &self,
        node_id: &NodeId,
        attribute: AttributeId,
        value: AttributeValue,
    ) -> SpaceResult<()>;

    /// Reads the Value attribute as a full data value.
    ///
    /// Implementations stamp the server timestamp at read time.
    fn read_value(&self, node_id: &NodeId) -> SpaceResult<DataValue>;

    /// Writes the Value attribute.
    ///
    /// Only the components whose presence flags are set in `value` are
    /// replaced; absent components keep their stored state.
    fn write_value(&self, node_id: &NodeId, value: DataValue) -> SpaceResult<()>;

    /// Resolves one hierarchical child of `parent` by browse name.
    fn browse_child(&self, parent: &NodeId, name: &QualifiedName) -> SpaceResult<NodeId>;

    /// Deletes the entity and, recursively, its hierarchical children.
    fn delete_node(&self, node_id: &NodeId) -> SpaceResult<()>;

    /// Returns `true` if the id resolves to a live entity.
    fn exists(&self, node_id: &NodeId) -> bool {
        self.get_attribute(node_id, AttributeId::NodeClass).is_ok()
    }
}
