// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Typed node handles.
//!
//! A [`Node`] is a thin, copy-on-demand handle: a borrowed service
//! reference plus the [`NodeId`] it points at. It holds no entity state of
//! its own, so a handle never goes stale; every accessor is a fresh
//! service call, and a handle to a deleted entity simply starts failing
//! with [`SpaceError::NodeNotFound`].
//!
//! The handle layers two guarantees on top of the raw service:
//!
//! * value-class gating: scalar/array value access on an entity whose
//!   node class carries no value fails with
//!   [`SpaceError::InvalidNodeClass`] before touching the backend value;
//! * declared-type reconciliation: writes are checked against the
//!   entity's declared data type before the service call, and reads
//!   against the requested host type afterwards.
//!
//! An entity declared with the abstract base data type accepts values of
//! any built-in type.

use std::fmt;
use std::ptr;

use chrono::Utc;
use tracing::trace;

use strata_model::{
    validate_rank_dimensions, AttributeId, BuiltinType, DataValue, LocalizedText, NodeClass,
    NodeId, QualifiedName, ValueRank, Variant, VariantScalar,
};

use crate::error::{SpaceError, SpaceResult};
use crate::service::{AddressSpace, AttributeValue};

/// Handle to one entity in an address space.
pub struct Node<'a, S: AddressSpace + ?Sized> {
    space: &'a S,
    node_id: NodeId,
}

impl<'a, S: AddressSpace + ?Sized> Node<'a, S> {
    /// Creates a handle, verifying that the entity exists.
    pub fn new(space: &'a S, node_id: NodeId) -> SpaceResult<Self> {
        // Existence probe; NodeClass is carried by every entity.
        space.get_attribute(&node_id, AttributeId::NodeClass)?;
        Ok(Self { space, node_id })
    }

    /// Creates a handle without an existence check. Crate-internal: only
    /// used where the id was just produced by the same service, e.g. by
    /// path resolution or the seeded-folder accessors.
    pub(crate) fn new_unchecked(space: &'a S, node_id: NodeId) -> Self {
        Self { space, node_id }
    }

    /// Returns the id this handle points at.
    #[inline]
    pub fn id(&self) -> &NodeId {
        &self.node_id
    }

    /// Returns the service this handle operates through.
    #[inline]
    pub fn space(&self) -> &'a S {
        self.space
    }

    // -------------------------------------------------------------------------
    // Attribute accessors
    // -------------------------------------------------------------------------

    /// Reads the node class.
    pub fn node_class(&self) -> SpaceResult<NodeClass> {
        self.space
            .get_attribute(&self.node_id, AttributeId::NodeClass)?
            .expect_node_class()
    }

    /// Reads the browse name.
    pub fn browse_name(&self) -> SpaceResult<QualifiedName> {
        self.space
            .get_attribute(&self.node_id, AttributeId::BrowseName)?
            .expect_qualified_name()
    }

    /// Reads the display name.
    pub fn display_name(&self) -> SpaceResult<LocalizedText> {
        self.space
            .get_attribute(&self.node_id, AttributeId::DisplayName)?
            .expect_localized_text()
    }

    /// Replaces the display name with a new locale/text pair.
    pub fn set_display_name(
        &self,
        locale: impl Into<String>,
        text: impl Into<String>,
    ) -> SpaceResult<()> {
        self.space.set_attribute(
            &self.node_id,
            AttributeId::DisplayName,
            AttributeValue::LocalizedText(LocalizedText::new(locale, text)),
        )
    }

    /// Reads the description.
    pub fn description(&self) -> SpaceResult<LocalizedText> {
        self.space
            .get_attribute(&self.node_id, AttributeId::Description)?
            .expect_localized_text()
    }

    /// Replaces the description with a new locale/text pair.
    pub fn set_description(
        &self,
        locale: impl Into<String>,
        text: impl Into<String>,
    ) -> SpaceResult<()> {
        self.space.set_attribute(
            &self.node_id,
            AttributeId::Description,
            AttributeValue::LocalizedText(LocalizedText::new(locale, text)),
        )
    }

    /// Reads the write mask.
    pub fn write_mask(&self) -> SpaceResult<u32> {
        self.space
            .get_attribute(&self.node_id, AttributeId::WriteMask)?
            .expect_u32()
    }

    /// Sets the write mask.
    pub fn set_write_mask(&self, mask: u32) -> SpaceResult<()> {
        self.space.set_attribute(
            &self.node_id,
            AttributeId::WriteMask,
            AttributeValue::UInt32(mask),
        )
    }

    /// Reads the declared data type.
    pub fn data_type(&self) -> SpaceResult<NodeId> {
        self.space
            .get_attribute(&self.node_id, AttributeId::DataType)?
            .expect_node_id()
    }

    /// Sets the declared data type.
    pub fn set_data_type(&self, data_type: impl Into<NodeId>) -> SpaceResult<()> {
        self.space.set_attribute(
            &self.node_id,
            AttributeId::DataType,
            AttributeValue::NodeId(data_type.into()),
        )
    }

    /// Reads the value rank.
    pub fn value_rank(&self) -> SpaceResult<ValueRank> {
        self.space
            .get_attribute(&self.node_id, AttributeId::ValueRank)?
            .expect_value_rank()
    }

    /// Sets the value rank.
    ///
    /// Validated against the stored array dimensions only when dimensions
    /// are actually present; a fixed rank over still-empty dimensions is a
    /// legal intermediate state so the pair can be updated in either
    /// order.
    ///
    /// The check runs against a snapshot and is best-effort under
    /// concurrent mutation of the companion attribute; backends that
    /// serialize attribute writes, like [`crate::memory::MemorySpace`],
    /// re-validate under their own lock.
    pub fn set_value_rank(&self, rank: ValueRank) -> SpaceResult<()> {
        let dimensions = self.array_dimensions()?;
        if !dimensions.is_empty() {
            validate_rank_dimensions(rank, &dimensions)?;
        }
        self.space.set_attribute(
            &self.node_id,
            AttributeId::ValueRank,
            AttributeValue::ValueRank(rank),
        )
    }

    /// Reads the array dimensions.
    pub fn array_dimensions(&self) -> SpaceResult<Vec<u32>> {
        self.space
            .get_attribute(&self.node_id, AttributeId::ArrayDimensions)?
            .expect_array_dimensions()
    }

    /// Sets the array dimensions, validated strictly against the stored
    /// value rank: a fixed rank requires exactly that many entries, an
    /// unconstrained rank requires an empty list.
    ///
    /// Best-effort against concurrent rank changes, same as
    /// [`Node::set_value_rank`].
    pub fn set_array_dimensions(&self, dimensions: Vec<u32>) -> SpaceResult<()> {
        let rank = self.value_rank()?;
        validate_rank_dimensions(rank, &dimensions)?;
        self.space.set_attribute(
            &self.node_id,
            AttributeId::ArrayDimensions,
            AttributeValue::ArrayDimensions(dimensions),
        )
    }

    /// Reads the access level byte.
    pub fn access_level(&self) -> SpaceResult<u8> {
        self.space
            .get_attribute(&self.node_id, AttributeId::AccessLevel)?
            .expect_byte()
    }

    /// Sets the access level byte.
    pub fn set_access_level(&self, level: u8) -> SpaceResult<()> {
        self.space.set_attribute(
            &self.node_id,
            AttributeId::AccessLevel,
            AttributeValue::Byte(level),
        )
    }

    // -------------------------------------------------------------------------
    // Typed value access
    // -------------------------------------------------------------------------

    /// Reads the value and extracts it as a host scalar.
    pub fn read_scalar<T: VariantScalar>(&self) -> SpaceResult<T> {
        self.require_value_class()?;
        let dv = self.space.read_value(&self.node_id)?;
        let variant = dv
            .value
            .ok_or_else(|| SpaceError::type_mismatch(T::TYPE.name(), "no value"))?;
        Ok(variant.to_scalar::<T>()?)
    }

    /// Wraps a host scalar and writes it as the value.
    ///
    /// Checked against the declared data type before the service call, so
    /// a mismatched write never reaches the backend.
    pub fn write_scalar<T: VariantScalar>(&self, value: T) -> SpaceResult<()> {
        self.require_value_class()?;
        self.check_declared_type(T::TYPE)?;
        trace!(node_id = %self.node_id, value_type = T::TYPE.name(), "write scalar");
        let dv = DataValue::from_value(value.into_variant()).with_source_timestamp(Utc::now());
        self.space.write_value(&self.node_id, dv)
    }

    /// Reads the value and extracts it as a vector of host scalars.
    pub fn read_array<T: VariantScalar>(&self) -> SpaceResult<Vec<T>> {
        self.require_value_class()?;
        let dv = self.space.read_value(&self.node_id)?;
        let variant = dv
            .value
            .ok_or_else(|| SpaceError::type_mismatch(format!("{}[]", T::TYPE.name()), "no value"))?;
        Ok(variant.to_array::<T>()?)
    }

    /// Builds a homogeneous array from host values and writes it as the
    /// value.
    ///
    /// Accepts any `IntoIterator`, so both owned vectors and mapped
    /// iterators work without an intermediate allocation by the caller.
    /// An empty source is rejected when the declared rank fixes the
    /// dimension count and no stored dimension is zero.
    pub fn write_array<T, I>(&self, values: I) -> SpaceResult<()>
    where
        T: VariantScalar,
        I: IntoIterator<Item = T>,
    {
        self.require_value_class()?;
        self.check_declared_type(T::TYPE)?;
        let variant = Variant::from_array(values);
        if variant.is_empty() {
            let rank = self.value_rank()?;
            if rank.fixed_dimensions().is_some() {
                let dimensions = self.array_dimensions()?;
                if !dimensions.contains(&0) {
                    return Err(SpaceError::InvalidRankDimensions { rank, dimensions });
                }
            }
        }
        trace!(
            node_id = %self.node_id,
            element_type = T::TYPE.name(),
            length = variant.len().unwrap_or(0),
            "write array"
        );
        let dv = DataValue::from_value(variant).with_source_timestamp(Utc::now());
        self.space.write_value(&self.node_id, dv)
    }

    /// Reads the value with all its quality and timing metadata.
    pub fn read_data_value(&self) -> SpaceResult<DataValue> {
        self.require_value_class()?;
        self.space.read_value(&self.node_id)
    }

    /// Writes a full data value. Only the components present in `value`
    /// replace stored state.
    ///
    /// A value payload, if present, is checked against the declared data
    /// type like a typed write.
    pub fn write_data_value(&self, value: DataValue) -> SpaceResult<()> {
        self.require_value_class()?;
        if let Some(variant) = value.value() {
            self.check_declared_type(variant.builtin_type())?;
        }
        self.space.write_value(&self.node_id, value)
    }

    // -------------------------------------------------------------------------
    // Hierarchy
    // -------------------------------------------------------------------------

    /// Resolves a relative browse path of qualified names, one hierarchy
    /// level per step, and returns a handle to the target.
    ///
    /// An empty path fails with [`SpaceError::EmptyPath`]; a step that
    /// does not resolve reports its index and name.
    pub fn browse_child(&self, path: &[QualifiedName]) -> SpaceResult<Node<'a, S>> {
        if path.is_empty() {
            return Err(SpaceError::EmptyPath);
        }
        let mut current = self.node_id.clone();
        for (step, name) in path.iter().enumerate() {
            current = self
                .space
                .browse_child(&current, name)
                .map_err(|_| SpaceError::path_not_found(step, name.to_string()))?;
        }
        Ok(Node::new_unchecked(self.space, current))
    }

    /// Deletes the entity and its hierarchical descendants, consuming the
    /// handle.
    pub fn remove(self) -> SpaceResult<()> {
        trace!(node_id = %self.node_id, "remove node");
        self.space.delete_node(&self.node_id)
    }

    // -------------------------------------------------------------------------
    // Internal checks
    // -------------------------------------------------------------------------

    fn require_value_class(&self) -> SpaceResult<NodeClass> {
        let class = self.node_class()?;
        if class.has_value() {
            Ok(class)
        } else {
            Err(SpaceError::invalid_node_class(self.node_id.clone(), class))
        }
    }

    fn check_declared_type(&self, attempted: BuiltinType) -> SpaceResult<()> {
        let declared = self.data_type()?;
        if declared == NodeId::BASE_DATA_TYPE || declared == attempted.data_type_id() {
            return Ok(());
        }
        let declared_name = declared
            .as_numeric()
            .filter(|_| declared.is_standard())
            .and_then(BuiltinType::from_type_id)
            .map(|t| t.name().to_string())
            .unwrap_or_else(|| declared.to_string());
        Err(SpaceError::type_mismatch(declared_name, attempted.name()))
    }
}

// Handles compare by identity of the service and the id they point at,
// not by entity state. Manual impls keep `S: Clone` etc. out of the
// bounds.

impl<S: AddressSpace + ?Sized> Clone for Node<'_, S> {
    fn clone(&self) -> Self {
        Self {
            space: self.space,
            node_id: self.node_id.clone(),
        }
    }
}

impl<S: AddressSpace + ?Sized> fmt::Debug for Node<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node").field("node_id", &self.node_id).finish()
    }
}

impl<S: AddressSpace + ?Sized> PartialEq for Node<'_, S> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.space, other.space) && self.node_id == other.node_id
    }
}

impl<S: AddressSpace + ?Sized> Eq for Node<'_, S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySpace;

    #[test]
    fn handles_compare_by_service_and_id() {
        let space = MemorySpace::new();
        let a = Node::new(&space, NodeId::OBJECTS_FOLDER).unwrap();
        let b = Node::new(&space, NodeId::OBJECTS_FOLDER).unwrap();
        let c = Node::new(&space, NodeId::TYPES_FOLDER).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, a.clone());
        assert_ne!(a, c);

        let other = MemorySpace::new();
        let d = Node::new(&other, NodeId::OBJECTS_FOLDER).unwrap();
        assert_ne!(a, d);
    }

    #[test]
    fn constructor_checks_existence() {
        let space = MemorySpace::new();
        let missing = NodeId::string(1, "nope");
        let err = Node::new(&space, missing.clone()).unwrap_err();
        assert_eq!(err, SpaceError::node_not_found(missing));
    }
}
