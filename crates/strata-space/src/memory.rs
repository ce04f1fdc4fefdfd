// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! In-process address space backed by a hash map.
//!
//! [`MemorySpace`] is the reference [`AddressSpace`] implementation. A
//! single `parking_lot::RwLock` guards the whole entity map, which makes
//! every operation linearizable: in particular the value-rank and
//! array-dimensions pair is validated and updated under one lock, so no
//! interleaving can commit a combination that violates the invariant.
//!
//! A fresh space is seeded with the standard folder hierarchy: the root
//! folder with Objects, Types and Views below it, and the four type
//! folders below Types.
//!
//! Deliberately not arbitrated here: the write mask and the access level.
//! Both are plain metadata for external consumers; in-process callers are
//! the server itself and bypass them, matching the protocol's server-side
//! semantics. A remote-facing frontend enforcing them sits above this
//! layer.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use strata_model::{
    access_level, validate_rank_dimensions, AttributeId, DataValue, LocalizedText, NodeClass,
    NodeId, QualifiedName, StatusCode, ValueRank,
};

use crate::error::{SpaceError, SpaceResult};
use crate::node::Node;
use crate::service::{AddressSpace, AttributeValue};

// =============================================================================
// Stored entity
// =============================================================================

#[derive(Debug, Clone)]
struct StoredNode {
    node_class: NodeClass,
    browse_name: QualifiedName,
    display_name: LocalizedText,
    description: LocalizedText,
    write_mask: u32,
    // Value-class attributes; only meaningful when node_class.has_value().
    data_type: NodeId,
    value_rank: ValueRank,
    array_dimensions: Vec<u32>,
    access_level: u8,
    value: DataValue,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl StoredNode {
    fn new(node_class: NodeClass, browse_name: QualifiedName, parent: Option<NodeId>) -> Self {
        let display_name = LocalizedText::plain(browse_name.name.clone());
        Self {
            node_class,
            browse_name,
            display_name,
            description: LocalizedText::default(),
            write_mask: 0,
            data_type: NodeId::BASE_DATA_TYPE,
            value_rank: ValueRank::Any,
            array_dimensions: Vec::new(),
            access_level: access_level::CURRENT_READ,
            value: DataValue::default(),
            parent,
            children: Vec::new(),
        }
    }
}

// =============================================================================
// MemorySpace
// =============================================================================

/// Hash-map backed address space with the standard folder hierarchy.
pub struct MemorySpace {
    nodes: RwLock<HashMap<NodeId, StoredNode>>,
}

impl MemorySpace {
    /// Creates a space seeded with the standard folders.
    pub fn new() -> Self {
        let mut nodes: HashMap<NodeId, StoredNode> = HashMap::new();

        let folder = |name: &str, parent: Option<NodeId>| {
            StoredNode::new(NodeClass::Object, QualifiedName::standard(name), parent)
        };

        let mut seed = |id: NodeId, name: &str, parent: Option<NodeId>| {
            if let Some(parent_id) = &parent {
                if let Some(parent_node) = nodes.get_mut(parent_id) {
                    parent_node.children.push(id.clone());
                }
            }
            nodes.insert(id, folder(name, parent));
        };

        seed(NodeId::ROOT_FOLDER, "Root", None);
        seed(NodeId::OBJECTS_FOLDER, "Objects", Some(NodeId::ROOT_FOLDER));
        seed(NodeId::TYPES_FOLDER, "Types", Some(NodeId::ROOT_FOLDER));
        seed(NodeId::VIEWS_FOLDER, "Views", Some(NodeId::ROOT_FOLDER));
        seed(
            NodeId::OBJECT_TYPES_FOLDER,
            "ObjectTypes",
            Some(NodeId::TYPES_FOLDER),
        );
        seed(
            NodeId::VARIABLE_TYPES_FOLDER,
            "VariableTypes",
            Some(NodeId::TYPES_FOLDER),
        );
        seed(
            NodeId::DATA_TYPES_FOLDER,
            "DataTypes",
            Some(NodeId::TYPES_FOLDER),
        );
        seed(
            NodeId::REFERENCE_TYPES_FOLDER,
            "ReferenceTypes",
            Some(NodeId::TYPES_FOLDER),
        );

        Self {
            nodes: RwLock::new(nodes),
        }
    }

    /// Adds an object entity under `parent`.
    pub fn add_object(
        &self,
        parent: &NodeId,
        node_id: NodeId,
        browse_name: QualifiedName,
    ) -> SpaceResult<NodeId> {
        self.add_node(parent, node_id, NodeClass::Object, browse_name)
    }

    /// Adds a variable entity under `parent` with the protocol defaults:
    /// write mask 0, the abstract base data type, unconstrained rank, no
    /// dimensions and a read-only access level.
    pub fn add_variable(
        &self,
        parent: &NodeId,
        node_id: NodeId,
        browse_name: QualifiedName,
    ) -> SpaceResult<NodeId> {
        self.add_node(parent, node_id, NodeClass::Variable, browse_name)
    }

    fn add_node(
        &self,
        parent: &NodeId,
        node_id: NodeId,
        node_class: NodeClass,
        browse_name: QualifiedName,
    ) -> SpaceResult<NodeId> {
        let mut nodes = self.nodes.write();
        if nodes.contains_key(&node_id) {
            return Err(SpaceError::node_exists(node_id));
        }
        let parent_node = nodes
            .get_mut(parent)
            .ok_or_else(|| SpaceError::node_not_found(parent.clone()))?;
        parent_node.children.push(node_id.clone());
        debug!(%node_id, %node_class, parent = %parent, "add node");
        nodes.insert(
            node_id.clone(),
            StoredNode::new(node_class, browse_name, Some(parent.clone())),
        );
        Ok(node_id)
    }

    /// Returns a handle to the root folder.
    pub fn root_node(&self) -> Node<'_, Self> {
        Node::new_unchecked(self, NodeId::ROOT_FOLDER)
    }

    /// Returns a handle to the Objects folder.
    pub fn objects_node(&self) -> Node<'_, Self> {
        Node::new_unchecked(self, NodeId::OBJECTS_FOLDER)
    }

    /// Returns a handle to the Types folder.
    pub fn types_node(&self) -> Node<'_, Self> {
        Node::new_unchecked(self, NodeId::TYPES_FOLDER)
    }

    /// Returns a handle to the Views folder.
    pub fn views_node(&self) -> Node<'_, Self> {
        Node::new_unchecked(self, NodeId::VIEWS_FOLDER)
    }

    /// Returns the number of live entities, standard folders included.
    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    /// Returns `true` if the space holds no entities at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }
}

impl Default for MemorySpace {
    fn default() -> Self {
        Self::new()
    }
}

fn require<'m>(
    nodes: &'m HashMap<NodeId, StoredNode>,
    node_id: &NodeId,
) -> SpaceResult<&'m StoredNode> {
    nodes
        .get(node_id)
        .ok_or_else(|| SpaceError::node_not_found(node_id.clone()))
}

fn require_mut<'m>(
    nodes: &'m mut HashMap<NodeId, StoredNode>,
    node_id: &NodeId,
) -> SpaceResult<&'m mut StoredNode> {
    nodes
        .get_mut(node_id)
        .ok_or_else(|| SpaceError::node_not_found(node_id.clone()))
}

fn check_class(node: &StoredNode, node_id: &NodeId, attribute: AttributeId) -> SpaceResult<()> {
    if attribute.requires_value_class() && !node.node_class.has_value() {
        Err(SpaceError::invalid_node_class(
            node_id.clone(),
            node.node_class,
        ))
    } else {
        Ok(())
    }
}

// Explicit good status collapses to the absent flag so a healthy value
// reads back without one.
fn normalize_status(status: Option<StatusCode>) -> Option<StatusCode> {
    status.filter(|s| *s != StatusCode::GOOD)
}

fn merge_value(stored: &mut DataValue, incoming: DataValue) {
    if let Some(v) = incoming.value {
        stored.value = Some(v);
    }
    if let Some(ts) = incoming.source_timestamp {
        stored.source_timestamp = Some(ts);
    }
    if let Some(p) = incoming.source_picoseconds {
        stored.source_picoseconds = Some(p);
    }
    if let Some(ts) = incoming.server_timestamp {
        stored.server_timestamp = Some(ts);
    }
    if let Some(p) = incoming.server_picoseconds {
        stored.server_picoseconds = Some(p);
    }
    if incoming.status.is_some() {
        stored.status = normalize_status(incoming.status);
    }
}

impl AddressSpace for MemorySpace {
    fn get_attribute(
        &self,
        node_id: &NodeId,
        attribute: AttributeId,
    ) -> SpaceResult<AttributeValue> {
        let nodes = self.nodes.read();
        let node = require(&nodes, node_id)?;
        check_class(node, node_id, attribute)?;

        let value = match attribute {
            AttributeId::NodeId => AttributeValue::NodeId(node_id.clone()),
            AttributeId::NodeClass => AttributeValue::NodeClass(node.node_class),
            AttributeId::BrowseName => AttributeValue::QualifiedName(node.browse_name.clone()),
            AttributeId::DisplayName => AttributeValue::LocalizedText(node.display_name.clone()),
            AttributeId::Description => AttributeValue::LocalizedText(node.description.clone()),
            AttributeId::WriteMask => AttributeValue::UInt32(node.write_mask),
            AttributeId::Value => AttributeValue::DataValue(node.value.clone()),
            AttributeId::DataType => AttributeValue::NodeId(node.data_type.clone()),
            AttributeId::ValueRank => AttributeValue::ValueRank(node.value_rank),
            AttributeId::ArrayDimensions => {
                AttributeValue::ArrayDimensions(node.array_dimensions.clone())
            }
            AttributeId::AccessLevel => AttributeValue::Byte(node.access_level),
        };
        Ok(value)
    }

    fn set_attribute(
        &self,
        node_id: &NodeId,
        attribute: AttributeId,
        value: AttributeValue,
    ) -> SpaceResult<()> {
        let mut nodes = self.nodes.write();
        let node = require_mut(&mut nodes, node_id)?;
        check_class(node, node_id, attribute)?;

        match attribute {
            // Identity attributes are fixed at creation.
            AttributeId::NodeId | AttributeId::NodeClass => {
                return Err(SpaceError::access_denied(node_id.clone()));
            }
            AttributeId::BrowseName => node.browse_name = value.expect_qualified_name()?,
            AttributeId::DisplayName => node.display_name = value.expect_localized_text()?,
            AttributeId::Description => node.description = value.expect_localized_text()?,
            AttributeId::WriteMask => node.write_mask = value.expect_u32()?,
            AttributeId::Value => merge_value(&mut node.value, value.expect_data_value()?),
            AttributeId::DataType => node.data_type = value.expect_node_id()?,
            AttributeId::ValueRank => {
                let rank = value.expect_value_rank()?;
                // Validated against stored dimensions under the same lock;
                // empty dimensions stay compatible with any rank so the
                // pair can be assigned in either order.
                if !node.array_dimensions.is_empty() {
                    validate_rank_dimensions(rank, &node.array_dimensions)?;
                }
                node.value_rank = rank;
            }
            AttributeId::ArrayDimensions => {
                let dimensions = value.expect_array_dimensions()?;
                validate_rank_dimensions(node.value_rank, &dimensions)?;
                node.array_dimensions = dimensions;
            }
            AttributeId::AccessLevel => node.access_level = value.expect_byte()?,
        }
        Ok(())
    }

    fn read_value(&self, node_id: &NodeId) -> SpaceResult<DataValue> {
        let nodes = self.nodes.read();
        let node = require(&nodes, node_id)?;
        check_class(node, node_id, AttributeId::Value)?;

        let mut dv = node.value.clone();
        dv.server_timestamp = Some(chrono::Utc::now());
        if dv.server_picoseconds.is_none() {
            dv.server_picoseconds = Some(0);
        }
        if dv.source_timestamp.is_some() && dv.source_picoseconds.is_none() {
            dv.source_picoseconds = Some(0);
        }
        Ok(dv)
    }

    fn write_value(&self, node_id: &NodeId, value: DataValue) -> SpaceResult<()> {
        let mut nodes = self.nodes.write();
        let node = require_mut(&mut nodes, node_id)?;
        check_class(node, node_id, AttributeId::Value)?;
        merge_value(&mut node.value, value);
        Ok(())
    }

    fn browse_child(&self, parent: &NodeId, name: &QualifiedName) -> SpaceResult<NodeId> {
        let nodes = self.nodes.read();
        let parent_node = require(&nodes, parent)?;
        parent_node
            .children
            .iter()
            .find(|child| {
                nodes
                    .get(child)
                    .is_some_and(|node| node.browse_name == *name)
            })
            .cloned()
            .ok_or_else(|| SpaceError::path_not_found(0, name.to_string()))
    }

    fn delete_node(&self, node_id: &NodeId) -> SpaceResult<()> {
        let mut nodes = self.nodes.write();
        if !nodes.contains_key(node_id) {
            return Err(SpaceError::node_not_found(node_id.clone()));
        }

        // Collect the whole subtree before mutating anything.
        let mut doomed = Vec::new();
        let mut stack = vec![node_id.clone()];
        while let Some(id) = stack.pop() {
            if let Some(node) = nodes.get(&id) {
                stack.extend(node.children.iter().cloned());
            }
            doomed.push(id);
        }

        let parent = nodes.get(node_id).and_then(|node| node.parent.clone());
        if let Some(parent_id) = parent {
            if let Some(parent_node) = nodes.get_mut(&parent_id) {
                parent_node.children.retain(|child| child != node_id);
            }
        }

        debug!(%node_id, subtree = doomed.len(), "delete node");
        for id in &doomed {
            nodes.remove(id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_folders_exist() {
        let space = MemorySpace::new();
        for id in [
            NodeId::ROOT_FOLDER,
            NodeId::OBJECTS_FOLDER,
            NodeId::TYPES_FOLDER,
            NodeId::VIEWS_FOLDER,
            NodeId::OBJECT_TYPES_FOLDER,
            NodeId::VARIABLE_TYPES_FOLDER,
            NodeId::DATA_TYPES_FOLDER,
            NodeId::REFERENCE_TYPES_FOLDER,
        ] {
            assert!(space.exists(&id), "{id}");
        }
        assert_eq!(space.len(), 8);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let space = MemorySpace::new();
        let id = NodeId::numeric(1, 1000);
        space
            .add_object(&NodeId::OBJECTS_FOLDER, id.clone(), QualifiedName::new(1, "A"))
            .unwrap();
        let err = space
            .add_object(&NodeId::OBJECTS_FOLDER, id.clone(), QualifiedName::new(1, "B"))
            .unwrap_err();
        assert_eq!(err, SpaceError::node_exists(id));
    }

    #[test]
    fn add_under_missing_parent_fails() {
        let space = MemorySpace::new();
        let parent = NodeId::numeric(1, 9999);
        let err = space
            .add_variable(&parent, NodeId::numeric(1, 1), QualifiedName::new(1, "V"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn identity_attributes_are_immutable() {
        let space = MemorySpace::new();
        let err = space
            .set_attribute(
                &NodeId::OBJECTS_FOLDER,
                AttributeId::NodeClass,
                AttributeValue::NodeClass(NodeClass::View),
            )
            .unwrap_err();
        assert_eq!(err, SpaceError::access_denied(NodeId::OBJECTS_FOLDER));
    }

    #[test]
    fn delete_removes_subtree_and_unlinks_parent() {
        let space = MemorySpace::new();
        let a = NodeId::numeric(1, 10);
        let b = NodeId::numeric(1, 11);
        space
            .add_object(&NodeId::OBJECTS_FOLDER, a.clone(), QualifiedName::new(1, "A"))
            .unwrap();
        space
            .add_variable(&a, b.clone(), QualifiedName::new(1, "B"))
            .unwrap();

        space.delete_node(&a).unwrap();
        assert!(!space.exists(&a));
        assert!(!space.exists(&b));
        assert!(space
            .browse_child(&NodeId::OBJECTS_FOLDER, &QualifiedName::new(1, "A"))
            .is_err());
    }

    #[test]
    fn explicit_good_status_is_normalized_away() {
        let space = MemorySpace::new();
        let id = NodeId::numeric(1, 20);
        space
            .add_variable(&NodeId::OBJECTS_FOLDER, id.clone(), QualifiedName::new(1, "V"))
            .unwrap();

        let dv = DataValue::new().with_status(StatusCode::GOOD);
        space.write_value(&id, dv).unwrap();
        assert!(!space.read_value(&id).unwrap().has_status());

        let dv = DataValue::new().with_status(StatusCode::BAD_INTERNAL_ERROR);
        space.write_value(&id, dv).unwrap();
        let read = space.read_value(&id).unwrap();
        assert!(read.has_status());
        assert_eq!(read.status(), StatusCode::BAD_INTERNAL_ERROR);
    }
}
