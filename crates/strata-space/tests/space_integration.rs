// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! End-to-end tests of the typed node handle over the in-memory backend.

use strata_model::{
    access_level, BuiltinType, DataValue, NodeClass, NodeId, QualifiedName, StatusCode, ValueRank,
    Variant,
};
use strata_space::{AddressSpace, MemorySpace, Node, SpaceError};

// =============================================================================
// Helpers
// =============================================================================

fn variable_id() -> NodeId {
    NodeId::numeric(1, 1000)
}

fn space_with_variable() -> MemorySpace {
    let space = MemorySpace::new();
    space
        .add_variable(
            &NodeId::OBJECTS_FOLDER,
            variable_id(),
            QualifiedName::new(1, "Variable"),
        )
        .unwrap();
    space
}

// =============================================================================
// Construction and defaults
// =============================================================================

#[test]
fn handle_construction_verifies_existence() {
    let space = MemorySpace::new();
    assert!(Node::new(&space, NodeId::OBJECTS_FOLDER).is_ok());

    let missing = NodeId::numeric(1, 42);
    let err = Node::new(&space, missing.clone()).unwrap_err();
    assert_eq!(err, SpaceError::node_not_found(missing));
}

#[test]
fn new_variable_carries_protocol_defaults() {
    let space = space_with_variable();
    let node = Node::new(&space, variable_id()).unwrap();

    assert_eq!(node.node_class().unwrap(), NodeClass::Variable);
    assert_eq!(node.browse_name().unwrap(), QualifiedName::new(1, "Variable"));
    assert_eq!(node.write_mask().unwrap(), 0);
    assert_eq!(node.data_type().unwrap(), NodeId::BASE_DATA_TYPE);
    assert_eq!(node.value_rank().unwrap(), ValueRank::Any);
    assert!(node.array_dimensions().unwrap().is_empty());
    assert_eq!(node.access_level().unwrap(), access_level::CURRENT_READ);
}

#[test]
fn standard_folders_have_expected_classes() {
    let space = MemorySpace::new();
    for id in [
        NodeId::ROOT_FOLDER,
        NodeId::OBJECTS_FOLDER,
        NodeId::TYPES_FOLDER,
        NodeId::VIEWS_FOLDER,
    ] {
        let node = Node::new(&space, id).unwrap();
        assert_eq!(node.node_class().unwrap(), NodeClass::Object);
    }
}

// =============================================================================
// Attribute round trips
// =============================================================================

#[test]
fn attributes_round_trip() {
    let space = space_with_variable();
    let node = Node::new(&space, variable_id()).unwrap();

    node.set_display_name("en-US", "X").unwrap();
    let dn = node.display_name().unwrap();
    assert_eq!(dn.locale, "en-US");
    assert_eq!(dn.text, "X");

    node.set_description("de-DE", "Y").unwrap();
    let desc = node.description().unwrap();
    assert_eq!(desc.locale, "de-DE");
    assert_eq!(desc.text, "Y");

    node.set_write_mask(11).unwrap();
    assert_eq!(node.write_mask().unwrap(), 11);

    node.set_data_type(BuiltinType::Float.data_type_id()).unwrap();
    assert_eq!(node.data_type().unwrap(), NodeId::numeric(0, 10));

    node.set_value_rank(ValueRank::TwoDimensions).unwrap();
    assert_eq!(node.value_rank().unwrap(), ValueRank::TwoDimensions);

    node.set_array_dimensions(vec![3, 2]).unwrap();
    assert_eq!(node.array_dimensions().unwrap(), vec![3, 2]);

    let level = access_level::CURRENT_READ | access_level::CURRENT_WRITE;
    node.set_access_level(level).unwrap();
    assert_eq!(node.access_level().unwrap(), level);
}

// =============================================================================
// Rank and dimensions invariant
// =============================================================================

#[test]
fn any_rank_is_assignable_while_dimensions_are_empty() {
    let space = space_with_variable();
    let node = Node::new(&space, variable_id()).unwrap();

    for rank in [
        ValueRank::ScalarOrOneDimension,
        ValueRank::Any,
        ValueRank::Scalar,
        ValueRank::OneOrMoreDimensions,
        ValueRank::OneDimension,
        ValueRank::TwoDimensions,
        ValueRank::ThreeDimensions,
    ] {
        node.set_value_rank(rank).unwrap();
        assert_eq!(node.value_rank().unwrap(), rank);
    }
}

#[test]
fn dimensions_require_exact_count_for_fixed_ranks() {
    let space = space_with_variable();
    let node = Node::new(&space, variable_id()).unwrap();

    node.set_value_rank(ValueRank::TwoDimensions).unwrap();
    assert!(node.set_array_dimensions(vec![]).is_err());
    assert!(node.set_array_dimensions(vec![3]).is_err());
    assert!(node.set_array_dimensions(vec![3, 2, 1]).is_err());
    node.set_array_dimensions(vec![3, 2]).unwrap();
}

#[test]
fn dimensions_must_be_empty_for_unconstrained_ranks() {
    let space = space_with_variable();
    let node = Node::new(&space, variable_id()).unwrap();

    for rank in [
        ValueRank::ScalarOrOneDimension,
        ValueRank::Any,
        ValueRank::Scalar,
        ValueRank::OneOrMoreDimensions,
    ] {
        node.set_value_rank(rank).unwrap();
        assert!(node.set_array_dimensions(vec![3]).is_err(), "{rank}");
        node.set_array_dimensions(vec![]).unwrap();
    }
}

#[test]
fn rank_change_is_validated_once_dimensions_exist() {
    let space = space_with_variable();
    let node = Node::new(&space, variable_id()).unwrap();

    node.set_value_rank(ValueRank::TwoDimensions).unwrap();
    node.set_array_dimensions(vec![3, 2]).unwrap();

    let err = node.set_value_rank(ValueRank::OneDimension).unwrap_err();
    assert_eq!(
        err,
        SpaceError::InvalidRankDimensions {
            rank: ValueRank::OneDimension,
            dimensions: vec![3, 2],
        }
    );
    assert!(node.set_value_rank(ValueRank::Any).is_err());

    // Clearing the pair goes rank-last: dims cannot be emptied while the
    // fixed rank holds, so re-rank is only possible via valid states.
    assert!(node.set_array_dimensions(vec![]).is_err());
    node.set_value_rank(ValueRank::TwoDimensions).unwrap();
}

// =============================================================================
// Node-class gating
// =============================================================================

#[test]
fn value_access_on_object_fails_with_class_error() {
    let space = MemorySpace::new();
    let node = Node::new(&space, NodeId::OBJECTS_FOLDER).unwrap();

    let err = node.read_scalar::<i32>().unwrap_err();
    assert_eq!(
        err,
        SpaceError::invalid_node_class(NodeId::OBJECTS_FOLDER, NodeClass::Object)
    );
    assert!(node.write_scalar(1i32).unwrap_err().is_invalid_node_class());
    assert!(node.read_array::<i32>().unwrap_err().is_invalid_node_class());
    assert!(node.data_type().unwrap_err().is_invalid_node_class());
    assert!(node.value_rank().unwrap_err().is_invalid_node_class());
    assert!(node
        .set_access_level(access_level::CURRENT_READ)
        .unwrap_err()
        .is_invalid_node_class());
}

// =============================================================================
// Typed value access
// =============================================================================

#[test]
fn declared_type_gates_writes() {
    let space = space_with_variable();
    let node = Node::new(&space, variable_id()).unwrap();
    node.set_data_type(BuiltinType::Float.data_type_id()).unwrap();

    let err = node.write_scalar(true).unwrap_err();
    assert_eq!(err, SpaceError::type_mismatch("Float", "Boolean"));
    assert!(node.write_scalar(11i32).unwrap_err().is_type_mismatch());
    assert!(node.write_scalar(11.11f64).unwrap_err().is_type_mismatch());

    node.write_scalar(11.11f32).unwrap();
    assert_eq!(node.read_scalar::<f32>().unwrap(), 11.11);
    assert!(node.read_scalar::<f64>().unwrap_err().is_type_mismatch());
}

#[test]
fn base_data_type_accepts_any_host_type() {
    let space = space_with_variable();
    let node = Node::new(&space, variable_id()).unwrap();
    assert_eq!(node.data_type().unwrap(), NodeId::BASE_DATA_TYPE);

    node.write_scalar(11.11f64).unwrap();
    assert_eq!(node.read_scalar::<f64>().unwrap(), 11.11);

    node.write_scalar("test".to_string()).unwrap();
    assert_eq!(node.read_scalar::<String>().unwrap(), "test");
}

#[test]
fn arrays_round_trip_from_vec_and_iterator() {
    let space = space_with_variable();
    let node = Node::new(&space, variable_id()).unwrap();
    node.set_data_type(BuiltinType::Double.data_type_id()).unwrap();

    let values = vec![11.11f64, 22.22, 33.33];
    node.write_array(values.clone()).unwrap();
    assert_eq!(node.read_array::<f64>().unwrap(), values);

    // Any IntoIterator source works, not just owned vectors.
    node.write_array((1..=3).map(f64::from)).unwrap();
    assert_eq!(node.read_array::<f64>().unwrap(), vec![1.0, 2.0, 3.0]);

    assert!(node.read_scalar::<f64>().unwrap_err().is_type_mismatch());
    assert!(node.read_array::<f32>().unwrap_err().is_type_mismatch());
    assert!(node.write_array(vec![true]).unwrap_err().is_type_mismatch());
}

#[test]
fn empty_array_writes_respect_declared_shape() {
    let space = space_with_variable();
    let node = Node::new(&space, variable_id()).unwrap();

    // Unconstrained rank admits a zero-length array.
    node.write_array(Vec::<i32>::new()).unwrap();
    assert!(node.read_array::<i32>().unwrap().is_empty());

    // A fixed rank with a bounded dimension does not.
    node.set_value_rank(ValueRank::OneDimension).unwrap();
    node.set_array_dimensions(vec![2]).unwrap();
    let err = node.write_array(Vec::<i32>::new()).unwrap_err();
    assert_eq!(
        err,
        SpaceError::InvalidRankDimensions {
            rank: ValueRank::OneDimension,
            dimensions: vec![2],
        }
    );

    // A zero entry means unbounded in that dimension.
    node.set_array_dimensions(vec![0]).unwrap();
    node.write_array(Vec::<i32>::new()).unwrap();
}

// =============================================================================
// Data values
// =============================================================================

#[test]
fn read_back_value_has_timestamps_but_no_explicit_status() {
    let space = space_with_variable();
    let node = Node::new(&space, variable_id()).unwrap();

    node.write_scalar(11.11f64).unwrap();
    let dv = node.read_data_value().unwrap();

    assert!(dv.has_value());
    assert!(dv.has_source_timestamp());
    assert!(dv.has_server_timestamp());
    assert!(dv.has_source_picoseconds());
    assert!(dv.has_server_picoseconds());
    assert!(!dv.has_status());
    assert_eq!(dv.status(), StatusCode::GOOD);
    assert_eq!(dv.value().unwrap().to_scalar::<f64>().unwrap(), 11.11);
}

#[test]
fn write_data_value_merges_components_and_checks_type() {
    let space = space_with_variable();
    let node = Node::new(&space, variable_id()).unwrap();

    node.write_data_value(DataValue::from_value(Variant::from_scalar(1i32)))
        .unwrap();
    assert_eq!(node.read_scalar::<i32>().unwrap(), 1);

    // A status-only write keeps the stored value.
    node.write_data_value(DataValue::new().with_status(StatusCode::BAD_INTERNAL_ERROR))
        .unwrap();
    let dv = node.read_data_value().unwrap();
    assert_eq!(dv.status(), StatusCode::BAD_INTERNAL_ERROR);
    assert_eq!(dv.value().unwrap().to_scalar::<i32>().unwrap(), 1);

    // A payload is gated by the declared type like a typed write.
    node.set_data_type(BuiltinType::Int32.data_type_id()).unwrap();
    let err = node
        .write_data_value(DataValue::from_value(Variant::from_scalar(true)))
        .unwrap_err();
    assert!(err.is_type_mismatch());
}

// =============================================================================
// Path resolution
// =============================================================================

#[test]
fn browse_path_resolves_through_the_hierarchy() {
    let space = MemorySpace::new();
    let root = space.root_node();

    let types = root.browse_child(&[QualifiedName::standard("Types")]).unwrap();
    assert_eq!(types, space.types_node());

    let object_types = root
        .browse_child(&[
            QualifiedName::standard("Types"),
            QualifiedName::standard("ObjectTypes"),
        ])
        .unwrap();
    assert_eq!(
        object_types,
        Node::new(&space, NodeId::OBJECT_TYPES_FOLDER).unwrap()
    );
}

#[test]
fn browse_path_failures_report_the_step() {
    let space = MemorySpace::new();
    let root = space.root_node();

    assert_eq!(root.browse_child(&[]).unwrap_err(), SpaceError::EmptyPath);

    let err = root
        .browse_child(&[QualifiedName::standard("Invalid")])
        .unwrap_err();
    assert_eq!(err, SpaceError::path_not_found(0, "Invalid"));

    let err = root
        .browse_child(&[
            QualifiedName::standard("Types"),
            QualifiedName::standard("Invalid"),
        ])
        .unwrap_err();
    assert_eq!(err, SpaceError::path_not_found(1, "Invalid"));
}

// =============================================================================
// Deletion
// =============================================================================

#[test]
fn removed_entity_stops_resolving() {
    let space = space_with_variable();
    let node = Node::new(&space, variable_id()).unwrap();
    let stale = node.clone();

    node.remove().unwrap();

    assert!(!space.exists(&variable_id()));
    assert!(Node::new(&space, variable_id()).unwrap_err().is_not_found());
    // A surviving handle starts failing instead of going silently stale.
    assert!(stale.node_class().unwrap_err().is_not_found());
    assert!(stale.read_scalar::<i32>().unwrap_err().is_not_found());
}

#[test]
fn remove_takes_descendants_along() {
    let space = MemorySpace::new();
    let folder = NodeId::numeric(1, 100);
    let leaf = NodeId::numeric(1, 101);
    space
        .add_object(
            &NodeId::OBJECTS_FOLDER,
            folder.clone(),
            QualifiedName::new(1, "Folder"),
        )
        .unwrap();
    space
        .add_variable(&folder, leaf.clone(), QualifiedName::new(1, "Leaf"))
        .unwrap();

    Node::new(&space, folder.clone()).unwrap().remove().unwrap();
    assert!(!space.exists(&folder));
    assert!(!space.exists(&leaf));
}
