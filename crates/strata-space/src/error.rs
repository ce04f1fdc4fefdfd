// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Service-level error types.
//!
//! Everything an address-space operation can fail with funnels into
//! [`SpaceError`]. Model-layer validation failures convert losslessly via
//! `From`, so node-handle code can use `?` across both layers.

use thiserror::Error;

use strata_model::{ModelError, NodeClass, NodeId, StatusCode, ValueRank};

/// Result alias for address-space operations.
pub type SpaceResult<T> = Result<T, SpaceError>;

/// Errors produced by address-space services and node handles.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpaceError {
    /// The node id does not refer to a live entity.
    #[error("node {node_id} not found")]
    NodeNotFound {
        /// The id that failed to resolve.
        node_id: NodeId,
    },

    /// An entity with the same node id already exists.
    #[error("node {node_id} already exists")]
    NodeExists {
        /// The id that is already taken.
        node_id: NodeId,
    },

    /// A value-class attribute was accessed on an entity whose node class
    /// does not carry one.
    #[error("node {node_id} of class {node_class} does not carry a value")]
    InvalidNodeClass {
        /// The entity that was accessed.
        node_id: NodeId,
        /// Its actual node class.
        node_class: NodeClass,
    },

    /// A value rank and array-dimensions combination violates the
    /// attribute invariant.
    #[error("array dimensions {dimensions:?} are not valid for value rank {rank}")]
    InvalidRankDimensions {
        /// The declared value rank.
        rank: ValueRank,
        /// The rejected dimensions list.
        dimensions: Vec<u32>,
    },

    /// A runtime value's type does not match what was declared or
    /// requested.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The type that was requested or declared.
        expected: String,
        /// The type that was actually present.
        actual: String,
    },

    /// The caller lacks permission for the operation.
    #[error("access denied on node {node_id}")]
    AccessDenied {
        /// The entity that refused the operation.
        node_id: NodeId,
    },

    /// A browse path with no steps was submitted.
    #[error("browse path is empty")]
    EmptyPath,

    /// A browse path step did not resolve to a child.
    #[error("browse path step {step} ('{name}') did not resolve")]
    PathNotFound {
        /// Zero-based index of the failing step.
        step: usize,
        /// Browse name the step asked for.
        name: String,
    },

    /// A node identifier string could not be parsed.
    #[error("invalid node id '{text}': {reason}")]
    InvalidNodeId {
        /// The offending input.
        text: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl SpaceError {
    /// Creates a node-not-found error.
    pub fn node_not_found(node_id: NodeId) -> Self {
        Self::NodeNotFound { node_id }
    }

    /// Creates a node-already-exists error.
    pub fn node_exists(node_id: NodeId) -> Self {
        Self::NodeExists { node_id }
    }

    /// Creates an invalid-node-class error.
    pub fn invalid_node_class(node_id: NodeId, node_class: NodeClass) -> Self {
        Self::InvalidNodeClass {
            node_id,
            node_class,
        }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Creates an access-denied error.
    pub fn access_denied(node_id: NodeId) -> Self {
        Self::AccessDenied { node_id }
    }

    /// Creates a path resolution error for the given step.
    pub fn path_not_found(step: usize, name: impl Into<String>) -> Self {
        Self::PathNotFound {
            step,
            name: name.into(),
        }
    }

    /// Returns `true` if this reports a missing entity.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NodeNotFound { .. })
    }

    /// Returns `true` if this is a type mismatch.
    #[inline]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    /// Returns `true` if this reports a node-class violation.
    #[inline]
    pub fn is_invalid_node_class(&self) -> bool {
        matches!(self, Self::InvalidNodeClass { .. })
    }

    /// Returns `true` if this reports a path resolution failure,
    /// including the empty-path case.
    #[inline]
    pub fn is_path_failure(&self) -> bool {
        matches!(self, Self::PathNotFound { .. } | Self::EmptyPath)
    }

    /// Maps the error onto the closest protocol status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NodeNotFound { .. } | Self::InvalidNodeId { .. } => {
                StatusCode::BAD_NODE_ID_UNKNOWN
            }
            Self::NodeExists { .. } => StatusCode::BAD_INTERNAL_ERROR,
            Self::InvalidNodeClass { .. } => StatusCode::BAD_ATTRIBUTE_ID_INVALID,
            Self::InvalidRankDimensions { .. } | Self::TypeMismatch { .. } => {
                StatusCode::BAD_INTERNAL_ERROR
            }
            Self::AccessDenied { .. } => StatusCode::BAD_USER_ACCESS_DENIED,
            Self::EmptyPath | Self::PathNotFound { .. } => StatusCode::BAD_NOT_FOUND,
        }
    }
}

impl From<ModelError> for SpaceError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::InvalidNodeId { text, reason } => Self::InvalidNodeId { text, reason },
            ModelError::InvalidRankDimensions { rank, dimensions } => {
                Self::InvalidRankDimensions { rank, dimensions }
            }
            ModelError::TypeMismatch { expected, actual } => {
                Self::TypeMismatch { expected, actual }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates() {
        let err = SpaceError::node_not_found(NodeId::numeric(1, 1000));
        assert!(err.is_not_found());
        assert!(!err.is_type_mismatch());
        assert!(SpaceError::EmptyPath.is_path_failure());
        assert!(SpaceError::path_not_found(1, "Invalid").is_path_failure());
    }

    #[test]
    fn model_errors_convert() {
        let err: SpaceError = ModelError::type_mismatch("Float", "Boolean").into();
        assert!(err.is_type_mismatch());
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            SpaceError::node_not_found(NodeId::null()).status_code(),
            StatusCode::BAD_NODE_ID_UNKNOWN
        );
        assert_eq!(
            SpaceError::access_denied(NodeId::null()).status_code(),
            StatusCode::BAD_USER_ACCESS_DENIED
        );
        assert!(SpaceError::EmptyPath.status_code().is_bad());
    }
}
