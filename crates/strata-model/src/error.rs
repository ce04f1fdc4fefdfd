// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for value construction and validation.
//!
//! These are the purely local failures this crate can produce on its own:
//! malformed identifier text, a rank/dimensions combination that violates
//! the attribute invariant, and a runtime value whose type tag does not
//! match the requested host type. Service-level failures live in the
//! space layer.

use thiserror::Error;

use crate::attribute::ValueRank;

/// Result alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors produced by value construction and validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A node identifier string could not be parsed.
    #[error("invalid node id '{text}': {reason}")]
    InvalidNodeId {
        /// The offending input.
        text: String,
        /// Why it was rejected.
        reason: String,
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

    /// A runtime value's type tag does not correspond to the requested
    /// host type.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The type that was requested or declared.
        expected: String,
        /// The type that was actually present.
        actual: String,
    },
}

impl ModelError {
    /// Creates an invalid node id error.
    pub fn invalid_node_id(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidNodeId {
            text: text.into(),
            reason: reason.into(),
        }
    }

    /// Creates a rank/dimensions invariant error.
    pub fn invalid_rank_dimensions(rank: ValueRank, dimensions: &[u32]) -> Self {
        Self::InvalidRankDimensions {
            rank,
            dimensions: dimensions.to_vec(),
        }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Returns `true` if this is a type mismatch.
    #[inline]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }
}
