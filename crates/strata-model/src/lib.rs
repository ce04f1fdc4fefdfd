// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Value types for the STRATA address-space object model.
//!
//! This crate defines the pure, immutable value vocabulary shared by every
//! layer of STRATA:
//!
//! - **NodeId**: namespace-qualified entity identifiers (numeric, string,
//!   GUID, opaque) with the `ns=<n>;{i|s|g|b}=<v>` text form
//! - **QualifiedName / LocalizedText**: browse and display name types
//! - **NodeClass / AttributeId / ValueRank**: attribute metadata enums,
//!   including the rank vs. array-dimensions invariant checker
//! - **Variant**: the self-describing runtime value (scalar or array)
//! - **VariantScalar**: the host-type ↔ variant mapping used by the typed
//!   value codec
//! - **StatusCode / DataValue**: status codes and timestamped values with
//!   per-field presence flags
//!
//! Nothing in this crate performs I/O or holds a service reference; all
//! types have plain value semantics (copy/clone, equality, hashing where
//! meaningful) and serde support.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod attribute;
pub mod datavalue;
pub mod error;
pub mod names;
pub mod nodeid;
pub mod status;
pub mod variant;

pub use attribute::{
    access_level, validate_rank_dimensions, write_mask, AttributeId, NodeClass, ValueRank,
};
pub use datavalue::DataValue;
pub use error::{ModelError, ModelResult};
pub use names::{LocalizedText, QualifiedName};
pub use nodeid::{Identifier, NodeId};
pub use status::StatusCode;
pub use variant::{BuiltinType, Variant, VariantScalar};
