// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Address-space services and typed node handles.
//!
//! This crate layers the object model from `strata-model` into a working
//! address space:
//!
//! - [`AddressSpace`] is the service seam: a synchronous trait for
//!   attribute access, value access, browsing and deletion, implementable
//!   by any backend;
//! - [`Node`] is the typed handle over that seam, adding value-class
//!   gating, declared-type reconciliation and browse-path resolution;
//! - [`MemorySpace`] is the in-process backend, seeded with the standard
//!   folder hierarchy.
//!
//! ```
//! use strata_model::{NodeId, QualifiedName};
//! use strata_space::{MemorySpace, Node};
//!
//! let space = MemorySpace::new();
//! let id = NodeId::string(1, "Temperature");
//! space
//!     .add_variable(&NodeId::OBJECTS_FOLDER, id.clone(), QualifiedName::new(1, "Temperature"))
//!     .unwrap();
//!
//! let node = Node::new(&space, id).unwrap();
//! node.set_data_type(NodeId::numeric(0, 10)).unwrap();
//! node.write_scalar(11.11f32).unwrap();
//! assert_eq!(node.read_scalar::<f32>().unwrap(), 11.11);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod memory;
pub mod node;
pub mod service;

pub use error::{SpaceError, SpaceResult};
pub use memory::MemorySpace;
pub use node::Node;
pub use service::{AddressSpace, AttributeValue};
