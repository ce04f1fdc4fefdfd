// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Node identifiers.
//!
//! A [`NodeId`] names one entity inside the hierarchical address space. It
//! is a plain, immutable value: a namespace index plus one of four
//! identifier payloads (numeric, string, GUID, or opaque bytes). Two ids
//! are equal iff namespace index and payload match exactly, which makes
//! `NodeId` usable as a map key throughout the stack.
//!
//! The text form follows the conventional `ns=<n>;{i|s|g|b}=<v>` layout,
//! with the namespace prefix elided for the standard namespace:
//!
//! ```
//! use strata_model::NodeId;
//!
//! let id: NodeId = "ns=2;s=Line1.Temperature".parse().unwrap();
//! assert_eq!(id.to_string(), "ns=2;s=Line1.Temperature");
//! assert_eq!(NodeId::numeric(0, 85).to_string(), "i=85");
//! ```

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ModelError;

/// Identifier payload of a [`NodeId`].
///
/// The four payload kinds defined by the information model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Identifier {
    /// Numeric identifier, used for all standard-namespace entities.
    Numeric(u32),
    /// String identifier, typically human-readable tag paths.
    String(String),
    /// Globally unique identifier.
    Guid(Uuid),
    /// Application-defined byte sequence.
    Opaque(Vec<u8>),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(v) => write!(f, "i={v}"),
            Self::String(v) => write!(f, "s={v}"),
            Self::Guid(v) => write!(f, "g={v}"),
            Self::Opaque(v) => write!(f, "b={}", BASE64.encode(v)),
        }
    }
}

/// Namespace-qualified identifier of an address-space entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId {
    /// Namespace index (0 = standard namespace).
    pub namespace_index: u16,
    /// The identifier payload.
    pub identifier: Identifier,
}

impl NodeId {
    /// Creates a numeric node id.
    #[inline]
    pub const fn numeric(namespace_index: u16, value: u32) -> Self {
        Self {
            namespace_index,
            identifier: Identifier::Numeric(value),
        }
    }

    /// Creates a string node id.
    #[inline]
    pub fn string(namespace_index: u16, value: impl Into<String>) -> Self {
        Self {
            namespace_index,
            identifier: Identifier::String(value.into()),
        }
    }

    /// Creates a GUID node id.
    #[inline]
    pub const fn guid(namespace_index: u16, value: Uuid) -> Self {
        Self {
            namespace_index,
            identifier: Identifier::Guid(value),
        }
    }

    /// Creates an opaque (byte string) node id.
    #[inline]
    pub fn opaque(namespace_index: u16, value: Vec<u8>) -> Self {
        Self {
            namespace_index,
            identifier: Identifier::Opaque(value),
        }
    }

    // -------------------------------------------------------------------------
    // Well-known standard-namespace entities
    // -------------------------------------------------------------------------

    /// Root folder (i=84).
    pub const ROOT_FOLDER: NodeId = NodeId::numeric(0, 84);

    /// Objects folder (i=85).
    pub const OBJECTS_FOLDER: NodeId = NodeId::numeric(0, 85);

    /// Types folder (i=86).
    pub const TYPES_FOLDER: NodeId = NodeId::numeric(0, 86);

    /// Views folder (i=87).
    pub const VIEWS_FOLDER: NodeId = NodeId::numeric(0, 87);

    /// ObjectTypes folder (i=88).
    pub const OBJECT_TYPES_FOLDER: NodeId = NodeId::numeric(0, 88);

    /// VariableTypes folder (i=89).
    pub const VARIABLE_TYPES_FOLDER: NodeId = NodeId::numeric(0, 89);

    /// DataTypes folder (i=90).
    pub const DATA_TYPES_FOLDER: NodeId = NodeId::numeric(0, 90);

    /// ReferenceTypes folder (i=91).
    pub const REFERENCE_TYPES_FOLDER: NodeId = NodeId::numeric(0, 91);

    /// BaseDataType, the root abstract data type (i=24).
    ///
    /// A variable declared with this data type accepts runtime values of
    /// any built-in type.
    pub const BASE_DATA_TYPE: NodeId = NodeId::numeric(0, 24);

    /// The null node id (ns=0, i=0).
    #[inline]
    pub const fn null() -> Self {
        Self::numeric(0, 0)
    }

    /// Returns `true` if this is the null node id.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.namespace_index == 0 && matches!(self.identifier, Identifier::Numeric(0))
    }

    /// Returns `true` if this id lives in the standard namespace.
    #[inline]
    pub const fn is_standard(&self) -> bool {
        self.namespace_index == 0
    }

    /// Returns the numeric payload, if any.
    #[inline]
    pub fn as_numeric(&self) -> Option<u32> {
        match &self.identifier {
            Identifier::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    #[inline]
    pub fn as_string(&self) -> Option<&str> {
        match &self.identifier {
            Identifier::String(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the GUID payload, if any.
    #[inline]
    pub fn as_guid(&self) -> Option<&Uuid> {
        match &self.identifier {
            Identifier::Guid(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the opaque payload, if any.
    #[inline]
    pub fn as_opaque(&self) -> Option<&[u8]> {
        match &self.identifier {
            Identifier::Opaque(v) => Some(v),
            _ => None,
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_index != 0 {
            write!(f, "ns={};", self.namespace_index)?;
        }
        write!(f, "{}", self.identifier)
    }
}

impl From<(u16, u32)> for NodeId {
    fn from((ns, value): (u16, u32)) -> Self {
        Self::numeric(ns, value)
    }
}

impl From<(u16, &str)> for NodeId {
    fn from((ns, value): (u16, &str)) -> Self {
        Self::string(ns, value)
    }
}

impl FromStr for NodeId {
    type Err = ModelError;

    /// Parses the `ns=<n>;{i|s|g|b}=<v>` text form.
    ///
    /// The `ns=` prefix may be omitted for namespace 0. Opaque payloads
    /// are base64 encoded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let (namespace_index, rest) = match s.strip_prefix("ns=") {
            Some(tail) => {
                let (ns_str, rest) = tail.split_once(';').ok_or_else(|| {
                    ModelError::invalid_node_id(s, "missing identifier after namespace")
                })?;
                let ns = ns_str
                    .parse::<u16>()
                    .map_err(|_| ModelError::invalid_node_id(s, "invalid namespace index"))?;
                (ns, rest)
            }
            None => (0, s),
        };

        let identifier = if let Some(id) = rest.strip_prefix("i=") {
            let value = id
                .parse::<u32>()
                .map_err(|_| ModelError::invalid_node_id(s, "invalid numeric identifier"))?;
            Identifier::Numeric(value)
        } else if let Some(id) = rest.strip_prefix("s=") {
            Identifier::String(id.to_string())
        } else if let Some(id) = rest.strip_prefix("g=") {
            let uuid = Uuid::parse_str(id)
                .map_err(|e| ModelError::invalid_node_id(s, format!("invalid GUID: {e}")))?;
            Identifier::Guid(uuid)
        } else if let Some(id) = rest.strip_prefix("b=") {
            let bytes = BASE64
                .decode(id)
                .map_err(|e| ModelError::invalid_node_id(s, format!("invalid base64: {e}")))?;
            Identifier::Opaque(bytes)
        } else {
            return Err(ModelError::invalid_node_id(
                s,
                "unknown identifier kind, expected i=, s=, g= or b=",
            ));
        };

        Ok(Self {
            namespace_index,
            identifier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn numeric_round_trip() {
        let id = NodeId::numeric(2, 1001);
        assert_eq!(id.to_string(), "ns=2;i=1001");
        assert_eq!("ns=2;i=1001".parse::<NodeId>().unwrap(), id);
    }

    #[test]
    fn standard_namespace_elides_prefix() {
        assert_eq!(NodeId::OBJECTS_FOLDER.to_string(), "i=85");
        assert_eq!("i=85".parse::<NodeId>().unwrap(), NodeId::OBJECTS_FOLDER);
    }

    #[test]
    fn string_and_guid_and_opaque() {
        let s = NodeId::string(3, "Plant.Line1");
        assert_eq!(s.to_string(), "ns=3;s=Plant.Line1");
        assert_eq!(s.as_string(), Some("Plant.Line1"));

        let uuid = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let g = NodeId::guid(1, uuid);
        assert_eq!(g.to_string().parse::<NodeId>().unwrap(), g);

        let o = NodeId::opaque(1, vec![1, 2, 3]);
        assert_eq!(o.to_string().parse::<NodeId>().unwrap(), o);
    }

    #[test]
    fn equality_distinguishes_namespace_and_payload() {
        assert_ne!(NodeId::numeric(0, 1), NodeId::numeric(1, 1));
        assert_ne!(NodeId::numeric(0, 1), NodeId::string(0, "1"));

        let mut set = HashSet::new();
        set.insert(NodeId::numeric(0, 84));
        set.insert(NodeId::numeric(0, 84));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("ns=2".parse::<NodeId>().is_err());
        assert!("ns=foo;i=1".parse::<NodeId>().is_err());
        assert!("x=1".parse::<NodeId>().is_err());
        assert!("ns=2;i=notanumber".parse::<NodeId>().is_err());
    }

    #[test]
    fn null_id() {
        assert!(NodeId::null().is_null());
        assert!(!NodeId::ROOT_FOLDER.is_null());
        assert_eq!(NodeId::default(), NodeId::null());
    }
}
