// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Status codes attached to runtime values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Protocol status code.
///
/// The canonical success code is [`StatusCode::GOOD`] (0). Codes with the
/// high bit set are failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(pub u32);

impl StatusCode {
    /// The canonical success code.
    pub const GOOD: StatusCode = StatusCode(0);

    /// Generic failure.
    pub const BAD: StatusCode = StatusCode(0x8000_0000);

    /// Internal error in the service.
    pub const BAD_INTERNAL_ERROR: StatusCode = StatusCode(0x8002_0000);

    /// The user lacks permission for the operation.
    pub const BAD_USER_ACCESS_DENIED: StatusCode = StatusCode(0x8023_0000);

    /// The node id does not refer to a live entity.
    pub const BAD_NODE_ID_UNKNOWN: StatusCode = StatusCode(0x8062_0000);

    /// The attribute is not valid for the entity's node class.
    pub const BAD_ATTRIBUTE_ID_INVALID: StatusCode = StatusCode(0x8063_0000);

    /// The value is not readable.
    pub const BAD_NOT_READABLE: StatusCode = StatusCode(0x8068_0000);

    /// The value is not writable.
    pub const BAD_NOT_WRITABLE: StatusCode = StatusCode(0x8069_0000);

    /// The requested item was not found.
    pub const BAD_NOT_FOUND: StatusCode = StatusCode(0x806C_0000);

    /// Returns `true` if this is the canonical success code or any other
    /// non-failure code.
    #[inline]
    pub const fn is_good(&self) -> bool {
        self.0 & 0x8000_0000 == 0
    }

    /// Returns `true` if this code reports a failure.
    #[inline]
    pub const fn is_bad(&self) -> bool {
        !self.is_good()
    }

    /// Returns the symbolic name for known codes.
    pub const fn name(&self) -> &'static str {
        match self.0 {
            0x0000_0000 => "Good",
            0x8000_0000 => "Bad",
            0x8002_0000 => "BadInternalError",
            0x8023_0000 => "BadUserAccessDenied",
            0x8062_0000 => "BadNodeIdUnknown",
            0x8063_0000 => "BadAttributeIdInvalid",
            0x8068_0000 => "BadNotReadable",
            0x8069_0000 => "BadNotWritable",
            0x806C_0000 => "BadNotFound",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#010x})", self.name(), self.0)
    }
}

impl From<u32> for StatusCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}
