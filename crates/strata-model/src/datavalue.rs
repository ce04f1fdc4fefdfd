// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The composite read/write payload.
//!
//! A [`DataValue`] bundles an optional [`Variant`] with optional source and
//! server timestamps, sub-millisecond picosecond refinements, and an
//! optional explicit status code. Every component carries its own presence
//! flag, modeled directly as `Option` fields.
//!
//! The status field has one subtlety: an *absent* status means good. A
//! value read back from a healthy entity typically has timestamps set but
//! no explicit status; [`DataValue::status`] folds that absence into
//! [`StatusCode::GOOD`] so callers never branch on it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::StatusCode;
use crate::variant::Variant;

/// A value together with its quality and timing metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataValue {
    /// The value payload, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Variant>,

    /// When the underlying source produced the value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_timestamp: Option<DateTime<Utc>>,

    /// Picosecond refinement of the source timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_picoseconds: Option<u16>,

    /// When the service observed the value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_timestamp: Option<DateTime<Utc>>,

    /// Picosecond refinement of the server timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_picoseconds: Option<u16>,

    /// Explicit status code. Absent means good.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusCode>,
}

impl DataValue {
    /// Creates an empty data value with no components set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a data value carrying only a value payload.
    pub fn from_value(value: Variant) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// Sets the value payload.
    pub fn with_value(mut self, value: Variant) -> Self {
        self.value = Some(value);
        self
    }

    /// Sets the source timestamp.
    pub fn with_source_timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.source_timestamp = Some(ts);
        self
    }

    /// Sets the picosecond refinement of the source timestamp.
    pub fn with_source_picoseconds(mut self, picos: u16) -> Self {
        self.source_picoseconds = Some(picos);
        self
    }

    /// Sets the server timestamp.
    pub fn with_server_timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.server_timestamp = Some(ts);
        self
    }

    /// Sets the picosecond refinement of the server timestamp.
    pub fn with_server_picoseconds(mut self, picos: u16) -> Self {
        self.server_picoseconds = Some(picos);
        self
    }

    /// Sets an explicit status code.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the effective status: the explicit code if one is set,
    /// otherwise [`StatusCode::GOOD`].
    #[inline]
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::GOOD)
    }

    /// Returns `true` if a value payload is present.
    #[inline]
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Returns `true` if an explicit status code is present.
    ///
    /// A freshly produced good value reports `false` here while
    /// [`DataValue::status`] still returns [`StatusCode::GOOD`].
    #[inline]
    pub fn has_status(&self) -> bool {
        self.status.is_some()
    }

    /// Returns `true` if the source timestamp is present.
    #[inline]
    pub fn has_source_timestamp(&self) -> bool {
        self.source_timestamp.is_some()
    }

    /// Returns `true` if the server timestamp is present.
    #[inline]
    pub fn has_server_timestamp(&self) -> bool {
        self.server_timestamp.is_some()
    }

    /// Returns `true` if the source picosecond refinement is present.
    #[inline]
    pub fn has_source_picoseconds(&self) -> bool {
        self.source_picoseconds.is_some()
    }

    /// Returns `true` if the server picosecond refinement is present.
    #[inline]
    pub fn has_server_picoseconds(&self) -> bool {
        self.server_picoseconds.is_some()
    }

    /// Returns the value payload, if present.
    #[inline]
    pub fn value(&self) -> Option<&Variant> {
        self.value.as_ref()
    }

    /// Takes the value payload out, leaving `None` behind.
    pub fn take_value(&mut self) -> Option<Variant> {
        self.value.take()
    }
}

impl From<Variant> for DataValue {
    fn from(value: Variant) -> Self {
        Self::from_value(value)
    }
}
