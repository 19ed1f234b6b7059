// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Variant values and data values.
//!
//! [`Variant`] is the dynamically-typed value an attribute read produces;
//! [`DataValue`] wraps a variant with its status code and timestamps. A null
//! variant models an attribute the server did not supply — the node builders
//! treat null as "absent" for every nullable attribute.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::expanded::ExpandedNodeId;
use crate::node_id::NodeId;
use crate::status::StatusCode;
use crate::text::{LocalizedText, QualifiedName};

// =============================================================================
// Variant
// =============================================================================

/// A dynamically-typed OPC UA value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Variant {
    /// Boolean value.
    Boolean(bool),

    /// Signed 8-bit integer.
    SByte(i8),

    /// Unsigned 8-bit integer.
    Byte(u8),

    /// Signed 16-bit integer.
    Int16(i16),

    /// Unsigned 16-bit integer.
    UInt16(u16),

    /// Signed 32-bit integer.
    Int32(i32),

    /// Unsigned 32-bit integer.
    UInt32(u32),

    /// Signed 64-bit integer.
    Int64(i64),

    /// Unsigned 64-bit integer.
    UInt64(u64),

    /// 32-bit IEEE 754 float.
    Float(f32),

    /// 64-bit IEEE 754 double.
    Double(f64),

    /// UTF-8 string.
    String(String),

    /// Date and time.
    DateTime(DateTime<Utc>),

    /// GUID.
    Guid(Uuid),

    /// Raw byte string.
    ByteString(Vec<u8>),

    /// Node identifier.
    NodeId(NodeId),

    /// Expanded node identifier.
    ExpandedNodeId(ExpandedNodeId),

    /// Status code.
    StatusCode(StatusCode),

    /// Qualified name.
    QualifiedName(QualifiedName),

    /// Localized text.
    LocalizedText(LocalizedText),

    /// Homogeneous array of values.
    Array(Vec<Variant>),

    /// The absent value.
    #[default]
    Null,
}

impl Variant {
    /// Returns `true` if this is the null variant.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// The value as an `i32`, widening from narrower integers.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::SByte(v) => Some(i32::from(*v)),
            Self::Byte(v) => Some(i32::from(*v)),
            Self::Int16(v) => Some(i32::from(*v)),
            Self::UInt16(v) => Some(i32::from(*v)),
            Self::Int32(v) => Some(*v),
            Self::UInt32(v) => i32::try_from(*v).ok(),
            _ => None,
        }
    }

    /// The value as a `u32`, widening from narrower unsigned integers.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Byte(v) => Some(u32::from(*v)),
            Self::UInt16(v) => Some(u32::from(*v)),
            Self::UInt32(v) => Some(*v),
            Self::Int32(v) => u32::try_from(*v).ok(),
            _ => None,
        }
    }

    /// The value as a `u8`.
    pub fn as_u8(&self) -> Option<u8> {
        match self {
            Self::Byte(v) => Some(*v),
            Self::UInt16(v) => u8::try_from(*v).ok(),
            Self::Int32(v) => u8::try_from(*v).ok(),
            Self::UInt32(v) => u8::try_from(*v).ok(),
            _ => None,
        }
    }

    /// The value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(f64::from(*v)),
            Self::Double(v) => Some(*v),
            Self::Int32(v) => Some(f64::from(*v)),
            Self::UInt32(v) => Some(f64::from(*v)),
            _ => None,
        }
    }

    /// The value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// The value as a node id.
    pub fn as_node_id(&self) -> Option<&NodeId> {
        match self {
            Self::NodeId(v) => Some(v),
            _ => None,
        }
    }

    /// The value as a qualified name.
    pub fn as_qualified_name(&self) -> Option<&QualifiedName> {
        match self {
            Self::QualifiedName(v) => Some(v),
            _ => None,
        }
    }

    /// The value as localized text.
    pub fn as_localized_text(&self) -> Option<&LocalizedText> {
        match self {
            Self::LocalizedText(v) => Some(v),
            _ => None,
        }
    }

    /// The value as a `u32` array (e.g. the ArrayDimensions attribute).
    pub fn as_u32_array(&self) -> Option<Vec<u32>> {
        match self {
            Self::Array(values) => values.iter().map(Variant::as_u32).collect(),
            _ => None,
        }
    }

    /// The value as an array of nullable strings (e.g. the NamespaceArray).
    ///
    /// Null elements are preserved as `None`; any other non-string element
    /// fails the conversion.
    pub fn as_string_array(&self) -> Option<Vec<Option<String>>> {
        match self {
            Self::Array(values) => values
                .iter()
                .map(|value| match value {
                    Self::String(s) => Some(Some(s.clone())),
                    Self::Null => Some(None),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(v) => write!(f, "{v}"),
            Self::SByte(v) => write!(f, "{v}"),
            Self::Byte(v) => write!(f, "{v}"),
            Self::Int16(v) => write!(f, "{v}"),
            Self::UInt16(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::UInt32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::UInt64(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v}"),
            Self::DateTime(v) => write!(f, "{}", v.to_rfc3339()),
            Self::Guid(v) => write!(f, "{v}"),
            Self::ByteString(v) => write!(f, "<{} bytes>", v.len()),
            Self::NodeId(v) => write!(f, "{v}"),
            Self::ExpandedNodeId(v) => write!(f, "{v}"),
            Self::StatusCode(v) => write!(f, "{v}"),
            Self::QualifiedName(v) => write!(f, "{v}"),
            Self::LocalizedText(v) => write!(f, "{v}"),
            Self::Array(v) => write!(f, "[{} items]", v.len()),
            Self::Null => write!(f, "null"),
        }
    }
}

// =============================================================================
// DataValue
// =============================================================================

/// A variant plus the status and timestamps the Read service attaches to it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataValue {
    /// The value itself; null when the server supplied none.
    pub value: Variant,

    /// Status of the read that produced this value.
    pub status: StatusCode,

    /// Timestamp assigned by the data source.
    pub source_timestamp: Option<DateTime<Utc>>,

    /// Timestamp assigned by the server.
    pub server_timestamp: Option<DateTime<Utc>>,
}

impl DataValue {
    /// Creates a good data value with no timestamps.
    pub fn new(value: Variant) -> Self {
        Self {
            value,
            status: StatusCode::GOOD,
            source_timestamp: None,
            server_timestamp: None,
        }
    }

    /// Creates a null data value carrying `status`.
    pub fn with_status(status: StatusCode) -> Self {
        Self {
            value: Variant::Null,
            status,
            source_timestamp: None,
            server_timestamp: None,
        }
    }

    /// A good null data value.
    pub fn null() -> Self {
        Self::new(Variant::Null)
    }

    /// Returns `true` if the status severity is good.
    #[inline]
    pub fn is_good(&self) -> bool {
        self.status.is_good()
    }
}

impl From<Variant> for DataValue {
    fn from(value: Variant) -> Self {
        Self::new(value)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_widening() {
        assert_eq!(Variant::Byte(7).as_i32(), Some(7));
        assert_eq!(Variant::Int32(1).as_i32(), Some(1));
        assert_eq!(Variant::UInt32(u32::MAX).as_i32(), None);
        assert_eq!(Variant::String("1".into()).as_i32(), None);
    }

    #[test]
    fn test_as_u8() {
        assert_eq!(Variant::Byte(3).as_u8(), Some(3));
        assert_eq!(Variant::Int32(300).as_u8(), None);
        assert_eq!(Variant::Null.as_u8(), None);
    }

    #[test]
    fn test_string_array() {
        let array = Variant::Array(vec![
            Variant::String("http://opcfoundation.org/UA/".into()),
            Variant::Null,
            Variant::String("urn:x".into()),
        ]);

        let uris = array.as_string_array().unwrap();
        assert_eq!(uris.len(), 3);
        assert_eq!(uris[1], None);
        assert_eq!(uris[2].as_deref(), Some("urn:x"));

        let mixed = Variant::Array(vec![Variant::Int32(1)]);
        assert_eq!(mixed.as_string_array(), None);
    }

    #[test]
    fn test_u32_array() {
        let dims = Variant::Array(vec![Variant::UInt32(2), Variant::UInt32(3)]);
        assert_eq!(dims.as_u32_array(), Some(vec![2, 3]));
    }

    #[test]
    fn test_data_value() {
        let good = DataValue::new(Variant::Double(25.5));
        assert!(good.is_good());

        let bad = DataValue::with_status(StatusCode::BAD_ATTRIBUTE_ID_INVALID);
        assert!(!bad.is_good());
        assert!(bad.value.is_null());

        assert_eq!(DataValue::default(), DataValue::null());
    }
}
