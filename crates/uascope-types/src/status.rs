// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! OPC UA status codes.
//!
//! A status code is a `u32` whose top two bits encode severity: `00` good,
//! `01` uncertain, `10` bad. Only the codes this crate actually produces or
//! inspects are named; everything else round-trips as a raw value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 32-bit OPC UA status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusCode(u32);

impl StatusCode {
    /// The operation succeeded.
    pub const GOOD: StatusCode = StatusCode(0x0000_0000);

    /// Unspecified failure.
    pub const BAD: StatusCode = StatusCode(0x8000_0000);

    /// An unexpected error occurred.
    pub const BAD_UNEXPECTED_ERROR: StatusCode = StatusCode(0x8001_0000);

    /// An internal error occurred.
    pub const BAD_INTERNAL_ERROR: StatusCode = StatusCode(0x8002_0000);

    /// A low-level communication error occurred.
    pub const BAD_COMMUNICATION_ERROR: StatusCode = StatusCode(0x8005_0000);

    /// The operation timed out.
    pub const BAD_TIMEOUT: StatusCode = StatusCode(0x800C_0000);

    /// The server does not support the requested service.
    pub const BAD_SERVICE_UNSUPPORTED: StatusCode = StatusCode(0x800D_0000);

    /// The node id refers to a node that does not exist.
    pub const BAD_NODE_ID_UNKNOWN: StatusCode = StatusCode(0x8062_0000);

    /// The attribute is not supported for the specified node.
    pub const BAD_ATTRIBUTE_ID_INVALID: StatusCode = StatusCode(0x8063_0000);

    /// The node class attribute was absent or not a valid class.
    pub const BAD_NODE_CLASS_INVALID: StatusCode = StatusCode(0x805F_0000);

    /// Creates a status code from its raw value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns `true` if the severity is good.
    #[inline]
    pub const fn is_good(self) -> bool {
        self.0 & 0xC000_0000 == 0
    }

    /// Returns `true` if the severity is uncertain.
    #[inline]
    pub const fn is_uncertain(self) -> bool {
        self.0 & 0x4000_0000 != 0 && self.0 & 0x8000_0000 == 0
    }

    /// Returns `true` if the severity is bad.
    #[inline]
    pub const fn is_bad(self) -> bool {
        self.0 & 0x8000_0000 != 0
    }

    /// Returns the symbolic name for known codes.
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0x0000_0000 => Some("Good"),
            0x8000_0000 => Some("Bad"),
            0x8001_0000 => Some("BadUnexpectedError"),
            0x8002_0000 => Some("BadInternalError"),
            0x8005_0000 => Some("BadCommunicationError"),
            0x800C_0000 => Some("BadTimeout"),
            0x800D_0000 => Some("BadServiceUnsupported"),
            0x805F_0000 => Some("BadNodeClassInvalid"),
            0x8062_0000 => Some("BadNodeIdUnknown"),
            0x8063_0000 => Some("BadAttributeIdInvalid"),
            _ => None,
        }
    }
}

impl Default for StatusCode {
    fn default() -> Self {
        Self::GOOD
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{:#010x}", self.0),
        }
    }
}

impl From<u32> for StatusCode {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_bits() {
        assert!(StatusCode::GOOD.is_good());
        assert!(!StatusCode::GOOD.is_bad());

        assert!(StatusCode::BAD_TIMEOUT.is_bad());
        assert!(!StatusCode::BAD_TIMEOUT.is_good());

        let uncertain = StatusCode::new(0x4000_0000);
        assert!(uncertain.is_uncertain());
        assert!(!uncertain.is_good());
        assert!(!uncertain.is_bad());
    }

    #[test]
    fn test_display_known_and_unknown() {
        assert_eq!(StatusCode::BAD_SERVICE_UNSUPPORTED.to_string(), "BadServiceUnsupported");
        assert_eq!(StatusCode::new(0x8123_0000).to_string(), "0x81230000");
    }

    #[test]
    fn test_default_is_good() {
        assert_eq!(StatusCode::default(), StatusCode::GOOD);
    }
}
