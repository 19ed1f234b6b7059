// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! OPC UA node identifiers.
//!
//! A [`NodeId`] uniquely identifies a node within a single server. It pairs a
//! namespace index with one of the four identifier kinds defined by OPC UA:
//! numeric, string, GUID, or opaque (byte string).
//!
//! # Examples
//!
//! ```
//! use uascope_types::NodeId;
//!
//! // Numeric node id (most common)
//! let numeric = NodeId::numeric(2, 1001);
//! assert_eq!(numeric.to_string(), "ns=2;i=1001");
//!
//! // Parse from the OPC UA string form
//! let parsed: NodeId = "ns=2;s=Machine.Temperature".parse().unwrap();
//! assert!(parsed.is_string());
//! ```

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::expanded::{ExpandedNodeId, NamespaceRef};

// =============================================================================
// NodeId
// =============================================================================

/// OPC UA node identifier.
///
/// Equality and hashing are value-based, so a `NodeId` can key a cache or a
/// registry directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId {
    /// Namespace index (0 = OPC UA standard namespace).
    pub namespace_index: u16,

    /// The node identifier.
    pub identifier: NodeIdentifier,
}

impl NodeId {
    /// Creates a numeric node id.
    #[inline]
    pub const fn numeric(namespace_index: u16, value: u32) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::Numeric(value),
        }
    }

    /// Creates a string node id.
    #[inline]
    pub fn string(namespace_index: u16, value: impl Into<String>) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::String(value.into()),
        }
    }

    /// Creates a GUID node id.
    #[inline]
    pub const fn guid(namespace_index: u16, value: Uuid) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::Guid(value),
        }
    }

    /// Creates an opaque (byte string) node id.
    #[inline]
    pub fn opaque(namespace_index: u16, value: Vec<u8>) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::Opaque(value),
        }
    }

    /// Returns the null node id (ns=0, i=0).
    #[inline]
    pub const fn null() -> Self {
        Self::numeric(0, 0)
    }

    /// Returns `true` if this is the null node id.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.namespace_index == 0 && matches!(self.identifier, NodeIdentifier::Numeric(0))
    }

    /// Returns `true` if this is a numeric identifier.
    #[inline]
    pub const fn is_numeric(&self) -> bool {
        matches!(self.identifier, NodeIdentifier::Numeric(_))
    }

    /// Returns `true` if this is a string identifier.
    #[inline]
    pub const fn is_string(&self) -> bool {
        matches!(self.identifier, NodeIdentifier::String(_))
    }

    /// Returns the numeric value if this is a numeric identifier.
    #[inline]
    pub fn as_numeric(&self) -> Option<u32> {
        match &self.identifier {
            NodeIdentifier::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string value if this is a string identifier.
    #[inline]
    pub fn as_string(&self) -> Option<&str> {
        match &self.identifier {
            NodeIdentifier::String(v) => Some(v),
            _ => None,
        }
    }

    /// Converts this id into the trivially-local [`ExpandedNodeId`] form.
    pub fn to_expanded(&self) -> ExpandedNodeId {
        ExpandedNodeId {
            namespace: NamespaceRef::Index(self.namespace_index),
            identifier: self.identifier.clone(),
            server_index: 0,
        }
    }

    /// Converts to the OPC UA string format.
    ///
    /// Format: `ns=<namespace>;{i|s|g|b}=<identifier>`, with the `ns=` prefix
    /// omitted for namespace 0.
    pub fn to_opc_string(&self) -> String {
        if self.namespace_index == 0 {
            self.identifier.to_string()
        } else {
            format!("ns={};{}", self.namespace_index, self.identifier)
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
        write!(f, "{}", self.to_opc_string())
    }
}

impl FromStr for NodeId {
    type Err = NodeIdParseError;

    /// Parses a node id from the OPC UA string format.
    ///
    /// Supported forms: `ns=2;i=1001`, `ns=2;s=MyNode`,
    /// `ns=2;g=550e8400-e29b-41d4-a716-446655440000`, `ns=2;b=SGVsbG8=`,
    /// and the namespace-0 shorthand without the `ns=` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let (namespace_index, identifier_part) = if let Some(rest) = s.strip_prefix("ns=") {
            let (ns_str, id_str) = rest
                .split_once(';')
                .ok_or_else(|| NodeIdParseError::new(s, "missing identifier after namespace"))?;

            let namespace_index: u16 = ns_str
                .parse()
                .map_err(|_| NodeIdParseError::new(s, "invalid namespace index"))?;

            (namespace_index, id_str)
        } else {
            (0, s)
        };

        let identifier = if let Some(id) = identifier_part.strip_prefix("i=") {
            let value: u32 = id
                .parse()
                .map_err(|_| NodeIdParseError::new(s, "invalid numeric identifier"))?;
            NodeIdentifier::Numeric(value)
        } else if let Some(id) = identifier_part.strip_prefix("s=") {
            NodeIdentifier::String(id.to_string())
        } else if let Some(id) = identifier_part.strip_prefix("g=") {
            let uuid = Uuid::parse_str(id)
                .map_err(|e| NodeIdParseError::new(s, format!("invalid GUID: {e}")))?;
            NodeIdentifier::Guid(uuid)
        } else if let Some(id) = identifier_part.strip_prefix("b=") {
            let bytes = BASE64
                .decode(id)
                .map_err(|e| NodeIdParseError::new(s, format!("invalid base64: {e}")))?;
            NodeIdentifier::Opaque(bytes)
        } else {
            return Err(NodeIdParseError::new(
                s,
                "unknown identifier type, expected i=, s=, g=, or b=",
            ));
        };

        Ok(Self {
            namespace_index,
            identifier,
        })
    }
}

// =============================================================================
// NodeIdentifier
// =============================================================================

/// The four identifier kinds defined by the OPC UA specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum NodeIdentifier {
    /// Numeric identifier (used for all standard nodes).
    Numeric(u32),

    /// String identifier (human-readable, used for custom nodes).
    String(String),

    /// GUID identifier (globally unique).
    Guid(Uuid),

    /// Opaque identifier (application-specific byte array).
    Opaque(Vec<u8>),
}

impl fmt::Display for NodeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(v) => write!(f, "i={v}"),
            Self::String(v) => write!(f, "s={v}"),
            Self::Guid(v) => write!(f, "g={v}"),
            Self::Opaque(v) => write!(f, "b={}", BASE64.encode(v)),
        }
    }
}

// =============================================================================
// NodeIdParseError
// =============================================================================

/// Error returned when a node id string cannot be parsed.
#[derive(Debug, Error)]
#[error("invalid node id '{input}': {reason}")]
pub struct NodeIdParseError {
    /// The input that failed to parse.
    pub input: String,

    /// Why the input was rejected.
    pub reason: String,
}

impl NodeIdParseError {
    fn new(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
