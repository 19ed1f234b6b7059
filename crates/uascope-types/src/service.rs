// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Read and Browse service structures.
//!
//! These are the request and response shapes the address space exchanges with
//! the session-owning client. Wire encoding, secure channels, and
//! continuation-point handling all live on the client side of the boundary;
//! a [`BrowseResult`] is always the full concatenation of every page the
//! server returned, in server order.

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeId;
use crate::expanded::ExpandedNodeId;
use crate::node_class::NodeClass;
use crate::node_id::NodeId;
use crate::status::StatusCode;
use crate::text::{LocalizedText, QualifiedName};
use crate::variant::DataValue;

// =============================================================================
// Read service
// =============================================================================

/// Which timestamps a Read should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimestampsToReturn {
    /// Source timestamps only.
    Source,

    /// Server timestamps only.
    Server,

    /// Both timestamps.
    Both,

    /// No timestamps.
    #[default]
    Neither,
}

/// One node/attribute pair to read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReadValueId {
    /// The node to read from.
    pub node_id: NodeId,

    /// The attribute to read.
    pub attribute_id: AttributeId,
}

impl ReadValueId {
    /// Creates a read target for `attribute_id` of `node_id`.
    pub fn new(node_id: NodeId, attribute_id: AttributeId) -> Self {
        Self {
            node_id,
            attribute_id,
        }
    }
}

/// Response to a Read: one [`DataValue`] per requested id, in request order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadResponse {
    /// The values, ordered like the request.
    pub results: Vec<DataValue>,
}

impl ReadResponse {
    /// Creates a response from its results.
    pub fn new(results: Vec<DataValue>) -> Self {
        Self { results }
    }
}

// =============================================================================
// Browse service
// =============================================================================

/// Direction of reference traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BrowseDirection {
    /// Follow references from source to target.
    #[default]
    Forward,

    /// Follow references from target to source.
    Inverse,

    /// Follow references both ways.
    Both,
}

impl BrowseDirection {
    /// Returns the wire value.
    pub const fn value(self) -> u32 {
        match self {
            Self::Forward => 0,
            Self::Inverse => 1,
            Self::Both => 2,
        }
    }
}

/// Which fields of a [`ReferenceDescription`] the server should populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BrowseResultMask {
    /// No optional fields.
    None,

    /// Every optional field.
    #[default]
    All,
}

impl BrowseResultMask {
    /// Returns the wire mask.
    pub const fn value(self) -> u32 {
        match self {
            Self::None => 0x00,
            Self::All => 0x3F,
        }
    }
}

/// Parameters of a single Browse.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseDescription {
    /// The node to browse from.
    pub node_id: NodeId,

    /// Traversal direction.
    pub browse_direction: BrowseDirection,

    /// Reference type to follow.
    pub reference_type_id: NodeId,

    /// Whether subtypes of the reference type are followed too.
    pub include_subtypes: bool,

    /// Bitmask of node classes to return; 0 and 0xFF both mean all.
    pub node_class_mask: u32,

    /// Which reference fields to populate.
    pub result_mask: BrowseResultMask,
}

/// One reference returned by a Browse.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceDescription {
    /// The reference type of this edge.
    pub reference_type_id: NodeId,

    /// `true` when the reference was followed in its forward direction.
    pub is_forward: bool,

    /// The target node, possibly in a foreign namespace.
    pub node_id: ExpandedNodeId,

    /// Browse name of the target.
    pub browse_name: QualifiedName,

    /// Display name of the target.
    pub display_name: LocalizedText,

    /// Node class of the target.
    pub node_class: NodeClass,

    /// Type definition of the target; null for non-instance targets.
    pub type_definition: ExpandedNodeId,
}

/// Result of a Browse: status plus all references across all pages.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseResult {
    /// Service-level status of the browse.
    pub status_code: StatusCode,

    /// The references, in server-return order.
    pub references: Vec<ReferenceDescription>,
}

impl BrowseResult {
    /// Creates a good result from references.
    pub fn good(references: Vec<ReferenceDescription>) -> Self {
        Self {
            status_code: StatusCode::GOOD,
            references,
        }
    }

    /// Creates an empty result carrying `status_code`.
    pub fn bad(status_code: StatusCode) -> Self {
        Self {
            status_code,
            references: Vec::new(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
