// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Attribute identifiers and the per-class attribute catalog.
//!
//! Each node class mandates a fixed set of attributes. The catalog encodes
//! those sets as ordered lists: every list starts with [`BASE_ATTRIBUTES`]
//! (the seven attributes common to all classes, in a fixed order), followed
//! by the class-specific attributes. Node builders rely on that order to
//! extract fields from a Read response by index.

use serde::{Deserialize, Serialize};

use crate::node_class::NodeClass;

// =============================================================================
// AttributeId
// =============================================================================

/// The OPC UA-defined attribute identifiers this crate reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum AttributeId {
    /// The node's canonical identifier.
    NodeId = 1,

    /// The node's class.
    NodeClass = 2,

    /// The namespace-qualified programmatic name.
    BrowseName = 3,

    /// The localized display name.
    DisplayName = 4,

    /// The localized description.
    Description = 5,

    /// Which attributes are writable.
    WriteMask = 6,

    /// Which attributes are writable by the current user.
    UserWriteMask = 7,

    /// Whether a type node is abstract.
    IsAbstract = 8,

    /// Whether a reference type is symmetric.
    Symmetric = 9,

    /// The inverse name of a reference type.
    InverseName = 10,

    /// Whether a view contains no loops.
    ContainsNoLoops = 11,

    /// Event notifier bits of an object or view.
    EventNotifier = 12,

    /// The value of a variable or variable type.
    Value = 13,

    /// The data type of a variable's value.
    DataType = 14,

    /// The value rank (scalar, array, matrix).
    ValueRank = 15,

    /// The array dimensions of the value.
    ArrayDimensions = 16,

    /// Access level bits.
    AccessLevel = 17,

    /// Access level bits for the current user.
    UserAccessLevel = 18,

    /// Minimum sampling interval supported by the server.
    MinimumSamplingInterval = 19,

    /// Whether the server historizes the value.
    Historizing = 20,

    /// Whether a method is executable.
    Executable = 21,

    /// Whether a method is executable by the current user.
    UserExecutable = 22,
}

impl AttributeId {
    /// Returns the wire-level attribute id.
    #[inline]
    pub const fn id(self) -> u32 {
        self as u32
    }
}

// =============================================================================
// Attribute catalog
// =============================================================================

/// The attributes every node class carries, in extraction order.
pub const BASE_ATTRIBUTES: [AttributeId; 7] = [
    AttributeId::NodeId,
    AttributeId::NodeClass,
    AttributeId::BrowseName,
    AttributeId::DisplayName,
    AttributeId::Description,
    AttributeId::WriteMask,
    AttributeId::UserWriteMask,
];

/// Full attribute list of an Object node.
pub const OBJECT_ATTRIBUTES: [AttributeId; 8] = [
    AttributeId::NodeId,
    AttributeId::NodeClass,
    AttributeId::BrowseName,
    AttributeId::DisplayName,
    AttributeId::Description,
    AttributeId::WriteMask,
    AttributeId::UserWriteMask,
    AttributeId::EventNotifier,
];

/// Full attribute list of a Variable node.
pub const VARIABLE_ATTRIBUTES: [AttributeId; 15] = [
    AttributeId::NodeId,
    AttributeId::NodeClass,
    AttributeId::BrowseName,
    AttributeId::DisplayName,
    AttributeId::Description,
    AttributeId::WriteMask,
    AttributeId::UserWriteMask,
    AttributeId::Value,
    AttributeId::DataType,
    AttributeId::ValueRank,
    AttributeId::ArrayDimensions,
    AttributeId::AccessLevel,
    AttributeId::UserAccessLevel,
    AttributeId::MinimumSamplingInterval,
    AttributeId::Historizing,
];

/// Full attribute list of a Method node.
pub const METHOD_ATTRIBUTES: [AttributeId; 9] = [
    AttributeId::NodeId,
    AttributeId::NodeClass,
    AttributeId::BrowseName,
    AttributeId::DisplayName,
    AttributeId::Description,
    AttributeId::WriteMask,
    AttributeId::UserWriteMask,
    AttributeId::Executable,
    AttributeId::UserExecutable,
];

/// Full attribute list of a View node.
pub const VIEW_ATTRIBUTES: [AttributeId; 9] = [
    AttributeId::NodeId,
    AttributeId::NodeClass,
    AttributeId::BrowseName,
    AttributeId::DisplayName,
    AttributeId::Description,
    AttributeId::WriteMask,
    AttributeId::UserWriteMask,
    AttributeId::ContainsNoLoops,
    AttributeId::EventNotifier,
];

/// Full attribute list of an ObjectType node.
pub const OBJECT_TYPE_ATTRIBUTES: [AttributeId; 8] = [
    AttributeId::NodeId,
    AttributeId::NodeClass,
    AttributeId::BrowseName,
    AttributeId::DisplayName,
    AttributeId::Description,
    AttributeId::WriteMask,
    AttributeId::UserWriteMask,
    AttributeId::IsAbstract,
];

/// Full attribute list of a VariableType node.
pub const VARIABLE_TYPE_ATTRIBUTES: [AttributeId; 12] = [
    AttributeId::NodeId,
    AttributeId::NodeClass,
    AttributeId::BrowseName,
    AttributeId::DisplayName,
    AttributeId::Description,
    AttributeId::WriteMask,
    AttributeId::UserWriteMask,
    AttributeId::Value,
    AttributeId::DataType,
    AttributeId::ValueRank,
    AttributeId::ArrayDimensions,
    AttributeId::IsAbstract,
];

/// Full attribute list of a DataType node.
pub const DATA_TYPE_ATTRIBUTES: [AttributeId; 8] = [
    AttributeId::NodeId,
    AttributeId::NodeClass,
    AttributeId::BrowseName,
    AttributeId::DisplayName,
    AttributeId::Description,
    AttributeId::WriteMask,
    AttributeId::UserWriteMask,
    AttributeId::IsAbstract,
];

/// Full attribute list of a ReferenceType node.
pub const REFERENCE_TYPE_ATTRIBUTES: [AttributeId; 10] = [
    AttributeId::NodeId,
    AttributeId::NodeClass,
    AttributeId::BrowseName,
    AttributeId::DisplayName,
    AttributeId::Description,
    AttributeId::WriteMask,
    AttributeId::UserWriteMask,
    AttributeId::IsAbstract,
    AttributeId::Symmetric,
    AttributeId::InverseName,
];

/// Returns the full ordered attribute list for `node_class`.
pub const fn attributes_for(node_class: NodeClass) -> &'static [AttributeId] {
    match node_class {
        NodeClass::Object => &OBJECT_ATTRIBUTES,
        NodeClass::Variable => &VARIABLE_ATTRIBUTES,
        NodeClass::Method => &METHOD_ATTRIBUTES,
        NodeClass::View => &VIEW_ATTRIBUTES,
        NodeClass::ObjectType => &OBJECT_TYPE_ATTRIBUTES,
        NodeClass::VariableType => &VARIABLE_TYPE_ATTRIBUTES,
        NodeClass::DataType => &DATA_TYPE_ATTRIBUTES,
        NodeClass::ReferenceType => &REFERENCE_TYPE_ATTRIBUTES,
    }
}

/// Returns the attributes of `node_class` beyond the base prefix, in order.
pub fn remaining_attributes_for(node_class: NodeClass) -> &'static [AttributeId] {
    &attributes_for(node_class)[BASE_ATTRIBUTES.len()..]
}

// =============================================================================
// Tests
// =============================================================================
