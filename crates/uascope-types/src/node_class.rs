// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Node classes.
//!
//! Every node in an OPC UA address space belongs to exactly one of the eight
//! classes below. The discriminants are the power-of-two values the protocol
//! uses, so a set of classes composes into a browse filter mask with bitwise
//! or.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The eight-valued kind of an OPC UA node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum NodeClass {
    /// An instance node that organizes other nodes.
    Object = 1,

    /// An instance node carrying a value.
    Variable = 2,

    /// A callable node.
    Method = 4,

    /// A type node classifying objects.
    ObjectType = 8,

    /// A type node classifying variables.
    VariableType = 16,

    /// A type node classifying references.
    ReferenceType = 32,

    /// A node defining a data type.
    DataType = 64,

    /// A node defining a subset view of the address space.
    View = 128,
}

impl NodeClass {
    /// Browse mask covering all eight classes.
    pub const ALL_MASK: u32 = 0xFF;

    /// Returns the protocol value (a power of two).
    #[inline]
    pub const fn value(self) -> u32 {
        self as u32
    }

    /// Creates a node class from a protocol value.
    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            1 => Some(Self::Object),
            2 => Some(Self::Variable),
            4 => Some(Self::Method),
            8 => Some(Self::ObjectType),
            16 => Some(Self::VariableType),
            32 => Some(Self::ReferenceType),
            64 => Some(Self::DataType),
            128 => Some(Self::View),
            _ => None,
        }
    }

    /// Folds a set of classes into a browse filter mask.
    pub fn mask_of(classes: impl IntoIterator<Item = NodeClass>) -> u32 {
        classes.into_iter().fold(0, |mask, class| mask | class.value())
    }

    /// Returns the class name as used in the OPC UA specification.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Object => "Object",
            Self::Variable => "Variable",
            Self::Method => "Method",
            Self::ObjectType => "ObjectType",
            Self::VariableType => "VariableType",
            Self::ReferenceType => "ReferenceType",
            Self::DataType => "DataType",
            Self::View => "View",
        }
    }
}

impl fmt::Display for NodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =============================================================================
// Tests
// =============================================================================
