// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Expanded node identifiers.
//!
//! An [`ExpandedNodeId`] extends [`NodeId`] for cross-server references: the
//! namespace may be carried as a uri instead of an index, and a non-zero
//! server index marks an id that lives on a foreign server. Browse responses
//! return target and type-definition ids in this form; they must be localized
//! against the session's [`NamespaceTable`](crate::NamespaceTable) before they
//! can be used in Read or Browse requests.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::namespace::NamespaceTable;
use crate::node_id::{NodeId, NodeIdentifier};

// =============================================================================
// NamespaceRef
// =============================================================================

/// How an [`ExpandedNodeId`] refers to its namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum NamespaceRef {
    /// A namespace table index, usable as-is.
    Index(u16),

    /// A namespace uri that must be resolved against the namespace table.
    Uri(String),
}

// =============================================================================
// ExpandedNodeId
// =============================================================================

/// A node identifier that may reference a foreign namespace or server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpandedNodeId {
    /// Namespace reference, by index or by uri.
    pub namespace: NamespaceRef,

    /// The node identifier.
    pub identifier: NodeIdentifier,

    /// Index of the server holding the node; 0 means the local server.
    pub server_index: u32,
}

impl ExpandedNodeId {
    /// Creates an expanded id with a namespace index.
    pub const fn indexed(namespace_index: u16, identifier: NodeIdentifier) -> Self {
        Self {
            namespace: NamespaceRef::Index(namespace_index),
            identifier,
            server_index: 0,
        }
    }

    /// Creates an expanded id carrying a namespace uri.
    pub fn with_uri(namespace_uri: impl Into<String>, identifier: NodeIdentifier) -> Self {
        Self {
            namespace: NamespaceRef::Uri(namespace_uri.into()),
            identifier,
            server_index: 0,
        }
    }

    /// Returns the null expanded node id.
    pub const fn null() -> Self {
        Self::indexed(0, NodeIdentifier::Numeric(0))
    }

    /// Returns `true` if this is the null expanded node id.
    pub fn is_null(&self) -> bool {
        self.server_index == 0
            && matches!(self.namespace, NamespaceRef::Index(0))
            && matches!(self.identifier, NodeIdentifier::Numeric(0))
    }

    /// Returns `true` if the id lives on the local server.
    #[inline]
    pub fn is_local(&self) -> bool {
        self.server_index == 0
    }

    /// Resolves this id to a local [`NodeId`] against `table`.
    ///
    /// Returns `None` for foreign-server ids and for uris absent from the
    /// table. Index-form ids pass through without a table lookup.
    pub fn local(&self, table: &NamespaceTable) -> Option<NodeId> {
        if !self.is_local() {
            return None;
        }

        let namespace_index = match &self.namespace {
            NamespaceRef::Index(index) => *index,
            NamespaceRef::Uri(uri) => table.index_of(uri)?,
        };

        Some(NodeId {
            namespace_index,
            identifier: self.identifier.clone(),
        })
    }
}

impl Default for ExpandedNodeId {
    fn default() -> Self {
        Self::null()
    }
}

impl From<NodeId> for ExpandedNodeId {
    fn from(node_id: NodeId) -> Self {
        Self::indexed(node_id.namespace_index, node_id.identifier)
    }
}

impl fmt::Display for ExpandedNodeId {
    /// Uses the `svr=`/`nsu=` prefixes from the OPC UA XML notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.server_index != 0 {
            write!(f, "svr={};", self.server_index)?;
        }
        match &self.namespace {
            NamespaceRef::Index(0) => {}
            NamespaceRef::Index(index) => write!(f, "ns={index};")?,
            NamespaceRef::Uri(uri) => write!(f, "nsu={uri};")?,
        }
        write!(f, "{}", self.identifier)
    }
}

// =============================================================================
// Tests
// =============================================================================
