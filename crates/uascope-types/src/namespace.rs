// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The server namespace table.
//!
//! OPC UA compresses namespace uris to `u16` indexes on the wire. The mapping
//! is owned by the server and mirrored on the client; it can grow while a
//! session is open, so uri-form [`ExpandedNodeId`](crate::ExpandedNodeId)s
//! occasionally refer to namespaces the mirror has not seen yet. The address
//! space refreshes the mirror from the server's `NamespaceArray` when that
//! happens.
//!
//! [`SharedNamespaceTable`] is the concurrency wrapper: reads take snapshots
//! under a shared lock, mutation happens only inside [`SharedNamespaceTable::update`],
//! which holds the exclusive lock for the duration of the closure. The closure
//! must not perform I/O.

use std::collections::BTreeMap;

use parking_lot::RwLock;

/// Uri of the OPC UA standard namespace, always at index 0.
pub const OPC_UA_NAMESPACE_URI: &str = "http://opcfoundation.org/UA/";

// =============================================================================
// NamespaceTable
// =============================================================================

/// Ordered mapping from namespace index to namespace uri.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceTable {
    uris: BTreeMap<u16, String>,
}

impl NamespaceTable {
    /// Creates a table containing only the standard namespace at index 0.
    pub fn new() -> Self {
        let mut uris = BTreeMap::new();
        uris.insert(0, OPC_UA_NAMESPACE_URI.to_string());
        Self { uris }
    }

    /// Returns the uri at `index`, if present.
    pub fn uri_of(&self, index: u16) -> Option<&str> {
        self.uris.get(&index).map(String::as_str)
    }

    /// Returns the index of `uri`, if present.
    pub fn index_of(&self, uri: &str) -> Option<u16> {
        self.uris
            .iter()
            .find(|(_, entry)| entry.as_str() == uri)
            .map(|(index, _)| *index)
    }

    /// Returns `true` if `uri` is already registered.
    pub fn contains_uri(&self, uri: &str) -> bool {
        self.index_of(uri).is_some()
    }

    /// Registers `uri` at `index`, replacing any previous entry.
    pub fn insert(&mut self, index: u16, uri: impl Into<String>) {
        self.uris.insert(index, uri.into());
    }

    /// Removes every entry, index 0 included.
    ///
    /// Callers rebuilding from a server `NamespaceArray` re-insert index 0
    /// from the array's first element.
    pub fn clear(&mut self) {
        self.uris.clear();
    }

    /// Number of registered namespaces.
    pub fn len(&self) -> usize {
        self.uris.len()
    }

    /// Returns `true` if no namespaces are registered.
    pub fn is_empty(&self) -> bool {
        self.uris.is_empty()
    }

    /// Iterates over `(index, uri)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &str)> {
        self.uris.iter().map(|(index, uri)| (*index, uri.as_str()))
    }
}

impl Default for NamespaceTable {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SharedNamespaceTable
// =============================================================================

/// A [`NamespaceTable`] shared between the client session and the address
/// space, with update serialization.
#[derive(Debug)]
pub struct SharedNamespaceTable {
    inner: RwLock<NamespaceTable>,
}

impl SharedNamespaceTable {
    /// Creates a shared table seeded with the standard namespace.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(NamespaceTable::new()),
        }
    }

    /// Runs `f` with shared access to the table.
    pub fn read<R>(&self, f: impl FnOnce(&NamespaceTable) -> R) -> R {
        f(&self.inner.read())
    }

    /// Runs `f` with exclusive access to the table.
    ///
    /// The lock is held for the duration of `f`; the closure must be brief
    /// and must not suspend.
    pub fn update<R>(&self, f: impl FnOnce(&mut NamespaceTable) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Returns a point-in-time copy of the table.
    pub fn snapshot(&self) -> NamespaceTable {
        self.inner.read().clone()
    }
}

impl Default for SharedNamespaceTable {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
