// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Type-definition constructor registries.
//!
//! Object and Variable instances carry a type definition. Applications can
//! register a constructor per type definition id so that resolving, say, a
//! node of a vendor's `PumpType` yields a record enriched by application
//! code instead of the plain default. The address space consults the
//! registry on every Object/Variable construction and falls back to
//! [`ObjectNode::new`] / [`VariableNode::new`] when no entry exists.
//!
//! Registries are read-heavy and rarely written; they are backed by
//! `dashmap` and shared freely.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;

use uascope_types::NodeId;

use crate::client::SharedClient;
use crate::node::{BaseAttributes, ObjectNode, VariableAttributes, VariableNode};

/// Constructor producing an [`ObjectNode`] from its assembled attributes.
pub type ObjectNodeConstructor =
    Arc<dyn Fn(&SharedClient, BaseAttributes, u8) -> ObjectNode + Send + Sync>;

/// Constructor producing a [`VariableNode`] from its assembled attributes.
pub type VariableNodeConstructor =
    Arc<dyn Fn(&SharedClient, BaseAttributes, VariableAttributes) -> VariableNode + Send + Sync>;

// =============================================================================
// ObjectTypeManager
// =============================================================================

/// Registry of [`ObjectNodeConstructor`]s keyed by type definition id.
#[derive(Default)]
pub struct ObjectTypeManager {
    constructors: DashMap<NodeId, ObjectNodeConstructor>,
}

impl ObjectTypeManager {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `constructor` for nodes whose type definition is
    /// `type_definition_id`, replacing any previous entry.
    pub fn register(&self, type_definition_id: NodeId, constructor: ObjectNodeConstructor) {
        self.constructors.insert(type_definition_id, constructor);
    }

    /// Looks up the constructor for `type_definition_id`.
    pub fn get_node_constructor(
        &self,
        type_definition_id: &NodeId,
    ) -> Option<ObjectNodeConstructor> {
        self.constructors
            .get(type_definition_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Number of registered constructors.
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Returns `true` if no constructors are registered.
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl fmt::Debug for ObjectTypeManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectTypeManager")
            .field("constructors", &self.constructors.len())
            .finish()
    }
}

// =============================================================================
// VariableTypeManager
// =============================================================================

/// Registry of [`VariableNodeConstructor`]s keyed by type definition id.
#[derive(Default)]
pub struct VariableTypeManager {
    constructors: DashMap<NodeId, VariableNodeConstructor>,
}

impl VariableTypeManager {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `constructor` for nodes whose type definition is
    /// `type_definition_id`, replacing any previous entry.
    pub fn register(&self, type_definition_id: NodeId, constructor: VariableNodeConstructor) {
        self.constructors.insert(type_definition_id, constructor);
    }

    /// Looks up the constructor for `type_definition_id`.
    pub fn get_node_constructor(
        &self,
        type_definition_id: &NodeId,
    ) -> Option<VariableNodeConstructor> {
        self.constructors
            .get(type_definition_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Number of registered constructors.
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Returns `true` if no constructors are registered.
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl fmt::Debug for VariableTypeManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableTypeManager")
            .field("constructors", &self.constructors.len())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use uascope_types::well_known;

    #[test]
    fn test_lookup_miss_on_empty_registry() {
        let manager = ObjectTypeManager::new();
        assert!(manager.is_empty());
        assert!(manager
            .get_node_constructor(&well_known::FOLDER_TYPE)
            .is_none());
    }

    #[test]
    fn test_register_and_lookup() {
        let manager = ObjectTypeManager::new();
        manager.register(
            well_known::FOLDER_TYPE,
            Arc::new(|_, base, event_notifier| ObjectNode::new(base, event_notifier)),
        );

        assert_eq!(manager.len(), 1);
        assert!(manager
            .get_node_constructor(&well_known::FOLDER_TYPE)
            .is_some());
        assert!(manager
            .get_node_constructor(&well_known::BASE_OBJECT_TYPE)
            .is_none());
    }

    #[test]
    fn test_register_replaces_previous_entry() {
        let manager = VariableTypeManager::new();
        let constructor: VariableNodeConstructor =
            Arc::new(|_, base, attributes| VariableNode::new(base, attributes));

        manager.register(well_known::BASE_DATA_VARIABLE_TYPE, Arc::clone(&constructor));
        manager.register(well_known::BASE_DATA_VARIABLE_TYPE, constructor);

        assert_eq!(manager.len(), 1);
    }
}
