// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The address space resolver.
//!
//! [`AddressSpace`] is the public façade over a [`UaClient`](crate::UaClient):
//! it resolves
//! node ids to typed [`UaNode`] records, browses references, and keeps a
//! bounded time-expiring cache of everything it has materialized.
//!
//! # Resolution
//!
//! ```text
//! get_node(id)
//!   │  cache hit ────────────────────────────────► UaNode
//!   ▼  miss
//! read base attributes ──► NodeClass
//!   │
//!   ├─ Object/Variable: (remaining attrs ∥ type definition) ─► registry
//!   │                                                          constructor
//!   └─ other classes:    remaining attrs ─────────► default constructor
//!   ▼
//! publish to cache ───────────────────────────────► UaNode
//! ```
//!
//! # Browsing
//!
//! A browse issues one Browse service call, then localizes and resolves
//! every returned reference concurrently, preserving server return order.
//! Object and Variable references reuse the type definition the server
//! already supplied instead of browsing for it again.
//!
//! Two concurrent resolves of the same id may both run end-to-end; the later
//! cache publish wins. Records are immutable values, so either result is
//! valid.

use std::fmt;

use futures::future::try_join_all;
use parking_lot::RwLock;

use uascope_types::{
    attribute::{self, AttributeId, BASE_ATTRIBUTES, OBJECT_ATTRIBUTES, VARIABLE_ATTRIBUTES},
    well_known, BrowseDescription, BrowseDirection, BrowseResultMask, DataValue, ExpandedNodeId,
    NodeClass, NodeId, ReadValueId, ReferenceDescription, TimestampsToReturn,
};

use crate::cache::{CacheStats, NodeCache};
use crate::client::SharedClient;
use crate::config::AddressSpaceConfig;
use crate::error::{Error, Result};
use crate::node::{
    DataTypeNode, MethodNode, ObjectNode, ObjectTypeNode, ReferenceTypeNode, UaNode,
    VariableNode, VariableTypeNode, ViewNode,
};
use crate::options::{BrowseOptions, BrowseOptionsBuilder};

// =============================================================================
// AddressSpace
// =============================================================================

/// A live, caching, typed view over a server's address space.
pub struct AddressSpace {
    client: SharedClient,
    cache: NodeCache,
    browse_options: RwLock<BrowseOptions>,
}

impl AddressSpace {
    /// Creates an address space over `client` with the default configuration.
    pub fn new(client: SharedClient) -> Self {
        Self::with_config(client, AddressSpaceConfig::default())
    }

    /// Creates an address space over `client` with `config`.
    ///
    /// Cache sizing is fixed for the lifetime of the address space.
    pub fn with_config(client: SharedClient, config: AddressSpaceConfig) -> Self {
        Self {
            client,
            cache: NodeCache::new(config.cache_max_entries, config.cache_expire_after),
            browse_options: RwLock::new(BrowseOptions::default()),
        }
    }

    // =========================================================================
    // Node resolution
    // =========================================================================

    /// Returns the node identified by `node_id`, whatever its class.
    ///
    /// A cached record of any variant is returned as-is. On a miss the base
    /// attributes are read first; their node class selects the class-specific
    /// read that completes the record.
    ///
    /// # Errors
    ///
    /// [`Error::NodeClassInvalid`] when the server reports no usable node
    /// class, [`Error::Service`] when a Read or Browse fails, and
    /// [`Error::Unexpected`] for malformed attribute values.
    pub async fn get_node(&self, node_id: &NodeId) -> Result<UaNode> {
        if let Some(node) = self.cache.get(node_id) {
            return Ok(node);
        }

        self.create_node(node_id).await
    }

    /// Returns the Object node identified by `node_id`.
    ///
    /// The type definition is discovered with a `HasTypeDefinition` browse;
    /// if the [`ObjectTypeManager`](crate::ObjectTypeManager) holds a
    /// constructor for it, that constructor builds the record.
    pub async fn get_object_node(&self, node_id: &NodeId) -> Result<ObjectNode> {
        if let Some(UaNode::Object(node)) = self.cache.get(node_id) {
            return Ok(node);
        }

        let type_definition_id = self.read_type_definition(node_id).await?;
        self.get_object_node_with_type(node_id, &type_definition_id).await
    }

    /// Returns the Object node identified by `node_id`, assuming the type
    /// definition `type_definition_id` instead of browsing for it.
    pub async fn get_object_node_with_type(
        &self,
        node_id: &NodeId,
        type_definition_id: &NodeId,
    ) -> Result<ObjectNode> {
        if let Some(UaNode::Object(node)) = self.cache.get(node_id) {
            return Ok(node);
        }

        let values = self.read_attributes(node_id, &OBJECT_ATTRIBUTES).await?;
        let node = self.new_object_node(node_id, type_definition_id, &values)?;

        self.cache
            .put(node.base.node_id.clone(), UaNode::Object(node.clone()));

        Ok(node)
    }

    /// Returns the Variable node identified by `node_id`.
    ///
    /// The type definition is discovered with a `HasTypeDefinition` browse;
    /// if the [`VariableTypeManager`](crate::VariableTypeManager) holds a
    /// constructor for it, that constructor builds the record.
    pub async fn get_variable_node(&self, node_id: &NodeId) -> Result<VariableNode> {
        if let Some(UaNode::Variable(node)) = self.cache.get(node_id) {
            return Ok(node);
        }

        let type_definition_id = self.read_type_definition(node_id).await?;
        self.get_variable_node_with_type(node_id, &type_definition_id).await
    }

    /// Returns the Variable node identified by `node_id`, assuming the type
    /// definition `type_definition_id` instead of browsing for it.
    pub async fn get_variable_node_with_type(
        &self,
        node_id: &NodeId,
        type_definition_id: &NodeId,
    ) -> Result<VariableNode> {
        if let Some(UaNode::Variable(node)) = self.cache.get(node_id) {
            return Ok(node);
        }

        let values = self.read_attributes(node_id, &VARIABLE_ATTRIBUTES).await?;
        let node = self.new_variable_node(node_id, type_definition_id, &values)?;

        self.cache
            .put(node.base.node_id.clone(), UaNode::Variable(node.clone()));

        Ok(node)
    }

    // =========================================================================
    // Browsing
    // =========================================================================

    /// Browses from `node` using the currently configured options.
    pub async fn browse(&self, node: &UaNode) -> Result<Vec<UaNode>> {
        self.browse_node(node.node_id()).await
    }

    /// Browses from `node` using `options`.
    pub async fn browse_with_options(
        &self,
        node: &UaNode,
        options: &BrowseOptions,
    ) -> Result<Vec<UaNode>> {
        self.browse_node_with_options(node.node_id(), options).await
    }

    /// Browses from `node_id` using the currently configured options.
    pub async fn browse_node(&self, node_id: &NodeId) -> Result<Vec<UaNode>> {
        let options = self.browse_options();
        self.browse_node_with_options(node_id, &options).await
    }

    /// Browses from `node_id` using `options` and resolves every returned
    /// reference to a [`UaNode`].
    ///
    /// References are localized and resolved concurrently; the result
    /// preserves the server's return order. The first failing resolution
    /// fails the whole browse.
    pub async fn browse_node_with_options(
        &self,
        node_id: &NodeId,
        options: &BrowseOptions,
    ) -> Result<Vec<UaNode>> {
        let references = self.browse_references(node_id, options).await?;

        tracing::debug!(
            node_id = %node_id,
            references = references.len(),
            "resolving browse references"
        );

        try_join_all(
            references
                .into_iter()
                .map(|reference| self.resolve_reference(reference)),
        )
        .await
    }

    /// Resolves one browse reference by its node class.
    async fn resolve_reference(&self, reference: ReferenceDescription) -> Result<UaNode> {
        match reference.node_class {
            NodeClass::Object | NodeClass::Variable => {
                let (target_id, type_definition_id) = tokio::try_join!(
                    self.localize(&reference.node_id),
                    self.localize(&reference.type_definition),
                )?;

                // The server already supplied the type definition; skip the
                // per-node HasTypeDefinition browse.
                if reference.node_class == NodeClass::Object {
                    let node = self
                        .get_object_node_with_type(&target_id, &type_definition_id)
                        .await?;
                    Ok(UaNode::Object(node))
                } else {
                    let node = self
                        .get_variable_node_with_type(&target_id, &type_definition_id)
                        .await?;
                    Ok(UaNode::Variable(node))
                }
            }
            _ => {
                let target_id = self.localize(&reference.node_id).await?;
                self.get_node(&target_id).await
            }
        }
    }

    /// Runs the Browse service call described by `options`.
    async fn browse_references(
        &self,
        node_id: &NodeId,
        options: &BrowseOptions,
    ) -> Result<Vec<ReferenceDescription>> {
        let description = BrowseDescription {
            node_id: node_id.clone(),
            browse_direction: options.direction,
            reference_type_id: options.reference_type_id.clone(),
            include_subtypes: options.include_subtypes,
            node_class_mask: options.node_class_mask,
            result_mask: BrowseResultMask::All,
        };

        let result = self.client.browse(description).await?;
        if !result.status_code.is_good() {
            return Err(Error::service(result.status_code));
        }

        Ok(result.references)
    }

    // =========================================================================
    // Namespace localization
    // =========================================================================

    /// Turns an expanded node id into a local [`NodeId`].
    ///
    /// Foreign-server ids localize to [`NodeId::null`]. A uri missing from
    /// the namespace table triggers one refresh from the server's
    /// `NamespaceArray`, after which the resolution is retried once; a uri
    /// the server still does not know localizes to [`NodeId::null`].
    pub async fn localize(&self, expanded: &ExpandedNodeId) -> Result<NodeId> {
        if !expanded.is_local() {
            return Ok(NodeId::null());
        }

        let table = self.client.namespace_table();
        if let Some(local) = table.read(|table| expanded.local(table)) {
            return Ok(local);
        }

        // Unknown namespace: rebuild the table from the server, then retry.
        // Server lives in namespace 0, so the nested resolve terminates.
        let namespace_array = self.read_namespace_array().await?;

        table.update(|table| {
            table.clear();

            for (index, uri) in namespace_array
                .iter()
                .enumerate()
                .take(usize::from(u16::MAX))
            {
                if let Some(uri) = uri {
                    if !table.contains_uri(uri) {
                        table.insert(index as u16, uri.clone());
                    }
                }
            }
        });

        tracing::debug!(
            namespaces = table.read(|table| table.len()),
            "refreshed namespace table from server"
        );

        Ok(table
            .read(|table| expanded.local(table))
            .unwrap_or_else(NodeId::null))
    }

    /// Reads the server's `NamespaceArray` via the `Server` object.
    async fn read_namespace_array(&self) -> Result<Vec<Option<String>>> {
        self.get_object_node(&well_known::SERVER).await?;

        let results = self
            .read_attributes(&well_known::SERVER_NAMESPACE_ARRAY, &[AttributeId::Value])
            .await?;

        let data_value = &results[0];
        if !data_value.status.is_good() {
            return Err(Error::service(data_value.status));
        }

        data_value.value.as_string_array().ok_or_else(|| {
            Error::unexpected("Server NamespaceArray value is not a string array")
        })
    }

    // =========================================================================
    // Browse options
    // =========================================================================

    /// Returns a snapshot of the currently configured browse options.
    pub fn browse_options(&self) -> BrowseOptions {
        self.browse_options.read().clone()
    }

    /// Replaces the configured browse options.
    pub fn set_browse_options(&self, options: BrowseOptions) {
        *self.browse_options.write() = options;
    }

    /// Applies `f` to a builder seeded from the current options and installs
    /// the result. All four fields are copied into the seed.
    pub fn modify_browse_options(&self, f: impl FnOnce(&mut BrowseOptionsBuilder)) {
        let mut guard = self.browse_options.write();
        let updated = guard.copy(f);
        *guard = updated;
    }

    /// The cache hit/miss counters.
    pub fn cache_stats(&self) -> &CacheStats {
        self.cache.stats()
    }

    // =========================================================================
    // Materialization
    // =========================================================================

    /// Resolves a node without prior knowledge of its class.
    async fn create_node(&self, node_id: &NodeId) -> Result<UaNode> {
        let base_values = self.read_attributes(node_id, &BASE_ATTRIBUTES).await?;
        self.create_node_from_base_attributes(node_id, base_values).await
    }

    /// Dispatches on the node class found in the base attributes and
    /// completes the class-specific read.
    async fn create_node_from_base_attributes(
        &self,
        node_id: &NodeId,
        base_values: Vec<DataValue>,
    ) -> Result<UaNode> {
        let node_class = base_values
            .get(1)
            .and_then(|data_value| data_value.value.as_i32())
            .and_then(NodeClass::from_value)
            .ok_or_else(|| Error::node_class_invalid(node_id))?;

        tracing::debug!(node_id = %node_id, node_class = %node_class, "materializing node");

        let node = match node_class {
            NodeClass::Object => {
                let (remaining, type_definition_id) = tokio::join!(
                    self.read_remaining(node_id, NodeClass::Object),
                    self.read_type_definition(node_id),
                );

                let values = concat(base_values, remaining?);
                UaNode::Object(self.new_object_node(node_id, &type_definition_id?, &values)?)
            }
            NodeClass::Variable => {
                let (remaining, type_definition_id) = tokio::join!(
                    self.read_remaining(node_id, NodeClass::Variable),
                    self.read_type_definition(node_id),
                );

                let values = concat(base_values, remaining?);
                UaNode::Variable(self.new_variable_node(node_id, &type_definition_id?, &values)?)
            }
            NodeClass::Method => {
                let values = concat(base_values, self.read_remaining(node_id, node_class).await?);
                UaNode::Method(MethodNode::from_attribute_values(node_id, &values)?)
            }
            NodeClass::View => {
                let values = concat(base_values, self.read_remaining(node_id, node_class).await?);
                UaNode::View(ViewNode::from_attribute_values(node_id, &values)?)
            }
            NodeClass::ObjectType => {
                let values = concat(base_values, self.read_remaining(node_id, node_class).await?);
                UaNode::ObjectType(ObjectTypeNode::from_attribute_values(node_id, &values)?)
            }
            NodeClass::VariableType => {
                let values = concat(base_values, self.read_remaining(node_id, node_class).await?);
                UaNode::VariableType(VariableTypeNode::from_attribute_values(node_id, &values)?)
            }
            NodeClass::DataType => {
                let values = concat(base_values, self.read_remaining(node_id, node_class).await?);
                UaNode::DataType(DataTypeNode::from_attribute_values(node_id, &values)?)
            }
            NodeClass::ReferenceType => {
                let values = concat(base_values, self.read_remaining(node_id, node_class).await?);
                UaNode::ReferenceType(ReferenceTypeNode::from_attribute_values(node_id, &values)?)
            }
        };

        self.cache.put(node.node_id().clone(), node.clone());

        Ok(node)
    }

    /// Builds an Object record, consulting the object type registry.
    fn new_object_node(
        &self,
        node_id: &NodeId,
        type_definition_id: &NodeId,
        values: &[DataValue],
    ) -> Result<ObjectNode> {
        let (base, event_notifier) = ObjectNode::extract_attributes(node_id, values)?;

        let node = match self
            .client
            .object_type_manager()
            .get_node_constructor(type_definition_id)
        {
            Some(constructor) => constructor(&self.client, base, event_notifier),
            None => ObjectNode::new(base, event_notifier),
        };

        Ok(node)
    }

    /// Builds a Variable record, consulting the variable type registry.
    fn new_variable_node(
        &self,
        node_id: &NodeId,
        type_definition_id: &NodeId,
        values: &[DataValue],
    ) -> Result<VariableNode> {
        let (base, attributes) = VariableNode::extract_attributes(node_id, values)?;

        let node = match self
            .client
            .variable_type_manager()
            .get_node_constructor(type_definition_id)
        {
            Some(constructor) => constructor(&self.client, base, attributes),
            None => VariableNode::new(base, attributes),
        };

        Ok(node)
    }

    // =========================================================================
    // Service helpers
    // =========================================================================

    /// Reads `attributes` of `node_id` in order.
    async fn read_attributes(
        &self,
        node_id: &NodeId,
        attributes: &[AttributeId],
    ) -> Result<Vec<DataValue>> {
        let nodes_to_read = attributes
            .iter()
            .map(|&attribute_id| ReadValueId::new(node_id.clone(), attribute_id))
            .collect();

        let response = self
            .client
            .read(0.0, TimestampsToReturn::Neither, nodes_to_read)
            .await?;

        if response.results.len() != attributes.len() {
            return Err(Error::unexpected(format!(
                "read of node '{}' returned {} results for {} attributes",
                node_id,
                response.results.len(),
                attributes.len()
            )));
        }

        Ok(response.results)
    }

    /// Reads the class-specific attributes beyond the base prefix.
    async fn read_remaining(&self, node_id: &NodeId, node_class: NodeClass) -> Result<Vec<DataValue>> {
        self.read_attributes(node_id, attribute::remaining_attributes_for(node_class))
            .await
    }

    /// Discovers the type definition of `node_id` with a single-reference
    /// browse.
    ///
    /// A bad browse status or an unresolvable target degrades to
    /// [`NodeId::null`]; the caller then uses the default constructor.
    async fn read_type_definition(&self, node_id: &NodeId) -> Result<NodeId> {
        let description = BrowseDescription {
            node_id: node_id.clone(),
            browse_direction: BrowseDirection::Forward,
            reference_type_id: well_known::HAS_TYPE_DEFINITION,
            include_subtypes: false,
            node_class_mask: NodeClass::mask_of([NodeClass::ObjectType, NodeClass::VariableType]),
            result_mask: BrowseResultMask::All,
        };

        let result = self.client.browse(description).await?;

        if !result.status_code.is_good() {
            tracing::debug!(
                node_id = %node_id,
                status = %result.status_code,
                "type definition browse failed, falling back to the default constructor"
            );
            return Ok(NodeId::null());
        }

        let type_definition_id = result
            .references
            .iter()
            .find(|reference| reference.reference_type_id == well_known::HAS_TYPE_DEFINITION)
            .and_then(|reference| {
                self.client
                    .namespace_table()
                    .read(|table| reference.node_id.local(table))
            })
            .unwrap_or_else(NodeId::null);

        Ok(type_definition_id)
    }
}

impl fmt::Debug for AddressSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressSpace")
            .field("cached_nodes", &self.cache.len())
            .field("browse_options", &*self.browse_options.read())
            .finish()
    }
}

/// Concatenates the base attribute values with the class-specific remainder.
fn concat(mut base_values: Vec<DataValue>, remaining: Vec<DataValue>) -> Vec<DataValue> {
    base_values.extend(remaining);
    base_values
}
