// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The client capability consumed by the address space.
//!
//! [`UaClient`] is the boundary to the session layer: an established OPC UA
//! session able to execute Read and Browse, the namespace table it shares
//! with the server, and the two registries that let applications substitute
//! their own node constructors per type definition.
//!
//! The address space never retries through this trait and never encodes
//! anything; continuation points, chunking, and reconnects are all the
//! implementor's concern. `browse` must return the concatenation of every
//! result page in server order.

use std::sync::Arc;

use async_trait::async_trait;

use uascope_types::{
    BrowseDescription, BrowseResult, ReadResponse, ReadValueId, SharedNamespaceTable,
    TimestampsToReturn,
};

use crate::error::Result;
use crate::registry::{ObjectTypeManager, VariableTypeManager};

/// Shared handle to a [`UaClient`] implementation.
pub type SharedClient = Arc<dyn UaClient>;

/// An established OPC UA session as seen by the address space.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the address space issues service
/// calls from concurrently polled futures.
#[async_trait]
pub trait UaClient: Send + Sync {
    /// Executes a Read service call.
    ///
    /// The response carries one `DataValue` per entry of `nodes_to_read`, in
    /// the same order. The address space always passes `max_age = 0.0` and
    /// [`TimestampsToReturn::Neither`].
    async fn read(
        &self,
        max_age: f64,
        timestamps: TimestampsToReturn,
        nodes_to_read: Vec<ReadValueId>,
    ) -> Result<ReadResponse>;

    /// Executes a Browse service call, following continuation points until
    /// the result is complete.
    async fn browse(&self, description: BrowseDescription) -> Result<BrowseResult>;

    /// The namespace table shared with the server.
    fn namespace_table(&self) -> &SharedNamespaceTable;

    /// Registry of object node constructors keyed by type definition.
    fn object_type_manager(&self) -> &ObjectTypeManager;

    /// Registry of variable node constructors keyed by type definition.
    fn variable_type_manager(&self) -> &VariableTypeManager;
}
