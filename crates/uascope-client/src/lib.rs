// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # uascope-client
//!
//! A caching, typed, client-side view over an OPC UA server's address space.
//!
//! Given an established session exposed through the [`UaClient`] trait, the
//! [`AddressSpace`] resolves node ids to fully populated [`UaNode`] records,
//! materializes each node as the correct variant for its class and type
//! definition, and navigates the model by browsing references with
//! configurable filters.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        AddressSpace                             │
//! │         (resolve by id, browse, localize, cache)                │
//! └─────────────────────────────────────────────────────────────────┘
//!           │                  │                    │
//!           ▼                  ▼                    ▼
//!     NodeCache          BrowseOptions      ObjectTypeManager
//!   (bounded, TTL)      (immutable value)   VariableTypeManager
//!           │                                       │
//!           └──────────────────┬────────────────────┘
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       UaClient (trait)                          │
//! │        (Read, Browse, namespace table, registries)              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use uascope_client::AddressSpace;
//! use uascope_types::well_known;
//!
//! let space = AddressSpace::new(client);
//!
//! // Resolve a node; the class-appropriate variant comes back.
//! let objects = space.get_node(&well_known::OBJECTS_FOLDER).await?;
//!
//! // Browse its hierarchical references; each target resolves in parallel.
//! for node in space.browse(&objects).await? {
//!     println!("{} ({})", node.browse_name(), node.node_class());
//! }
//! ```
//!
//! Records are immutable values and every resolved node lands in a bounded,
//! write-time-expiring cache. Dropping a returned future does not cancel the
//! in-flight service calls; a publication from an abandoned resolve is still
//! valid and benefits later callers.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod node;
pub mod options;
pub mod registry;
pub mod space;

pub use cache::{CacheStats, NodeCache};
pub use client::{SharedClient, UaClient};
pub use config::{AddressSpaceConfig, AddressSpaceConfigBuilder};
pub use error::{BoxedError, Error, Result};
pub use node::{
    BaseAttributes, DataTypeNode, MethodNode, ObjectNode, ObjectTypeNode, ReferenceTypeNode,
    UaNode, VariableAttributes, VariableNode, VariableTypeNode, ViewNode,
};
pub use options::{BrowseOptions, BrowseOptionsBuilder};
pub use registry::{
    ObjectNodeConstructor, ObjectTypeManager, VariableNodeConstructor, VariableTypeManager,
};
pub use space::AddressSpace;
