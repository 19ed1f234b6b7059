// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # uascope-types
//!
//! Wire-level OPC UA value types shared across the uascope workspace.
//!
//! This crate provides the plain data types an OPC UA client manipulates
//! when resolving and browsing an address space:
//!
//! - **Identifiers**: [`NodeId`], [`ExpandedNodeId`], [`NamespaceTable`]
//! - **Names**: [`QualifiedName`], [`LocalizedText`]
//! - **Values**: [`Variant`], [`DataValue`], [`StatusCode`]
//! - **Model**: [`NodeClass`], [`AttributeId`] and the per-class attribute catalog
//! - **Services**: Read and Browse request/response structures
//! - **Well-known nodes**: the namespace-zero identifiers the client relies on
//!
//! Everything here is value-typed: equality and hashing are structural,
//! and nothing performs I/O.
//!
//! # Examples
//!
//! ```
//! use uascope_types::{NodeId, NodeClass, attribute};
//!
//! let node_id: NodeId = "ns=2;s=Machine.Temperature".parse().unwrap();
//! assert_eq!(node_id.namespace_index, 2);
//!
//! let attrs = attribute::attributes_for(NodeClass::Variable);
//! assert_eq!(attrs.len(), 15);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod attribute;
pub mod expanded;
pub mod namespace;
pub mod node_class;
pub mod node_id;
pub mod service;
pub mod status;
pub mod text;
pub mod variant;
pub mod well_known;

pub use attribute::{AttributeId, BASE_ATTRIBUTES};
pub use expanded::{ExpandedNodeId, NamespaceRef};
pub use namespace::{NamespaceTable, SharedNamespaceTable, OPC_UA_NAMESPACE_URI};
pub use node_class::NodeClass;
pub use node_id::{NodeId, NodeIdParseError, NodeIdentifier};
pub use service::{
    BrowseDescription, BrowseDirection, BrowseResult, BrowseResultMask, ReadResponse, ReadValueId,
    ReferenceDescription, TimestampsToReturn,
};
pub use status::StatusCode;
pub use text::{LocalizedText, QualifiedName};
pub use variant::{DataValue, Variant};
