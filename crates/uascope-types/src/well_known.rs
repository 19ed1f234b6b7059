// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Well-known namespace-zero node identifiers (OPC UA Part 5).

use crate::node_id::NodeId;

/// References (abstract base reference type) - i=31.
pub const REFERENCES: NodeId = NodeId::numeric(0, 31);

/// HierarchicalReferences (abstract) - i=33.
pub const HIERARCHICAL_REFERENCES: NodeId = NodeId::numeric(0, 33);

/// HasChild (abstract) - i=34.
pub const HAS_CHILD: NodeId = NodeId::numeric(0, 34);

/// Organizes - i=35.
pub const ORGANIZES: NodeId = NodeId::numeric(0, 35);

/// HasTypeDefinition - i=40.
pub const HAS_TYPE_DEFINITION: NodeId = NodeId::numeric(0, 40);

/// HasSubtype - i=45.
pub const HAS_SUBTYPE: NodeId = NodeId::numeric(0, 45);

/// HasProperty - i=46.
pub const HAS_PROPERTY: NodeId = NodeId::numeric(0, 46);

/// HasComponent - i=47.
pub const HAS_COMPONENT: NodeId = NodeId::numeric(0, 47);

/// BaseObjectType - i=58.
pub const BASE_OBJECT_TYPE: NodeId = NodeId::numeric(0, 58);

/// FolderType - i=61.
pub const FOLDER_TYPE: NodeId = NodeId::numeric(0, 61);

/// BaseVariableType - i=62.
pub const BASE_VARIABLE_TYPE: NodeId = NodeId::numeric(0, 62);

/// BaseDataVariableType - i=63.
pub const BASE_DATA_VARIABLE_TYPE: NodeId = NodeId::numeric(0, 63);

/// PropertyType - i=68.
pub const PROPERTY_TYPE: NodeId = NodeId::numeric(0, 68);

/// Root folder - i=84.
pub const ROOT_FOLDER: NodeId = NodeId::numeric(0, 84);

/// Objects folder - i=85.
pub const OBJECTS_FOLDER: NodeId = NodeId::numeric(0, 85);

/// Types folder - i=86.
pub const TYPES_FOLDER: NodeId = NodeId::numeric(0, 86);

/// Views folder - i=87.
pub const VIEWS_FOLDER: NodeId = NodeId::numeric(0, 87);

/// Server object - i=2253.
pub const SERVER: NodeId = NodeId::numeric(0, 2253);

/// Server.NamespaceArray variable - i=2255.
pub const SERVER_NAMESPACE_ARRAY: NodeId = NodeId::numeric(0, 2255);
