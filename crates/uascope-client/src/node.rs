// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Typed node records.
//!
//! [`UaNode`] is a sum type with one variant per [`NodeClass`]. Each variant
//! struct embeds the seven base attributes shared by every class and adds the
//! attributes OPC UA mandates for that class.
//!
//! Records are built from the attribute values of a Read response, extracted
//! by fixed index into the class attribute order defined in
//! [`uascope_types::attribute`]. Nullable attributes pass through as absent;
//! `NodeClass`, `BrowseName`, and `DisplayName` must be present — a null
//! there is a protocol violation and fails the construction.
//!
//! Records are plain immutable values: equality is structural, and a record
//! never changes after it is published to the cache.

use uascope_types::{
    DataValue, LocalizedText, NodeClass, NodeId, QualifiedName, Variant,
};

use crate::error::{Error, Result};

// =============================================================================
// BaseAttributes
// =============================================================================

/// The attributes common to all eight node classes.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseAttributes {
    /// The node's identifier.
    pub node_id: NodeId,

    /// The node's class; always equals the enclosing variant's class.
    pub node_class: NodeClass,

    /// The namespace-qualified programmatic name.
    pub browse_name: QualifiedName,

    /// The localized display name.
    pub display_name: LocalizedText,

    /// The localized description; null when the server supplied none.
    pub description: LocalizedText,

    /// Which attributes are writable.
    pub write_mask: u32,

    /// Which attributes are writable by the current user.
    pub user_write_mask: u32,
}

impl BaseAttributes {
    /// Extracts the base attributes from `values`, asserting the stored node
    /// class equals `expected`.
    ///
    /// `values` must follow the class attribute order; only indexes 1..=6 are
    /// consumed here (the NodeId attribute at index 0 is redundant with the
    /// id the caller resolved).
    pub fn extract(node_id: &NodeId, expected: NodeClass, values: &[DataValue]) -> Result<Self> {
        let node_class = variant_at(values, 1, node_id)?
            .as_i32()
            .and_then(NodeClass::from_value)
            .ok_or_else(|| {
                Error::unexpected(format!("node '{node_id}' has no usable NodeClass attribute"))
            })?;

        if node_class != expected {
            return Err(Error::unexpected(format!(
                "expected NodeClass::{expected}, got NodeClass::{node_class} for node '{node_id}'"
            )));
        }

        let browse_name = required_qualified_name(values, 2, node_id, "BrowseName")?;
        let display_name = required_localized_text(values, 3, node_id, "DisplayName")?;
        let description = localized_text_or_null(values, 4, node_id)?;
        let write_mask = u32_or(values, 5, 0, node_id)?;
        let user_write_mask = u32_or(values, 6, 0, node_id)?;

        Ok(Self {
            node_id: node_id.clone(),
            node_class,
            browse_name,
            display_name,
            description,
            write_mask,
            user_write_mask,
        })
    }
}

// =============================================================================
// Variant structs
// =============================================================================

/// An Object node.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectNode {
    /// The base attributes.
    pub base: BaseAttributes,

    /// Event notifier bits.
    pub event_notifier: u8,
}

impl ObjectNode {
    /// Creates an object node from its parts.
    pub fn new(base: BaseAttributes, event_notifier: u8) -> Self {
        Self {
            base,
            event_notifier,
        }
    }

    /// Builds an object node from a full Object attribute read.
    pub fn from_attribute_values(node_id: &NodeId, values: &[DataValue]) -> Result<Self> {
        let (base, event_notifier) = Self::extract_attributes(node_id, values)?;
        Ok(Self::new(base, event_notifier))
    }

    /// Splits a full Object attribute read into constructor arguments.
    pub fn extract_attributes(
        node_id: &NodeId,
        values: &[DataValue],
    ) -> Result<(BaseAttributes, u8)> {
        let base = BaseAttributes::extract(node_id, NodeClass::Object, values)?;
        let event_notifier = u8_or(values, 7, 0, node_id)?;
        Ok((base, event_notifier))
    }
}

/// The class-specific attributes of a Variable node.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableAttributes {
    /// The current value.
    pub value: DataValue,

    /// Data type of the value.
    pub data_type: NodeId,

    /// Value rank: scalar, array, or matrix.
    pub value_rank: i32,

    /// Array dimensions, when the value is an array.
    pub array_dimensions: Option<Vec<u32>>,

    /// Access level bits.
    pub access_level: u8,

    /// Access level bits for the current user.
    pub user_access_level: u8,

    /// Minimum sampling interval in milliseconds supported by the server.
    pub minimum_sampling_interval: Option<f64>,

    /// Whether the server historizes the value.
    pub historizing: bool,
}

impl VariableAttributes {
    /// Extracts the Variable-specific attributes (indexes 7..=14).
    pub fn extract(node_id: &NodeId, values: &[DataValue]) -> Result<Self> {
        Ok(Self {
            value: values
                .get(7)
                .cloned()
                .ok_or_else(|| missing_value(node_id, 7))?,
            data_type: node_id_or_null(values, 8, node_id)?,
            value_rank: i32_or(values, 9, -1, node_id)?,
            array_dimensions: u32_array_opt(values, 10, node_id)?,
            access_level: u8_or(values, 11, 0, node_id)?,
            user_access_level: u8_or(values, 12, 0, node_id)?,
            minimum_sampling_interval: f64_opt(values, 13, node_id)?,
            historizing: bool_or(values, 14, false, node_id)?,
        })
    }
}

/// A Variable node.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableNode {
    /// The base attributes.
    pub base: BaseAttributes,

    /// The current value.
    pub value: DataValue,

    /// Data type of the value.
    pub data_type: NodeId,

    /// Value rank: scalar, array, or matrix.
    pub value_rank: i32,

    /// Array dimensions, when the value is an array.
    pub array_dimensions: Option<Vec<u32>>,

    /// Access level bits.
    pub access_level: u8,

    /// Access level bits for the current user.
    pub user_access_level: u8,

    /// Minimum sampling interval in milliseconds supported by the server.
    pub minimum_sampling_interval: Option<f64>,

    /// Whether the server historizes the value.
    pub historizing: bool,
}

impl VariableNode {
    /// Creates a variable node from its parts.
    pub fn new(base: BaseAttributes, attributes: VariableAttributes) -> Self {
        Self {
            base,
            value: attributes.value,
            data_type: attributes.data_type,
            value_rank: attributes.value_rank,
            array_dimensions: attributes.array_dimensions,
            access_level: attributes.access_level,
            user_access_level: attributes.user_access_level,
            minimum_sampling_interval: attributes.minimum_sampling_interval,
            historizing: attributes.historizing,
        }
    }

    /// Builds a variable node from a full Variable attribute read.
    pub fn from_attribute_values(node_id: &NodeId, values: &[DataValue]) -> Result<Self> {
        let (base, attributes) = Self::extract_attributes(node_id, values)?;
        Ok(Self::new(base, attributes))
    }

    /// Splits a full Variable attribute read into constructor arguments.
    pub fn extract_attributes(
        node_id: &NodeId,
        values: &[DataValue],
    ) -> Result<(BaseAttributes, VariableAttributes)> {
        let base = BaseAttributes::extract(node_id, NodeClass::Variable, values)?;
        let attributes = VariableAttributes::extract(node_id, values)?;
        Ok((base, attributes))
    }
}

/// A Method node.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodNode {
    /// The base attributes.
    pub base: BaseAttributes,

    /// Whether the method is currently executable.
    pub executable: bool,

    /// Whether the method is executable by the current user.
    pub user_executable: bool,
}

impl MethodNode {
    /// Builds a method node from a full Method attribute read.
    pub fn from_attribute_values(node_id: &NodeId, values: &[DataValue]) -> Result<Self> {
        Ok(Self {
            base: BaseAttributes::extract(node_id, NodeClass::Method, values)?,
            executable: bool_or(values, 7, false, node_id)?,
            user_executable: bool_or(values, 8, false, node_id)?,
        })
    }
}

/// A View node.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewNode {
    /// The base attributes.
    pub base: BaseAttributes,

    /// Whether the view is loop-free.
    pub contains_no_loops: bool,

    /// Event notifier bits.
    pub event_notifier: u8,
}

impl ViewNode {
    /// Builds a view node from a full View attribute read.
    pub fn from_attribute_values(node_id: &NodeId, values: &[DataValue]) -> Result<Self> {
        Ok(Self {
            base: BaseAttributes::extract(node_id, NodeClass::View, values)?,
            contains_no_loops: bool_or(values, 7, false, node_id)?,
            event_notifier: u8_or(values, 8, 0, node_id)?,
        })
    }
}

/// An ObjectType node.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectTypeNode {
    /// The base attributes.
    pub base: BaseAttributes,

    /// Whether the type is abstract.
    pub is_abstract: bool,
}

impl ObjectTypeNode {
    /// Builds an object type node from a full ObjectType attribute read.
    pub fn from_attribute_values(node_id: &NodeId, values: &[DataValue]) -> Result<Self> {
        Ok(Self {
            base: BaseAttributes::extract(node_id, NodeClass::ObjectType, values)?,
            is_abstract: bool_or(values, 7, false, node_id)?,
        })
    }
}

/// A VariableType node.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableTypeNode {
    /// The base attributes.
    pub base: BaseAttributes,

    /// The type's default value.
    pub value: DataValue,

    /// Data type of the value.
    pub data_type: NodeId,

    /// Value rank: scalar, array, or matrix.
    pub value_rank: i32,

    /// Array dimensions, when the value is an array.
    pub array_dimensions: Option<Vec<u32>>,

    /// Whether the type is abstract.
    pub is_abstract: bool,
}

impl VariableTypeNode {
    /// Builds a variable type node from a full VariableType attribute read.
    pub fn from_attribute_values(node_id: &NodeId, values: &[DataValue]) -> Result<Self> {
        Ok(Self {
            base: BaseAttributes::extract(node_id, NodeClass::VariableType, values)?,
            value: values
                .get(7)
                .cloned()
                .ok_or_else(|| missing_value(node_id, 7))?,
            data_type: node_id_or_null(values, 8, node_id)?,
            value_rank: i32_or(values, 9, -1, node_id)?,
            array_dimensions: u32_array_opt(values, 10, node_id)?,
            is_abstract: bool_or(values, 11, false, node_id)?,
        })
    }
}

/// A DataType node.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTypeNode {
    /// The base attributes.
    pub base: BaseAttributes,

    /// Whether the type is abstract.
    pub is_abstract: bool,
}

impl DataTypeNode {
    /// Builds a data type node from a full DataType attribute read.
    pub fn from_attribute_values(node_id: &NodeId, values: &[DataValue]) -> Result<Self> {
        Ok(Self {
            base: BaseAttributes::extract(node_id, NodeClass::DataType, values)?,
            is_abstract: bool_or(values, 7, false, node_id)?,
        })
    }
}

/// A ReferenceType node.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTypeNode {
    /// The base attributes.
    pub base: BaseAttributes,

    /// Whether the type is abstract.
    pub is_abstract: bool,

    /// Whether the reference reads the same in both directions.
    pub symmetric: bool,

    /// Name of the reference when followed inverse.
    pub inverse_name: LocalizedText,
}

impl ReferenceTypeNode {
    /// Builds a reference type node from a full ReferenceType attribute read.
    pub fn from_attribute_values(node_id: &NodeId, values: &[DataValue]) -> Result<Self> {
        Ok(Self {
            base: BaseAttributes::extract(node_id, NodeClass::ReferenceType, values)?,
            is_abstract: bool_or(values, 7, false, node_id)?,
            symmetric: bool_or(values, 8, false, node_id)?,
            inverse_name: localized_text_or_null(values, 9, node_id)?,
        })
    }
}

// =============================================================================
// UaNode
// =============================================================================

/// A typed node record, one variant per node class.
#[derive(Debug, Clone, PartialEq)]
pub enum UaNode {
    /// An Object node.
    Object(ObjectNode),

    /// A Variable node.
    Variable(VariableNode),

    /// A Method node.
    Method(MethodNode),

    /// A View node.
    View(ViewNode),

    /// An ObjectType node.
    ObjectType(ObjectTypeNode),

    /// A VariableType node.
    VariableType(VariableTypeNode),

    /// A DataType node.
    DataType(DataTypeNode),

    /// A ReferenceType node.
    ReferenceType(ReferenceTypeNode),
}

impl UaNode {
    /// The base attributes, regardless of variant.
    pub fn base(&self) -> &BaseAttributes {
        match self {
            Self::Object(node) => &node.base,
            Self::Variable(node) => &node.base,
            Self::Method(node) => &node.base,
            Self::View(node) => &node.base,
            Self::ObjectType(node) => &node.base,
            Self::VariableType(node) => &node.base,
            Self::DataType(node) => &node.base,
            Self::ReferenceType(node) => &node.base,
        }
    }

    /// The node's identifier.
    pub fn node_id(&self) -> &NodeId {
        &self.base().node_id
    }

    /// The node class corresponding to the variant tag.
    pub const fn node_class(&self) -> NodeClass {
        match self {
            Self::Object(_) => NodeClass::Object,
            Self::Variable(_) => NodeClass::Variable,
            Self::Method(_) => NodeClass::Method,
            Self::View(_) => NodeClass::View,
            Self::ObjectType(_) => NodeClass::ObjectType,
            Self::VariableType(_) => NodeClass::VariableType,
            Self::DataType(_) => NodeClass::DataType,
            Self::ReferenceType(_) => NodeClass::ReferenceType,
        }
    }

    /// The browse name.
    pub fn browse_name(&self) -> &QualifiedName {
        &self.base().browse_name
    }

    /// The display name.
    pub fn display_name(&self) -> &LocalizedText {
        &self.base().display_name
    }

    /// Borrows the Object record, if this is one.
    pub fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            Self::Object(node) => Some(node),
            _ => None,
        }
    }

    /// Borrows the Variable record, if this is one.
    pub fn as_variable(&self) -> Option<&VariableNode> {
        match self {
            Self::Variable(node) => Some(node),
            _ => None,
        }
    }
}

// =============================================================================
// Extraction helpers
// =============================================================================

fn missing_value(node_id: &NodeId, index: usize) -> Error {
    Error::unexpected(format!(
        "read response for node '{node_id}' is missing the attribute value at index {index}"
    ))
}

fn wrong_type(node_id: &NodeId, index: usize, expected: &str, actual: &Variant) -> Error {
    Error::unexpected(format!(
        "attribute at index {index} of node '{node_id}' is not {expected}: {actual:?}"
    ))
}

fn variant_at<'a>(values: &'a [DataValue], index: usize, node_id: &NodeId) -> Result<&'a Variant> {
    values
        .get(index)
        .map(|data_value| &data_value.value)
        .ok_or_else(|| missing_value(node_id, index))
}

fn required_qualified_name(
    values: &[DataValue],
    index: usize,
    node_id: &NodeId,
    attribute: &str,
) -> Result<QualifiedName> {
    let variant = variant_at(values, index, node_id)?;
    variant.as_qualified_name().cloned().ok_or_else(|| {
        Error::unexpected(format!(
            "node '{node_id}' has a null or malformed {attribute} attribute"
        ))
    })
}

fn required_localized_text(
    values: &[DataValue],
    index: usize,
    node_id: &NodeId,
    attribute: &str,
) -> Result<LocalizedText> {
    let variant = variant_at(values, index, node_id)?;
    variant.as_localized_text().cloned().ok_or_else(|| {
        Error::unexpected(format!(
            "node '{node_id}' has a null or malformed {attribute} attribute"
        ))
    })
}

fn localized_text_or_null(
    values: &[DataValue],
    index: usize,
    node_id: &NodeId,
) -> Result<LocalizedText> {
    match variant_at(values, index, node_id)? {
        Variant::Null => Ok(LocalizedText::null()),
        Variant::LocalizedText(text) => Ok(text.clone()),
        other => Err(wrong_type(node_id, index, "LocalizedText", other)),
    }
}

fn node_id_or_null(values: &[DataValue], index: usize, node_id: &NodeId) -> Result<NodeId> {
    match variant_at(values, index, node_id)? {
        Variant::Null => Ok(NodeId::null()),
        Variant::NodeId(id) => Ok(id.clone()),
        other => Err(wrong_type(node_id, index, "NodeId", other)),
    }
}

fn bool_or(values: &[DataValue], index: usize, default: bool, node_id: &NodeId) -> Result<bool> {
    match variant_at(values, index, node_id)? {
        Variant::Null => Ok(default),
        variant => variant
            .as_bool()
            .ok_or_else(|| wrong_type(node_id, index, "Boolean", variant)),
    }
}

fn u8_or(values: &[DataValue], index: usize, default: u8, node_id: &NodeId) -> Result<u8> {
    match variant_at(values, index, node_id)? {
        Variant::Null => Ok(default),
        variant => variant
            .as_u8()
            .ok_or_else(|| wrong_type(node_id, index, "Byte", variant)),
    }
}

fn u32_or(values: &[DataValue], index: usize, default: u32, node_id: &NodeId) -> Result<u32> {
    match variant_at(values, index, node_id)? {
        Variant::Null => Ok(default),
        variant => variant
            .as_u32()
            .ok_or_else(|| wrong_type(node_id, index, "UInt32", variant)),
    }
}

fn i32_or(values: &[DataValue], index: usize, default: i32, node_id: &NodeId) -> Result<i32> {
    match variant_at(values, index, node_id)? {
        Variant::Null => Ok(default),
        variant => variant
            .as_i32()
            .ok_or_else(|| wrong_type(node_id, index, "Int32", variant)),
    }
}

fn f64_opt(values: &[DataValue], index: usize, node_id: &NodeId) -> Result<Option<f64>> {
    match variant_at(values, index, node_id)? {
        Variant::Null => Ok(None),
        variant => variant
            .as_f64()
            .map(Some)
            .ok_or_else(|| wrong_type(node_id, index, "Double", variant)),
    }
}

fn u32_array_opt(
    values: &[DataValue],
    index: usize,
    node_id: &NodeId,
) -> Result<Option<Vec<u32>>> {
    match variant_at(values, index, node_id)? {
        Variant::Null => Ok(None),
        variant => variant
            .as_u32_array()
            .map(Some)
            .ok_or_else(|| wrong_type(node_id, index, "a UInt32 array", variant)),
    }
}

// =============================================================================
// Tests
// =============================================================================
