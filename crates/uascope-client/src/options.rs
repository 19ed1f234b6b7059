// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Browse options.
//!
//! [`BrowseOptions`] is an immutable value describing how
//! [`AddressSpace::browse_node`](crate::AddressSpace::browse_node) filters
//! references. Mutation goes through a builder, either detached
//! ([`BrowseOptions::copy`]) or installed on the resolver
//! ([`AddressSpace::modify_browse_options`](crate::AddressSpace::modify_browse_options)).
//! The builder seed copies all four fields, direction included.

use serde::{Deserialize, Serialize};

use uascope_types::{well_known, BrowseDirection, NodeClass, NodeId};

// =============================================================================
// BrowseOptions
// =============================================================================

/// Immutable configuration for a browse.
///
/// # Examples
///
/// ```
/// use uascope_client::BrowseOptions;
/// use uascope_types::{BrowseDirection, NodeClass};
///
/// let options = BrowseOptions::default().copy(|builder| {
///     builder
///         .direction(BrowseDirection::Inverse)
///         .node_classes([NodeClass::Object, NodeClass::Variable]);
/// });
///
/// assert_eq!(options.direction, BrowseDirection::Inverse);
/// assert_eq!(options.node_class_mask, 0x03);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowseOptions {
    /// Traversal direction.
    pub direction: BrowseDirection,

    /// Reference type to follow.
    pub reference_type_id: NodeId,

    /// Whether subtypes of the reference type are followed too.
    pub include_subtypes: bool,

    /// Bitmask of node classes to return.
    pub node_class_mask: u32,
}

impl Default for BrowseOptions {
    fn default() -> Self {
        Self {
            direction: BrowseDirection::Forward,
            reference_type_id: well_known::HIERARCHICAL_REFERENCES,
            include_subtypes: true,
            node_class_mask: NodeClass::ALL_MASK,
        }
    }
}

impl BrowseOptions {
    /// Creates options with the defaults: forward over hierarchical
    /// references, subtypes included, all node classes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder seeded with the defaults.
    pub fn builder() -> BrowseOptionsBuilder {
        BrowseOptionsBuilder::default()
    }

    /// Returns a copy with the mutations `f` applies to a builder seeded
    /// from `self`.
    pub fn copy(&self, f: impl FnOnce(&mut BrowseOptionsBuilder)) -> BrowseOptions {
        let mut builder = self.to_builder();
        f(&mut builder);
        builder.build()
    }

    fn to_builder(&self) -> BrowseOptionsBuilder {
        BrowseOptionsBuilder {
            direction: self.direction,
            reference_type_id: self.reference_type_id.clone(),
            include_subtypes: self.include_subtypes,
            node_class_mask: self.node_class_mask,
        }
    }
}

// =============================================================================
// BrowseOptionsBuilder
// =============================================================================

/// Builder for [`BrowseOptions`].
///
/// Setters mutate in place and chain, so the builder works both stand-alone
/// and inside the mutator closures the resolver hands out.
#[derive(Debug, Clone)]
pub struct BrowseOptionsBuilder {
    direction: BrowseDirection,
    reference_type_id: NodeId,
    include_subtypes: bool,
    node_class_mask: u32,
}

impl Default for BrowseOptionsBuilder {
    fn default() -> Self {
        BrowseOptions::default().to_builder()
    }
}

impl BrowseOptionsBuilder {
    /// Sets the traversal direction.
    pub fn direction(&mut self, direction: BrowseDirection) -> &mut Self {
        self.direction = direction;
        self
    }

    /// Sets the reference type to follow.
    pub fn reference_type(&mut self, reference_type_id: NodeId) -> &mut Self {
        self.reference_type_id = reference_type_id;
        self
    }

    /// Sets whether subtypes of the reference type are followed.
    pub fn include_subtypes(&mut self, include_subtypes: bool) -> &mut Self {
        self.include_subtypes = include_subtypes;
        self
    }

    /// Sets the node class mask directly.
    pub fn node_class_mask(&mut self, node_class_mask: u32) -> &mut Self {
        self.node_class_mask = node_class_mask;
        self
    }

    /// Sets the node class mask from a set of classes.
    pub fn node_classes(&mut self, classes: impl IntoIterator<Item = NodeClass>) -> &mut Self {
        self.node_class_mask = NodeClass::mask_of(classes);
        self
    }

    /// Builds the immutable options value.
    pub fn build(&self) -> BrowseOptions {
        BrowseOptions {
            direction: self.direction,
            reference_type_id: self.reference_type_id.clone(),
            include_subtypes: self.include_subtypes,
            node_class_mask: self.node_class_mask,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = BrowseOptions::default();
        assert_eq!(options.direction, BrowseDirection::Forward);
        assert_eq!(options.reference_type_id, well_known::HIERARCHICAL_REFERENCES);
        assert!(options.include_subtypes);
        assert_eq!(options.node_class_mask, 0xFF);
    }

    #[test]
    fn test_copy_preserves_unmodified_fields() {
        let original = BrowseOptions::default().copy(|builder| {
            builder
                .direction(BrowseDirection::Both)
                .reference_type(well_known::HAS_COMPONENT);
        });

        let copied = original.copy(|builder| {
            builder.include_subtypes(false);
        });

        // Direction must survive the round-trip through the builder seed.
        assert_eq!(copied.direction, BrowseDirection::Both);
        assert_eq!(copied.reference_type_id, well_known::HAS_COMPONENT);
        assert!(!copied.include_subtypes);
        assert_eq!(copied.node_class_mask, 0xFF);
    }

    #[test]
    fn test_copy_does_not_touch_original() {
        let original = BrowseOptions::default();
        let _ = original.copy(|builder| {
            builder.node_class_mask(0x03);
        });

        assert_eq!(original.node_class_mask, 0xFF);
    }

    #[test]
    fn test_node_classes_setter() {
        let options = BrowseOptions::default().copy(|builder| {
            builder.node_classes([NodeClass::ObjectType, NodeClass::VariableType]);
        });

        assert_eq!(options.node_class_mask, 8 | 16);
    }
}
