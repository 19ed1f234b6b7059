// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Address space integration tests.
//!
//! These tests drive the full resolver against a programmable in-memory
//! [`UaClient`]: attribute tables back the Read service, keyed browse tables
//! back the Browse service, and call counters verify caching behavior.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use uascope_client::{
    AddressSpace, AddressSpaceConfig, Error, ObjectTypeManager, Result, UaClient, UaNode,
    VariableNode, VariableTypeManager,
};
use uascope_types::{
    well_known, AttributeId, BrowseDescription, BrowseResult, DataValue, ExpandedNodeId,
    LocalizedText, NodeClass, NodeId, NodeIdentifier, QualifiedName, ReadResponse, ReadValueId,
    ReferenceDescription, SharedNamespaceTable, StatusCode, TimestampsToReturn, Variant,
};

// =============================================================================
// Mock Client
// =============================================================================

/// An in-memory OPC UA client with programmable Read and Browse tables.
struct MockClient {
    attributes: RwLock<HashMap<(NodeId, AttributeId), DataValue>>,
    browse_results: RwLock<HashMap<(NodeId, NodeId), BrowseResult>>,
    read_count: AtomicU64,
    browse_count: AtomicU64,
    namespaces: SharedNamespaceTable,
    object_types: ObjectTypeManager,
    variable_types: VariableTypeManager,
}

impl MockClient {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            attributes: RwLock::new(HashMap::new()),
            browse_results: RwLock::new(HashMap::new()),
            read_count: AtomicU64::new(0),
            browse_count: AtomicU64::new(0),
            namespaces: SharedNamespaceTable::new(),
            object_types: ObjectTypeManager::new(),
            variable_types: VariableTypeManager::new(),
        })
    }

    fn reads(&self) -> u64 {
        self.read_count.load(Ordering::SeqCst)
    }

    fn browses(&self) -> u64 {
        self.browse_count.load(Ordering::SeqCst)
    }

    fn set_attribute(&self, node_id: &NodeId, attribute_id: AttributeId, value: Variant) {
        self.attributes
            .write()
            .unwrap()
            .insert((node_id.clone(), attribute_id), DataValue::new(value));
    }

    fn seed_base(&self, node_id: &NodeId, node_class: NodeClass, browse_name: QualifiedName) {
        self.set_attribute(node_id, AttributeId::NodeId, Variant::NodeId(node_id.clone()));
        self.set_attribute(
            node_id,
            AttributeId::NodeClass,
            Variant::Int32(node_class.value() as i32),
        );
        self.set_attribute(
            node_id,
            AttributeId::DisplayName,
            Variant::LocalizedText(LocalizedText::new(browse_name.name.clone())),
        );
        self.set_attribute(
            node_id,
            AttributeId::BrowseName,
            Variant::QualifiedName(browse_name),
        );
        self.set_attribute(node_id, AttributeId::WriteMask, Variant::UInt32(0));
        self.set_attribute(node_id, AttributeId::UserWriteMask, Variant::UInt32(0));
    }

    fn seed_object(&self, node_id: &NodeId, browse_name: QualifiedName, event_notifier: u8) {
        self.seed_base(node_id, NodeClass::Object, browse_name);
        self.set_attribute(
            node_id,
            AttributeId::EventNotifier,
            Variant::Byte(event_notifier),
        );
    }

    fn seed_variable(
        &self,
        node_id: &NodeId,
        browse_name: QualifiedName,
        value: Variant,
        data_type: NodeId,
        access_level: u8,
    ) {
        self.seed_base(node_id, NodeClass::Variable, browse_name);
        self.set_attribute(node_id, AttributeId::Value, value);
        self.set_attribute(node_id, AttributeId::DataType, Variant::NodeId(data_type));
        self.set_attribute(node_id, AttributeId::ValueRank, Variant::Int32(-1));
        self.set_attribute(node_id, AttributeId::AccessLevel, Variant::Byte(access_level));
        self.set_attribute(
            node_id,
            AttributeId::UserAccessLevel,
            Variant::Byte(access_level),
        );
        self.set_attribute(node_id, AttributeId::Historizing, Variant::Boolean(false));
    }

    fn seed_method(&self, node_id: &NodeId, browse_name: QualifiedName) {
        self.seed_base(node_id, NodeClass::Method, browse_name);
        self.set_attribute(node_id, AttributeId::Executable, Variant::Boolean(true));
        self.set_attribute(node_id, AttributeId::UserExecutable, Variant::Boolean(true));
    }

    fn set_browse_result(&self, node_id: &NodeId, reference_type_id: &NodeId, result: BrowseResult) {
        self.browse_results
            .write()
            .unwrap()
            .insert((node_id.clone(), reference_type_id.clone()), result);
    }

    fn set_type_definition(&self, node_id: &NodeId, type_definition_id: &NodeId) {
        let reference = ReferenceDescription {
            reference_type_id: well_known::HAS_TYPE_DEFINITION,
            is_forward: true,
            node_id: type_definition_id.to_expanded(),
            browse_name: QualifiedName::standard(""),
            display_name: LocalizedText::null(),
            node_class: NodeClass::ObjectType,
            type_definition: ExpandedNodeId::null(),
        };

        self.set_browse_result(
            node_id,
            &well_known::HAS_TYPE_DEFINITION,
            BrowseResult::good(vec![reference]),
        );
    }

    fn seed_namespace_array(&self, uris: &[&str]) {
        let array = Variant::Array(uris.iter().map(|uri| Variant::String((*uri).into())).collect());

        self.seed_object(&well_known::SERVER, QualifiedName::standard("Server"), 0);
        self.set_attribute(&well_known::SERVER_NAMESPACE_ARRAY, AttributeId::Value, array);
    }
}

#[async_trait]
impl UaClient for MockClient {
    async fn read(
        &self,
        _max_age: f64,
        _timestamps: TimestampsToReturn,
        nodes_to_read: Vec<ReadValueId>,
    ) -> Result<ReadResponse> {
        self.read_count.fetch_add(1, Ordering::SeqCst);

        let attributes = self.attributes.read().unwrap();
        let results = nodes_to_read
            .iter()
            .map(|read_value_id| {
                attributes
                    .get(&(read_value_id.node_id.clone(), read_value_id.attribute_id))
                    .cloned()
                    .unwrap_or_else(DataValue::null)
            })
            .collect();

        Ok(ReadResponse::new(results))
    }

    async fn browse(&self, description: BrowseDescription) -> Result<BrowseResult> {
        self.browse_count.fetch_add(1, Ordering::SeqCst);

        let key = (description.node_id, description.reference_type_id);
        Ok(self
            .browse_results
            .read()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| BrowseResult::bad(StatusCode::BAD_NODE_ID_UNKNOWN)))
    }

    fn namespace_table(&self) -> &SharedNamespaceTable {
        &self.namespaces
    }

    fn object_type_manager(&self) -> &ObjectTypeManager {
        &self.object_types
    }

    fn variable_type_manager(&self) -> &VariableTypeManager {
        &self.variable_types
    }
}

fn reference(
    node_id: &NodeId,
    browse_name: &str,
    node_class: NodeClass,
    type_definition: ExpandedNodeId,
) -> ReferenceDescription {
    ReferenceDescription {
        reference_type_id: well_known::ORGANIZES,
        is_forward: true,
        node_id: node_id.to_expanded(),
        browse_name: QualifiedName::from(browse_name),
        display_name: LocalizedText::new(browse_name),
        node_class,
        type_definition,
    }
}

// =============================================================================
// Resolution scenarios
// =============================================================================

#[tokio::test]
async fn cold_resolve_of_objects_folder_caches_the_record() {
    let client = MockClient::new();
    let objects = well_known::OBJECTS_FOLDER;

    client.seed_object(&objects, QualifiedName::standard("Objects"), 0);
    client.set_type_definition(&objects, &well_known::FOLDER_TYPE);

    let space = AddressSpace::new(client.clone());

    let node = space.get_node(&objects).await.unwrap();
    assert_eq!(node.node_id(), &objects);
    assert_eq!(node.node_class(), NodeClass::Object);
    assert_eq!(node.browse_name(), &QualifiedName::standard("Objects"));
    assert_eq!(node.as_object().unwrap().event_notifier, 0);

    // Base attributes + remaining attributes, plus one type definition browse.
    let reads_after_first = client.reads();
    let browses_after_first = client.browses();
    assert_eq!(reads_after_first, 2);
    assert_eq!(browses_after_first, 1);

    // The second resolve must be served entirely from the cache.
    let cached = space.get_node(&objects).await.unwrap();
    assert_eq!(cached, node);
    assert_eq!(client.reads(), reads_after_first);
    assert_eq!(client.browses(), browses_after_first);
}

#[tokio::test]
async fn resolved_record_upholds_id_and_class_invariants() {
    let client = MockClient::new();
    let node_id = NodeId::string(2, "Line1");

    client.seed_object(&node_id, QualifiedName::new(2, "Line1"), 1);
    client.set_type_definition(&node_id, &well_known::BASE_OBJECT_TYPE);

    let space = AddressSpace::new(client);
    let node = space.get_node(&node_id).await.unwrap();

    assert_eq!(node.node_id(), &node_id);
    assert_eq!(node.base().node_class, node.node_class());
}

#[tokio::test]
async fn failed_type_definition_browse_degrades_to_default_constructor() {
    let client = MockClient::new();
    let objects = well_known::OBJECTS_FOLDER;

    client.seed_object(&objects, QualifiedName::standard("Objects"), 0);
    client.set_browse_result(
        &objects,
        &well_known::HAS_TYPE_DEFINITION,
        BrowseResult::bad(StatusCode::BAD_SERVICE_UNSUPPORTED),
    );

    let space = AddressSpace::new(client);

    let node = space.get_node(&objects).await.unwrap();
    assert_eq!(node.node_class(), NodeClass::Object);
    assert_eq!(node.browse_name(), &QualifiedName::standard("Objects"));
}

#[tokio::test]
async fn registered_variable_constructor_builds_the_subtype() {
    let client = MockClient::new();
    let node_id = NodeId::string(1, "Temp");

    client.seed_variable(
        &node_id,
        QualifiedName::new(1, "Temp"),
        Variant::Double(21.5),
        NodeId::numeric(0, 11),
        3,
    );
    client.set_type_definition(&node_id, &well_known::BASE_DATA_VARIABLE_TYPE);

    let invocations = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&invocations);
    client.variable_types.register(
        well_known::BASE_DATA_VARIABLE_TYPE,
        Arc::new(move |_, base, attributes| {
            counter.fetch_add(1, Ordering::SeqCst);
            VariableNode::new(base, attributes)
        }),
    );

    let space = AddressSpace::new(client.clone());

    let variable = space.get_variable_node(&node_id).await.unwrap();
    assert_eq!(invocations.load(Ordering::SeqCst), 1);
    assert_eq!(variable.data_type, NodeId::numeric(0, 11));
    assert_eq!(variable.value_rank, -1);
    assert_eq!(variable.access_level, 3);

    // The cache holds exactly the record the constructor produced.
    let cached = space.get_node(&node_id).await.unwrap();
    assert_eq!(cached, UaNode::Variable(variable));
    assert_eq!(invocations.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn get_object_node_on_a_variable_fails_with_a_class_mismatch() {
    let client = MockClient::new();
    let node_id = NodeId::string(1, "Temp");

    client.seed_variable(
        &node_id,
        QualifiedName::new(1, "Temp"),
        Variant::Double(21.5),
        NodeId::numeric(0, 11),
        3,
    );

    let space = AddressSpace::new(client);

    let error = space.get_object_node(&node_id).await.unwrap_err();
    assert_eq!(error.status_code(), StatusCode::BAD_UNEXPECTED_ERROR);
    assert!(error.to_string().contains("expected NodeClass::Object"));
}

#[tokio::test]
async fn unseeded_node_fails_with_node_class_invalid() {
    let client = MockClient::new();
    let space = AddressSpace::new(client);

    let error = space.get_node(&NodeId::numeric(5, 123)).await.unwrap_err();
    assert!(matches!(error, Error::NodeClassInvalid { .. }));
    assert_eq!(error.status_code(), StatusCode::BAD_NODE_CLASS_INVALID);
}

// =============================================================================
// Localization scenarios
// =============================================================================

#[tokio::test]
async fn localize_refreshes_the_namespace_table_once() {
    let client = MockClient::new();
    client.seed_namespace_array(&["http://opcfoundation.org/UA/", "urn:x"]);

    let space = AddressSpace::new(client.clone());
    let expanded = ExpandedNodeId::with_uri("urn:x", NodeIdentifier::String("Temp".into()));

    let resolved = space.localize(&expanded).await.unwrap();
    assert_eq!(resolved, NodeId::string(1, "Temp"));
    assert_eq!(client.namespaces.read(|table| table.index_of("urn:x")), Some(1));

    // The table now knows the uri; no further service calls are made.
    let reads = client.reads();
    let resolved_again = space.localize(&expanded).await.unwrap();
    assert_eq!(resolved_again, NodeId::string(1, "Temp"));
    assert_eq!(client.reads(), reads);
}

#[tokio::test]
async fn localize_of_a_foreign_server_id_is_null() {
    let client = MockClient::new();
    let space = AddressSpace::new(client);

    let mut expanded = ExpandedNodeId::indexed(0, NodeIdentifier::Numeric(85));
    expanded.server_index = 2;

    assert_eq!(space.localize(&expanded).await.unwrap(), NodeId::null());
}

#[tokio::test]
async fn localize_of_an_unknown_uri_stays_null_after_refresh() {
    let client = MockClient::new();
    client.seed_namespace_array(&["http://opcfoundation.org/UA/", "urn:x"]);

    let space = AddressSpace::new(client);
    let expanded = ExpandedNodeId::with_uri("urn:never", NodeIdentifier::Numeric(1));

    assert_eq!(space.localize(&expanded).await.unwrap(), NodeId::null());
}

#[tokio::test]
async fn localize_round_trips_a_known_local_id() {
    let client = MockClient::new();
    let space = AddressSpace::new(client);

    let node_id = NodeId::numeric(0, 85);
    assert_eq!(space.localize(&node_id.to_expanded()).await.unwrap(), node_id);
}

// =============================================================================
// Browse scenarios
// =============================================================================

#[tokio::test]
async fn browse_fan_out_preserves_server_order() {
    let client = MockClient::new();
    let server = well_known::SERVER;

    let a = NodeId::numeric(2, 1);
    let b = NodeId::numeric(2, 2);
    let c = NodeId::numeric(2, 3);

    client.seed_object(&a, QualifiedName::new(2, "A"), 0);
    client.seed_method(&b, QualifiedName::new(2, "B"));
    client.seed_variable(
        &c,
        QualifiedName::new(2, "C"),
        Variant::Double(1.0),
        NodeId::numeric(0, 11),
        1,
    );

    client.set_browse_result(
        &server,
        &well_known::HIERARCHICAL_REFERENCES,
        BrowseResult::good(vec![
            reference(&a, "2:A", NodeClass::Object, well_known::FOLDER_TYPE.to_expanded()),
            reference(&b, "2:B", NodeClass::Method, ExpandedNodeId::null()),
            reference(
                &c,
                "2:C",
                NodeClass::Variable,
                well_known::BASE_DATA_VARIABLE_TYPE.to_expanded(),
            ),
        ]),
    );

    let space = AddressSpace::new(client.clone());
    let nodes = space.browse_node(&server).await.unwrap();

    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[0].node_id(), &a);
    assert_eq!(nodes[1].node_id(), &b);
    assert_eq!(nodes[2].node_id(), &c);
    assert_eq!(nodes[0].node_class(), NodeClass::Object);
    assert_eq!(nodes[1].node_class(), NodeClass::Method);
    assert_eq!(nodes[2].node_class(), NodeClass::Variable);

    // Object and Variable references reuse the supplied type definition,
    // so the only browse is the top-level one.
    assert_eq!(client.browses(), 1);
}

#[tokio::test]
async fn browse_fails_when_any_resolution_fails() {
    let client = MockClient::new();
    let server = well_known::SERVER;

    let a = NodeId::numeric(2, 1);
    let b = NodeId::numeric(2, 2);

    client.seed_object(&a, QualifiedName::new(2, "A"), 0);
    // B is deliberately left unseeded; its base read yields no node class.

    client.set_browse_result(
        &server,
        &well_known::HIERARCHICAL_REFERENCES,
        BrowseResult::good(vec![
            reference(&a, "2:A", NodeClass::Object, well_known::FOLDER_TYPE.to_expanded()),
            reference(&b, "2:B", NodeClass::Method, ExpandedNodeId::null()),
        ]),
    );

    let space = AddressSpace::new(client);

    let error = space.browse_node(&server).await.unwrap_err();
    assert!(matches!(error, Error::NodeClassInvalid { .. }));
}

#[tokio::test]
async fn browse_of_an_unknown_node_propagates_the_service_status() {
    let client = MockClient::new();
    let space = AddressSpace::new(client);

    let error = space.browse_node(&NodeId::numeric(9, 9)).await.unwrap_err();
    match error {
        Error::Service { status } => assert_eq!(status, StatusCode::BAD_NODE_ID_UNKNOWN),
        other => panic!("expected a service error, got {other:?}"),
    }
}

#[tokio::test]
async fn browse_accepts_a_resolved_node_as_starting_point() {
    let client = MockClient::new();
    let objects = well_known::OBJECTS_FOLDER;
    let child = NodeId::numeric(2, 7);

    client.seed_object(&objects, QualifiedName::standard("Objects"), 0);
    client.set_type_definition(&objects, &well_known::FOLDER_TYPE);
    client.seed_object(&child, QualifiedName::new(2, "Child"), 0);

    client.set_browse_result(
        &objects,
        &well_known::HIERARCHICAL_REFERENCES,
        BrowseResult::good(vec![reference(
            &child,
            "2:Child",
            NodeClass::Object,
            well_known::FOLDER_TYPE.to_expanded(),
        )]),
    );

    let space = AddressSpace::new(client);

    let start = space.get_node(&objects).await.unwrap();
    let children = space.browse(&start).await.unwrap();

    assert_eq!(children.len(), 1);
    assert_eq!(children[0].node_id(), &child);
}

// =============================================================================
// Cache behavior
// =============================================================================

#[tokio::test]
async fn expired_cache_entry_forces_a_new_read() {
    let client = MockClient::new();
    let objects = well_known::OBJECTS_FOLDER;

    client.seed_object(&objects, QualifiedName::standard("Objects"), 0);
    client.set_type_definition(&objects, &well_known::FOLDER_TYPE);

    let config = AddressSpaceConfig::builder()
        .cache_expire_after(Duration::from_millis(100))
        .build()
        .unwrap();
    let space = AddressSpace::with_config(client.clone(), config);

    space.get_node(&objects).await.unwrap();
    let reads_after_first = client.reads();

    tokio::time::sleep(Duration::from_millis(200)).await;

    space.get_node(&objects).await.unwrap();
    assert!(client.reads() > reads_after_first);
    assert!(space.cache_stats().evictions() >= 1);
}

// =============================================================================
// Browse options
// =============================================================================

#[tokio::test]
async fn modify_browse_options_round_trips_every_field() {
    let client = MockClient::new();
    let space = AddressSpace::new(client);

    space.modify_browse_options(|builder| {
        builder
            .direction(uascope_types::BrowseDirection::Inverse)
            .reference_type(well_known::HAS_COMPONENT)
            .include_subtypes(false)
            .node_class_mask(0x03);
    });

    let options = space.browse_options();
    assert_eq!(options.direction, uascope_types::BrowseDirection::Inverse);
    assert_eq!(options.reference_type_id, well_known::HAS_COMPONENT);
    assert!(!options.include_subtypes);
    assert_eq!(options.node_class_mask, 0x03);

    // A second modification seeds from the current options; direction must
    // survive untouched.
    space.modify_browse_options(|builder| {
        builder.node_class_mask(0xFF);
    });

    let options = space.browse_options();
    assert_eq!(options.direction, uascope_types::BrowseDirection::Inverse);
    assert_eq!(options.reference_type_id, well_known::HAS_COMPONENT);
    assert!(!options.include_subtypes);
    assert_eq!(options.node_class_mask, 0xFF);
}

#[tokio::test]
async fn browse_uses_the_configured_reference_type() {
    let client = MockClient::new();
    let server = well_known::SERVER;
    let child = NodeId::numeric(2, 7);

    client.seed_object(&child, QualifiedName::new(2, "Child"), 0);

    // Only a HasComponent table entry exists; the default hierarchical
    // browse would find nothing.
    client.set_browse_result(
        &server,
        &well_known::HAS_COMPONENT,
        BrowseResult::good(vec![reference(
            &child,
            "2:Child",
            NodeClass::Object,
            well_known::FOLDER_TYPE.to_expanded(),
        )]),
    );

    let space = AddressSpace::new(client);
    space.modify_browse_options(|builder| {
        builder.reference_type(well_known::HAS_COMPONENT);
    });

    let nodes = space.browse_node(&server).await.unwrap();
    assert_eq!(nodes.len(), 1);
}
