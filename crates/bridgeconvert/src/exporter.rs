use bridgecore::{
    BridgeError, ConnectionMap, ConnectionTarget, ExchangeDocument, ExchangeNode,
    ExchangePosition, Graph, Result,
};

/// Serialize a graph back into the exchange format.
///
/// Output groups are dense from 0 to the highest ordinal in use, and the
/// targets of a group follow edge insertion order.
pub fn serialize(graph: &Graph) -> ExchangeDocument {
    let nodes = graph
        .nodes()
        .iter()
        .map(|node| ExchangeNode {
            id: None,
            name: Some(node.id.clone()),
            node_type: node.type_id.clone(),
            position: Some(ExchangePosition::Pair([node.position.x, node.position.y])),
            parameters: node.parameters.clone(),
        })
        .collect();

    let mut connections = ConnectionMap::new();
    for edge in graph.edges() {
        let outputs = connections.entry(edge.source_id.clone()).or_default();
        if outputs.main.len() <= edge.source_output_index {
            outputs.main.resize_with(edge.source_output_index + 1, Vec::new);
        }
        outputs.main[edge.source_output_index]
            .push(ConnectionTarget::main(edge.target_id.clone(), edge.target_input_index));
    }

    tracing::debug!(
        "Serialized {} node(s) and {} edge(s) from {} source(s)",
        graph.node_count(),
        graph.edge_count(),
        connections.len()
    );

    ExchangeDocument { nodes, connections }
}

pub fn to_value(graph: &Graph) -> Result<serde_json::Value> {
    serde_json::to_value(serialize(graph)).map_err(|e| BridgeError::Serialization(e.to_string()))
}

pub fn to_string_pretty(graph: &Graph) -> Result<String> {
    serde_json::to_string_pretty(&serialize(graph))
        .map_err(|e| BridgeError::Serialization(e.to_string()))
}
