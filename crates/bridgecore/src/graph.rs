use crate::GraphError;
use petgraph::algo::toposort;
use petgraph::graph::DiGraph;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub type NodeId = String;
pub type EdgeId = String;

/// Node position in the visual editor
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Editor-facing node with resolved display metadata.
///
/// Every node has exactly one input and one output handle; port ordinals
/// from the exchange format live on [`Edge`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub display_name: String,
    pub type_id: String,
    pub label: String,
    pub description: String,
    pub position: Position,
    pub parameters: serde_json::Map<String, serde_json::Value>,
}

/// Directed connection between two nodes of the same graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: EdgeId,
    pub source_id: NodeId,
    pub target_id: NodeId,
    pub source_output_index: usize,
    pub target_input_index: usize,
}

impl Edge {
    /// Deterministic edge id, e.g. `A[0]->B[1]`.
    ///
    /// Backslash, `[`, `]` and `>` inside node ids are backslash-escaped, so two
    /// different edges never share an id.
    pub fn compose_id(
        source_id: &str,
        target_id: &str,
        source_output_index: usize,
        target_input_index: usize,
    ) -> EdgeId {
        let mut id = String::with_capacity(source_id.len() + target_id.len() + 12);
        push_escaped(&mut id, source_id);
        id.push_str(&format!("[{}]->", source_output_index));
        push_escaped(&mut id, target_id);
        id.push_str(&format!("[{}]", target_input_index));
        id
    }

    fn key(&self) -> EdgeKey {
        (
            self.source_id.clone(),
            self.target_id.clone(),
            self.source_output_index,
            self.target_input_index,
        )
    }
}

fn push_escaped(out: &mut String, id: &str) {
    for ch in id.chars() {
        if matches!(ch, '\\' | '[' | ']' | '>') {
            out.push('\\');
        }
        out.push(ch);
    }
}

/// Highest output ordinal plus one that an edge may use
pub const MAX_OUTPUT_PORTS: usize = 1024;

type EdgeKey = (NodeId, NodeId, usize, usize);

/// Flat node/edge model owned by one editing session.
///
/// Node ids are unique and every edge references nodes of this graph.
/// Nodes and edges keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    #[serde(skip)]
    node_index: HashMap<NodeId, usize>,
    #[serde(skip)]
    edge_keys: HashSet<EdgeKey>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn find_edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Edges leaving `id`, in insertion order
    pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.source_id == id)
    }

    /// Edges entering `id`, in insertion order
    pub fn incoming<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.target_id == id)
    }

    /// Add a node, rejecting an id that is already taken
    pub fn add_node(&mut self, node: Node) -> Result<&Node, GraphError> {
        if self.contains_node(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        let idx = self.nodes.len();
        self.node_index.insert(node.id.clone(), idx);
        self.nodes.push(node);
        Ok(&self.nodes[idx])
    }

    /// Connect two existing nodes.
    ///
    /// The edge is appended, so it sorts after every existing edge of the
    /// same output group on export. Output ordinals must stay below
    /// [`MAX_OUTPUT_PORTS`].
    pub fn connect(
        &mut self,
        source_id: &str,
        target_id: &str,
        source_output_index: usize,
        target_input_index: usize,
    ) -> Result<&Edge, GraphError> {
        if !self.contains_node(source_id) {
            return Err(GraphError::NodeNotFound(source_id.to_string()));
        }
        if !self.contains_node(target_id) {
            return Err(GraphError::NodeNotFound(target_id.to_string()));
        }
        if source_output_index >= MAX_OUTPUT_PORTS {
            return Err(GraphError::OutputOutOfRange {
                index: source_output_index,
                max: MAX_OUTPUT_PORTS,
            });
        }

        let edge = Edge {
            id: Edge::compose_id(source_id, target_id, source_output_index, target_input_index),
            source_id: source_id.to_string(),
            target_id: target_id.to_string(),
            source_output_index,
            target_input_index,
        };
        if !self.edge_keys.insert(edge.key()) {
            return Err(GraphError::DuplicateEdge(edge.id));
        }

        tracing::debug!("Connecting {}", edge.id);
        self.edges.push(edge);
        Ok(&self.edges[self.edges.len() - 1])
    }

    pub fn move_node(&mut self, id: &str, position: Position) -> Result<(), GraphError> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;
        node.position = position;
        Ok(())
    }

    pub fn remove_edge(&mut self, id: &str) -> Result<Edge, GraphError> {
        let idx = self
            .edges
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| GraphError::EdgeNotFound(id.to_string()))?;
        tracing::debug!("Removing edge {}", id);
        let edge = self.edges.remove(idx);
        self.edge_keys.remove(&edge.key());
        Ok(edge)
    }

    /// Remove a node together with every edge touching it
    pub fn remove_node(&mut self, id: &str) -> Result<Node, GraphError> {
        let idx = self
            .node_index
            .remove(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;

        let before = self.edges.len();
        self.edges.retain(|e| e.source_id != id && e.target_id != id);
        self.edge_keys = self.edges.iter().map(Edge::key).collect();
        tracing::debug!(
            "Removing node {} and {} incident edge(s)",
            id,
            before - self.edges.len()
        );

        let node = self.nodes.remove(idx);
        for (position, later) in self.nodes.iter().enumerate().skip(idx) {
            self.node_index.insert(later.id.clone(), position);
        }
        Ok(node)
    }

    /// Nodes nothing connects into, in node order
    pub fn entry_nodes(&self) -> Vec<&Node> {
        let targets: HashSet<&str> = self.edges.iter().map(|e| e.target_id.as_str()).collect();
        self.nodes
            .iter()
            .filter(|n| !targets.contains(n.id.as_str()))
            .collect()
    }

    /// Node ids ordered so every edge points forward
    pub fn topological_order(&self) -> Result<Vec<NodeId>, GraphError> {
        let mut graph = DiGraph::<&str, ()>::new();
        let mut node_to_index = HashMap::new();

        for node in &self.nodes {
            let idx = graph.add_node(node.id.as_str());
            node_to_index.insert(node.id.as_str(), idx);
        }

        for edge in &self.edges {
            let from_idx = node_to_index
                .get(edge.source_id.as_str())
                .ok_or_else(|| GraphError::NodeNotFound(edge.source_id.clone()))?;
            let to_idx = node_to_index
                .get(edge.target_id.as_str())
                .ok_or_else(|| GraphError::NodeNotFound(edge.target_id.clone()))?;
            graph.add_edge(*from_idx, *to_idx, ());
        }

        let order = toposort(&graph, None).map_err(|_| GraphError::CyclicDependency)?;
        Ok(order.into_iter().map(|idx| graph[idx].to_string()).collect())
    }
}
