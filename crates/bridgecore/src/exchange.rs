use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Connection type emitted for every exported target
pub const MAIN_CONNECTION: &str = "main";

/// Workflow document in the exchange format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExchangeDocument {
    pub nodes: Vec<ExchangeNode>,
    #[serde(default)]
    pub connections: ConnectionMap,
}

/// Node entry of an exchange document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<ExchangePosition>,
    #[serde(default)]
    pub parameters: serde_json::Map<String, serde_json::Value>,
}

impl ExchangeNode {
    /// Identifier used as the join key in `connections`
    pub fn identifier(&self) -> Option<&str> {
        self.name.as_deref().or(self.id.as_deref())
    }
}

/// Both position spellings accepted by the format
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExchangePosition {
    Pair([f64; 2]),
    Point { x: f64, y: f64 },
}

impl ExchangePosition {
    pub fn x(&self) -> f64 {
        match self {
            ExchangePosition::Pair([x, _]) => *x,
            ExchangePosition::Point { x, .. } => *x,
        }
    }

    pub fn y(&self) -> f64 {
        match self {
            ExchangePosition::Pair([_, y]) => *y,
            ExchangePosition::Point { y, .. } => *y,
        }
    }
}

/// Source identifier to its output groups.
///
/// Ordered by key so exported documents are stable.
pub type ConnectionMap = BTreeMap<String, NodeConnections>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeConnections {
    /// Indexed by output-port ordinal
    pub main: Vec<Vec<ConnectionTarget>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionTarget {
    pub node: String,
    #[serde(rename = "type")]
    pub connection_type: String,
    pub index: usize,
}

impl ConnectionTarget {
    pub fn main(node: impl Into<String>, index: usize) -> Self {
        Self {
            node: node.into(),
            connection_type: MAIN_CONNECTION.to_string(),
            index,
        }
    }
}
