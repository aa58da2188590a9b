//! Core data model for the flow bridge
//!
//! This crate provides the exchange-format document types, the editor-facing
//! graph model and the error types shared by the converter and the CLI.

mod error;
mod exchange;
mod graph;

pub use error::{BridgeError, GraphError, ImportWarning};
pub use exchange::{
    ConnectionMap, ConnectionTarget, ExchangeDocument, ExchangeNode, ExchangePosition,
    NodeConnections, MAIN_CONNECTION,
};
pub use graph::{Edge, EdgeId, Graph, Node, NodeId, Position, MAX_OUTPUT_PORTS};

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;
