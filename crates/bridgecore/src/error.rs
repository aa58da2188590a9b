use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Not an exchange document: {0}")]
    Schema(String),

    #[error("Duplicate node identifier '{id}' at node entries {first} and {second}")]
    DuplicateIdentifier {
        id: String,
        first: usize,
        second: usize,
    },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Node already exists: {0}")]
    DuplicateNode(String),

    #[error("Edge not found: {0}")]
    EdgeNotFound(String),

    #[error("Edge already exists: {0}")]
    DuplicateEdge(String),

    #[error("Output index {index} out of range (limit {max})")]
    OutputOutOfRange { index: usize, max: usize },

    #[error("Cyclic dependency detected")]
    CyclicDependency,
}

/// Connection-level anomaly recovered during import.
///
/// The offending source, group or edge is dropped and import carries on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportWarning {
    /// The source entry has no `main` array.
    MalformedMain { source: String },

    /// An output group under `main` is not an array.
    MalformedOutputGroup { source: String, output_index: usize },

    /// A connection target has no `node` field.
    MissingTargetNode {
        source: String,
        output_index: usize,
        target_index: usize,
    },

    /// The connection's source key names no node.
    UnknownSource { edge_id: String },

    /// The connection's target names no node.
    UnknownTarget { edge_id: String },

    /// The output group ordinal is beyond the supported port count.
    OutputOutOfRange { edge_id: String },

    /// The same connection appears more than once.
    DuplicateConnection { edge_id: String },
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportWarning::MalformedMain { source } => {
                write!(f, "connections of '{}' have no 'main' array, skipped", source)
            }
            ImportWarning::MalformedOutputGroup { source, output_index } => write!(
                f,
                "output group {} of '{}' is not an array, skipped",
                output_index, source
            ),
            ImportWarning::MissingTargetNode {
                source,
                output_index,
                target_index,
            } => write!(
                f,
                "target {} in output group {} of '{}' names no node, skipped",
                target_index, output_index, source
            ),
            ImportWarning::UnknownSource { edge_id } => {
                write!(f, "edge {} dropped: unknown source node", edge_id)
            }
            ImportWarning::UnknownTarget { edge_id } => {
                write!(f, "edge {} dropped: unknown target node", edge_id)
            }
            ImportWarning::OutputOutOfRange { edge_id } => {
                write!(f, "edge {} dropped: output index out of range", edge_id)
            }
            ImportWarning::DuplicateConnection { edge_id } => {
                write!(f, "edge {} dropped: duplicate connection", edge_id)
            }
        }
    }
}
