use crate::layout::LayoutConfig;
use crate::registry;
use bridgecore::{
    BridgeError, Edge, ExchangePosition, Graph, GraphError, ImportWarning, Node, Position, Result,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Options for a single import
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportOptions {
    pub layout: LayoutConfig,
}

impl ImportOptions {
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }
}

/// Outcome of a successful import
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub graph: Graph,
    /// Dropped connections, in the order they were met
    pub warnings: Vec<ImportWarning>,
}

impl ImportReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }
}

/// Builds a fresh [`Graph`] from an exchange document
#[derive(Debug, Clone, Default)]
pub struct Importer {
    options: ImportOptions,
}

impl Importer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ImportOptions) -> Self {
        Self { options }
    }

    /// Parse JSON text, then import it
    pub fn parse_str(&self, text: &str) -> Result<ImportReport> {
        let doc: Value = serde_json::from_str(text)?;
        self.parse(&doc)
    }

    /// Import an already-parsed document.
    ///
    /// Fails only when `doc` has no `nodes` array or two nodes share an
    /// identifier. Broken connections become warnings.
    pub fn parse(&self, doc: &Value) -> Result<ImportReport> {
        let entries = doc
            .as_object()
            .and_then(|o| o.get("nodes"))
            .and_then(Value::as_array)
            .ok_or_else(|| {
                BridgeError::Schema("expected an object with a 'nodes' array".to_string())
            })?;

        let mut graph = Graph::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for (index, entry) in entries.iter().enumerate() {
            let node = self.build_node(index, entry);
            if let Some(&first) = seen.get(&node.id) {
                return Err(BridgeError::DuplicateIdentifier {
                    id: node.id,
                    first,
                    second: index,
                });
            }
            seen.insert(node.id.clone(), index);
            graph.add_node(node)?;
        }
        tracing::debug!("Imported {} node(s)", graph.node_count());

        let mut warnings = Vec::new();
        match doc.get("connections") {
            Some(Value::Object(connections)) => {
                connect_all(&mut graph, connections, &mut warnings)?;
            }
            Some(Value::Null) | None => {}
            Some(_) => tracing::debug!("Ignoring non-object 'connections'"),
        }

        tracing::info!(
            "Import finished: {} node(s), {} edge(s), {} warning(s)",
            graph.node_count(),
            graph.edge_count(),
            warnings.len()
        );

        Ok(ImportReport { graph, warnings })
    }

    fn build_node(&self, index: usize, entry: &Value) -> Node {
        let field = |key: &str| {
            entry
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        };

        let name = field("name");
        let node_type = field("type");

        let id = name
            .or_else(|| field("id"))
            .map(str::to_string)
            .unwrap_or_else(|| format!("node-{}", index));
        let display_name = name.or(node_type).unwrap_or("Node").to_string();

        let parameters = entry
            .get("parameters")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let position = entry
            .get("position")
            .and_then(explicit_position)
            .unwrap_or_else(|| self.options.layout.assign(index));

        let type_id = node_type.unwrap_or_default().to_string();
        let info = registry::resolve_with(&type_id, &parameters);

        Node {
            id,
            display_name,
            type_id,
            label: info.label,
            description: info.description,
            position,
            parameters,
        }
    }
}

/// Import with default options
pub fn parse(doc: &Value) -> Result<ImportReport> {
    Importer::new().parse(doc)
}

/// Parse JSON text and import it with default options
pub fn parse_str(text: &str) -> Result<ImportReport> {
    Importer::new().parse_str(text)
}

fn explicit_position(value: &Value) -> Option<Position> {
    let position = ExchangePosition::deserialize(value).ok()?;
    Some(Position::new(position.x(), position.y()))
}

fn connect_all(
    graph: &mut Graph,
    connections: &Map<String, Value>,
    warnings: &mut Vec<ImportWarning>,
) -> Result<()> {
    for (source, outputs) in connections {
        let Some(groups) = outputs.get("main").and_then(Value::as_array) else {
            record(
                warnings,
                ImportWarning::MalformedMain {
                    source: source.clone(),
                },
            );
            continue;
        };

        for (output_index, group) in groups.iter().enumerate() {
            let Some(targets) = group.as_array() else {
                record(
                    warnings,
                    ImportWarning::MalformedOutputGroup {
                        source: source.clone(),
                        output_index,
                    },
                );
                continue;
            };

            for (target_index, target) in targets.iter().enumerate() {
                let Some(target_id) = target.get("node").and_then(Value::as_str) else {
                    record(
                        warnings,
                        ImportWarning::MissingTargetNode {
                            source: source.clone(),
                            output_index,
                            target_index,
                        },
                    );
                    continue;
                };

                let input_index = target
                    .get("index")
                    .and_then(Value::as_u64)
                    .and_then(|i| usize::try_from(i).ok())
                    .unwrap_or(target_index);

                match graph.connect(source, target_id, output_index, input_index) {
                    Ok(_) => {}
                    Err(GraphError::NodeNotFound(missing)) => {
                        let edge_id = Edge::compose_id(source, target_id, output_index, input_index);
                        let warning = if missing == *source {
                            ImportWarning::UnknownSource { edge_id }
                        } else {
                            ImportWarning::UnknownTarget { edge_id }
                        };
                        record(warnings, warning);
                    }
                    Err(GraphError::OutputOutOfRange { .. }) => {
                        let edge_id = Edge::compose_id(source, target_id, output_index, input_index);
                        record(warnings, ImportWarning::OutputOutOfRange { edge_id });
                    }
                    Err(GraphError::DuplicateEdge(edge_id)) => {
                        record(warnings, ImportWarning::DuplicateConnection { edge_id });
                    }
                    Err(other) => return Err(other.into()),
                }
            }
        }
    }
    Ok(())
}

fn record(warnings: &mut Vec<ImportWarning>, warning: ImportWarning) {
    tracing::warn!("{}", warning);
    warnings.push(warning);
}
