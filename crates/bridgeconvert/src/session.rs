use crate::exporter;
use crate::importer::{ImportOptions, ImportReport, Importer};
use bridgecore::{ExchangeDocument, Graph, ImportWarning, Result};
use serde_json::Value;

/// One editing session: the graph the editor works on.
///
/// Imports build a complete new graph before swapping it in, so a failed
/// import leaves the current graph as it was.
#[derive(Debug, Default)]
pub struct EditorSession {
    importer: Importer,
    graph: Graph,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ImportOptions) -> Self {
        Self {
            importer: Importer::with_options(options),
            graph: Graph::new(),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutable access for editor actions (move, connect, delete)
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// Replace the graph with an imported document
    pub fn import_value(&mut self, doc: &Value) -> Result<Vec<ImportWarning>> {
        let report = self.importer.parse(doc)?;
        Ok(self.swap(report))
    }

    /// Replace the graph with imported JSON text
    pub fn import_str(&mut self, text: &str) -> Result<Vec<ImportWarning>> {
        let report = self.importer.parse_str(text)?;
        Ok(self.swap(report))
    }

    pub fn export(&self) -> ExchangeDocument {
        exporter::serialize(&self.graph)
    }

    pub fn export_string(&self) -> Result<String> {
        exporter::to_string_pretty(&self.graph)
    }

    /// Back to the empty graph
    pub fn clear(&mut self) {
        self.graph = Graph::new();
    }

    fn swap(&mut self, report: ImportReport) -> Vec<ImportWarning> {
        let ImportReport { graph, warnings } = report;
        let previous = std::mem::replace(&mut self.graph, graph);
        tracing::info!(
            "Replaced graph of {} node(s) with {} node(s)",
            previous.node_count(),
            self.graph.node_count()
        );
        warnings
    }
}
