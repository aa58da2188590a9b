// crates/bridgecli/src/main.rs

use anyhow::{Context, Result};
use bridgeconvert::{registry, ImportOptions, ImportReport, Importer, LayoutConfig};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flowbridge")]
#[command(about = "Convert workflow exchange documents to editor graphs and back", long_about = None)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a workflow document and print the resulting graph
    Import {
        /// Path to the workflow JSON file
        file: PathBuf,

        /// Print the graph as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Import a workflow document and write it back out normalized
    Export {
        /// Path to the workflow JSON file
        file: PathBuf,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show entry nodes and the execution order of a workflow document
    Inspect {
        /// Path to the workflow JSON file
        file: PathBuf,
    },

    /// List node types with built-in labels
    Types,
}

/// Grid used for nodes without a position
#[derive(Args)]
struct LayoutArgs {
    #[arg(long, default_value_t = 100.0)]
    base_x: f64,

    #[arg(long, default_value_t = 100.0)]
    base_y: f64,

    #[arg(long, default_value_t = 350.0)]
    spacing_x: f64,

    #[arg(long, default_value_t = 200.0)]
    spacing_y: f64,

    #[arg(long, default_value_t = 3)]
    rows: usize,
}

impl LayoutArgs {
    fn options(&self) -> ImportOptions {
        let layout = LayoutConfig::default()
            .with_origin(self.base_x, self.base_y)
            .with_spacing(self.spacing_x, self.spacing_y)
            .with_rows(self.rows);
        ImportOptions::default().with_layout(layout)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Import { file, json, layout } => {
            import_workflow(&file, json, layout.options())?;
        }

        Commands::Export {
            file,
            output,
            layout,
        } => {
            export_workflow(&file, output, layout.options())?;
        }

        Commands::Inspect { file } => {
            inspect_workflow(&file)?;
        }

        Commands::Types => {
            list_types();
        }
    }

    Ok(())
}

fn load(file: &Path, options: ImportOptions) -> Result<ImportReport> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let report = Importer::with_options(options)
        .parse_str(&text)
        .with_context(|| format!("failed to import {}", file.display()))?;
    tracing::debug!(
        "Loaded {} with {} warning(s)",
        file.display(),
        report.warnings.len()
    );
    Ok(report)
}

fn import_workflow(file: &Path, json: bool, options: ImportOptions) -> Result<()> {
    let report = load(file, options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.graph)?);
        return Ok(());
    }

    let graph = &report.graph;
    println!("📋 Workflow: {}", file.display());
    println!("   Nodes: {}", graph.node_count());
    println!("   Edges: {}", graph.edge_count());
    println!();

    for node in graph.nodes() {
        println!(
            "  • {} [{}] at ({}, {})",
            node.display_name, node.label, node.position.x, node.position.y
        );
        println!("    {}", node.description);
    }

    if !graph.edges().is_empty() {
        println!();
        for edge in graph.edges() {
            println!("  {} → {}", edge.source_id, edge.target_id);
        }
    }

    if report.has_warnings() {
        println!();
        println!("⚠️  {} connection(s) dropped:", report.warnings.len());
        for warning in &report.warnings {
            println!("   {}", warning);
        }
    }

    Ok(())
}

fn export_workflow(file: &Path, output: Option<PathBuf>, options: ImportOptions) -> Result<()> {
    let report = load(file, options)?;
    let json = bridgeconvert::to_string_pretty(&report.graph)?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("✨ Wrote {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn inspect_workflow(file: &Path) -> Result<()> {
    let report = load(file, ImportOptions::default())?;
    let graph = &report.graph;

    println!("🔍 Inspecting workflow: {}", file.display());
    println!();
    println!("Entry nodes:");
    for node in graph.entry_nodes() {
        println!("  • {} ({})", node.id, node.label);
    }

    println!();
    match graph.topological_order() {
        Ok(order) => {
            println!("Execution order:");
            for (step, id) in order.iter().enumerate() {
                println!("  {}. {}", step + 1, id);
            }
        }
        Err(e) => println!("❌ No execution order: {}", e),
    }

    Ok(())
}

fn list_types() {
    println!("📦 Known Node Types:");
    println!();

    for descriptor in registry::known_types() {
        match descriptor.parameter {
            Some(parameter) => println!(
                "  • {} ({}, shows '{}')",
                descriptor.type_id, descriptor.label, parameter
            ),
            None => println!("  • {} ({})", descriptor.type_id, descriptor.label),
        }
    }
}
