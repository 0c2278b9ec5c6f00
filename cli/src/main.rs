//! Netopt CLI: run traversals and shortest-path queries on a graph file

mod input;
mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use netopt::{
    bfs, bidirectional_dijkstra, dfs, dijkstra, dijkstra_with_heap, reverse_dijkstra,
    reverse_dijkstra_with_heap, Graph, NodeId, ShortestPathConfig, ShortestPaths,
    TraversalResult,
};
use report::{distance_cell, OutputFormat, Report};
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "netopt-cli", version, about = "Graph traversal and shortest-path queries")]
struct Cli {
    /// Graph document (JSON)
    #[arg(long, global = true, env = "NETOPT_GRAPH")]
    graph: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,

    /// Edge attribute holding the weight
    #[arg(long, default_value = netopt::algo::DEFAULT_WEIGHT_ATTRIBUTE, global = true)]
    weight: String,

    /// Weight for edges without a numeric weight attribute
    #[arg(long, global = true)]
    default_weight: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Node, edge and degree summary
    Stats,
    /// Breadth-first search
    Bfs {
        #[arg(long)]
        source: u64,
    },
    /// Depth-first search
    Dfs {
        #[arg(long)]
        source: u64,
    },
    /// Distances from a source
    Dijkstra {
        #[arg(long)]
        source: u64,

        /// Use the binary-heap variant
        #[arg(long)]
        heap: bool,
    },
    /// Distances from every node to a target
    ReverseDijkstra {
        #[arg(long)]
        target: u64,

        /// Use the binary-heap variant
        #[arg(long)]
        heap: bool,
    },
    /// Shortest path between two nodes
    Path {
        #[arg(long)]
        source: u64,
        #[arg(long)]
        target: u64,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let path = cli
        .graph
        .as_deref()
        .context("no graph file given (use --graph or NETOPT_GRAPH)")?;
    let graph = input::load_graph(path)?;
    let config = shortest_path_config(cli);

    let report = match cli.command {
        Commands::Stats => stats(&graph)?,
        Commands::Bfs { source } => traversal(&bfs(&graph, NodeId::new(source))?),
        Commands::Dfs { source } => traversal(&dfs(&graph, NodeId::new(source))?),
        Commands::Dijkstra { source, heap } => {
            let source = NodeId::new(source);
            let paths = if heap {
                dijkstra_with_heap(&graph, source, &config)?
            } else {
                dijkstra(&graph, source, &config)?
            };
            distances(&graph, &paths)
        }
        Commands::ReverseDijkstra { target, heap } => {
            let target = NodeId::new(target);
            let paths = if heap {
                reverse_dijkstra_with_heap(&graph, target, &config)?
            } else {
                reverse_dijkstra(&graph, target, &config)?
            };
            distances(&graph, &paths)
        }
        Commands::Path { source, target } => {
            let mut report = Report::new(vec!["source", "target", "cost", "path"]);
            match bidirectional_dijkstra(&graph, NodeId::new(source), NodeId::new(target), &config)? {
                Some(found) => report.push(vec![
                    json!(found.source),
                    json!(found.target),
                    distance_cell(found.cost),
                    json!(found.path),
                ]),
                None => report.push(vec![json!(source), json!(target), Value::Null, Value::Null]),
            }
            report
        }
    };

    Ok(report.render(cli.format))
}

fn shortest_path_config(cli: &Cli) -> ShortestPathConfig {
    let config = ShortestPathConfig::default().with_weight_attribute(cli.weight.as_str());
    match cli.default_weight {
        Some(weight) => config.with_default_weight(weight),
        None => config,
    }
}

fn stats(graph: &Graph) -> Result<Report> {
    let mut max_out = 0;
    let mut max_in = 0;
    let mut isolated = 0;
    for id in graph.nodes() {
        let out_degree = graph.out_degree(id)?;
        let in_degree = graph.in_degree(id)?;
        max_out = max_out.max(out_degree);
        max_in = max_in.max(in_degree);
        if out_degree + in_degree == 0 {
            isolated += 1;
        }
    }
    let self_loops = graph.edges().iter().filter(|(u, v)| u == v).count();

    let mut report = Report::new(vec!["metric", "value"]);
    for (metric, value) in [
        ("nodes", graph.node_count()),
        ("edges", graph.edge_count()),
        ("self_loops", self_loops),
        ("isolated_nodes", isolated),
        ("max_out_degree", max_out),
        ("max_in_degree", max_in),
    ] {
        report.push(vec![json!(metric), json!(value)]);
    }
    Ok(report)
}

fn traversal(result: &TraversalResult) -> Report {
    let mut report = Report::new(vec!["order", "node", "predecessor"]);
    for (position, node) in result.visit_sequence().into_iter().enumerate() {
        report.push(vec![
            json!(position + 1),
            json!(node),
            json!(result.predecessor_of(node)),
        ]);
    }
    let footer = format!(
        "{} of {} node(s) reached from {}",
        result.reached_count(),
        result.reachable.len(),
        result.source
    );
    report.footer(footer)
}

fn distances(graph: &Graph, paths: &ShortestPaths) -> Report {
    let mut report = Report::new(vec!["node", "distance", "parent"]);
    for id in graph.nodes() {
        report.push(vec![
            json!(id),
            distance_cell(paths.distance_to(id).unwrap_or(f64::INFINITY)),
            json!(paths.parent_of(id)),
        ]);
    }
    let mean = match paths.mean_reachable_distance() {
        Some(mean) => format!("{:.3}", mean),
        None => "-".to_string(),
    };
    let footer = format!(
        "{} of {} node(s) reachable ({:?} from {}), mean distance {}",
        paths.reachable_count(),
        paths.distance.len(),
        paths.direction,
        paths.root,
        mean
    );
    report.footer(footer)
}
