//! Graph rendering: Graphviz DOT and a plain-text outline.
//!
//! Static edges are solid; conditional edges are dashed and labelled with their
//! routing key. Nodes are listed in sorted order so output is stable.

use std::fmt::Write;

use super::conditional::NextEntry;
use super::CompiledStateGraph;
use super::{END, START};

fn label(id: &str) -> &str {
    match id {
        START => "START",
        END => "END",
        other => other,
    }
}

/// Graphviz DOT representation of the graph.
pub fn generate_dot<S>(graph: &CompiledStateGraph<S>) -> String {
    let mut dot = String::from("digraph {\n");
    dot.push_str("  rankdir=LR;\n");
    dot.push_str("  node [shape=box];\n\n");
    let _ = writeln!(dot, "  \"{}\" [label=\"START\", style=bold];", START);
    let _ = writeln!(dot, "  \"{}\" [label=\"END\", style=bold];", END);

    let ids = sorted_ids(graph);
    for id in &ids {
        let _ = writeln!(dot, "  \"{}\";", id);
    }
    dot.push('\n');

    let _ = writeln!(dot, "  \"{}\" -> \"{}\";", START, graph.first_node_id);
    for id in &ids {
        match graph.next_map.get(*id) {
            Some(NextEntry::Unconditional(to)) => {
                let _ = writeln!(dot, "  \"{}\" -> \"{}\";", id, to);
            }
            Some(NextEntry::Conditional(router)) => {
                for (key, to) in router.targets() {
                    let _ = writeln!(
                        dot,
                        "  \"{}\" -> \"{}\" [style=dashed, label=\"{}\"];",
                        id, to, key
                    );
                }
            }
            None => {
                if let Some(to) = linear_successor(graph, id) {
                    let _ = writeln!(dot, "  \"{}\" -> \"{}\";", id, to);
                }
            }
        }
    }

    dot.push_str("}\n");
    dot
}

/// Plain-text outline: one line per node with its outgoing edges.
pub fn generate_text<S>(graph: &CompiledStateGraph<S>) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "Graph Structure:");
    let _ = writeln!(text, "Nodes: {}", graph.nodes.len());
    let _ = writeln!(text, "\nEdges:");
    let _ = writeln!(text, "  START -> {}", graph.first_node_id);
    for id in sorted_ids(graph) {
        match graph.next_map.get(id) {
            Some(NextEntry::Unconditional(to)) => {
                let _ = writeln!(text, "  {} -> {}", id, label(to));
            }
            Some(NextEntry::Conditional(router)) => {
                let targets = router.targets();
                if targets.is_empty() {
                    let _ = writeln!(text, "  {} -?-> (resolved at run time)", id);
                }
                for (key, to) in targets {
                    let _ = writeln!(text, "  {} -?-> {} [{}]", id, label(to), key);
                }
            }
            None => {
                let to = linear_successor(graph, id).unwrap_or(END);
                let _ = writeln!(text, "  {} -> {}", id, label(to));
            }
        }
    }
    text
}

fn sorted_ids<S>(graph: &CompiledStateGraph<S>) -> Vec<&str> {
    let mut ids: Vec<&str> = graph.nodes.keys().map(String::as_str).collect();
    ids.sort_unstable();
    ids
}

fn linear_successor<'a, S>(graph: &'a CompiledStateGraph<S>, id: &str) -> Option<&'a str> {
    let pos = graph.edge_order.iter().position(|x| x == id)?;
    graph.edge_order.get(pos + 1).map(String::as_str)
}
