//! Call graph construction and cycle detection
//!
//! Nodes are function names, edges are "caller calls callee at line L".
//! A DFS per root looks for back edges; the first one found is reported as
//! an infinite-recursion candidate and the search stops. The detector does
//! not enumerate every cycle, by design.

use crate::functions::FunctionRecord;
use crate::source::SourceBuffer;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::HashMap;

/// One detected recursion cycle: the back edge that closed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallCycle {
    pub caller: String,
    pub callee: String,
    pub call_line: u32,
}

/// Directed call graph over function names.
#[derive(Debug, Default)]
pub struct CallGraph {
    graph: DiGraph<String, u32>,
    by_name: HashMap<String, NodeIndex>,
}

impl CallGraph {
    pub fn new() -> Self {
        CallGraph::default()
    }

    /// Stable name-to-index mapping; nodes keep insertion order.
    pub fn get_or_insert(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.by_name.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.by_name.insert(name.to_string(), idx);
        idx
    }

    /// Add a "caller calls callee at line" edge. Self-loops are valid and
    /// detected as 1-node cycles.
    pub fn add_call(&mut self, caller: NodeIndex, callee: NodeIndex, line: u32) {
        self.graph.add_edge(caller, callee, line);
    }

    pub fn graph(&self) -> &DiGraph<String, u32> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Build the call graph from the source and the indexed function
    /// regions. Calls are recognized by the `name(` pattern while the
    /// scanner is inside some function body; the defining line of a
    /// function does not count as a call to itself.
    pub fn build(source: &SourceBuffer, functions: &[FunctionRecord]) -> Self {
        let mut cg = CallGraph::new();
        let definition_lines: HashMap<&str, u32> = functions
            .iter()
            .map(|f| (f.name.as_str(), f.start_line))
            .collect();
        for function in functions {
            cg.get_or_insert(&function.name);
        }

        let mut region = 0usize;
        let mut current: Option<usize> = None;

        for (line_number, line) in source.iter() {
            if line.trim_start().starts_with("//") {
                continue;
            }

            if let Some(i) = current {
                if let Some(end) = functions[i].end_line {
                    if line_number > end {
                        current = None;
                    }
                }
            }
            while region < functions.len() && functions[region].start_line <= line_number {
                if functions[region].start_line == line_number {
                    current = Some(region);
                }
                region += 1;
            }

            // Edges are only added while lexically inside a function body.
            let Some(i) = current else { continue };
            let caller = cg.by_name[&functions[i].name];

            for function in functions {
                let pattern = format!("{}(", function.name);
                if !line.contains(&pattern) {
                    continue;
                }
                if definition_lines.get(function.name.as_str()) == Some(&line_number) {
                    continue;
                }
                let callee = cg.by_name[&function.name];
                log::debug!(
                    "call edge {} -> {} at line {}",
                    functions[i].name,
                    function.name,
                    line_number
                );
                cg.add_call(caller, callee, line_number);
            }
        }

        cg
    }

    /// Run a DFS from every root and return the first back edge found, or
    /// `None` when the graph is acyclic. Visited and on-stack marks are
    /// reset between roots.
    pub fn find_cycle(&self) -> Option<CallCycle> {
        for root in self.graph.node_indices() {
            let mut visited = vec![false; self.graph.node_count()];
            let mut on_stack = vec![false; self.graph.node_count()];
            if let Some(cycle) = self.dfs(root, &mut visited, &mut on_stack) {
                return Some(cycle);
            }
        }
        None
    }

    fn dfs(
        &self,
        node: NodeIndex,
        visited: &mut Vec<bool>,
        on_stack: &mut Vec<bool>,
    ) -> Option<CallCycle> {
        visited[node.index()] = true;
        on_stack[node.index()] = true;

        for edge in self.graph.edges(node) {
            let neighbor = edge.target();
            if !visited[neighbor.index()] {
                if let Some(cycle) = self.dfs(neighbor, visited, on_stack) {
                    return Some(cycle);
                }
            } else if on_stack[neighbor.index()] {
                return Some(CallCycle {
                    caller: self.graph[node].clone(),
                    callee: self.graph[neighbor].clone(),
                    call_line: *edge.weight(),
                });
            }
        }

        on_stack[node.index()] = false;
        None
    }

    /// Export the graph in DOT format for visualization.
    pub fn to_dot(&self) -> String {
        format!("{}", petgraph::dot::Dot::new(&self.graph))
    }
}
