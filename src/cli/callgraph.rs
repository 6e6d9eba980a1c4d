use crate::callgraph::CallGraph;
use crate::cli::utils;
use crate::error::Result as AnalyzerResult;
use crate::functions::index_functions;
use crate::source::SourceBuffer;
use std::path::Path;

/// Run the callgraph subcommand: build the call graph, report the cycle
/// verdict and optionally export DOT
pub fn callgraph(input_path: &Path, dot_path: Option<&Path>) -> AnalyzerResult<()> {
    let source = SourceBuffer::from_path(input_path)?;
    let functions = index_functions(&source);
    let graph = CallGraph::build(&source, &functions);

    println!(
        "Call graph: {} function(s), {} call edge(s)",
        graph.node_count(),
        graph.edge_count()
    );

    match graph.find_cycle() {
        Some(cycle) => println!(
            "Infinite recursion detected: '{}' calls '{}' on line {} forming a cycle.",
            cycle.caller, cycle.callee, cycle.call_line
        ),
        None => println!("No infinite recursion detected."),
    }

    if let Some(path) = dot_path {
        utils::write_output(&graph.to_dot(), Some(path))?;
        println!("DOT graph written to {}", path.display());
    }
    Ok(())
}
