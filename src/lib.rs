//! csleuth: heuristic static-analysis engine for C source
//!
//! This library scans a source file line by line and reports likely defects:
//! unbalanced delimiters, missing or duplicated statement terminators,
//! unsafe library calls, double free, use-after-free, use-before-init and
//! unbounded recursion between functions. Detection is pattern- and
//! state-based over raw text; no syntax tree is ever built, so findings are
//! fast heuristics with known false positives and negatives.

pub mod analyzer;
pub mod callgraph;
pub mod cli;
pub mod error;
pub mod extract;
pub mod functions;
pub mod issues;
pub mod lexical;
pub mod memory;
pub mod source;
pub mod unsafe_api;

pub use analyzer::Analyzer;
pub use error::{Error as AnalyzerError, Result as AnalyzerResult};

// Re-export commonly used types
pub use callgraph::{CallCycle, CallGraph};
pub use functions::FunctionRecord;
pub use issues::{AnalysisReport, Issue, IssueKind, Severity};
pub use memory::{VariableRecord, VariableTracker};
pub use source::SourceBuffer;
