//! Analysis driver
//!
//! Orchestrates the detection passes over one source buffer. Each pass
//! re-walks the line sequence from the beginning; all analysis state is
//! owned by a single run and dropped with it.

use crate::callgraph::{CallCycle, CallGraph};
use crate::extract;
use crate::functions::{self, FunctionRecord};
use crate::issues::{AnalysisReport, Issue, IssueKind, IssueQueue, Severity};
use crate::lexical::{self, BracketScanner, TerminatorScanner};
use crate::memory::VariableTracker;
use crate::source::SourceBuffer;
use crate::unsafe_api;

/// Runs every detection pass and collects findings into one report.
#[derive(Debug, Default)]
pub struct Analyzer {}

impl Analyzer {
    pub fn new() -> Self {
        Analyzer {}
    }

    /// Analyze a source buffer and return the severity-ordered report.
    pub fn analyze(&self, source: &SourceBuffer) -> AnalysisReport {
        let mut sink = IssueQueue::new();

        log::info!("analyzing {} lines", source.line_count());
        self.syntax_pass(source, &mut sink);
        self.unsafe_pass(source, &mut sink);
        self.variable_pass(source, &mut sink);
        self.recursion_pass(source, &mut sink);

        let report = sink.into_report();
        log::info!("analysis complete: {} findings", report.len());
        report
    }

    /// Bracket balance and statement terminator sweep.
    pub fn syntax_pass(&self, source: &SourceBuffer, sink: &mut IssueQueue) {
        let mut brackets = BracketScanner::new();
        for (line_number, line) in source.iter() {
            brackets.scan_line(line, line_number, sink);
        }
        brackets.finish(sink);

        let mut terminators = TerminatorScanner::new();
        for (line_number, line) in source.iter() {
            terminators.check_line(line, line_number, sink);
        }
    }

    /// Unsafe library call and constant-division sweep.
    pub fn unsafe_pass(&self, source: &SourceBuffer, sink: &mut IssueQueue) {
        for (line_number, line) in source.iter() {
            if lexical::is_comment_or_blank(line) {
                continue;
            }
            unsafe_api::check_line(line, line_number, sink);
        }
    }

    /// Variable lifecycle sweep. Use-after-free and uninitialized-use
    /// checks run against each line before that line's own declarations,
    /// allocations and frees are applied. Returns the final tracker state
    /// for callers that want the variable dump.
    pub fn variable_pass(&self, source: &SourceBuffer, sink: &mut IssueQueue) -> VariableTracker {
        let mut tracker = VariableTracker::new();

        for (line_number, line) in source.iter() {
            tracker.check_use_after_free(line, line_number, sink);
            tracker.check_uninitialized(line, line_number, sink);

            let is_declaration = lexical::is_declaration_line(line);
            if is_declaration {
                if let (Some(name), Some(declared_type)) =
                    (extract::declared_name(line), extract::declared_type(line))
                {
                    tracker.declare(
                        &name,
                        &declared_type,
                        line_number,
                        lexical::is_initialized(line),
                    );
                }
            }

            if line.contains("malloc") || line.contains("calloc") {
                if let Some(target) = extract::assignment_target(line) {
                    tracker.mark_allocated(&target, line_number);
                }
            } else if !is_declaration && lexical::is_initialized(line) {
                if let Some(target) = extract::assignment_target(line) {
                    tracker.mark_assigned(&target);
                }
            }

            if line.contains("free(") {
                match extract::call_operand(line, "free") {
                    // Empty argument list is the unsafe-API pass's finding.
                    Some(operand) if operand.is_empty() => {}
                    // free(*p) releases the pointee, not the tracked handle.
                    Some(operand) if operand.starts_with('*') => {}
                    Some(operand) => tracker.mark_freed(&operand, line_number, sink),
                    None => {}
                }
            }
        }

        tracker
    }

    /// Function indexing, call graph construction and cycle detection.
    /// Only the first cycle found is reported.
    pub fn recursion_pass(&self, source: &SourceBuffer, sink: &mut IssueQueue) {
        let function_index = functions::index_functions(source);
        let graph = CallGraph::build(source, &function_index);
        match graph.find_cycle() {
            Some(cycle) => sink.push(Self::cycle_issue(&cycle)),
            None => log::info!("no recursion cycles detected"),
        }
    }

    fn cycle_issue(cycle: &CallCycle) -> Issue {
        Issue::new(
            Severity::Critical,
            IssueKind::InfiniteRecursion,
            cycle.call_line,
            format!(
                "Infinite recursion: '{}' calls '{}' at line {} forming a cycle",
                cycle.caller, cycle.callee, cycle.call_line
            ),
        )
    }

    /// Convenience for callers that only want the function regions.
    pub fn index_functions(&self, source: &SourceBuffer) -> Vec<FunctionRecord> {
        functions::index_functions(source)
    }
}
