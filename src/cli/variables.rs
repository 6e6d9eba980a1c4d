use crate::analyzer::Analyzer;
use crate::cli::utils;
use crate::error::Result as AnalyzerResult;
use crate::issues::IssueQueue;
use crate::source::SourceBuffer;
use std::path::Path;

/// Run the variables subcommand: dump tracked variable records
pub fn variables(input_path: &Path, format: &str) -> AnalyzerResult<()> {
    let source = SourceBuffer::from_path(input_path)?;
    // The lifecycle findings are discarded here; `analyze` reports them.
    let mut sink = IssueQueue::new();
    let tracker = Analyzer::new().variable_pass(&source, &mut sink);

    match format {
        "json" => {
            println!("{}", utils::to_json(&tracker.records())?);
        }
        _ => {
            if tracker.records().is_empty() {
                println!("No variables found.");
            } else {
                for record in tracker.records() {
                    println!(
                        "Name: {}\tType: {}\tLine: {}\tInitialized: {}\tFreed: {}",
                        record.name,
                        record.declared_type,
                        record.declaration_line,
                        if record.initialized { "yes" } else { "no" },
                        if record.freed { "yes" } else { "no" },
                    );
                }
            }
        }
    }
    Ok(())
}
