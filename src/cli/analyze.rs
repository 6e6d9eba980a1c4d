use crate::analyzer::Analyzer;
use crate::cli::utils;
use crate::error::Result as AnalyzerResult;
use crate::source::SourceBuffer;
use std::path::Path;

/// Run the analyze subcommand
pub fn analyze(input_path: &Path, format: &str) -> AnalyzerResult<()> {
    let source = SourceBuffer::from_path(input_path)?;
    let report = Analyzer::new().analyze(&source);

    match format {
        "json" => {
            println!("{}", utils::to_json(&report)?);
        }
        _ => {
            if report.is_empty() {
                println!("No issues detected.");
            } else {
                println!("{} issue(s) detected:", report.len());
                for issue in report.issues() {
                    println!("{}", issue);
                }
            }
        }
    }
    Ok(())
}
