use crate::cli::utils;
use crate::error::Result as AnalyzerResult;
use crate::functions::index_functions;
use crate::source::SourceBuffer;
use std::path::Path;

/// Run the functions subcommand: list detected function regions
pub fn functions(input_path: &Path, format: &str) -> AnalyzerResult<()> {
    let source = SourceBuffer::from_path(input_path)?;
    let regions = index_functions(&source);

    match format {
        "json" => {
            println!("{}", utils::to_json(&regions)?);
        }
        _ => {
            if regions.is_empty() {
                println!("No functions found.");
            } else {
                for (i, f) in regions.iter().enumerate() {
                    let end = f
                        .end_line
                        .map(|l| l.to_string())
                        .unwrap_or_else(|| "?".to_string());
                    println!("Function #{}: {} (lines {}-{})", i + 1, f.name, f.start_line, end);
                }
            }
        }
    }
    Ok(())
}
