//! Command-line interface module
//!
//! This module contains the implementations for the CLI subcommands.

pub mod analyze;
pub mod callgraph;
pub mod functions;
pub mod variables;

/// Common CLI utilities
pub mod utils {
    use crate::error::{Error as AnalyzerError, Result as AnalyzerResult};
    use std::path::Path;

    /// Write output to file or stdout
    pub fn write_output(content: &str, output_path: Option<&Path>) -> AnalyzerResult<()> {
        match output_path {
            Some(path) => std::fs::write(path, content).map_err(AnalyzerError::from),
            None => {
                println!("{}", content);
                Ok(())
            }
        }
    }

    /// Serialize a value as pretty JSON
    pub fn to_json<T: serde::Serialize>(value: &T) -> AnalyzerResult<String> {
        serde_json::to_string_pretty(value).map_err(|e| AnalyzerError::Internal {
            message: format!("Failed to serialize to JSON: {}", e),
        })
    }
}
