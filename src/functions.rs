//! Function region indexing
//!
//! Partitions the file into function regions by brace counting. The scanner
//! understands neither function pointers nor macros that expand to braces;
//! it is a heuristic region finder, not a parser.

use crate::extract;
use crate::source::SourceBuffer;
use serde::Serialize;

/// One detected function region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionRecord {
    pub name: String,
    pub start_line: u32,
    /// `None` while the region is still open (no matching close seen yet).
    pub end_line: Option<u32>,
}

/// Type keywords that can open a function signature.
const SIGNATURE_TYPES: &[&str] = &[
    "int ", "void ", "char ", "float ", "double ", "long ", "struct ",
];

/// Lenient signature test used while outside any function: a line with a
/// `(` that is not a control-flow condition, a macro line, or an
/// assignment.
fn looks_like_signature(line: &str) -> bool {
    line.contains('(')
        && !line.contains('=')
        && !line.contains("if")
        && !line.contains("for")
        && !line.contains("while")
        && !line.contains("#include")
        && !line.contains("#define")
}

/// Stricter test used while inside a function body: the safety valve only
/// fires for lines that also carry a type keyword.
fn looks_like_new_signature(line: &str) -> bool {
    looks_like_signature(line) && SIGNATURE_TYPES.iter().any(|t| line.contains(t))
}

/// Scan the whole source and return the detected function regions in order.
pub fn index_functions(source: &SourceBuffer) -> Vec<FunctionRecord> {
    let mut functions: Vec<FunctionRecord> = Vec::new();
    let mut current: Option<usize> = None;
    let mut depth: i32 = 0;
    let mut last_line: u32 = 0;

    for (line_number, line) in source.iter() {
        last_line = line_number;

        match current {
            None => {
                if looks_like_signature(line) {
                    if let Some(name) = extract::function_name(line) {
                        log::debug!("function '{}' opens at line {}", name, line_number);
                        functions.push(FunctionRecord {
                            name,
                            start_line: line_number,
                            end_line: None,
                        });
                        current = Some(functions.len() - 1);
                        depth = if line.contains('{') { 1 } else { 0 };
                    }
                }
            }
            Some(open_idx) => {
                // Safety valve: a new signature while a region is still
                // open means the previous close brace is missing.
                if looks_like_new_signature(line) {
                    if let Some(name) = extract::function_name(line) {
                        functions[open_idx].end_line = Some(line_number.saturating_sub(1));
                        log::debug!(
                            "force-closing '{}' before new function '{}' at line {}",
                            functions[open_idx].name,
                            name,
                            line_number
                        );
                        functions.push(FunctionRecord {
                            name,
                            start_line: line_number,
                            end_line: None,
                        });
                        current = Some(functions.len() - 1);
                        depth = if line.contains('{') { 1 } else { 0 };
                        continue;
                    }
                }

                for ch in line.chars() {
                    match ch {
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                functions[open_idx].end_line = Some(line_number);
                                current = None;
                                break;
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    // Input ended inside a body: close at the last line.
    if let Some(open_idx) = current {
        functions[open_idx].end_line = Some(last_line);
    }

    functions
}
