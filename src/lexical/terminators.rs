//! Statement terminator heuristics
//!
//! Decides per line whether a trailing semicolon is required, tracking
//! aggregate-type (struct/union/enum) bodies so member lines are exempt,
//! and scans for duplicated semicolons outside string literals.

use crate::issues::{Issue, IssueKind, IssueQueue, Severity};
use crate::lexical;

/// Standard library call names whose presence marks a statement line.
const LIBRARY_CALLS: &[&str] = &[
    "printf", "scanf", "malloc", "free", "calloc", "realloc", "exit", "abort", "atexit", "strcpy",
    "strcat", "strlen", "strcmp", "strncpy", "strncat", "strncmp", "strstr", "strchr", "strrchr",
    "strspn", "strcspn", "strpbrk", "strtok", "strerror", "strtol", "strtoul", "strtod",
];

/// Statement keywords that end in a semicolon.
const STATEMENT_KEYWORDS: &[&str] = &["return", "goto", "break", "continue"];

/// Compound assignment and step operators.
const OPERATOR_TOKENS: &[&str] = &["++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "?"];

/// Control-keyword patterns whose lines do not take a trailing semicolon.
const CONTROL_PATTERNS: &[&str] = &[
    "if(", "if (", "for(", "for (", "while(", "while (", "switch(", "switch (", "else",
];

/// Stateful terminator scanner, fed one line at a time.
#[derive(Debug, Default)]
pub struct TerminatorScanner {
    in_aggregate: bool,
}

impl TerminatorScanner {
    pub fn new() -> Self {
        TerminatorScanner { in_aggregate: false }
    }

    /// Check one line for missing and extra terminators.
    pub fn check_line(&mut self, line: &str, line_number: u32, sink: &mut IssueQueue) {
        if lexical::is_comment_or_blank(line) || lexical::is_preprocessor(line) {
            return;
        }

        // Aggregate bodies are exempt until the closing line.
        if (line.contains("struct") || line.contains("union") || line.contains("enum"))
            && line.contains('{')
        {
            self.in_aggregate = true;
        }
        let closes_aggregate = self.in_aggregate && line.contains('}');

        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            return;
        }

        if self.requires_terminator(trimmed) && !trimmed.ends_with(';') {
            sink.push(Issue::new(
                Severity::Medium,
                IssueKind::MissingSemicolon,
                line_number,
                format!("Missing semicolon at the end of line {}", line_number),
            ));
        }

        // A for header with no semicolon at all is malformed on its own.
        if trimmed.contains("for") && !trimmed.contains(';') {
            sink.push(Issue::new(
                Severity::Medium,
                IssueKind::MissingSemicolon,
                line_number,
                format!("Missing semicolon in for loop at line {}", line_number),
            ));
        }

        self.check_extra_semicolons(trimmed, line_number, sink);

        if closes_aggregate {
            self.in_aggregate = false;
        }
    }

    fn requires_terminator(&self, trimmed: &str) -> bool {
        if trimmed.ends_with('{') || trimmed.ends_with('}') {
            return false;
        }
        if CONTROL_PATTERNS.iter().any(|p| trimmed.contains(p)) {
            return false;
        }
        if self.in_aggregate {
            return false;
        }

        let has_statement_token = LIBRARY_CALLS.iter().any(|c| trimmed.contains(c))
            || STATEMENT_KEYWORDS.iter().any(|k| trimmed.contains(k))
            || OPERATOR_TOKENS.iter().any(|op| trimmed.contains(op))
            || lexical::is_initialized(trimmed);
        if has_statement_token {
            return true;
        }

        // Declarations and prototypes also end in a semicolon unless the
        // line opens a body.
        (lexical::is_declaration_line(trimmed) || trimmed.contains("void "))
            && !trimmed.contains('{')
    }

    fn check_extra_semicolons(&self, line: &str, line_number: u32, sink: &mut IssueQueue) {
        let mut in_string = false;
        let mut run = 0u32;
        for ch in line.chars() {
            if ch == '"' {
                in_string = !in_string;
            }
            if !in_string && ch == ';' {
                run += 1;
                if run > 1 {
                    sink.push(Issue::new(
                        Severity::Low,
                        IssueKind::ExtraSemicolon,
                        line_number,
                        format!("Extra semicolon at line {}", line_number),
                    ));
                    run = 0;
                }
            } else if !in_string && !ch.is_whitespace() {
                run = 0;
            }
        }
    }
}
