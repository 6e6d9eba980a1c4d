//! Bracket balance sweep
//!
//! A stack of open brackets with the line each was opened on. Every closing
//! character pops and is compared against the expected closer; whatever is
//! left on the stack at end of input is reported as unclosed.

use crate::issues::{Issue, IssueKind, IssueQueue, Severity};

/// One open bracket awaiting its closer.
#[derive(Debug, Clone, Copy)]
struct OpenBracket {
    opener: char,
    line: u32,
}

/// Stateful bracket scanner, fed one line at a time.
#[derive(Debug, Default)]
pub struct BracketScanner {
    stack: Vec<OpenBracket>,
}

fn closer_for(opener: char) -> char {
    match opener {
        '(' => ')',
        '{' => '}',
        _ => ']',
    }
}

fn opener_for(closer: char) -> char {
    match closer {
        ')' => '(',
        '}' => '{',
        _ => '[',
    }
}

impl BracketScanner {
    pub fn new() -> Self {
        BracketScanner { stack: Vec::new() }
    }

    /// Scan one line, pushing findings for mismatched or unexpected closers.
    pub fn scan_line(&mut self, line: &str, line_number: u32, sink: &mut IssueQueue) {
        for ch in line.chars() {
            match ch {
                '(' | '{' | '[' => {
                    self.stack.push(OpenBracket {
                        opener: ch,
                        line: line_number,
                    });
                }
                ')' | '}' | ']' => match self.stack.pop() {
                    None => {
                        sink.push(Issue::new(
                            Severity::Medium,
                            IssueKind::UnexpectedClosingBracket,
                            line_number,
                            format!(
                                "Unexpected closing bracket '{}' with no matching opening bracket",
                                ch
                            ),
                        ));
                    }
                    Some(open) => {
                        if opener_for(ch) != open.opener {
                            sink.push(Issue::new(
                                Severity::Medium,
                                IssueKind::BracketMismatch,
                                line_number,
                                format!(
                                    "Mismatched bracket: expected '{}' but found '{}'",
                                    closer_for(open.opener),
                                    ch
                                ),
                            ));
                        }
                    }
                },
                _ => {}
            }
        }
    }

    /// Report every bracket still open, oldest first.
    pub fn finish(self, sink: &mut IssueQueue) {
        for open in self.stack {
            sink.push(Issue::new(
                Severity::Medium,
                IssueKind::UnclosedBracket,
                open.line,
                format!(
                    "Unclosed bracket '{}' - missing '{}'",
                    open.opener,
                    closer_for(open.opener)
                ),
            ));
        }
    }

    /// Current nesting depth (number of unclosed brackets).
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
