//! Unsafe library call and constant-division detectors
//!
//! Per-line substring checks for calls that are discouraged outright
//! (`gets`), calls that copy without a bound, calls missing their required
//! argument, and the division-by-constant-zero pattern.

use crate::extract;
use crate::issues::{Issue, IssueKind, IssueQueue, Severity};

/// Copy/concatenation calls with no length bound.
const UNBOUNDED_COPY_CALLS: &[&str] = &["strcpy", "strcat", "sprintf"];

/// Calls that require at least one argument.
const ARGUMENT_REQUIRED_CALLS: &[&str] = &["malloc", "calloc", "free", "exit"];

/// Run all unsafe-API checks against one line.
pub fn check_line(line: &str, line_number: u32, sink: &mut IssueQueue) {
    if line.contains("gets(") {
        sink.push(Issue::new(
            Severity::Critical,
            IssueKind::UnboundedInput,
            line_number,
            "Use of gets() reads unbounded input; use fgets() instead",
        ));
    }

    for call in UNBOUNDED_COPY_CALLS {
        if line.contains(&format!("{}(", call)) {
            sink.push(Issue::new(
                Severity::Medium,
                IssueKind::UnboundedCopy,
                line_number,
                format!("Unbounded copy: {}() writes without a length limit", call),
            ));
        }
    }

    for call in ARGUMENT_REQUIRED_CALLS {
        if extract::call_operand(line, call).as_deref() == Some("") {
            sink.push(Issue::new(
                Severity::Medium,
                IssueKind::MissingCallArgument,
                line_number,
                format!("Call to {}() with no argument", call),
            ));
        }
    }

    if divides_by_constant_zero(line) {
        sink.push(Issue::new(
            Severity::Critical,
            IssueKind::DivisionByZero,
            line_number,
            "Division by constant zero",
        ));
    }
}

/// Match `/ 0` (or `/= 0`) where the zero is a whole constant, skipping
/// comment markers. `0.5` and `10` divisors do not match.
fn divides_by_constant_zero(line: &str) -> bool {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'/' {
            i += 1;
            continue;
        }
        // Comment markers, not division.
        let next = bytes.get(i + 1).copied();
        if next == Some(b'/') || next == Some(b'*') {
            i += 2;
            continue;
        }
        if i > 0 && bytes[i - 1] == b'*' {
            i += 1;
            continue;
        }
        let mut j = i + 1;
        if bytes.get(j) == Some(&b'=') {
            j += 1;
        }
        while bytes.get(j) == Some(&b' ') {
            j += 1;
        }
        if bytes.get(j) == Some(&b'0') {
            let after = bytes.get(j + 1).copied();
            let whole = match after {
                None => true,
                Some(c) => !c.is_ascii_alphanumeric() && c != b'.' && c != b'_',
            };
            if whole {
                return true;
            }
        }
        i += 1;
    }
    false
}
