//! Variable lifecycle tracking
//!
//! Maintains per-variable state (declared / initialized / allocated / freed)
//! across the whole file and flags illegal transitions: double free,
//! use-after-free and use-before-initialization. The tracker has no notion
//! of lexical scope exit; every variable is file-scoped for the duration of
//! one pass. A name reused in two functions collides, which is a known,
//! preserved limitation.

use crate::issues::{Issue, IssueKind, IssueQueue, Severity};
use crate::lexical;
use serde::Serialize;
use std::collections::HashMap;

/// Type tag recorded once a variable is observed receiving a dynamic
/// allocation.
pub const POINTER_TYPE: &str = "pointer";

/// Characters that terminate an identifier token, used together with
/// whitespace when splitting a line into candidate tokens.
const TOKEN_SEPARATORS: &str = "(){}[];,=.+-/%*&|!<>";

/// Lifecycle record for one tracked variable.
#[derive(Debug, Clone, Serialize)]
pub struct VariableRecord {
    pub name: String,
    pub declared_type: String,
    pub declaration_line: u32,
    pub initialized: bool,
    pub freed: bool,
    /// Meaningful only while `freed` is true.
    pub freed_line: u32,
}

impl VariableRecord {
    pub fn is_pointer(&self) -> bool {
        self.declared_type == POINTER_TYPE
    }
}

/// Insertion-ordered collection of variable records with a name index.
#[derive(Debug, Default)]
pub struct VariableTracker {
    records: Vec<VariableRecord>,
    by_name: HashMap<String, usize>,
}

impl VariableTracker {
    pub fn new() -> Self {
        VariableTracker::default()
    }

    pub fn find(&self, name: &str) -> Option<&VariableRecord> {
        self.by_name.get(name).map(|&i| &self.records[i])
    }

    pub fn records(&self) -> &[VariableRecord] {
        &self.records
    }

    /// Record a declaration. A re-declaration updates the existing record's
    /// declaration line and initialization flag in place (last write wins)
    /// rather than creating a duplicate.
    pub fn declare(&mut self, name: &str, declared_type: &str, line: u32, initialized: bool) {
        if let Some(&i) = self.by_name.get(name) {
            let record = &mut self.records[i];
            record.declaration_line = line;
            record.initialized = initialized;
            return;
        }
        log::debug!("declared '{}' ({}) at line {}", name, declared_type, line);
        self.by_name.insert(name.to_string(), self.records.len());
        self.records.push(VariableRecord {
            name: name.to_string(),
            declared_type: declared_type.to_string(),
            declaration_line: line,
            initialized,
            freed: false,
            freed_line: 0,
        });
    }

    /// Record a dynamic allocation assigned to `name`. Re-allocating a
    /// freed pointer implicitly un-frees it.
    pub fn mark_allocated(&mut self, name: &str, line: u32) {
        if let Some(&i) = self.by_name.get(name) {
            let record = &mut self.records[i];
            record.declared_type = POINTER_TYPE.to_string();
            record.initialized = true;
            record.freed = false;
            record.freed_line = 0;
        } else {
            self.by_name.insert(name.to_string(), self.records.len());
            self.records.push(VariableRecord {
                name: name.to_string(),
                declared_type: POINTER_TYPE.to_string(),
                declaration_line: line,
                initialized: true,
                freed: false,
                freed_line: 0,
            });
        }
        log::debug!("'{}' allocated at line {}", name, line);
    }

    /// Record a plain re-assignment to a tracked variable.
    pub fn mark_assigned(&mut self, name: &str) {
        if let Some(&i) = self.by_name.get(name) {
            self.records[i].initialized = true;
        }
    }

    /// Record a `free(name)` call. Freeing an already-freed pointer is a
    /// double free; freeing an unknown name is an advisory finding only.
    /// Non-pointer variables are never marked freed.
    pub fn mark_freed(&mut self, name: &str, line: u32, sink: &mut IssueQueue) {
        match self.by_name.get(name) {
            Some(&i) => {
                let record = &mut self.records[i];
                if !record.is_pointer() {
                    return;
                }
                if record.freed {
                    sink.push(Issue::new(
                        Severity::Critical,
                        IssueKind::DoubleFree,
                        line,
                        format!(
                            "Double free of '{}' at line {} (previously freed at line {})",
                            record.name, line, record.freed_line
                        ),
                    ));
                } else {
                    record.freed = true;
                    record.freed_line = line;
                    log::debug!("'{}' freed at line {}", name, line);
                }
            }
            None => {
                sink.push(Issue::new(
                    Severity::Low,
                    IssueKind::UntrackedFree,
                    line,
                    format!("Attempt to free untracked variable '{}'", name),
                ));
            }
        }
    }

    /// Scan the line against every freed pointer using three heuristics:
    /// dereference (`*name`), member access (`name->`) and stand-alone
    /// token use. The first heuristic that matches reports and ends the
    /// scan for that variable on that line.
    pub fn check_use_after_free(&self, line: &str, line_number: u32, sink: &mut IssueQueue) {
        for record in self.records.iter().filter(|r| r.freed && r.is_pointer()) {
            if Self::dereferences_freed(line, &record.name) {
                sink.push(Issue::new(
                    Severity::Critical,
                    IssueKind::UseAfterFree,
                    line_number,
                    format!(
                        "Potential use-after-free: '{}' (freed at line {}) dereferenced at line {}",
                        record.name, record.freed_line, line_number
                    ),
                ));
                continue;
            }
            if line.contains(&format!("{}->", record.name)) {
                sink.push(Issue::new(
                    Severity::Critical,
                    IssueKind::UseAfterFree,
                    line_number,
                    format!(
                        "Potential use-after-free: '{}' (freed at line {}) used with '->' at line {}",
                        record.name, record.freed_line, line_number
                    ),
                ));
                continue;
            }
            if line_number > record.declaration_line
                && Self::used_as_token(line, &record.name)
                && !line.contains(&format!("free({})", record.name))
                && !line.contains(&format!("free(*{})", record.name))
            {
                sink.push(Issue::new(
                    Severity::High,
                    IssueKind::UseAfterFree,
                    line_number,
                    format!(
                        "Potential use-after-free: '{}' (freed at line {}) used at line {}",
                        record.name, record.freed_line, line_number
                    ),
                ));
            }
        }
    }

    /// Report the first use of each still-uninitialized variable, then mark
    /// it initialized so later lines do not repeat the report.
    pub fn check_uninitialized(&mut self, line: &str, line_number: u32, sink: &mut IssueQueue) {
        let assignment_target = crate::extract::assignment_target(line);
        for i in 0..self.records.len() {
            let record = &self.records[i];
            if record.initialized || record.declaration_line > line_number {
                continue;
            }
            if !Self::used_as_token(line, &record.name) {
                continue;
            }
            if lexical::is_declaration_line(line) {
                continue;
            }
            if assignment_target.as_deref() == Some(record.name.as_str()) {
                continue;
            }
            sink.push(Issue::new(
                Severity::High,
                IssueKind::UninitializedUse,
                line_number,
                format!(
                    "Variable '{}' (declared at line {}) used uninitialized at line {}",
                    record.name, record.declaration_line, line_number
                ),
            ));
            self.records[i].initialized = true;
        }
    }

    /// First occurrence of `*name` followed by a non-identifier character,
    /// unless the same line frees through the dereference.
    fn dereferences_freed(line: &str, name: &str) -> bool {
        let pattern = format!("*{}", name);
        let Some(pos) = line.find(&pattern) else {
            return false;
        };
        let after = line[pos + pattern.len()..].chars().next();
        let boundary = match after {
            None => true,
            Some(c) => !c.is_alphanumeric() && c != '_',
        };
        boundary && !line.contains(&format!("free({})", pattern))
    }

    fn used_as_token(line: &str, name: &str) -> bool {
        line.split(|c: char| c.is_whitespace() || TOKEN_SEPARATORS.contains(c))
            .any(|token| token == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(sink: IssueQueue) -> Vec<Issue> {
        sink.into_report().into_issues()
    }

    #[test]
    fn double_free_cites_first_free_line() {
        let mut sink = IssueQueue::new();
        let mut tracker = VariableTracker::new();
        tracker.mark_allocated("p", 2);
        tracker.mark_freed("p", 3, &mut sink);
        tracker.mark_freed("p", 4, &mut sink);
        let issues = drain(sink);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::DoubleFree);
        assert_eq!(issues[0].severity, Severity::Critical);
        assert_eq!(issues[0].line, 4);
        assert!(issues[0].description.contains("line 3"));
    }

    #[test]
    fn reallocation_unfrees_a_pointer() {
        let mut sink = IssueQueue::new();
        let mut tracker = VariableTracker::new();
        tracker.mark_allocated("p", 1);
        tracker.mark_freed("p", 2, &mut sink);
        tracker.mark_allocated("p", 3);
        tracker.mark_freed("p", 4, &mut sink);
        assert!(drain(sink).is_empty());
    }

    #[test]
    fn freeing_unknown_name_is_advisory() {
        let mut sink = IssueQueue::new();
        let mut tracker = VariableTracker::new();
        tracker.mark_freed("mystery", 7, &mut sink);
        let issues = drain(sink);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::UntrackedFree);
        assert_eq!(issues[0].severity, Severity::Low);
    }

    #[test]
    fn non_pointer_is_never_marked_freed() {
        let mut sink = IssueQueue::new();
        let mut tracker = VariableTracker::new();
        tracker.declare("n", "int", 1, true);
        tracker.mark_freed("n", 2, &mut sink);
        tracker.mark_freed("n", 3, &mut sink);
        assert!(drain(sink).is_empty());
        assert!(!tracker.find("n").unwrap().freed);
    }

    #[test]
    fn dereference_after_free_is_reported_once() {
        let mut sink = IssueQueue::new();
        let mut tracker = VariableTracker::new();
        tracker.mark_allocated("ptr", 1);
        tracker.mark_freed("ptr", 2, &mut sink);
        tracker.check_use_after_free("*ptr = 5;", 3, &mut sink);
        let issues = drain(sink);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::UseAfterFree);
        assert_eq!(issues[0].severity, Severity::Critical);
        assert_eq!(issues[0].line, 3);
        assert!(issues[0].description.contains("freed at line 2"));
    }

    #[test]
    fn freeing_through_dereference_is_not_a_use() {
        let mut sink = IssueQueue::new();
        let mut tracker = VariableTracker::new();
        tracker.mark_allocated("ptr", 1);
        tracker.mark_freed("ptr", 2, &mut sink);
        tracker.check_use_after_free("free(*ptr);", 3, &mut sink);
        assert!(drain(sink).is_empty());
    }

    #[test]
    fn member_access_after_free_is_reported() {
        let mut sink = IssueQueue::new();
        let mut tracker = VariableTracker::new();
        tracker.mark_allocated("node", 1);
        tracker.mark_freed("node", 2, &mut sink);
        tracker.check_use_after_free("node->value = 1;", 3, &mut sink);
        let issues = drain(sink);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].description.contains("'->'"));
    }

    #[test]
    fn token_use_after_free_is_high_severity() {
        let mut sink = IssueQueue::new();
        let mut tracker = VariableTracker::new();
        tracker.mark_allocated("p", 1);
        tracker.mark_freed("p", 2, &mut sink);
        tracker.check_use_after_free("q = p;", 3, &mut sink);
        let issues = drain(sink);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::High);
    }

    #[test]
    fn the_free_call_itself_is_not_a_token_use() {
        let mut sink = IssueQueue::new();
        let mut tracker = VariableTracker::new();
        tracker.mark_allocated("p", 1);
        tracker.mark_freed("p", 2, &mut sink);
        tracker.check_use_after_free("free(p);", 4, &mut sink);
        assert!(drain(sink).is_empty());
    }

    #[test]
    fn uninitialized_use_is_reported_once_then_dampened() {
        let mut sink = IssueQueue::new();
        let mut tracker = VariableTracker::new();
        tracker.declare("x", "int", 1, false);
        tracker.check_uninitialized("y = x + 1;", 2, &mut sink);
        tracker.check_uninitialized("z = x + 2;", 3, &mut sink);
        let issues = drain(sink);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::UninitializedUse);
        assert_eq!(issues[0].line, 2);
    }

    #[test]
    fn assignment_to_the_variable_is_not_a_use() {
        let mut sink = IssueQueue::new();
        let mut tracker = VariableTracker::new();
        tracker.declare("x", "int", 1, false);
        tracker.check_uninitialized("x = 5;", 2, &mut sink);
        assert!(drain(sink).is_empty());
    }

    #[test]
    fn redeclaration_updates_in_place() {
        let mut tracker = VariableTracker::new();
        tracker.declare("x", "int", 1, false);
        tracker.declare("x", "int", 5, true);
        assert_eq!(tracker.records().len(), 1);
        let record = tracker.find("x").unwrap();
        assert_eq!(record.declaration_line, 5);
        assert!(record.initialized);
    }
}
