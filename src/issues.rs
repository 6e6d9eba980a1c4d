//! Findings and the prioritized issue sink
//!
//! Every detector publishes its findings into an [`IssueQueue`], a growable
//! binary min-heap ordered by severity. Draining the queue yields the final
//! [`AnalysisReport`] in non-decreasing severity order.

use serde::Serialize;
use std::fmt;

/// Four-level severity order; a lower level is more urgent.
///
/// The derived `Ord` follows declaration order, so `Critical < High <
/// Medium < Low` and the min-heap surfaces critical findings first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        };
        write!(f, "{}", s)
    }
}

/// Taxonomy of defect findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    BracketMismatch,
    UnexpectedClosingBracket,
    UnclosedBracket,
    MissingSemicolon,
    ExtraSemicolon,
    DoubleFree,
    UseAfterFree,
    UntrackedFree,
    UninitializedUse,
    UnboundedInput,
    UnboundedCopy,
    MissingCallArgument,
    DivisionByZero,
    InfiniteRecursion,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IssueKind::BracketMismatch => "bracket mismatch",
            IssueKind::UnexpectedClosingBracket => "unexpected closing bracket",
            IssueKind::UnclosedBracket => "unclosed bracket",
            IssueKind::MissingSemicolon => "missing semicolon",
            IssueKind::ExtraSemicolon => "extra semicolon",
            IssueKind::DoubleFree => "double free",
            IssueKind::UseAfterFree => "use after free",
            IssueKind::UntrackedFree => "untracked free",
            IssueKind::UninitializedUse => "uninitialized use",
            IssueKind::UnboundedInput => "unbounded input",
            IssueKind::UnboundedCopy => "unbounded copy",
            IssueKind::MissingCallArgument => "missing call argument",
            IssueKind::DivisionByZero => "division by zero",
            IssueKind::InfiniteRecursion => "infinite recursion",
        };
        write!(f, "{}", s)
    }
}

/// One reported defect candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub kind: IssueKind,
    pub line: u32,
    pub description: String,
}

impl Issue {
    pub fn new(severity: Severity, kind: IssueKind, line: u32, description: impl Into<String>) -> Self {
        Issue {
            severity,
            kind,
            line,
            description: description.into(),
        }
    }

    /// Heap ordering key: severity first, then line number ascending.
    ///
    /// The secondary key makes draining deterministic within a severity
    /// level (see DESIGN.md, heap tie-breaking).
    fn key(&self) -> (Severity, u32) {
        (self.severity, self.line)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] line {}: {} - {}",
            self.severity, self.line, self.kind, self.description
        )
    }
}

/// Growable binary min-heap of issues, ordered by (severity, line).
///
/// Backing storage is a contiguous vector interpreted as a binary heap:
/// slot 0 is the root, the children of slot `i` live at `2i + 1` and
/// `2i + 2`. Capacity doubles on overflow and never shrinks during a run.
#[derive(Debug, Default)]
pub struct IssueQueue {
    heap: Vec<Issue>,
}

impl IssueQueue {
    pub fn new() -> Self {
        IssueQueue {
            heap: Vec::with_capacity(16),
        }
    }

    /// Insert a finding and restore heap order by sifting it up.
    pub fn push(&mut self, issue: Issue) {
        log::debug!("finding: {}", issue);
        self.heap.push(issue);
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the most urgent finding, or `None` when empty.
    ///
    /// The root is replaced with the last element, which is then sifted
    /// down toward the smaller of its children.
    pub fn pop(&mut self) -> Option<Issue> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let root = self.heap.pop();
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        root
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drain the queue into a severity-ordered report.
    pub fn into_report(mut self) -> AnalysisReport {
        let mut issues = Vec::with_capacity(self.len());
        while let Some(issue) = self.pop() {
            issues.push(issue);
        }
        AnalysisReport { issues }
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.heap[idx].key() < self.heap[parent].key() {
                self.heap.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * idx + 1;
            let right = 2 * idx + 2;
            let mut smallest = idx;
            if left < len && self.heap[left].key() < self.heap[smallest].key() {
                smallest = left;
            }
            if right < len && self.heap[right].key() < self.heap[smallest].key() {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.heap.swap(idx, smallest);
            idx = smallest;
        }
    }
}

/// Ordered sequence of findings produced by one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    issues: Vec<Issue>,
}

impl AnalysisReport {
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(severity: Severity, line: u32) -> Issue {
        Issue::new(severity, IssueKind::MissingSemicolon, line, "test")
    }

    #[test]
    fn pop_on_empty_returns_none() {
        let mut q = IssueQueue::new();
        assert!(q.pop().is_none());
        assert!(q.pop().is_none());
    }

    #[test]
    fn drain_yields_non_decreasing_severity() {
        let mut q = IssueQueue::new();
        let severities = [
            Severity::Low,
            Severity::Critical,
            Severity::Medium,
            Severity::High,
            Severity::Critical,
            Severity::Low,
            Severity::Medium,
        ];
        for (i, s) in severities.iter().enumerate() {
            q.push(issue(*s, i as u32 + 1));
        }
        let report = q.into_report();
        assert_eq!(report.len(), severities.len());
        for pair in report.issues().windows(2) {
            assert!(pair[0].severity <= pair[1].severity);
        }
    }

    #[test]
    fn ties_break_by_line_ascending() {
        let mut q = IssueQueue::new();
        q.push(issue(Severity::Medium, 30));
        q.push(issue(Severity::Medium, 10));
        q.push(issue(Severity::Medium, 20));
        let lines: Vec<u32> = q.into_report().into_issues().iter().map(|i| i.line).collect();
        assert_eq!(lines, vec![10, 20, 30]);
    }

    #[test]
    fn critical_surfaces_before_low() {
        let mut q = IssueQueue::new();
        q.push(issue(Severity::Low, 1));
        q.push(issue(Severity::Critical, 99));
        assert_eq!(q.pop().unwrap().severity, Severity::Critical);
        assert_eq!(q.pop().unwrap().severity, Severity::Low);
        assert!(q.pop().is_none());
    }
}
