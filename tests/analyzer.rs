use csleuth::{Analyzer, Issue, IssueKind, Severity, SourceBuffer};

fn analyze(text: &str) -> Vec<Issue> {
    Analyzer::new()
        .analyze(&SourceBuffer::from_text(text))
        .into_issues()
}

fn count_kind(issues: &[Issue], kind: IssueKind) -> usize {
    issues.iter().filter(|i| i.kind == kind).count()
}

#[test]
fn double_free_scenario() {
    let issues = analyze(
        "int main() {\n    int *p = malloc(10);\n    free(p);\n    free(p);\n}\n",
    );
    assert_eq!(count_kind(&issues, IssueKind::DoubleFree), 1);
    assert_eq!(count_kind(&issues, IssueKind::UseAfterFree), 0);
    let double_free = issues
        .iter()
        .find(|i| i.kind == IssueKind::DoubleFree)
        .unwrap();
    assert_eq!(double_free.line, 4);
    assert_eq!(double_free.severity, Severity::Critical);
    assert!(double_free.description.contains("line 3"));
}

#[test]
fn use_after_free_on_dereference() {
    let issues = analyze("int main() {\n    p = malloc(10);\n    free(p);\n    *p = 5;\n}\n");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::UseAfterFree);
    assert_eq!(issues[0].line, 4);
    assert!(issues[0].description.contains("freed at line 3"));
}

#[test]
fn freeing_through_dereference_is_clean() {
    let issues = analyze("int main() {\n    p = malloc(10);\n    free(p);\n    free(*p);\n}\n");
    assert!(issues.is_empty(), "unexpected findings: {:?}", issues);
}

#[test]
fn uninitialized_use_reported_once() {
    let issues = analyze("int x;\ny = x + 1;\nz = x + 2;\n");
    assert_eq!(count_kind(&issues, IssueKind::UninitializedUse), 1);
    let uninit = issues
        .iter()
        .find(|i| i.kind == IssueKind::UninitializedUse)
        .unwrap();
    assert_eq!(uninit.line, 2);
}

#[test]
fn mutual_recursion_reports_exactly_one_cycle() {
    let issues = analyze(
        "void a() {\n    b();\n}\nvoid b() {\n    c();\n}\nvoid c() {\n    a();\n}\n",
    );
    assert_eq!(count_kind(&issues, IssueKind::InfiniteRecursion), 1);
    let cycle = issues
        .iter()
        .find(|i| i.kind == IssueKind::InfiniteRecursion)
        .unwrap();
    assert_eq!(cycle.severity, Severity::Critical);
    assert_eq!(cycle.line, 8);
}

#[test]
fn self_recursion_is_detected() {
    let issues = analyze("void spin() {\n    spin();\n}\n");
    assert_eq!(count_kind(&issues, IssueKind::InfiniteRecursion), 1);
}

#[test]
fn unclosed_brackets_match_remaining_depth() {
    let issues = analyze("int main() {\n    if (x > 0) {\n        f(\n");
    // Three brackets left open: '{' at 1, '{' at 2, '(' at 3.
    assert_eq!(count_kind(&issues, IssueKind::UnclosedBracket), 3);
    let mut lines: Vec<u32> = issues
        .iter()
        .filter(|i| i.kind == IssueKind::UnclosedBracket)
        .map(|i| i.line)
        .collect();
    lines.sort_unstable();
    assert_eq!(lines, vec![1, 2, 3]);
}

#[test]
fn mixed_defects_drain_in_severity_order() {
    let issues = analyze(
        "int main() {\n    int *p = malloc(10);\n    gets(buf);\n    strcpy(a, b);\n    free(p);\n    free(p);\n    x = 1\n}\n",
    );
    for pair in issues.windows(2) {
        assert!(
            pair[0].severity <= pair[1].severity,
            "out of order: {:?} then {:?}",
            pair[0],
            pair[1]
        );
    }
    assert_eq!(issues[0].severity, Severity::Critical);
    assert!(count_kind(&issues, IssueKind::DoubleFree) == 1);
    assert!(count_kind(&issues, IssueKind::UnboundedInput) == 1);
    assert!(count_kind(&issues, IssueKind::UnboundedCopy) == 1);
}

#[test]
fn division_by_zero_is_critical() {
    let issues = analyze("int main() {\n    x = y / 0;\n}\n");
    assert_eq!(count_kind(&issues, IssueKind::DivisionByZero), 1);
    let div = issues
        .iter()
        .find(|i| i.kind == IssueKind::DivisionByZero)
        .unwrap();
    assert_eq!(div.severity, Severity::Critical);
    assert_eq!(div.line, 2);
}

#[test]
fn reallocation_resets_the_freed_state() {
    let issues = analyze(
        "int main() {\n    p = malloc(10);\n    free(p);\n    p = malloc(20);\n    free(p);\n}\n",
    );
    assert_eq!(count_kind(&issues, IssueKind::DoubleFree), 0);
    assert_eq!(count_kind(&issues, IssueKind::UseAfterFree), 0);
}

#[test]
fn untracked_free_is_advisory() {
    let issues = analyze("free(mystery);\n");
    assert_eq!(count_kind(&issues, IssueKind::UntrackedFree), 1);
    let advisory = issues
        .iter()
        .find(|i| i.kind == IssueKind::UntrackedFree)
        .unwrap();
    assert_eq!(advisory.severity, Severity::Low);
}
