use pretty_assertions::assert_eq;
use tca_kernel::prelude::*;

fn run(source: &str) -> AnalysisOutcome {
    CoverageAnalyzer::new(TcaConfig::default())
        .run(source)
        .expect("analysis completes")
}

fn names(outcome: &AnalysisOutcome, ids: impl IntoIterator<Item = NodeId>) -> Vec<String> {
    let mut names = outcome.graph.names(ids);
    names.sort();
    names
}

#[test]
fn test_sibling_leaf_beside_mark_is_missing() {
    let outcome = run(r#"
        digraph G {
            a [shape=square];
            b [shape=diamond];
            c [shape=circle];
            a -> b;
            a -> c;
        }
    "#);

    assert!(outcome.diagnostics.is_empty());
    assert_eq!(names(&outcome, outcome.findings.missing.iter().copied()), vec!["c"]);
    assert_eq!(
        outcome.findings.target_status,
        Some(CoverageStatus::PartiallyCovered)
    );
}

#[test]
fn test_mark_covers_its_subtree() {
    let outcome = run(r#"
        digraph G {
            a [shape=square];
            b [shape=diamond];
            c [shape=circle];
            a -> b -> c;
        }
    "#);

    assert_eq!(outcome.findings.target_status, Some(CoverageStatus::FullyCovered));
    assert!(outcome.findings.missing.is_empty());
    assert_eq!(outcome.verdict, Verdict::Covered(vec!["b".to_string()]));
}

#[test]
fn test_unmarked_leaf_under_target() {
    let outcome = run("digraph G { a [shape=square]; b [shape=circle]; a -> b; }");

    assert_eq!(
        outcome.findings.target_status,
        Some(CoverageStatus::PartiallyCovered)
    );
    assert_eq!(outcome.verdict, Verdict::Missing(vec!["b".to_string()]));
}

#[test]
fn test_mark_before_target_is_extra() {
    let outcome = run(r#"
        digraph G {
            c [shape=diamond];
            a [shape=square];
            b [shape=diamond];
            c -> a -> b;
        }
    "#);

    assert_eq!(names(&outcome, outcome.findings.extra.iter().copied()), vec!["c"]);
    assert_eq!(outcome.verdict, Verdict::Extra(vec!["c".to_string()]));
}

#[test]
fn test_nested_mark_is_redundant() {
    let outcome = run(r#"
        digraph G {
            a [shape=square];
            b, c [shape=diamond];
            a -> b -> c;
        }
    "#);

    assert_eq!(
        outcome.verdict,
        Verdict::Redundant(vec![("b".to_string(), "c".to_string())])
    );
    assert_eq!(
        outcome.verdict.render(),
        "Redundant marks: c is already covered by b."
    );
}

#[test]
fn test_extra_takes_precedence_over_missing() {
    let outcome = run(r#"
        digraph G {
            c [shape=diamond];
            a [shape=square];
            c -> a;
            a -> b;
        }
    "#);

    assert!(!outcome.findings.extra.is_empty());
    assert!(!outcome.findings.missing.is_empty());
    assert_eq!(outcome.verdict, Verdict::Extra(vec!["c".to_string()]));
}

#[test]
fn test_disjoint_roots_are_disconnected() {
    let outcome = run(r#"
        digraph G {
            a [shape=square];
            c [shape=circle];
            a -> b;
            c -> d;
        }
    "#);

    assert!(outcome.diagnostics.contains(DiagnosticKind::DisconnectedGraph));
    let structure = outcome.structure.as_ref().expect("validated");
    assert_eq!(structure.roots.len(), 2);
    assert!(!structure.connected);
    assert!(matches!(outcome.verdict, Verdict::Rejected(_)));
}

#[test]
fn test_overlapping_roots_are_connected() {
    let outcome = run(r#"
        digraph G {
            a [shape=square];
            c [shape=circle];
            a -> b;
            c -> b;
        }
    "#);

    assert!(!outcome.diagnostics.contains(DiagnosticKind::DisconnectedGraph));
    assert_eq!(
        outcome.diagnostics.kinds(),
        vec![DiagnosticKind::MultiParents]
    );
}

#[test]
fn test_self_loop_reports_one_cycle() {
    let outcome = run("digraph G { a [shape=square]; a -> a; }");

    assert_eq!(outcome.diagnostics.count(DiagnosticKind::Cycle), 1);
    let structure = outcome.structure.as_ref().expect("validated");
    let a = outcome.graph.find("a").expect("declared");
    assert_eq!(structure.cycles.iter().collect::<Vec<_>>(), vec![&vec![a, a]]);
    assert_eq!(
        outcome.verdict.render(),
        "The graph is not a tree: it contains the cycle a -> a."
    );
}

#[test]
fn test_uncovered_subtree_reported_through_its_root() {
    let outcome = run(r#"
        digraph G {
            t [shape=square];
            m [shape=diamond];
            t -> m;
            t -> x;
            x -> y -> p;
            y -> q;
            x -> z;
        }
    "#);

    assert_eq!(outcome.verdict, Verdict::Missing(vec!["x".to_string()]));
}

#[test]
fn test_analysis_runs_on_non_tree() {
    let outcome = run(r#"
        digraph G {
            r [shape=circle];
            a [shape=square];
            r -> a;
            a -> x -> y -> x;
            y -> a;
        }
    "#);

    assert!(outcome.diagnostics.contains(DiagnosticKind::Cycle));
    assert_eq!(names(&outcome, outcome.findings.missing.iter().copied()), vec!["x"]);
    assert!(matches!(outcome.verdict, Verdict::Rejected(_)));
}

#[test]
fn test_syntax_diagnostics_do_not_stop_analysis() {
    let outcome = run(r#"
        digraph G {
            a [shape=square];
            b [shape=diamond, color=red];
            a -> b;
        }
    "#);

    assert_eq!(outcome.diagnostics.kinds(), vec![DiagnosticKind::ExtraAttribute]);
    assert!(outcome.structure.is_some());
    assert_eq!(outcome.findings.target_status, Some(CoverageStatus::FullyCovered));
    assert!(!outcome.verdict.is_success());
}

#[test]
fn test_missing_target_is_fatal() {
    let outcome = run("digraph G { a [shape=circle]; a -> b; }");

    assert!(outcome.structure.is_none());
    assert_eq!(outcome.diagnostics.kinds(), vec![DiagnosticKind::NoTargetNode]);
    assert_eq!(
        outcome.verdict.render(),
        "There is no target node to determine coverage for."
    );
}
