//! Behavioral specs for parallel traversal of independent roots.

#![allow(clippy::unwrap_used)]

use crate::prelude::*;

fn roots() -> Vec<Decl> {
    (0..32)
        .map(|i| {
            namespace(
                &format!("ns{i}"),
                vec![
                    class(&format!("C{i}"), 1, vec![method("run", 5), method("stop", 9)]),
                    function(&format!("f{i}"), 30),
                ],
            )
        })
        .collect()
}

fn run(mode: TraversalMode) -> Report {
    let mut config = Config::default();
    config.traversal.mode = mode;
    let rule = Recorder::new("A", &NodeKind::ALL);
    let mut report = Report::new();

    MetricsAdapter::with_config(config)
        .with_analyzer(TableAnalyzer::new("size").row("run", &[("loc", 3.0)]))
        .with_rule_set(rule_set("RS1", &[rule.clone()]))
        .with_rule_set(rule_set("RS2", &[rule]))
        .set_code(roots())
        .finalize(&TreeEngine, &mut report)
        .unwrap();
    report
}

/// > Parallel traversal yields the same report, in the same order, as a
/// > sequential run.
#[test]
fn parallel_report_matches_sequential() {
    let sequential = run(TraversalMode::Sequential);
    let parallel = run(TraversalMode::Parallel);

    assert_eq!(parallel.len(), 32 * 4 * 2);
    similar_asserts::assert_eq!(triples(&parallel), triples(&sequential));
}
