//! Behavioral specs for metric merging across analyzers.

#![allow(clippy::unwrap_used)]

use crate::prelude::*;

// =============================================================================
// LAST-WRITE-WINS MERGE
// =============================================================================

/// > One class, analyzer A returns {wmc: 5}, analyzer B returns
/// > {wmc: 7, loc: 40}; registered A then B, the class sees {wmc: 7, loc: 40}.
#[test]
fn later_analyzer_overwrites_shared_metric() {
    let seen = Recorder::new("Seen", &[NodeKind::Class]);
    let mut report = Report::new();

    MetricsAdapter::new()
        .with_analyzer(TableAnalyzer::new("a").row("Order", &[("wmc", 5.0)]))
        .with_analyzer(TableAnalyzer::new("b").row("Order", &[("wmc", 7.0), ("loc", 40.0)]))
        .with_rule_set(rule_set("rs", &[seen.clone()]))
        .set_code(vec![class("Order", 3, vec![])])
        .finalize(&TreeEngine, &mut report)
        .unwrap();

    similar_asserts::assert_eq!(
        seen.seen(),
        vec![("Order".to_string(), metrics(&[("wmc", 7.0), ("loc", 40.0)]))]
    );
}

/// > Reversing registration order reverses precedence.
#[test]
fn registration_order_decides_precedence() {
    let seen = Recorder::new("Seen", &[NodeKind::Class]);
    let mut report = Report::new();

    MetricsAdapter::new()
        .with_analyzer(TableAnalyzer::new("b").row("Order", &[("wmc", 7.0), ("loc", 40.0)]))
        .with_analyzer(TableAnalyzer::new("a").row("Order", &[("wmc", 5.0)]))
        .with_rule_set(rule_set("rs", &[seen.clone()]))
        .set_code(vec![class("Order", 3, vec![])])
        .finalize(&TreeEngine, &mut report)
        .unwrap();

    assert_eq!(seen.seen()[0].1, metrics(&[("wmc", 5.0), ("loc", 40.0)]));
}

/// > Metrics are independent per node.
#[test]
fn each_node_gets_its_own_metrics() {
    let seen = Recorder::new("Seen", &[NodeKind::Class, NodeKind::Method]);
    let mut report = Report::new();

    MetricsAdapter::new()
        .with_analyzer(
            TableAnalyzer::new("size")
                .row("Order", &[("loc", 80.0)])
                .row("total", &[("loc", 12.0)]),
        )
        .with_rule_set(rule_set("rs", &[seen.clone()]))
        .set_code(vec![class(
            "Order",
            3,
            vec![method("total", 10), method("empty", 20)],
        )])
        .finalize(&TreeEngine, &mut report)
        .unwrap();

    assert_eq!(
        seen.seen(),
        vec![
            ("Order".to_string(), metrics(&[("loc", 80.0)])),
            ("total".to_string(), metrics(&[("loc", 12.0)])),
            ("empty".to_string(), Metrics::new()),
        ]
    );
}

// =============================================================================
// COLLISION POLICIES
// =============================================================================

/// > With collisions = "reject", a duplicated metric name aborts the run.
#[test]
fn reject_policy_aborts_on_duplicate_metric() {
    let content = "version = 1\n[metrics]\ncollisions = \"reject\"\n";
    let config = metrule::config::parse(content, std::path::Path::new("metrule.toml")).unwrap();
    let mut report = Report::new();

    let err = MetricsAdapter::with_config(config)
        .with_analyzer(TableAnalyzer::new("a").row("Order", &[("wmc", 5.0)]))
        .with_analyzer(TableAnalyzer::new("b").row("Order", &[("wmc", 7.0)]))
        .set_code(vec![class("Order", 3, vec![])])
        .finalize(&TreeEngine, &mut report)
        .unwrap_err();

    assert!(matches!(err, Error::MetricCollision { .. }));
}

/// > With collisions = "namespace", every metric is prefixed by its analyzer.
#[test]
fn namespace_policy_prefixes_metrics() {
    let mut config = Config::default();
    config.metrics.collisions = CollisionPolicy::Namespace;
    let seen = Recorder::new("Seen", &[NodeKind::Function]);
    let mut report = Report::new();

    MetricsAdapter::with_config(config)
        .with_analyzer(TableAnalyzer::new("npath").row("main", &[("npath", 64.0)]))
        .with_rule_set(rule_set("rs", &[seen.clone()]))
        .set_code(vec![function("main", 1)])
        .finalize(&TreeEngine, &mut report)
        .unwrap();

    assert_eq!(seen.seen()[0].1, metrics(&[("npath.npath", 64.0)]));
}
