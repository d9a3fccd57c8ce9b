//! Behavioral specs for fail-fast error propagation.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use crate::prelude::*;

/// Analyzer that fails on one node.
struct Exploding(&'static str);

impl Analyzer<Decl> for Exploding {
    fn name(&self) -> &str {
        "exploding"
    }

    fn node_metrics(&self, node: &Decl) -> Result<Metrics, BoxError> {
        if node.name() == self.0 {
            return Err(format!("cannot measure {}", node.name()).into());
        }
        Ok(Metrics::new())
    }
}

/// Rule set that fails on one node without going through a rule.
struct Refusing(&'static str);

impl RuleSet<Decl> for Refusing {
    fn name(&self) -> &str {
        "refusing"
    }

    fn apply(&self, node: &Node<'_, Decl>, _report: &mut Report) -> metrule::Result<()> {
        if node.name() == self.0 {
            return Err(Error::Collaborator(format!("refusing {}", node.name())));
        }
        Ok(())
    }
}

/// > An analyzer failure aborts the run; violations from nodes fully
/// > processed before it remain in the report.
#[test]
fn analyzer_failure_aborts_and_keeps_prior_violations() {
    let rule = Recorder::new("A", &NodeKind::ALL);
    let mut report = Report::new();

    let err = MetricsAdapter::new()
        .with_analyzer(Exploding("tax"))
        .with_rule_set(rule_set("RS", &[rule.clone()]))
        .set_code(vec![class(
            "Order",
            3,
            vec![method("total", 10), method("tax", 20), method("discount", 30)],
        )])
        .finalize(&TreeEngine, &mut report)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "analyzer `exploding` failed on `Order::tax`: cannot measure tax"
    );
    let nodes: Vec<_> = report.violations().iter().map(|v| v.node.as_str()).collect();
    assert_eq!(nodes, vec!["Order", "total"]);
}

/// > A rule-set failure aborts the run after earlier rule sets already
/// > reported on the failing node.
#[test]
fn rule_set_failure_aborts_run() {
    let rule = Recorder::new("A", &NodeKind::ALL);
    let mut report = Report::new();

    let mut adapter = MetricsAdapter::new().set_code(vec![function("ok", 1), function("bad", 9)]);
    adapter.add_rule_set(Arc::new(rule_set("RS1", &[rule.clone()])));
    adapter.add_rule_set(Arc::new(Refusing("bad")));
    let err = adapter.finalize(&TreeEngine, &mut report).unwrap_err();

    assert_eq!(err.to_string(), "refusing bad");
    let nodes: Vec<_> = report.violations().iter().map(|v| v.node.as_str()).collect();
    assert_eq!(nodes, vec!["ok", "bad"]);
}

/// > A node the adapter cannot wrap is fatal, never skipped.
#[test]
fn unknown_node_kind_is_fatal() {
    let mut report = Report::new();

    let err = MetricsAdapter::new()
        .set_code(vec![namespace("app", vec![trait_decl("Loggable", 4)])])
        .finalize(&TreeEngine, &mut report)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "unsupported node kind `trait` for `Loggable`"
    );
}
