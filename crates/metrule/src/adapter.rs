// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Metrics adapter: the visitor that enriches nodes and evaluates rule sets.
//!
//! Lifecycle is encoded in the type:
//!
//! ```text
//! MetricsAdapter<N, Unconfigured> --set_code--> MetricsAdapter<N, Configured<N>> --finalize--> Finalized
//! ```
//!
//! `finalize` consumes the adapter, freezing the analyzer and rule-set
//! registries for the run. Finalizing twice or finalizing without source
//! nodes does not compile.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::analyzer::{ACCEPTED_CAPABILITIES, Analyzer, Capability, accepts};
use crate::collector::MetricCollector;
use crate::config::{Config, TraversalMode};
use crate::engine::{Engine, Flow, Visitor};
use crate::error::{Error, Result};
use crate::node::{Node, NodeKind};
use crate::report::Report;
use crate::rule::RuleSet;
use crate::source::{ElementKind, SourceNode};

/// No source nodes set yet.
#[derive(Debug, Default)]
pub struct Unconfigured;

/// Source nodes set; ready to finalize.
#[derive(Debug)]
pub struct Configured<N> {
    roots: Vec<N>,
}

/// Summary of a finalized run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finalized {
    /// Root nodes traversed.
    pub roots: usize,
    /// Nodes wrapped and evaluated.
    pub nodes: usize,
    /// Violations added to the report by this run.
    pub violations: usize,
}

/// Adapter between a traversal engine, metric analyzers and rule sets.
pub struct MetricsAdapter<N, S = Unconfigured> {
    config: Config,
    analyzers: Vec<Arc<dyn Analyzer<N>>>,
    rule_sets: Vec<Arc<dyn RuleSet<N>>>,
    state: S,
}

impl<N> Default for MetricsAdapter<N, Unconfigured> {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

impl<N> MetricsAdapter<N, Unconfigured> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            analyzers: Vec::new(),
            rule_sets: Vec::new(),
            state: Unconfigured,
        }
    }

    /// Capabilities an analyzer must declare to be fed to this adapter.
    pub fn accepted_analyzers() -> &'static [Capability] {
        ACCEPTED_CAPABILITIES
    }
}

impl<N, S> MetricsAdapter<N, S> {
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Append a rule set. Registration order is evaluation order.
    pub fn add_rule_set(&mut self, rule_set: Arc<dyn RuleSet<N>>) {
        self.rule_sets.push(rule_set);
    }

    pub fn with_rule_set(mut self, rule_set: impl RuleSet<N> + 'static) -> Self {
        self.rule_sets.push(Arc::new(rule_set));
        self
    }

    /// Append an analyzer. Later analyzers win metric name collisions.
    pub fn add_analyzer(&mut self, analyzer: Arc<dyn Analyzer<N>>) {
        self.analyzers.push(analyzer);
    }

    pub fn with_analyzer(mut self, analyzer: impl Analyzer<N> + 'static) -> Self {
        self.analyzers.push(Arc::new(analyzer));
        self
    }

    /// Append every analyzer that declares an accepted capability.
    ///
    /// Returns the number of analyzers registered.
    pub fn register_analyzers<I>(&mut self, analyzers: I) -> usize
    where
        I: IntoIterator<Item = Arc<dyn Analyzer<N>>>,
    {
        let before = self.analyzers.len();
        for analyzer in analyzers {
            if accepts(analyzer.as_ref()) {
                self.analyzers.push(analyzer);
            } else {
                tracing::debug!(
                    "skipping analyzer `{}`: no node metrics capability",
                    analyzer.name()
                );
            }
        }
        self.analyzers.len() - before
    }

    pub fn analyzer_count(&self) -> usize {
        self.analyzers.len()
    }

    pub fn rule_set_count(&self) -> usize {
        self.rule_sets.len()
    }

    /// Set the top-level nodes to traverse, replacing any set before.
    pub fn set_code(self, roots: Vec<N>) -> MetricsAdapter<N, Configured<N>> {
        MetricsAdapter {
            config: self.config,
            analyzers: self.analyzers,
            rule_sets: self.rule_sets,
            state: Configured { roots },
        }
    }
}

impl<N> MetricsAdapter<N, Configured<N>> {
    pub fn roots(&self) -> &[N] {
        &self.state.roots
    }
}

impl<N: SourceNode> MetricsAdapter<N, Configured<N>> {
    /// Traverse every root with `engine`, writing violations to `report`.
    ///
    /// Stops at the first analyzer, rule or dispatch failure. Violations
    /// from nodes processed before the failure stay in the report.
    ///
    /// ```
    /// # use metrule::{ElementKind, Location, MetricsAdapter, Report, SourceNode, TreeEngine};
    /// # struct Decl(Location);
    /// # impl SourceNode for Decl {
    /// #     fn kind(&self) -> ElementKind { ElementKind::Function }
    /// #     fn name(&self) -> &str { "main" }
    /// #     fn location(&self) -> &Location { &self.0 }
    /// # }
    /// let adapter: MetricsAdapter<Decl> = MetricsAdapter::new();
    /// let mut report = Report::new();
    /// let summary = adapter
    ///     .set_code(vec![Decl(Location::default())])
    ///     .finalize(&TreeEngine, &mut report);
    /// assert_eq!(summary.map(|s| s.nodes).ok(), Some(1));
    /// ```
    ///
    /// The adapter is consumed, so it cannot be finalized twice:
    ///
    /// ```compile_fail
    /// # use metrule::{ElementKind, Location, MetricsAdapter, Report, SourceNode, TreeEngine};
    /// # struct Decl(Location);
    /// # impl SourceNode for Decl {
    /// #     fn kind(&self) -> ElementKind { ElementKind::Function }
    /// #     fn name(&self) -> &str { "main" }
    /// #     fn location(&self) -> &Location { &self.0 }
    /// # }
    /// let adapter: MetricsAdapter<Decl> = MetricsAdapter::new();
    /// let adapter = adapter.set_code(vec![Decl(Location::default())]);
    /// let mut report = Report::new();
    /// let _ = adapter.finalize(&TreeEngine, &mut report);
    /// let _ = adapter.finalize(&TreeEngine, &mut report);
    /// ```
    ///
    /// Nor before source nodes are set:
    ///
    /// ```compile_fail
    /// # use metrule::{ElementKind, Location, MetricsAdapter, Report, SourceNode, TreeEngine};
    /// # struct Decl(Location);
    /// # impl SourceNode for Decl {
    /// #     fn kind(&self) -> ElementKind { ElementKind::Function }
    /// #     fn name(&self) -> &str { "main" }
    /// #     fn location(&self) -> &Location { &self.0 }
    /// # }
    /// let adapter: MetricsAdapter<Decl> = MetricsAdapter::new();
    /// let mut report = Report::new();
    /// let _ = adapter.finalize(&TreeEngine, &mut report);
    /// ```
    pub fn finalize<E>(self, engine: &E, report: &mut Report) -> Result<Finalized>
    where
        E: Engine<N> + ?Sized,
    {
        let collector =
            MetricCollector::new(self.analyzers.into(), self.config.metrics.collisions);
        let rule_sets: Arc<[Arc<dyn RuleSet<N>>]> = self.rule_sets.into();
        let roots = self.state.roots;

        tracing::debug!(
            "finalizing {} roots with {} analyzers and {} rule sets",
            roots.len(),
            collector.analyzer_count(),
            rule_sets.len()
        );

        if report.started_at().is_none() {
            report.start();
        }
        let before = report.len();

        let result = match self.config.traversal.mode {
            TraversalMode::Sequential => {
                traverse_sequential(engine, &roots, &collector, &rule_sets, report)
            }
            TraversalMode::Parallel => {
                traverse_parallel(engine, &roots, &collector, &rule_sets, report)
            }
        };
        report.end();
        let nodes = result?;

        let summary = Finalized {
            roots: roots.len(),
            nodes,
            violations: report.len() - before,
        };
        tracing::info!(
            "processed {} nodes in {} roots: {} violations",
            summary.nodes,
            summary.roots,
            summary.violations
        );
        Ok(summary)
    }
}

fn traverse_sequential<N, E>(
    engine: &E,
    roots: &[N],
    collector: &MetricCollector<N>,
    rule_sets: &[Arc<dyn RuleSet<N>>],
    report: &mut Report,
) -> Result<usize>
where
    N: SourceNode,
    E: Engine<N> + ?Sized,
{
    let mut pass = Pass::new(collector, rule_sets, report);
    for root in roots {
        engine.accept(root, &mut pass)?;
    }
    Ok(pass.nodes)
}

/// Each root writes to its own fragment; fragments are appended in root
/// order so the report matches a sequential run.
///
/// Once a root fails, roots after it are not started and in-flight roots
/// after it stop evaluating nodes. Roots before it run to completion.
fn traverse_parallel<N, E>(
    engine: &E,
    roots: &[N],
    collector: &MetricCollector<N>,
    rule_sets: &[Arc<dyn RuleSet<N>>],
    report: &mut Report,
) -> Result<usize>
where
    N: SourceNode,
    E: Engine<N> + ?Sized,
{
    let first_failure = AtomicUsize::new(usize::MAX);

    let fragments: Vec<Option<(Result<()>, Report, usize)>> = roots
        .par_iter()
        .enumerate()
        .map(|(index, root)| {
            if first_failure.load(Ordering::Relaxed) < index {
                return None;
            }
            let mut fragment = Report::new();
            let mut pass =
                Pass::new(collector, rule_sets, &mut fragment).halted_by(&first_failure, index);
            let result = engine.accept(root, &mut pass);
            let nodes = pass.nodes;
            if result.is_err() {
                first_failure.fetch_min(index, Ordering::Relaxed);
            }
            Some((result, fragment, nodes))
        })
        .collect();

    // Skipped roots only follow a failed one, so the loop returns first.
    let mut nodes = 0;
    for (result, fragment, processed) in fragments.into_iter().flatten() {
        report.extend(fragment);
        nodes += processed;
        result?;
    }
    Ok(nodes)
}

/// Visitor state for one traversal.
struct Pass<'a, N> {
    collector: &'a MetricCollector<N>,
    rule_sets: &'a [Arc<dyn RuleSet<N>>],
    report: &'a mut Report,
    nodes: usize,
    /// Lowest failed root index shared across a parallel run, and this
    /// pass's root index.
    halt: Option<(&'a AtomicUsize, usize)>,
}

impl<'a, N: SourceNode> Pass<'a, N> {
    fn new(
        collector: &'a MetricCollector<N>,
        rule_sets: &'a [Arc<dyn RuleSet<N>>],
        report: &'a mut Report,
    ) -> Self {
        Self {
            collector,
            rule_sets,
            report,
            nodes: 0,
            halt: None,
        }
    }

    fn halted_by(mut self, first_failure: &'a AtomicUsize, index: usize) -> Self {
        self.halt = Some((first_failure, index));
        self
    }

    /// True once an earlier root has failed.
    fn halted(&self) -> bool {
        self.halt
            .is_some_and(|(first_failure, index)| first_failure.load(Ordering::Relaxed) < index)
    }

    /// Merge metrics, then run every rule set in registration order.
    fn process_node(&mut self, mut node: Node<'_, N>) -> Result<()> {
        tracing::trace!("processing {} {}", node.kind(), node.qualified_name());
        self.collector.collect(&mut node)?;
        for rule_set in self.rule_sets {
            rule_set.apply(&node, self.report)?;
        }
        self.nodes += 1;
        Ok(())
    }
}

impl<N: SourceNode> Visitor<N> for Pass<'_, N> {
    fn visit(&mut self, node: &N) -> Result<Flow> {
        if self.halted() {
            return Ok(Flow::Skip);
        }
        match node.kind() {
            ElementKind::Package | ElementKind::Interface => Ok(Flow::Descend),
            ElementKind::Class => {
                self.process_node(Node::new(NodeKind::Class, node))?;
                Ok(Flow::Descend)
            }
            ElementKind::Function => {
                self.process_node(Node::new(NodeKind::Function, node))?;
                Ok(Flow::Skip)
            }
            ElementKind::Method => {
                self.process_node(Node::new(NodeKind::Method, node))?;
                Ok(Flow::Skip)
            }
            ElementKind::Other(kind) => Err(Error::UnsupportedNode {
                kind,
                name: node.name().to_string(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "adapter_tests.rs"]
mod tests;
