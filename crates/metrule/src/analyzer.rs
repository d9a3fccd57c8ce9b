// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Metric analyzer contract and capability negotiation.

use crate::error::BoxError;
use crate::node::Metrics;

/// What kind of metrics an analyzer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Metrics keyed per class, function or method.
    NodeMetrics,
    /// Metrics about the project as a whole.
    ProjectMetrics,
}

/// Capabilities the metrics adapter consumes.
pub const ACCEPTED_CAPABILITIES: &[Capability] = &[Capability::NodeMetrics];

/// A metric producer.
///
/// Object-safe to allow dynamic dispatch via `Arc<dyn Analyzer<N>>`.
pub trait Analyzer<N>: Send + Sync {
    /// Identifier used in logs, errors and namespaced metric names.
    fn name(&self) -> &str;

    fn capabilities(&self) -> &[Capability] {
        &[Capability::NodeMetrics]
    }

    /// Metrics for one node. Return an empty map for nodes the analyzer
    /// does not measure.
    fn node_metrics(&self, node: &N) -> Result<Metrics, BoxError>;
}

/// Whether `analyzer` declares a capability the adapter accepts.
pub fn accepts<N>(analyzer: &dyn Analyzer<N>) -> bool {
    analyzer
        .capabilities()
        .iter()
        .any(|c| ACCEPTED_CAPABILITIES.contains(c))
}

#[cfg(test)]
#[path = "analyzer_tests.rs"]
mod tests;
