// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Merges analyzer output into a node's metrics.

use std::sync::Arc;

use crate::analyzer::Analyzer;
use crate::config::CollisionPolicy;
use crate::error::{Error, Result};
use crate::node::{Metrics, Node};
use crate::source::SourceNode;

/// Collects metrics from a frozen, ordered set of analyzers.
pub struct MetricCollector<N> {
    analyzers: Arc<[Arc<dyn Analyzer<N>>]>,
    policy: CollisionPolicy,
}

impl<N: SourceNode> MetricCollector<N> {
    pub fn new(analyzers: Arc<[Arc<dyn Analyzer<N>>]>, policy: CollisionPolicy) -> Self {
        Self { analyzers, policy }
    }

    pub fn analyzer_count(&self) -> usize {
        self.analyzers.len()
    }

    /// Query every analyzer in registration order and store the merged
    /// result on `node`.
    ///
    /// Runs even with no analyzers, leaving the node with empty metrics.
    pub fn collect(&self, node: &mut Node<'_, N>) -> Result<()> {
        let mut merged = Metrics::new();

        for analyzer in self.analyzers.iter() {
            let contributed =
                analyzer
                    .node_metrics(node.source())
                    .map_err(|source| Error::Analyzer {
                        analyzer: analyzer.name().to_string(),
                        node: node.qualified_name(),
                        source,
                    })?;

            for (metric, value) in contributed {
                self.merge(&mut merged, analyzer.name(), node, metric, value)?;
            }
        }

        node.set_metrics(merged);
        Ok(())
    }

    fn merge(
        &self,
        merged: &mut Metrics,
        analyzer: &str,
        node: &Node<'_, N>,
        metric: String,
        value: f64,
    ) -> Result<()> {
        match self.policy {
            CollisionPolicy::Namespace => {
                merged.insert(format!("{}.{}", analyzer, metric), value);
            }
            CollisionPolicy::Reject if merged.contains_key(&metric) => {
                return Err(Error::MetricCollision {
                    metric,
                    node: node.qualified_name(),
                    analyzer: analyzer.to_string(),
                });
            }
            CollisionPolicy::Reject => {
                merged.insert(metric, value);
            }
            CollisionPolicy::Overwrite => {
                if let Some(previous) = merged.get(&metric) {
                    tracing::debug!(
                        "{}: analyzer `{}` overwrote `{}` (was {}, now {})",
                        node.qualified_name(),
                        analyzer,
                        metric,
                        previous,
                        value
                    );
                }
                merged.insert(metric, value);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "collector_tests.rs"]
mod tests;
