// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Node wrappers: a typed view of one engine node plus its merged metrics.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::Error;
use crate::source::{ElementKind, Location, SourceNode};

/// Metric name to value, ordered by name.
pub type Metrics = BTreeMap<String, f64>;

/// The four node kinds rules can be evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Class,
    Interface,
    Function,
    Method,
}

impl NodeKind {
    pub const ALL: [NodeKind; 4] = [
        NodeKind::Class,
        NodeKind::Interface,
        NodeKind::Function,
        NodeKind::Method,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Class => "class",
            NodeKind::Interface => "interface",
            NodeKind::Function => "function",
            NodeKind::Method => "method",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&ElementKind> for NodeKind {
    type Error = ElementKind;

    /// Fails with the original kind for packages and unknown constructs.
    fn try_from(kind: &ElementKind) -> Result<Self, Self::Error> {
        match kind {
            ElementKind::Class => Ok(NodeKind::Class),
            ElementKind::Interface => Ok(NodeKind::Interface),
            ElementKind::Function => Ok(NodeKind::Function),
            ElementKind::Method => Ok(NodeKind::Method),
            ElementKind::Package | ElementKind::Other(_) => Err(kind.clone()),
        }
    }
}

/// A wrapped engine node.
///
/// Borrowed from the engine for the duration of one visit. Metrics start
/// empty and are filled by the collector before any rule set runs.
#[derive(Debug)]
pub struct Node<'a, N> {
    kind: NodeKind,
    source: &'a N,
    metrics: Metrics,
}

impl<'a, N: SourceNode> Node<'a, N> {
    /// Wrap an engine node, using the kind the engine reports.
    pub fn wrap(source: &'a N) -> crate::Result<Self> {
        let kind = NodeKind::try_from(&source.kind()).map_err(|kind| Error::UnsupportedNode {
            kind: kind.to_string(),
            name: source.name().to_string(),
        })?;
        Ok(Self::new(kind, source))
    }

    pub fn new(kind: NodeKind, source: &'a N) -> Self {
        Self {
            kind,
            source,
            metrics: Metrics::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The underlying engine node.
    pub fn source(&self) -> &'a N {
        self.source
    }

    pub fn name(&self) -> &str {
        self.source.name()
    }

    pub fn location(&self) -> &Location {
        self.source.location()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.source.namespace()
    }

    pub fn parent_name(&self) -> Option<&str> {
        self.source.parent_name()
    }

    /// Qualified display name (`Parent::name` for members).
    pub fn qualified_name(&self) -> String {
        match self.parent_name() {
            Some(parent) => format!("{}::{}", parent, self.name()),
            None => self.name().to_string(),
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// A single metric, or None if no analyzer produced it.
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    pub(crate) fn set_metrics(&mut self, metrics: Metrics) {
        self.metrics = metrics;
    }

    /// Whether the node suppresses `rule` via annotation.
    pub fn is_suppressed(&self, rule: &str) -> bool {
        self.source.suppresses(rule)
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
