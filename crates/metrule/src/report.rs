// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Violation report shared by every rule set in a run.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::node::{Node, NodeKind};
use crate::rule::Priority;
use crate::source::{Location, SourceNode};

/// A rule matched a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Rule identifier (e.g., "ExcessiveMethodLength").
    pub rule: String,

    /// Rule set the rule belongs to (empty until the rule set stamps it).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rule_set: String,

    pub priority: Priority,

    pub kind: NodeKind,

    /// Node name (e.g., method name).
    pub node: String,

    /// Owning class or interface, for members.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(flatten)]
    pub location: Location,

    /// Human-readable description.
    pub message: String,

    /// Current value (for threshold violations).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// Threshold that was exceeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

impl Violation {
    /// Create a violation located at `node`.
    pub fn new<N: SourceNode>(
        node: &Node<'_, N>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            rule_set: String::new(),
            priority: Priority::default(),
            kind: node.kind(),
            node: node.name().to_string(),
            parent: node.parent_name().map(String::from),
            namespace: node.namespace().map(String::from),
            location: node.location().clone(),
            message: message.into(),
            value: None,
            threshold: None,
        }
    }

    /// Add value/threshold context to the violation.
    pub fn with_threshold(mut self, value: f64, threshold: f64) -> Self {
        self.value = Some(value);
        self.threshold = Some(threshold);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn in_rule_set(mut self, rule_set: impl Into<String>) -> Self {
        self.rule_set = rule_set.into();
        self
    }

    pub fn file(&self) -> Option<&PathBuf> {
        self.location.file.as_ref()
    }
}

/// Accumulates violations for one analysis run.
///
/// Violations are kept in the order they were added. The report is never
/// cleared by the adapter.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    violations: Vec<Violation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    started_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    finished_at: Option<DateTime<Utc>>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Append all violations from `other`, keeping their order.
    pub fn extend(&mut self, other: Report) {
        self.violations.extend(other.violations);
    }

    /// Violations in insertion order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Violations ordered by file, then begin line.
    ///
    /// Ties keep insertion order.
    pub fn sorted_violations(&self) -> Vec<&Violation> {
        let mut sorted: Vec<_> = self.violations.iter().collect();
        sorted.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then_with(|| a.location.begin_line.cmp(&b.location.begin_line))
        });
        sorted
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Mark the start of the run.
    pub fn start(&mut self) {
        self.started_at = Some(Utc::now());
    }

    /// Mark the end of the run.
    pub fn end(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Milliseconds between `start()` and `end()`, if both were called.
    pub fn elapsed_ms(&self) -> Option<i64> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => Some((end - start).num_milliseconds()),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
