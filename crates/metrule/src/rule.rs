// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rules and rule sets.
//!
//! A [`RuleSet`] is what the adapter evaluates. [`StandardRuleSet`] is the
//! usual implementation: an ordered list of [`Rule`]s filtered by node kind,
//! priority and suppression annotations.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{BoxError, Error, Result};
use crate::node::{Node, NodeKind};
use crate::report::{Report, Violation};
use crate::source::SourceNode;

/// Rule priority, 1 (highest) to 5 (lowest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const HIGHEST: Priority = Priority(1);
    pub const LOWEST: Priority = Priority(5);

    pub fn new(value: u8) -> Option<Self> {
        (1..=5).contains(&value).then_some(Priority(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority(3)
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Priority::new(value).ok_or_else(|| format!("priority must be 1-5, got {}", value))
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> u8 {
        priority.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single detection rule.
pub trait Rule<N>: Send + Sync {
    /// Unique identifier (e.g., "CyclomaticComplexity").
    fn name(&self) -> &str;

    fn priority(&self) -> Priority {
        Priority::default()
    }

    /// Node kinds this rule inspects.
    fn applies_to(&self) -> &[NodeKind];

    /// Evaluate one node. Metrics are fully merged before this is called.
    fn apply(&self, node: &Node<'_, N>) -> std::result::Result<Vec<Violation>, BoxError>;
}

/// Something the adapter evaluates against every visited node.
///
/// Object-safe to allow dynamic dispatch via `Arc<dyn RuleSet<N>>`.
pub trait RuleSet<N>: Send + Sync {
    fn name(&self) -> &str;

    /// Evaluate `node`, appending any violations to `report`.
    fn apply(&self, node: &Node<'_, N>, report: &mut Report) -> Result<()>;
}

/// Named, ordered list of rules.
pub struct StandardRuleSet<N> {
    name: String,
    rules: Vec<Arc<dyn Rule<N>>>,
    minimum_priority: Priority,
}

impl<N> StandardRuleSet<N> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
            minimum_priority: Priority::LOWEST,
        }
    }

    pub fn with_rule(mut self, rule: impl Rule<N> + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    pub fn add_rule(&mut self, rule: Arc<dyn Rule<N>>) {
        self.rules.push(rule);
    }

    /// Skip rules less important than `priority`.
    pub fn with_minimum_priority(mut self, priority: Priority) -> Self {
        self.minimum_priority = priority;
        self
    }

    pub fn rules(&self) -> &[Arc<dyn Rule<N>>] {
        &self.rules
    }
}

impl<N: SourceNode> RuleSet<N> for StandardRuleSet<N> {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, node: &Node<'_, N>, report: &mut Report) -> Result<()> {
        for rule in &self.rules {
            if !rule.applies_to().contains(&node.kind()) || rule.priority() > self.minimum_priority
            {
                continue;
            }
            if node.is_suppressed(rule.name()) {
                tracing::trace!("{}: {} suppressed", node.qualified_name(), rule.name());
                continue;
            }

            let violations = rule.apply(node).map_err(|source| Error::Rule {
                rule_set: self.name.clone(),
                rule: rule.name().to_string(),
                source,
            })?;
            for violation in violations {
                report.add(
                    violation
                        .in_rule_set(self.name.as_str())
                        .with_priority(rule.priority()),
                );
            }
        }
        Ok(())
    }
}

/// Flags nodes whose metric exceeds a threshold.
///
/// The message template may use `{name}`, `{metric}`, `{value}` and
/// `{threshold}`.
#[derive(Debug, Clone)]
pub struct ThresholdRule {
    name: String,
    metric: String,
    threshold: f64,
    kinds: Vec<NodeKind>,
    priority: Priority,
    message: String,
}

impl ThresholdRule {
    pub fn new(
        name: impl Into<String>,
        metric: impl Into<String>,
        threshold: f64,
        kinds: &[NodeKind],
    ) -> Self {
        Self {
            name: name.into(),
            metric: metric.into(),
            threshold,
            kinds: kinds.to_vec(),
            priority: Priority::default(),
            message: "{name} has {metric} of {value} (threshold: {threshold})".to_string(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_message(mut self, template: impl Into<String>) -> Self {
        self.message = template.into();
        self
    }

    fn render(&self, name: &str, value: f64) -> String {
        self.message
            .replace("{name}", name)
            .replace("{metric}", &self.metric)
            .replace("{value}", &value.to_string())
            .replace("{threshold}", &self.threshold.to_string())
    }
}

impl<N: SourceNode> Rule<N> for ThresholdRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    fn applies_to(&self) -> &[NodeKind] {
        &self.kinds
    }

    fn apply(&self, node: &Node<'_, N>) -> std::result::Result<Vec<Violation>, BoxError> {
        let Some(value) = node.metric(&self.metric) else {
            return Ok(Vec::new());
        };
        // NaN never exceeds a threshold.
        if value.is_nan() || value <= self.threshold {
            return Ok(Vec::new());
        }

        let message = self.render(&node.qualified_name(), value);
        Ok(vec![
            Violation::new(node, self.name.as_str(), message).with_threshold(value, self.threshold),
        ])
    }
}

#[cfg(test)]
#[path = "rule_tests.rs"]
mod tests;
