//! Metric aggregation and rule evaluation over code-analysis node trees.
//!
//! A traversal [`Engine`] walks [`SourceNode`]s and hands them to the
//! [`MetricsAdapter`]. For every class, function and method the adapter
//! merges the metrics of all registered [`Analyzer`]s into a [`Node`], then
//! applies every registered [`RuleSet`] in order, collecting [`Violation`]s
//! into a caller-owned [`Report`].

pub mod adapter;
pub mod analyzer;
pub mod collector;
pub mod config;
pub mod engine;
pub mod error;
pub mod node;
pub mod report;
pub mod rule;
pub mod source;

pub use adapter::{Configured, Finalized, MetricsAdapter, Unconfigured};
pub use analyzer::{ACCEPTED_CAPABILITIES, Analyzer, Capability};
pub use collector::MetricCollector;
pub use config::{CollisionPolicy, Config, TraversalMode};
pub use engine::{Engine, Flow, TreeEngine, Visitor};
pub use error::{BoxError, Error, Result};
pub use node::{Metrics, Node, NodeKind};
pub use report::{Report, Violation};
pub use rule::{Priority, Rule, RuleSet, StandardRuleSet, ThresholdRule};
pub use source::{ElementKind, Location, SourceNode};
