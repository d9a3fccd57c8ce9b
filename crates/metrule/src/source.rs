// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Contract for the structural nodes produced by a code-analysis engine.
//!
//! The adapter never looks inside these nodes beyond this trait. Engines
//! implement [`SourceNode`] for their own AST types.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// What the engine reports a node to be.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Namespace or package grouping (typically a traversal root).
    Package,
    Class,
    Interface,
    Function,
    Method,
    /// Any other construct (trait, closure, file...).
    Other(String),
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Package => f.write_str("package"),
            ElementKind::Class => f.write_str("class"),
            ElementKind::Interface => f.write_str("interface"),
            ElementKind::Function => f.write_str("function"),
            ElementKind::Method => f.write_str("method"),
            ElementKind::Other(name) => f.write_str(name),
        }
    }
}

/// Source position of a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    /// File path (None for synthetic nodes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    pub begin_line: u32,
    pub end_line: u32,
}

impl Location {
    pub fn new(file: impl Into<PathBuf>, begin_line: u32, end_line: u32) -> Self {
        Self {
            file: Some(file.into()),
            begin_line,
            end_line,
        }
    }
}

/// An opaque structural node owned by the engine.
pub trait SourceNode: Send + Sync {
    fn kind(&self) -> ElementKind;

    fn name(&self) -> &str;

    fn location(&self) -> &Location;

    /// Enclosing namespace, if the language has one.
    fn namespace(&self) -> Option<&str> {
        None
    }

    /// Owning class or interface name (methods only).
    fn parent_name(&self) -> Option<&str> {
        None
    }

    /// Structural members in declaration order.
    fn children(&self) -> &[Self]
    where
        Self: Sized,
    {
        &[]
    }

    /// Whether the node carries a suppression annotation for `rule`.
    fn suppresses(&self, _rule: &str) -> bool {
        false
    }
}
