// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Traversal engine contract.
//!
//! An engine walks a tree of [`SourceNode`]s and hands every node to a
//! [`Visitor`]. The visitor decides per node whether the engine descends
//! into its members.

use crate::error::Result;
use crate::source::SourceNode;

/// Whether the engine should continue into a node's members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Descend,
    Skip,
}

/// Receives nodes from an [`Engine`].
pub trait Visitor<N> {
    fn visit(&mut self, node: &N) -> Result<Flow>;
}

/// Walks a node tree, dispatching each node to a visitor.
///
/// Implementations must stop at the first error returned by the visitor
/// and propagate it.
pub trait Engine<N>: Send + Sync {
    fn accept(&self, node: &N, visitor: &mut dyn Visitor<N>) -> Result<()>;
}

/// Depth-first, pre-order engine over [`SourceNode::children`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeEngine;

impl<N: SourceNode> Engine<N> for TreeEngine {
    fn accept(&self, node: &N, visitor: &mut dyn Visitor<N>) -> Result<()> {
        if visitor.visit(node)? == Flow::Skip {
            return Ok(());
        }
        for child in node.children() {
            self.accept(child, visitor)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
