//! Scope model - a tree parallel to the interaction model.
//!
//! Every interaction unit has exactly one node here, carrying a [`Scope`]
//! record. Several nodes may share a scope id (a run of structural
//! containers belongs to one logical scope).

mod assignment;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{ModelError, ModelResult};
use crate::QName;

/// Numeric scope identifier, stable for the lifetime of a dialog model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScopeId(pub u32);

impl std::fmt::Display for ScopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-node scope metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub scope_id: ScopeId,
    /// Whether this node gates exclusive activation among its direct children.
    pub demarcation: bool,
}

impl Scope {
    pub fn new(scope_id: u32, demarcation: bool) -> Self {
        Self {
            scope_id: ScopeId(scope_id),
            demarcation,
        }
    }
}

#[derive(Debug, Clone)]
struct NodeEntry {
    unit: QName,
    scope: Scope,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Read-only hierarchical index from unit id to scope record.
///
/// Nodes are kept in an arena and refer to each other by index.
#[derive(Debug, Clone, Default)]
pub struct ScopeModel {
    nodes: Vec<NodeEntry>,
    index: HashMap<QName, usize>,
}

impl ScopeModel {
    /// Create an empty scope model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the root node.
    pub fn insert_root(&mut self, unit: QName, scope: Scope) -> ModelResult<()> {
        if let Some(root) = self.nodes.first() {
            return Err(ModelError::RootAlreadySet(root.unit.clone()));
        }
        self.push(unit, scope, None)
    }

    /// Insert a node below an existing parent.
    pub fn insert_child(&mut self, parent: &QName, unit: QName, scope: Scope) -> ModelResult<()> {
        let parent_idx = *self
            .index
            .get(parent)
            .ok_or_else(|| ModelError::UnknownUnit(parent.clone()))?;
        self.push(unit, scope, Some(parent_idx))
    }

    fn push(&mut self, unit: QName, scope: Scope, parent: Option<usize>) -> ModelResult<()> {
        if self.index.contains_key(&unit) {
            return Err(ModelError::DuplicateUnit(unit));
        }

        let idx = self.nodes.len();
        if let Some(parent_idx) = parent {
            self.nodes[parent_idx].children.push(idx);
        }
        self.index.insert(unit.clone(), idx);
        self.nodes.push(NodeEntry {
            unit,
            scope,
            parent,
            children: Vec::new(),
        });
        Ok(())
    }

    /// Find the node for a unit.
    pub fn find_node(&self, unit: &QName) -> Option<ScopeNode<'_>> {
        self.index.get(unit).map(|&index| ScopeNode { model: self, index })
    }

    /// Get the node for a unit.
    ///
    /// # Panics
    ///
    /// Panics if the unit is not part of the model. Referencing a unit that
    /// was never supplied is a caller bug.
    #[track_caller]
    pub fn node(&self, unit: &QName) -> ScopeNode<'_> {
        match self.find_node(unit) {
            Some(node) => node,
            None => panic!("Unit not present in scope model: {}", unit),
        }
    }

    /// The root node, if the model is not empty.
    pub fn root(&self) -> Option<ScopeNode<'_>> {
        (!self.nodes.is_empty()).then_some(ScopeNode {
            model: self,
            index: 0,
        })
    }

    /// Check if a unit is part of the model.
    pub fn contains(&self, unit: &QName) -> bool {
        self.index.contains_key(unit)
    }

    /// Iterate over all nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = ScopeNode<'_>> {
        (0..self.nodes.len()).map(move |index| ScopeNode { model: self, index })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A borrowed handle to one node of a [`ScopeModel`].
#[derive(Debug, Clone, Copy)]
pub struct ScopeNode<'a> {
    model: &'a ScopeModel,
    index: usize,
}

impl<'a> ScopeNode<'a> {
    fn entry(&self) -> &'a NodeEntry {
        &self.model.nodes[self.index]
    }

    /// The unit this node belongs to.
    pub fn unit(&self) -> &'a QName {
        &self.entry().unit
    }

    pub fn scope(&self) -> &'a Scope {
        &self.entry().scope
    }

    pub fn scope_id(&self) -> ScopeId {
        self.entry().scope.scope_id
    }

    pub fn parent(&self) -> Option<ScopeNode<'a>> {
        self.entry().parent.map(|index| ScopeNode {
            model: self.model,
            index,
        })
    }

    pub fn children(&self) -> impl Iterator<Item = ScopeNode<'a>> + 'a {
        let model = self.model;
        self.entry()
            .children
            .iter()
            .map(move |&index| ScopeNode { model, index })
    }

    /// Iterate over the ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = ScopeNode<'a>> {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// Collect the ancestors matching a predicate, nearest first.
    pub fn collect_parents<F>(&self, mut predicate: F) -> Vec<ScopeNode<'a>>
    where
        F: FnMut(&ScopeNode<'a>) -> bool,
    {
        self.ancestors().filter(|node| predicate(node)).collect()
    }
}

impl PartialEq for ScopeNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.model, other.model) && self.index == other.index
    }
}

impl Eq for ScopeNode<'_> {}
