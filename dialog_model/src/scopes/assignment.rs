//! Scope assignment - derives a scope model from an interaction model.

use super::{Scope, ScopeId, ScopeModel};
use crate::error::ModelResult;
use crate::interaction::InteractionUnit;

impl ScopeModel {
    /// Build the scope model for an interaction tree.
    ///
    /// The root opens scope 0. Each child of a demarcating container opens a
    /// fresh scope, numbered in depth-first order; every other unit stays in
    /// its parent's scope.
    pub fn assign(root: &InteractionUnit) -> ModelResult<Self> {
        let mut model = ScopeModel::new();
        let mut next_id = 1;

        model.insert_root(root.id.clone(), scope_for(root, ScopeId(0)))?;
        assign_children(&mut model, root, ScopeId(0), &mut next_id)?;

        Ok(model)
    }
}

fn scope_for(unit: &InteractionUnit, scope_id: ScopeId) -> Scope {
    Scope {
        scope_id,
        demarcation: unit.is_demarcating(),
    }
}

fn assign_children(
    model: &mut ScopeModel,
    parent: &InteractionUnit,
    parent_scope: ScopeId,
    next_id: &mut u32,
) -> ModelResult<()> {
    for child in &parent.children {
        let scope_id = if parent.is_demarcating() {
            let fresh = ScopeId(*next_id);
            *next_id += 1;
            fresh
        } else {
            parent_scope
        };

        model.insert_child(&parent.id, child.id.clone(), scope_for(child, scope_id))?;
        assign_children(model, child, scope_id, next_id)?;
    }
    Ok(())
}
