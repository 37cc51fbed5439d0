//! Delegation chains - which enclosing scopes a scope falls back to.

use std::collections::HashSet;

use dialog_model::{ScopeId, ScopeNode};

/// Scope ids of the ancestors of `node`, nearest first.
///
/// Ancestors in the node's own scope are skipped, and a scope id reached
/// again further up (a run of same-scope containers) is listed only once.
pub fn ancestor_scope_ids(node: ScopeNode<'_>) -> Vec<ScopeId> {
    let own = node.scope_id();
    let mut seen = HashSet::new();

    node.collect_parents(|ancestor| {
        let scope_id = ancestor.scope_id();
        scope_id != own && seen.insert(scope_id)
    })
    .into_iter()
    .map(|ancestor| ancestor.scope_id())
    .collect()
}
