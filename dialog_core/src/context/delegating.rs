//! Delegating contexts - per-scope statements that fall back to enclosing
//! scopes and finally to the application's root context.

use std::collections::HashMap;

use dialog_model::ScopeId;

use super::StatementContext;

/// Local statements of one scope, plus the scope ids it delegates to.
///
/// The record holds data only. Lookups through the delegation chain go
/// through a [`ScopedContext`], which finds ancestor records by scope id at
/// lookup time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegatingContext {
    scope_id: ScopeId,
    statements: HashMap<String, String>,
    /// Ancestor scopes, nearest first, without duplicates.
    parent_scopes: Vec<ScopeId>,
}

impl DelegatingContext {
    pub fn new(scope_id: ScopeId, parent_scopes: Vec<ScopeId>) -> Self {
        Self {
            scope_id,
            statements: HashMap::new(),
            parent_scopes,
        }
    }

    pub fn scope_id(&self) -> ScopeId {
        self.scope_id
    }

    /// The delegation chain, nearest ancestor first.
    pub fn parent_scopes(&self) -> &[ScopeId] {
        &self.parent_scopes
    }

    /// Store a statement locally. Last write wins.
    pub fn set_statement(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.statements.insert(key.into(), value.into());
    }

    /// Remove a local statement, returning the previous value.
    pub fn clear_statement(&mut self, key: &str) -> Option<String> {
        self.statements.remove(key)
    }

    /// Local lookup only, without delegation.
    pub fn statement(&self, key: &str) -> Option<&str> {
        self.statements.get(key).map(String::as_str)
    }

    /// Iterate over the local statements.
    pub fn statements(&self) -> impl Iterator<Item = (&str, &str)> {
        self.statements
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

/// A resolving view over the context of one scope.
///
/// `get` checks the scope's own statements, then each ancestor scope nearest
/// to farthest, then the root context. Ancestor scopes without a record yet
/// have no statements and are skipped.
#[derive(Clone, Copy)]
pub struct ScopedContext<'a> {
    scope_id: ScopeId,
    scopes: &'a HashMap<ScopeId, DelegatingContext>,
    root: &'a dyn StatementContext,
}

impl<'a> ScopedContext<'a> {
    pub(crate) fn new(
        scope_id: ScopeId,
        scopes: &'a HashMap<ScopeId, DelegatingContext>,
        root: &'a dyn StatementContext,
    ) -> Self {
        Self {
            scope_id,
            scopes,
            root,
        }
    }

    pub fn scope_id(&self) -> ScopeId {
        self.scope_id
    }

    /// The record backing this view.
    pub fn record(&self) -> Option<&'a DelegatingContext> {
        self.scopes.get(&self.scope_id)
    }

    /// The delegation chain, nearest ancestor first.
    pub fn parent_scopes(&self) -> &'a [ScopeId] {
        self.record()
            .map(DelegatingContext::parent_scopes)
            .unwrap_or(&[])
    }

    fn chain(&self) -> impl Iterator<Item = &'a DelegatingContext> + '_ {
        std::iter::once(self.scope_id)
            .chain(self.parent_scopes().iter().copied())
            .filter_map(|scope_id| self.scopes.get(&scope_id))
    }
}

impl StatementContext for ScopedContext<'_> {
    fn get(&self, key: &str) -> Option<String> {
        self.chain()
            .find_map(|context| context.statement(key))
            .map(str::to_string)
            .or_else(|| self.root.get(key))
    }

    // Scope statements are single values; tuples only come from the root.
    fn get_tuple(&self, key: &str) -> Option<Vec<String>> {
        self.root.get_tuple(key)
    }
}

impl std::fmt::Debug for ScopedContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedContext")
            .field("scope_id", &self.scope_id)
            .field("parent_scopes", &self.parent_scopes())
            .finish()
    }
}
