//! Dialog state - the runtime registry of statements and active units.
//!
//! A [`DialogState`] owns two maps:
//! - scope id -> [`DelegatingContext`], created lazily and kept until the
//!   dialog model is replaced,
//! - parent scope id -> active unit, at most one active unit per scope.
//!
//! The root unit has no parent scope; its activation is held apart so it
//! never competes with the children of a demarcating unit in scope 0.

mod ancestry;

pub use ancestry::*;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, trace};
use uuid::Uuid;

use dialog_model::{ActivationPolicy, DefaultActivation, Dialog, QName, ScopeId};

use crate::address::{AddressTemplate, ResourceAddress};
use crate::context::{DelegatingContext, ScopedContext, StatementContext};
use crate::error::{DialogError, DialogResult};

/// Identifies one dialog session in logs and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The current state of one dialog: scoped statements and activation.
///
/// Not thread-safe; a dialog state lives on the UI thread that drives it.
pub struct DialogState {
    session: SessionId,
    dialog: Dialog,
    root: Box<dyn StatementContext>,
    policy: Box<dyn ActivationPolicy>,
    scope2context: HashMap<ScopeId, DelegatingContext>,
    /// Active units keyed by their parent (!) scope.
    active_in_scope: HashMap<ScopeId, QName>,
    active_root: Option<QName>,
}

impl DialogState {
    /// Create the state for a dialog with the default activation policy.
    pub fn new(dialog: Dialog, root: impl StatementContext + 'static) -> Self {
        Self::with_policy(dialog, root, DefaultActivation)
    }

    /// Create the state for a dialog with a custom activation policy.
    pub fn with_policy(
        dialog: Dialog,
        root: impl StatementContext + 'static,
        policy: impl ActivationPolicy + 'static,
    ) -> Self {
        let mut state = Self {
            session: SessionId::new(),
            dialog,
            root: Box::new(root),
            policy: Box::new(policy),
            scope2context: HashMap::new(),
            active_in_scope: HashMap::new(),
            active_root: None,
        };
        state.reset_activation();
        state
    }

    pub fn session_id(&self) -> SessionId {
        self.session
    }

    pub fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    /// Swap in a new dialog model.
    ///
    /// Scope ids of the old model mean nothing in the new one, so all
    /// statements are dropped and activation is recomputed.
    pub fn replace_dialog(&mut self, dialog: Dialog) {
        info!(
            session = %self.session,
            from = %self.dialog.id(),
            to = %dialog.id(),
            "replacing dialog model"
        );
        self.dialog = dialog;
        self.scope2context.clear();
        self.reset_activation();
    }

    /// Forget all activation and fall back to the policy's defaults.
    ///
    /// A non-demarcating root is active by default. Statements are kept.
    pub fn reset_activation(&mut self) {
        self.active_in_scope.clear();

        let root = self.dialog.interface_model();
        self.active_root = (!self.dialog.scope_model().node(&root.id).scope().demarcation)
            .then(|| root.id.clone());

        let defaults = self.policy.default_activation(&self.dialog);
        info!(
            session = %self.session,
            dialog = %self.dialog.id(),
            active = defaults.len(),
            "reset activation"
        );
        self.active_in_scope.extend(defaults);
    }

    // -- contexts --

    /// The statement context for a unit.
    ///
    /// # Panics
    ///
    /// Panics if the unit is not part of the dialog.
    #[track_caller]
    pub fn context(&mut self, unit: &QName) -> ScopedContext<'_> {
        let scope_id = self.context_mut(unit).scope_id();
        ScopedContext::new(scope_id, &self.scope2context, self.root.as_ref())
    }

    /// Like [`DialogState::context`], but reports unknown units as an error.
    pub fn try_context(&mut self, unit: &QName) -> DialogResult<ScopedContext<'_>> {
        if !self.dialog.scope_model().contains(unit) {
            return Err(DialogError::UnitNotFound(unit.clone()));
        }
        Ok(self.context(unit))
    }

    /// The context record of a unit's scope, for writing statements.
    ///
    /// The record is created on first access and is the same for every unit
    /// of the scope.
    #[track_caller]
    pub fn context_mut(&mut self, unit: &QName) -> &mut DelegatingContext {
        let node = self.dialog.scope_model().node(unit);
        let scope_id = node.scope_id();
        let session = self.session;

        self.scope2context.entry(scope_id).or_insert_with(|| {
            let parent_scopes = ancestor_scope_ids(node);
            trace!(
                session = %session,
                scope = %scope_id,
                parents = ?parent_scopes,
                "created context"
            );
            DelegatingContext::new(scope_id, parent_scopes)
        })
    }

    /// The scope id a unit belongs to.
    #[track_caller]
    pub fn scope_id(&mut self, unit: &QName) -> ScopeId {
        self.context_mut(unit).scope_id()
    }

    pub fn try_scope_id(&mut self, unit: &QName) -> DialogResult<ScopeId> {
        Ok(self.try_context(unit)?.scope_id())
    }

    /// Set a statement in the scope of a unit.
    #[track_caller]
    pub fn set_statement(&mut self, unit: &QName, key: &str, value: impl Into<String>) {
        let session = self.session;
        let context = self.context_mut(unit);
        let value = value.into();

        debug!(
            session = %session,
            scope = %context.scope_id(),
            key,
            value = %value,
            "set statement"
        );
        context.set_statement(key, value);
    }

    /// Clear a statement in the scope of a unit.
    #[track_caller]
    pub fn clear_statement(&mut self, unit: &QName, key: &str) {
        let session = self.session;
        let context = self.context_mut(unit);

        if let Some(previous) = context.clear_statement(key) {
            debug!(
                session = %session,
                scope = %context.scope_id(),
                key,
                previous = %previous,
                "cleared statement"
            );
        }
    }

    /// Resolve an address template against the context of a unit.
    #[track_caller]
    pub fn resolve_address(
        &mut self,
        unit: &QName,
        template: &AddressTemplate,
        wildcards: &[&str],
    ) -> DialogResult<ResourceAddress> {
        let context = self.context(unit);
        Ok(template.resolve(&context, wildcards)?)
    }

    // -- activation --

    /// Whether a unit may be activated.
    ///
    /// True for a non-demarcating root, and for any direct child of a
    /// demarcating unit. Advisory only: [`DialogState::activate_scope`] does
    /// not check it.
    #[track_caller]
    pub fn can_be_activated(&self, unit: &QName) -> bool {
        let node = self.dialog.scope_model().node(unit);
        match node.parent() {
            None => !node.scope().demarcation,
            Some(parent) => parent.scope().demarcation,
        }
    }

    /// Make a unit the active one within its parent's scope, replacing the
    /// previously active unit. A root unit has no parent scope and only
    /// replaces the active root.
    #[track_caller]
    pub fn activate_scope(&mut self, unit: &QName) {
        let parent = self
            .dialog
            .scope_model()
            .node(unit)
            .parent()
            .map(|parent| parent.unit().clone());

        let Some(parent) = parent else {
            let previous = self.active_root.replace(unit.clone());
            if previous.as_ref() != Some(unit) {
                debug!(
                    session = %self.session,
                    previous = ?previous,
                    active = %unit,
                    "replaced active root"
                );
            }
            return;
        };

        let scope_id = self.scope_id(&parent);
        let previous = self.active_in_scope.insert(scope_id, unit.clone());
        if previous.as_ref() != Some(unit) {
            debug!(
                session = %self.session,
                scope = %scope_id,
                previous = ?previous,
                active = %unit,
                "replaced active unit"
            );
        }
    }

    /// Whether the scope containing a unit has any active unit.
    #[track_caller]
    pub fn is_within_active_scope(&self, unit: &QName) -> bool {
        let scope_id = self.dialog.scope_model().node(unit).scope_id();
        self.active_in_scope.contains_key(&scope_id)
    }

    /// The active unit keyed under a scope.
    pub fn active_unit(&self, scope_id: ScopeId) -> Option<&QName> {
        self.active_in_scope.get(&scope_id)
    }

    /// The active root unit, if any.
    pub fn active_root(&self) -> Option<&QName> {
        self.active_root.as_ref()
    }

    /// All active units with the scope they are keyed under. The active root
    /// is not among them.
    pub fn active_units(&self) -> impl Iterator<Item = (ScopeId, &QName)> {
        self.active_in_scope.iter().map(|(scope_id, unit)| (*scope_id, unit))
    }

    /// Number of contexts created so far.
    pub fn context_count(&self) -> usize {
        self.scope2context.len()
    }

    /// Capture activation and local statements for diagnostics.
    pub fn snapshot(&self) -> DialogSnapshot {
        DialogSnapshot {
            session: self.session,
            dialog: self.dialog.id().clone(),
            active_root: self.active_root.clone(),
            active: self
                .active_in_scope
                .iter()
                .map(|(scope_id, unit)| (*scope_id, unit.clone()))
                .collect(),
            statements: self
                .scope2context
                .iter()
                .map(|(scope_id, context)| {
                    let statements: BTreeMap<String, String> = context
                        .statements()
                        .map(|(key, value)| (key.to_string(), value.to_string()))
                        .collect();
                    (*scope_id, statements)
                })
                .collect(),
        }
    }
}

impl std::fmt::Debug for DialogState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogState")
            .field("session", &self.session)
            .field("dialog", self.dialog.id())
            .field("scope2context", &self.scope2context)
            .field("active_in_scope", &self.active_in_scope)
            .field("active_root", &self.active_root)
            .finish()
    }
}

/// An ordered, serializable view of a dialog state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogSnapshot {
    pub session: SessionId,
    pub dialog: QName,
    #[serde(default)]
    pub active_root: Option<QName>,
    pub active: BTreeMap<ScopeId, QName>,
    pub statements: BTreeMap<ScopeId, BTreeMap<String, String>>,
}

impl DialogSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
