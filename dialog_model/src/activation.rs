//! Default activation - which unit is active in each scope before any user
//! interaction.

use std::collections::BTreeMap;

use crate::dialog::Dialog;
use crate::scopes::ScopeId;
use crate::QName;

/// Computes the default active unit per scope for a dialog.
///
/// Keys are the scope of the *parent* of the active unit. The root has no
/// parent scope and is never part of the result; the engine tracks it apart.
pub trait ActivationPolicy {
    fn default_activation(&self, dialog: &Dialog) -> BTreeMap<ScopeId, QName>;
}

/// Activates the first child of every demarcating unit.
///
/// When several demarcating units share a scope id the first one
/// encountered (depth-first) decides.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultActivation;

impl ActivationPolicy for DefaultActivation {
    fn default_activation(&self, dialog: &Dialog) -> BTreeMap<ScopeId, QName> {
        let scopes = dialog.scope_model();
        let root = dialog.interface_model();
        let mut active = BTreeMap::new();

        for unit in root.iter() {
            let node = scopes.node(&unit.id);
            if !node.scope().demarcation {
                continue;
            }
            if let Some(first) = unit.children.first() {
                active
                    .entry(node.scope_id())
                    .or_insert_with(|| first.id.clone());
            }
        }

        active
    }
}
