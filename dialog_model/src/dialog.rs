//! Dialog - an interaction model together with its scope model.

use serde::{Deserialize, Serialize};

use crate::error::ModelResult;
use crate::interaction::InteractionUnit;
use crate::scopes::ScopeModel;
use crate::QName;

/// A complete dialog description.
#[derive(Debug, Clone)]
pub struct Dialog {
    id: QName,
    interface_model: InteractionUnit,
    scope_model: ScopeModel,
}

/// Serialized form of a dialog, as found in configuration files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DialogDescription {
    id: QName,
    interface: InteractionUnit,
}

impl Dialog {
    /// Create a dialog, deriving the scope model from the interaction model.
    pub fn new(id: QName, interface_model: InteractionUnit) -> ModelResult<Self> {
        let scope_model = ScopeModel::assign(&interface_model)?;
        Ok(Self::with_scope_model(id, interface_model, scope_model))
    }

    /// Create a dialog with an explicit scope model.
    ///
    /// The scope model must mirror the interaction model node for node; this
    /// is not checked.
    pub fn with_scope_model(
        id: QName,
        interface_model: InteractionUnit,
        scope_model: ScopeModel,
    ) -> Self {
        Self {
            id,
            interface_model,
            scope_model,
        }
    }

    /// Load a dialog description from TOML.
    pub fn from_toml_str(source: &str) -> ModelResult<Self> {
        let description: DialogDescription = toml::from_str(source)?;
        Self::new(description.id, description.interface)
    }

    /// Load a dialog description from JSON.
    pub fn from_json_str(source: &str) -> ModelResult<Self> {
        let description: DialogDescription = serde_json::from_str(source)?;
        Self::new(description.id, description.interface)
    }

    /// Serialize the dialog description (without scopes) as JSON.
    pub fn to_json_string(&self) -> ModelResult<String> {
        let description = DialogDescription {
            id: self.id.clone(),
            interface: self.interface_model.clone(),
        };
        Ok(serde_json::to_string_pretty(&description)?)
    }

    pub fn id(&self) -> &QName {
        &self.id
    }

    pub fn interface_model(&self) -> &InteractionUnit {
        &self.interface_model
    }

    pub fn scope_model(&self) -> &ScopeModel {
        &self.scope_model
    }
}
