//! Interaction model - the declarative tree of interaction units.
//!
//! Units are the building blocks of a dialog: containers arrange their
//! children according to a temporal operator, leaves select, show, edit or
//! trigger something. A container with a `Choice` or `Deactivation` operator
//! lets exactly one of its children be active at a time and is called
//! *demarcating*.

use serde::{Deserialize, Serialize};

use crate::QName;

/// How a container arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalOperator {
    /// All children are available at the same time.
    Concurrency,
    /// Exactly one child at a time (tabs, master/detail).
    Choice,
    /// One child deactivates the others (wizard steps, toggles).
    Deactivation,
    /// Children are visited one after the other.
    Sequence,
}

impl TemporalOperator {
    /// Whether this operator gates exclusive activation among the children.
    pub fn is_demarcating(&self) -> bool {
        matches!(self, TemporalOperator::Choice | TemporalOperator::Deactivation)
    }
}

/// The kind of an interaction unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Container(TemporalOperator),
    Select,
    Input,
    Output,
    Trigger,
}

/// A node in the interaction model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionUnit {
    pub id: QName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub kind: UnitKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<InteractionUnit>,
}

impl InteractionUnit {
    /// Create a unit without children.
    pub fn new(id: QName, kind: UnitKind) -> Self {
        Self {
            id,
            label: None,
            kind,
            children: Vec::new(),
        }
    }

    /// Create a container unit.
    pub fn container(id: QName, operator: TemporalOperator) -> Self {
        Self::new(id, UnitKind::Container(operator))
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Append a child unit.
    pub fn with_child(mut self, child: InteractionUnit) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child units.
    pub fn with_children(mut self, children: impl IntoIterator<Item = InteractionUnit>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, UnitKind::Container(_))
    }

    /// Whether this unit gates exclusive activation among its children.
    pub fn is_demarcating(&self) -> bool {
        match self.kind {
            UnitKind::Container(op) => op.is_demarcating(),
            _ => false,
        }
    }

    /// Iterate over this unit and all descendants, depth-first (pre-order).
    pub fn iter(&self) -> impl Iterator<Item = &InteractionUnit> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let unit = stack.pop()?;
            stack.extend(unit.children.iter().rev());
            Some(unit)
        })
    }

    /// Find a unit by id in this subtree.
    pub fn find(&self, id: &QName) -> Option<&InteractionUnit> {
        self.iter().find(|unit| &unit.id == id)
    }

    /// Find the parent of the unit with the given id in this subtree.
    pub fn parent_of(&self, id: &QName) -> Option<&InteractionUnit> {
        self.iter()
            .find(|unit| unit.children.iter().any(|child| &child.id == id))
    }

    /// Number of units in this subtree.
    pub fn unit_count(&self) -> usize {
        self.iter().count()
    }
}
