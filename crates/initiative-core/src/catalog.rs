use crate::error::{InitiativeError, Result};
use crate::types::ActionId;
use serde::{Deserialize, Serialize};

/// Built-in palette, in display order. Durations are in seconds.
pub const BUILTIN_ACTIONS: &[(&str, u32)] = &[
    ("Walk 10", 3),
    ("Run 10", 1),
    ("Attack", 5),
    ("Defend", 4),
    ("Shoot", 5),
    ("Drink", 5),
    ("Draw", 1),
    ("Equip", 6),
    ("Pickup", 3),
    ("Throw", 3),
    ("Wait 1", 1),
    ("Wait 2", 2),
];

// ---------------------------------------------------------------------------
// ActionDefinition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDefinition {
    pub id: ActionId,
    pub name: String,
    /// Seconds; always greater than zero.
    pub duration: u32,
}

// ---------------------------------------------------------------------------
// ActionCatalog
// ---------------------------------------------------------------------------

/// Registry of named actions with a fixed duration.
///
/// Ids are dense and assigned in definition order, so an id doubles as the
/// position of its definition. Duplicate names are accepted; [`lookup`]
/// only ever finds the first one.
///
/// [`lookup`]: ActionCatalog::lookup
#[derive(Debug, Clone, Default)]
pub struct ActionCatalog {
    actions: Vec<ActionDefinition>,
}

impl ActionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for &(name, duration) in BUILTIN_ACTIONS {
            // Builtin durations are all non-zero.
            let _ = catalog.define(name, duration);
        }
        catalog
    }

    pub fn define(&mut self, name: impl Into<String>, duration: u32) -> Result<ActionId> {
        if duration == 0 {
            return Err(InitiativeError::InvalidDuration(duration));
        }
        let id = ActionId(self.actions.len() as u32);
        self.actions.push(ActionDefinition {
            id,
            name: name.into(),
            duration,
        });
        Ok(id)
    }

    /// Override the duration of `name` if it exists, otherwise define it.
    pub fn define_or_override(&mut self, name: &str, duration: u32) -> Result<ActionId> {
        match self.lookup(name) {
            Ok(id) => {
                self.set_duration(id, duration)?;
                tracing::debug!(action = %name, duration, "catalog override");
                Ok(id)
            }
            Err(_) => self.define(name, duration),
        }
    }

    pub fn lookup(&self, name: &str) -> Result<ActionId> {
        self.actions
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.id)
            .ok_or_else(|| InitiativeError::ActionNotFound(name.to_string()))
    }

    pub fn get(&self, id: ActionId) -> Option<&ActionDefinition> {
        self.actions.get(id.0 as usize)
    }

    pub fn name(&self, id: ActionId) -> Result<&str> {
        self.find(id).map(|a| a.name.as_str())
    }

    pub fn duration(&self, id: ActionId) -> Result<u32> {
        self.find(id).map(|a| a.duration)
    }

    /// Changes only future blocks; blocks already on a timeline keep their width.
    pub fn set_duration(&mut self, id: ActionId, duration: u32) -> Result<()> {
        if duration == 0 {
            return Err(InitiativeError::InvalidDuration(duration));
        }
        let action = self
            .actions
            .get_mut(id.0 as usize)
            .ok_or(InitiativeError::UnknownAction(id.0))?;
        action.duration = duration;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionDefinition> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    fn find(&self, id: ActionId) -> Result<&ActionDefinition> {
        self.get(id).ok_or(InitiativeError::UnknownAction(id.0))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
