//! Mapper configuration
//!
//! Referential actions are a process-wide choice owned by the composition
//! root and handed to the engine at construction time, not a mutable
//! global.

use std::fmt;

/// Behavior applied to dependent rows when a referenced row is deleted or
/// updated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferentialAction {
    /// Propagate the delete/update to dependent rows
    Cascade,
    /// Null out the referencing column
    SetNull,
    /// Reject the delete/update while dependent rows exist
    #[default]
    NoAction,
}

impl ReferentialAction {
    /// SQL keyword for the action
    pub fn as_sql(&self) -> &'static str {
        match self {
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::NoAction => "NO ACTION",
        }
    }
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_sql())
    }
}

/// Engine-wide settings.
///
/// The referential actions are baked into the table DDL, so changing them
/// only takes effect after dropping and recreating every table. That is
/// destructive; callers must warn before triggering it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapperConfig {
    /// Action applied when a referenced row is deleted
    pub on_delete: ReferentialAction,
    /// Action applied when a referenced key is updated
    pub on_update: ReferentialAction,
}

impl MapperConfig {
    /// Config with the default restrictive actions (NO ACTION)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the on-delete action
    #[must_use]
    pub fn on_delete(mut self, action: ReferentialAction) -> Self {
        self.on_delete = action;
        self
    }

    /// Set the on-update action
    #[must_use]
    pub fn on_update(mut self, action: ReferentialAction) -> Self {
        self.on_update = action;
        self
    }
}
