//! The entry picked by the view, edit and delete row actions.

use crate::types::Entry;
use serde::{Deserialize, Serialize};

/// Which row action made the selection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// The view action
    View,
    /// The edit action
    Edit,
    /// The delete action
    Delete,
}

impl SelectionMode {
    /// Title for the panel showing the selection
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::View => "View entry",
            Self::Edit => "Edit entry",
            Self::Delete => "Delete entry",
        }
    }
}

/// The current selection
///
/// Each flag stays set once its action has been used, until the selection
/// is dismissed. `mode` records the most recent action.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// The selected entry, or `None` if the requested id was unknown
    pub entry: Option<Entry>,
    /// Set by the view action
    pub viewing: bool,
    /// Set by the edit action
    pub editing: bool,
    /// Set by the delete action
    pub deleting: bool,
    /// The most recent row action, or `None` when dismissed
    pub mode: Option<SelectionMode>,
}

impl Selection {
    /// Records a row action against `entry`
    pub fn select(&mut self, mode: SelectionMode, entry: Option<Entry>) {
        self.entry = entry;
        match mode {
            SelectionMode::View => self.viewing = true,
            SelectionMode::Edit => self.editing = true,
            SelectionMode::Delete => self.deleting = true,
        }
        self.mode = Some(mode);
    }

    /// Clears the entry and every flag
    pub fn dismiss(&mut self) {
        *self = Self::default();
    }

    /// Returns true if a row action is being shown
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.mode.is_some()
    }
}
