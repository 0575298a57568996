//! Reducer logic for the todo list.
//!
//! Commands from the view are validated and turned into events; events are
//! then applied to state. Applying an event does not look at the command
//! that produced it, so a recorded event can be replayed on its own.

use crate::environment::TaskListEnvironment;
use crate::form::{FormAction, FormReducer, FormState, RequiredField};
use crate::selection::{Selection, SelectionMode};
use crate::types::{Entry, EntryId, EntryList};
use serde::{Deserialize, Serialize};
use std::fmt;
use tasklist_core::{
    composition::{scope_reducer, ScopedReducer},
    effect::Effect,
    reducer::Reducer,
    SmallVec,
};
use tasklist_macros::Action;

/// Outcome of the last submission, shown on the status line
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// An entry was added
    Added(EntryId),
    /// Submission was blocked by empty required fields
    Blocked(Vec<RequiredField>),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added(id) => write!(f, "Added entry #{id}"),
            Self::Blocked(missing) => {
                f.write_str("Required: ")?;
                for (i, field) in missing.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{field}")?;
                }
                Ok(())
            },
        }
    }
}

/// State of the todo list page
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListState {
    /// All entries, in insertion order
    pub entries: EntryList,
    /// The add-entry form
    pub form: FormState,
    /// The entry picked by a row action
    pub selection: Selection,
    /// Outcome of the last submission
    pub notice: Option<Notice>,
}

impl TaskListState {
    /// Creates a state with an empty list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state holding existing entries
    #[must_use]
    pub fn with_entries(entries: EntryList) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }
}

/// Actions representing commands and events for the todo list
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskListAction {
    // ========== Commands ==========
    /// Command: Forward an action to the form
    #[command]
    Form(FormAction),

    /// Command: Submit the form's draft as a new entry
    #[command]
    SubmitForm,

    /// Command: Select an entry for viewing
    #[command]
    ViewEntry {
        /// Entry to select
        id: EntryId,
    },

    /// Command: Select an entry for editing
    #[command]
    EditEntry {
        /// Entry to select
        id: EntryId,
    },

    /// Command: Select an entry for deletion
    #[command]
    DeleteEntry {
        /// Entry to select
        id: EntryId,
    },

    /// Command: Clear the selection
    #[command]
    DismissSelection,

    // ========== Events ==========
    /// Event: An entry was added
    #[event]
    EntryAdded {
        /// The new entry
        entry: Entry,
    },

    /// Event: Submission was blocked by empty required fields
    #[event]
    SubmissionBlocked {
        /// The empty fields
        missing: Vec<RequiredField>,
    },
}

fn extract_form(action: TaskListAction) -> Option<FormAction> {
    match action {
        TaskListAction::Form(inner) => Some(inner),
        _ => None,
    }
}

/// Reducer for the todo list page
#[derive(Clone, Debug)]
pub struct TaskListReducer {
    form: ScopedReducer<TaskListState, TaskListAction, FormReducer>,
}

impl TaskListReducer {
    /// Creates a new `TaskListReducer`
    #[must_use]
    pub fn new() -> Self {
        Self {
            form: scope_reducer(
                FormReducer::new(),
                |state: &mut TaskListState| &mut state.form,
                extract_form,
                TaskListAction::Form,
            ),
        }
    }

    /// Validates a `SubmitForm` command into the event it produces
    fn validate_submission(state: &TaskListState) -> Option<TaskListAction> {
        if !state.form.is_open() {
            tracing::debug!("Ignoring submit while the form is closed");
            return None;
        }

        let missing = state.form.missing_fields();
        if !missing.is_empty() {
            return Some(TaskListAction::SubmissionBlocked { missing });
        }

        let Some(id) = state.entries.next_id() else {
            tracing::warn!("No identifier left, submission ignored");
            return None;
        };
        let entry = Entry::from_draft(id, state.form.draft.clone());
        Some(TaskListAction::EntryAdded { entry })
    }

    /// Applies an event to state
    fn apply_event(state: &mut TaskListState, action: &TaskListAction) {
        match action {
            TaskListAction::EntryAdded { entry } => {
                let id = entry.id;
                if !state.entries.insert(entry.clone()) {
                    tracing::warn!(%id, "Ignoring entry with a stale id");
                    return;
                }
                state.form.reset();
                state.notice = Some(Notice::Added(id));
                tracing::info!(%id, item = %entry.item, "Entry added");
            },
            TaskListAction::SubmissionBlocked { missing } => {
                if !state.form.is_open() {
                    tracing::debug!(?missing, "Ignoring blocked submission for a closed form");
                    return;
                }
                state.form.missing.clone_from(missing);
                state.notice = Some(Notice::Blocked(missing.clone()));
                tracing::info!(?missing, "Submission blocked");
            },
            // Commands are not applied to state
            TaskListAction::Form(_)
            | TaskListAction::SubmitForm
            | TaskListAction::ViewEntry { .. }
            | TaskListAction::EditEntry { .. }
            | TaskListAction::DeleteEntry { .. }
            | TaskListAction::DismissSelection => {},
        }
    }

    fn select(state: &mut TaskListState, mode: SelectionMode, id: EntryId) {
        let entry = state.entries.find_by_id(id).cloned();
        if entry.is_none() {
            tracing::debug!(%id, ?mode, "Selected id not found");
        }
        state.selection.select(mode, entry);
    }
}

impl Default for TaskListReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for TaskListReducer {
    type State = TaskListState;
    type Action = TaskListAction;
    type Environment = TaskListEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::debug!(action = action.name(), "Reducing");

        match action {
            // ========== Commands ==========
            TaskListAction::Form(_) => self.form.reduce(state, action, env),

            TaskListAction::SubmitForm => {
                let Some(event) = Self::validate_submission(state) else {
                    return SmallVec::new();
                };
                Self::apply_event(state, &event);
                SmallVec::new()
            },

            TaskListAction::ViewEntry { id } => {
                Self::select(state, SelectionMode::View, id);
                SmallVec::new()
            },
            TaskListAction::EditEntry { id } => {
                Self::select(state, SelectionMode::Edit, id);
                SmallVec::new()
            },
            TaskListAction::DeleteEntry { id } => {
                Self::select(state, SelectionMode::Delete, id);
                SmallVec::new()
            },
            TaskListAction::DismissSelection => {
                state.selection.dismiss();
                SmallVec::new()
            },

            // ========== Events ==========
            TaskListAction::EntryAdded { .. } | TaskListAction::SubmissionBlocked { .. } => {
                Self::apply_event(state, &action);
                SmallVec::new()
            },
        }
    }
}
