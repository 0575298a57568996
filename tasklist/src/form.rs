//! The "Add New Todo" form.
//!
//! The form holds the draft being edited, its open/closed visibility and
//! the embedded date picker. Submission is handled by the list reducer,
//! which owns the entries; this module only exposes what submission needs:
//! [`FormState::missing_fields`] and [`FormState::reset`].

use crate::date_picker::{format_long_date, DatePickerAction, DatePickerReducer, DatePickerState};
use crate::environment::TaskListEnvironment;
use crate::types::{EntryDraft, Priority, Status};
use serde::{Deserialize, Serialize};
use std::fmt;
use tasklist_core::{
    composition::{scope_reducer, ScopedReducer},
    effect::Effect,
    reducer::Reducer,
    SmallVec,
};

/// A field that must be filled in before the form can be submitted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequiredField {
    /// The entry date
    Date,
    /// The task description
    Item,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Date => "Date",
            Self::Item => "Item",
        })
    }
}

/// State of the form
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    /// Whether the dialog is showing
    pub open: bool,
    /// The entry being composed
    pub draft: EntryDraft,
    /// The deadline picker
    pub picker: DatePickerState,
    /// Fields that blocked the last submission attempt
    pub missing: Vec<RequiredField>,
}

impl FormState {
    /// Returns true if the dialog is showing
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Required fields that are currently empty
    ///
    /// Only an empty value counts as missing; whitespace is accepted.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        if self.draft.date.is_empty() {
            missing.push(RequiredField::Date);
        }
        if self.draft.item.is_empty() {
            missing.push(RequiredField::Item);
        }
        missing
    }

    /// Clears the draft and picker and closes the dialog
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Actions for the form
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormAction {
    /// Show the dialog
    Open,
    /// Hide the dialog, keeping the draft
    Dismiss,
    /// Replace the date text
    SetDate(String),
    /// Replace the item text
    SetItem(String),
    /// Choose a priority
    SetPriority(Priority),
    /// Choose a status
    SetStatus(Status),
    /// Select the next priority
    NextPriority,
    /// Select the previous priority
    PreviousPriority,
    /// Select the next status
    NextStatus,
    /// Select the previous status
    PreviousStatus,
    /// Forwarded to the deadline picker
    Picker(DatePickerAction),
}

/// Reducer for the form
///
/// Embeds [`DatePickerReducer`] over the `picker` field and copies each
/// date it reports into the draft deadline.
#[derive(Clone, Debug)]
pub struct FormReducer {
    picker: ScopedReducer<FormState, FormAction, DatePickerReducer>,
}

impl FormReducer {
    /// Creates a new `FormReducer`
    #[must_use]
    pub fn new() -> Self {
        Self {
            picker: scope_reducer(
                DatePickerReducer::new(),
                |form: &mut FormState| &mut form.picker,
                |action: FormAction| match action {
                    FormAction::Picker(inner) => Some(inner),
                    _ => None,
                },
                FormAction::Picker,
            ),
        }
    }
}

impl Default for FormReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for FormReducer {
    type State = FormState;
    type Action = FormAction;
    type Environment = TaskListEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            FormAction::Open => {
                state.open = true;
                state.missing.clear();
                if state.draft.date.is_empty() {
                    state.draft.date = env.today_formatted();
                }
                return SmallVec::new();
            },
            FormAction::Dismiss => {
                state.open = false;
                state.picker = DatePickerState::default();
                return SmallVec::new();
            },
            _ if !state.open => {
                tracing::debug!(?action, "Ignoring form edit while closed");
                return SmallVec::new();
            },
            _ => {},
        }

        match action {
            FormAction::SetDate(date) => state.draft.date = date,
            FormAction::SetItem(item) => state.draft.item = item,
            FormAction::SetPriority(priority) => state.draft.priority = priority,
            FormAction::SetStatus(status) => state.draft.status = status,
            FormAction::NextPriority => state.draft.priority = state.draft.priority.next(),
            FormAction::PreviousPriority => {
                state.draft.priority = state.draft.priority.previous();
            },
            FormAction::NextStatus => state.draft.status = state.draft.status.next(),
            FormAction::PreviousStatus => state.draft.status = state.draft.status.previous(),
            FormAction::Picker(picker_action) => {
                let reported = DatePickerReducer::reported_selection(&state.picker, &picker_action);
                let effects = self
                    .picker
                    .reduce(state, FormAction::Picker(picker_action), env);
                // A cleared selection leaves the deadline as it was
                if let Some(Some(date)) = reported {
                    state.draft.deadline = format_long_date(date);
                }
                return effects;
            },
            FormAction::Open | FormAction::Dismiss => {},
        }

        SmallVec::new()
    }
}
