//! Deadline date picker.
//!
//! The picker owns its own selection and popover visibility. The form embeds
//! it and copies each selection into the draft deadline in long form.

use crate::environment::TaskListEnvironment;
use chrono::{Datelike, Months, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use tasklist_core::{effect::Effect, reducer::Reducer, SmallVec};

/// Text shown on the trigger while nothing is selected
pub const PLACEHOLDER: &str = "Pick a date";

/// Formats a date in long form with an ordinal day, e.g. `February 10th, 2024`
#[must_use]
pub fn format_long_date(date: NaiveDate) -> String {
    let day = date.day();
    format!(
        "{} {day}{}, {}",
        date.format("%B"),
        ordinal_suffix(day),
        date.format("%Y")
    )
}

const fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Local state of the picker
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePickerState {
    /// The chosen date, if any
    pub selected: Option<NaiveDate>,
    /// Whether the calendar popover is showing
    pub open: bool,
    /// The highlighted day in the calendar
    pub cursor: NaiveDate,
}

impl DatePickerState {
    /// Text for the trigger button
    #[must_use]
    pub fn label(&self) -> String {
        self.selected
            .map_or_else(|| PLACEHOLDER.to_string(), format_long_date)
    }
}

/// Actions for the date picker
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatePickerAction {
    /// Open the popover, or close it if open
    Toggle,
    /// Close the popover without selecting
    Close,
    /// Move the highlighted day by a number of days
    MoveDays(i64),
    /// Move the highlighted day by a number of months
    MoveMonths(i32),
    /// Choose a date, or clear the choice
    Select(Option<NaiveDate>),
    /// Choose the highlighted day
    SelectCursor,
}

/// Reducer for the date picker
#[derive(Clone, Debug, Default)]
pub struct DatePickerReducer;

impl DatePickerReducer {
    /// Creates a new `DatePickerReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// The selection `action` reports to the embedding form, if it makes one
    #[must_use]
    pub const fn reported_selection(
        state: &DatePickerState,
        action: &DatePickerAction,
    ) -> Option<Option<NaiveDate>> {
        match action {
            DatePickerAction::Select(date) => Some(*date),
            DatePickerAction::SelectCursor if state.open => Some(Some(state.cursor)),
            _ => None,
        }
    }

    fn select(state: &mut DatePickerState, date: Option<NaiveDate>) {
        state.selected = date;
        state.open = false;
        if let Some(date) = date {
            state.cursor = date;
        }
    }
}

impl Reducer for DatePickerReducer {
    type State = DatePickerState;
    type Action = DatePickerAction;
    type Environment = TaskListEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            DatePickerAction::Toggle => {
                if state.open {
                    state.open = false;
                } else {
                    state.open = true;
                    state.cursor = state.selected.unwrap_or_else(|| env.clock.today());
                }
            },
            DatePickerAction::Close => state.open = false,
            DatePickerAction::MoveDays(days) if state.open => {
                if let Some(moved) = TimeDelta::try_days(days)
                    .and_then(|delta| state.cursor.checked_add_signed(delta))
                {
                    state.cursor = moved;
                }
            },
            DatePickerAction::MoveMonths(months) if state.open => {
                let step = Months::new(months.unsigned_abs());
                let moved = if months >= 0 {
                    state.cursor.checked_add_months(step)
                } else {
                    state.cursor.checked_sub_months(step)
                };
                if let Some(moved) = moved {
                    state.cursor = moved;
                }
            },
            DatePickerAction::Select(date) => Self::select(state, date),
            DatePickerAction::SelectCursor if state.open => {
                let cursor = state.cursor;
                Self::select(state, Some(cursor));
            },
            // Cursor actions while the popover is closed
            DatePickerAction::MoveDays(_)
            | DatePickerAction::MoveMonths(_)
            | DatePickerAction::SelectCursor => {},
        }

        SmallVec::new()
    }
}
