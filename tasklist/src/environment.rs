//! Injected dependencies shared by the todo list reducers.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use std::fmt::Write;
use std::sync::Arc;
use tasklist_core::environment::Clock;

/// Format used for the entry date when none is configured (`1/31/2024`)
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Environment dependencies for the todo list reducers
#[derive(Clone)]
pub struct TaskListEnvironment {
    /// Source of "today" for the form and the date picker
    pub clock: Arc<dyn Clock>,
    /// `strftime` pattern used to pre-fill the entry date
    pub date_format: String,
}

impl TaskListEnvironment {
    /// Creates an environment using [`DEFAULT_DATE_FORMAT`]
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    /// Replaces the entry date format
    ///
    /// Patterns chrono cannot interpret fall back to [`DEFAULT_DATE_FORMAT`].
    #[must_use]
    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        let date_format = date_format.into();
        if is_valid_date_format(&date_format) {
            self.date_format = date_format;
        } else {
            tracing::warn!(%date_format, "Ignoring invalid date format");
        }
        self
    }

    /// Today's date in the configured format
    #[must_use]
    pub fn today_formatted(&self) -> String {
        format_date(self.clock.today(), &self.date_format)
    }
}

/// Returns true if chrono can interpret `pattern` as a date format
#[must_use]
pub fn is_valid_date_format(pattern: &str) -> bool {
    !pattern.is_empty() && !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// Formats `date` with a `strftime` pattern
///
/// A pattern that needs time-of-day fields cannot be rendered from a date
/// alone; in that case the ISO form is returned.
#[must_use]
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        out.clear();
        let _ = write!(out, "{date}");
    }
    out
}
