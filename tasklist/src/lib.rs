//! Single-session todo list.
//!
//! Entries live in memory for one session. New entries are added through
//! the "Add New Todo" form. Each row offers view, edit and delete actions,
//! and these actions only select the row.
//!
//! All state sits in one [`TaskListState`] owned by a [`Store`]. Every change
//! goes through [`TaskListReducer`]: the reducer embeds the form reducer,
//! and the form reducer embeds the date picker reducer.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tasklist::{FormAction, TaskListAction, TaskListEnvironment, TaskListReducer, TaskListState};
//! use tasklist_core::environment::SystemClock;
//! use tasklist_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = TaskListEnvironment::new(Arc::new(SystemClock));
//! let store = Store::new(TaskListState::new(), TaskListReducer::new(), env);
//!
//! store.send(TaskListAction::Form(FormAction::Open)).await?;
//! store
//!     .send(TaskListAction::Form(FormAction::SetItem("Buy milk".to_string())))
//!     .await?;
//! store.send(TaskListAction::SubmitForm).await?;
//!
//! let count = store.state(|s| s.entries.len()).await;
//! assert_eq!(count, 1);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod date_picker;
pub mod environment;
pub mod error;
pub mod form;
pub mod reducer;
pub mod selection;
pub mod tui;
pub mod types;

use tasklist_runtime::Store;

// Re-export commonly used types
pub use config::Config;
pub use date_picker::{DatePickerAction, DatePickerReducer, DatePickerState};
pub use environment::TaskListEnvironment;
pub use error::TaskListError;
pub use form::{FormAction, FormReducer, FormState, RequiredField};
pub use reducer::{Notice, TaskListAction, TaskListReducer, TaskListState};
pub use selection::{Selection, SelectionMode};
pub use types::{Entry, EntryDraft, EntryId, EntryList, ParseError, Priority, Status};

/// The store driving the todo list
pub type TaskListStore = Store<TaskListState, TaskListAction, TaskListEnvironment, TaskListReducer>;
