use crossterm::event::KeyEvent;
use ratatui::prelude::*;

use crate::reducer::{TaskListAction, TaskListState};

/// What a component wants done after handling a key
#[derive(Debug, PartialEq, Eq)]
pub enum Message {
    /// The key only changed view-local state
    Handled,
    /// Send this action to the store
    Dispatch(TaskListAction),
    /// Leave the application
    Exit,
}

/// A piece of the interface that draws from a state snapshot and reacts to keys
pub trait Component {
    /// Renders the component into the given area.
    fn render(&self, state: &TaskListState, area: Rect, buf: &mut Buffer);

    /// Returns the cursor position (column, row) for the component, if applicable.
    fn cursor_position(&self, _state: &TaskListState, _area: Rect) -> Option<(u16, u16)> {
        None
    }

    /// Handles key events for the component.
    ///
    /// `state` is the snapshot the component was last rendered from.
    fn on_key(&mut self, _state: &TaskListState, _key: KeyEvent) -> Option<Message> {
        None
    }
}
