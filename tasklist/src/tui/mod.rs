//! Full-screen terminal interface.
//!
//! The interface never mutates state itself. Components read a snapshot of
//! the store's state, translate key presses into [`Message`]s, and the event
//! loop sends any resulting action to the store. Every action the store
//! processes is broadcast back, which triggers a redraw from a fresh
//! snapshot.

mod calendar;
mod component;
mod dialog;
mod page;
mod panel;
mod table;
mod util;

use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::broadcast::error::RecvError;

pub use component::{Component, Message};
pub use page::ListPage;

use crate::error::TaskListError;
use crate::reducer::TaskListState;
use crate::TaskListStore;

/// Runs the interface until the user quits.
///
/// The terminal is restored before returning, also on error.
///
/// # Errors
///
/// Returns an error if the terminal cannot be read or drawn, or if the store
/// rejects an action.
pub async fn run(store: &TaskListStore, title: &str) -> Result<(), TaskListError> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, store, ListPage::new(title)).await;
    ratatui::restore();
    result
}

async fn event_loop(
    terminal: &mut DefaultTerminal,
    store: &TaskListStore,
    mut page: ListPage,
) -> Result<(), TaskListError> {
    let mut events = EventStream::new();
    let mut actions = store.subscribe_actions();
    let mut state: TaskListState = store.state(Clone::clone).await;

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            page.render(&state, area, frame.buffer_mut());
            if let Some(position) = page.cursor_position(&state, area) {
                frame.set_cursor_position(position);
            }
        })?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match page.on_key(&state, key) {
                        Some(Message::Exit) => {
                            tracing::info!("Exit requested");
                            return Ok(());
                        },
                        Some(Message::Dispatch(action)) => store.send(action).await?,
                        Some(Message::Handled) | None => {},
                    }
                },
                // Resizes and other events only need a redraw
                Some(Ok(_)) => {},
                Some(Err(error)) => return Err(error.into()),
                None => return Ok(()),
            },
            received = actions.recv() => match received {
                Ok(action) => tracing::trace!(action = action.name(), "Redrawing after action"),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "View lagged behind the store");
                },
                Err(RecvError::Closed) => return Ok(()),
            },
        }

        state = store.state(Clone::clone).await;
    }
}
