use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use crate::form::FormAction;
use crate::reducer::{Notice, TaskListAction, TaskListState};
use crate::tui::component::{Component, Message};
use crate::tui::dialog::EntryDialog;
use crate::tui::{panel, table};

pub const ADD_HINT: &str = "[a] Add New Entry";
pub const CAPTION: &str = "A list of all entries";

/// The todo list page: header, entry table, caption and status line, with
/// the dialog and selection panel drawn on top when active.
#[derive(Debug)]
pub struct ListPage {
    title: String,
    row: usize,
    dialog: EntryDialog,
}

impl ListPage {
    /// Creates the page with the given heading
    pub fn new(title: impl ToString) -> Self {
        Self {
            title: title.to_string(),
            row: 0,
            dialog: EntryDialog::new(),
        }
    }

    /// The highlighted row, kept inside the table.
    fn row(&self, state: &TaskListState) -> Option<usize> {
        let len = state.entries.len();
        (len > 0).then(|| self.row.min(len - 1))
    }

    fn layout(area: Rect) -> [Rect; 4] {
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .horizontal_margin(1)
        .areas(area)
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        Line::from(self.title.as_str()).bold().render(area, buf);
        Line::from(ADD_HINT).blue().bold().right_aligned().render(area, buf);
    }

    fn render_status(notice: Option<&Notice>, area: Rect, buf: &mut Buffer) {
        if let Some(notice) = notice {
            let style = match notice {
                Notice::Added(_) => Style::new().green(),
                Notice::Blocked(_) => Style::new().red(),
            };
            Line::styled(notice.to_string(), style).render(area, buf);
        }
        instructions().right_aligned().render(area, buf);
    }

    fn select_row(&self, state: &TaskListState, key: char) -> Option<Message> {
        let entry = state.entries.get(self.row(state)?)?;
        let id = entry.id;
        let action = match key {
            'v' => TaskListAction::ViewEntry { id },
            'e' => TaskListAction::EditEntry { id },
            'd' => TaskListAction::DeleteEntry { id },
            _ => return None,
        };
        Some(Message::Dispatch(action))
    }
}

impl Component for ListPage {
    fn render(&self, state: &TaskListState, area: Rect, buf: &mut Buffer) {
        let [header, body, caption, status] = Self::layout(area);

        self.render_header(header, buf);
        table::render(&state.entries, self.row(state), body, buf);
        Line::from(CAPTION).dark_gray().centered().render(caption, buf);
        Self::render_status(state.notice.as_ref(), status, buf);

        panel::render(&state.selection, body, buf);
        if state.form.is_open() {
            self.dialog.render(state, area, buf);
        }
    }

    fn cursor_position(&self, state: &TaskListState, area: Rect) -> Option<(u16, u16)> {
        if state.form.is_open() {
            self.dialog.cursor_position(state, area)
        } else {
            None
        }
    }

    fn on_key(&mut self, state: &TaskListState, key: KeyEvent) -> Option<Message> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Message::Exit);
        }

        if state.form.is_open() {
            return self.dialog.on_key(state, key);
        }

        match key.code {
            KeyCode::Char('q') => Some(Message::Exit),
            KeyCode::Up | KeyCode::Char('k') => {
                self.row = self.row(state).unwrap_or(0).saturating_sub(1);
                Some(Message::Handled)
            },
            KeyCode::Down | KeyCode::Char('j') => {
                self.row = self
                    .row(state)
                    .map_or(0, |row| (row + 1).min(state.entries.len() - 1));
                Some(Message::Handled)
            },
            KeyCode::Char('a') => {
                self.dialog.reset();
                Some(Message::Dispatch(TaskListAction::Form(FormAction::Open)))
            },
            KeyCode::Char(c @ ('v' | 'e' | 'd')) => self.select_row(state, c),
            KeyCode::Esc if state.selection.is_active() => {
                Some(Message::Dispatch(TaskListAction::DismissSelection))
            },
            _ => None,
        }
    }
}

fn instructions() -> Line<'static> {
    Line::from(vec![
        " Move ".into(),
        "<↑↓>".blue().bold(),
        " Select ".into(),
        "<v/e/d>".blue().bold(),
        " Quit ".into(),
        "<q> ".blue().bold(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_picker::DatePickerAction;
    use crate::environment::TaskListEnvironment;
    use crate::reducer::TaskListReducer;
    use crate::tui::util::testing::{buffer_lines, row_of};
    use crate::types::{demo_entries, EntryId, EntryList};
    use std::sync::Arc;
    use tasklist_core::reducer::Reducer;
    use tasklist_testing::test_clock;

    /// Feeds keys through the page and applies whatever it dispatches.
    struct Harness {
        page: ListPage,
        state: TaskListState,
        reducer: TaskListReducer,
        env: TaskListEnvironment,
    }

    impl Harness {
        fn new(state: TaskListState) -> Self {
            Self {
                page: ListPage::new("Vashee's todo list"),
                state,
                reducer: TaskListReducer::new(),
                env: TaskListEnvironment::new(Arc::new(test_clock())),
            }
        }

        fn press(&mut self, code: KeyCode) -> Option<Message> {
            self.press_with(code, KeyModifiers::NONE)
        }

        fn press_with(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<Message> {
            let message = self.page.on_key(&self.state, KeyEvent::new(code, modifiers));
            if let Some(Message::Dispatch(action)) = &message {
                self.reducer
                    .reduce(&mut self.state, action.clone(), &self.env);
            }
            message
        }

        fn type_text(&mut self, text: &str) {
            for c in text.chars() {
                self.press(KeyCode::Char(c));
            }
        }

        fn draw(&self) -> Vec<String> {
            let area = Rect::new(0, 0, 110, 30);
            let mut buf = Buffer::empty(area);
            self.page.render(&self.state, area, &mut buf);
            buffer_lines(&buf)
        }
    }

    fn seeded() -> TaskListState {
        TaskListState::with_entries(EntryList::with_entries(demo_entries()))
    }

    #[test]
    fn renders_header_caption_and_rows() {
        let lines = Harness::new(seeded()).draw();

        let header = row_of(&lines, "Vashee's todo list").unwrap();
        assert!(lines[header].contains(ADD_HINT));
        assert!(row_of(&lines, CAPTION).is_some());
        assert_eq!(
            lines.iter().filter(|l| l.contains("Buy groceries")).count(),
            2
        );
    }

    #[test]
    fn add_entry_through_the_dialog() {
        let mut ui = Harness::new(TaskListState::new());

        ui.press(KeyCode::Char('a'));
        assert!(ui.state.form.is_open());
        assert_eq!(ui.state.form.draft.date, "2/1/2024");

        ui.press(KeyCode::Tab);
        ui.type_text("Pay rent");
        ui.press(KeyCode::Tab);
        ui.press(KeyCode::Enter);
        assert!(ui.state.form.picker.open);
        ui.press(KeyCode::Down);
        ui.press(KeyCode::Right);
        ui.press(KeyCode::Right);
        ui.press(KeyCode::Enter);
        assert_eq!(ui.state.form.draft.deadline, "February 10th, 2024");

        ui.press(KeyCode::Tab);
        ui.press(KeyCode::Right);
        ui.press_with(KeyCode::Char('s'), KeyModifiers::CONTROL);

        assert!(!ui.state.form.is_open());
        let entry = ui.state.entries.last().unwrap();
        assert_eq!(entry.id, EntryId::new(1));
        assert_eq!(entry.item, "Pay rent");
        assert_eq!(entry.priority, crate::types::Priority::Medium);

        let lines = ui.draw();
        assert!(row_of(&lines, "Added entry #1").is_some());
        assert!(lines[row_of(&lines, "Pay rent").unwrap()].contains("February 10th, 2024"));
    }

    #[test]
    fn blocked_submission_keeps_dialog_open() {
        let mut ui = Harness::new(TaskListState::new());

        ui.press(KeyCode::Char('a'));
        ui.press_with(KeyCode::Char('s'), KeyModifiers::CONTROL);

        assert!(ui.state.form.is_open());
        assert!(ui.state.entries.is_empty());
        assert!(row_of(&ui.draw(), "Required: Item").is_some());
    }

    #[test]
    fn row_actions_select_highlighted_entry() {
        let mut ui = Harness::new(seeded());

        ui.press(KeyCode::Char('j'));
        ui.press(KeyCode::Char('j'));
        ui.press(KeyCode::Char('v'));

        assert!(ui.state.selection.viewing);
        assert_eq!(
            ui.state.selection.entry.as_ref().map(|e| e.id),
            Some(EntryId::new(2))
        );
        assert!(row_of(&ui.draw(), "View entry").is_some());

        ui.press(KeyCode::Esc);
        assert!(!ui.state.selection.is_active());
    }

    #[test]
    fn row_actions_on_empty_table_do_nothing() {
        let mut ui = Harness::new(TaskListState::new());
        assert_eq!(ui.press(KeyCode::Char('d')), None);
        assert_eq!(ui.press(KeyCode::Down), Some(Message::Handled));
        assert!(!ui.state.selection.deleting);
    }

    #[test]
    fn dismissed_dialog_reopens_with_draft() {
        let mut ui = Harness::new(TaskListState::new());

        ui.press(KeyCode::Char('a'));
        ui.press(KeyCode::Tab);
        ui.type_text("Half typed");
        ui.press(KeyCode::Esc);
        assert!(!ui.state.form.is_open());

        ui.press(KeyCode::Char('a'));
        assert_eq!(ui.state.form.draft.item, "Half typed");
    }

    #[test]
    fn picker_escape_closes_only_the_popover() {
        let mut ui = Harness::new(TaskListState::new());
        ui.press(KeyCode::Char('a'));
        ui.press(KeyCode::Tab);
        ui.press(KeyCode::Tab);
        ui.press(KeyCode::Enter);

        ui.press(KeyCode::Esc);

        assert!(ui.state.form.is_open());
        assert!(!ui.state.form.picker.open);
        assert_eq!(
            ui.press(KeyCode::Enter),
            Some(Message::Dispatch(TaskListAction::Form(FormAction::Picker(
                DatePickerAction::Toggle
            ))))
        );
    }

    #[test]
    fn quit_keys() {
        let mut ui = Harness::new(TaskListState::new());
        assert_eq!(ui.press(KeyCode::Char('q')), Some(Message::Exit));
        assert_eq!(
            ui.press_with(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Message::Exit)
        );
    }
}
