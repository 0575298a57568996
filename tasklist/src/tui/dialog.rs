use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::symbols::border;
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use crate::date_picker::DatePickerAction;
use crate::form::{FormAction, FormState, RequiredField};
use crate::reducer::{TaskListAction, TaskListState};
use crate::tui::calendar;
use crate::tui::component::{Component, Message};
use crate::tui::table::{priority_style, status_style};
use crate::tui::util::{
    byte_index_of_grapheme, byte_range_of_grapheme_at, centered, grapheme_count,
    unicode_width_of_slice,
};

pub const TITLE: &str = "Add New Todo";
pub const DESCRIPTION: &str = "Fill in the details below to add a new item to the list.";
pub const SUBMIT_LABEL: &str = "Add Entry";

const WIDTH: u16 = 64;
const HEIGHT: u16 = 15;
const LABEL_WIDTH: u16 = 10;
const FIELD_ROW: [u16; 5] = [2, 4, 6, 8, 10];
const SUBMIT_ROW: u16 = 12;

const S_STEP_ACTIVE: &str = "◆";
const S_STEP_INACTIVE: &str = "◇";

/// A focusable control in the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    Item,
    Deadline,
    Priority,
    Status,
    Submit,
}

impl Field {
    const ALL: [Self; 6] = [
        Self::Date,
        Self::Item,
        Self::Deadline,
        Self::Priority,
        Self::Status,
        Self::Submit,
    ];

    const fn label(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Item => "Item",
            Self::Deadline => "Deadline",
            Self::Priority => "Priority",
            Self::Status => "Status",
            Self::Submit => SUBMIT_LABEL,
        }
    }

    const fn required(self) -> Option<RequiredField> {
        match self {
            Self::Date => Some(RequiredField::Date),
            Self::Item => Some(RequiredField::Item),
            _ => None,
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn offset(self, by: isize) -> Self {
        let len = Self::ALL.len();
        let step = by.unsigned_abs() % len;
        let index = if by >= 0 {
            self.index() + step
        } else {
            self.index() + len - step
        };
        Self::ALL[index % len]
    }
}

/// The "Add New Todo" dialog, including its deadline popover
///
/// Focus and the text cursor are view-local; everything else is read from
/// the form state.
#[derive(Debug)]
pub struct EntryDialog {
    focus: Field,
    /// Grapheme index in the focused text field; `None` means the end.
    cursor: Option<usize>,
}

impl EntryDialog {
    pub const fn new() -> Self {
        Self {
            focus: Field::Date,
            cursor: None,
        }
    }

    pub const fn focus(&self) -> Field {
        self.focus
    }

    /// Puts focus back on the first field.
    pub const fn reset(&mut self) {
        self.focus = Field::Date;
        self.cursor = None;
    }

    fn area(area: Rect) -> Rect {
        centered(area, WIDTH, HEIGHT)
    }

    fn block() -> Block<'static> {
        Block::bordered()
            .border_set(border::ROUNDED)
            .title(Line::from(format!(" {TITLE} ").bold()).centered())
            .title_bottom(instructions().centered())
    }

    fn row_area(inner: Rect, row: u16) -> Rect {
        Rect::new(inner.x, inner.y + row, inner.width, 1).intersection(inner)
    }

    fn value_x(inner: Rect) -> u16 {
        inner.x + 2 + LABEL_WIDTH
    }

    fn navigate(&mut self, by: isize) -> Option<Message> {
        self.focus = self.focus.offset(by);
        self.cursor = None;
        Some(Message::Handled)
    }

    fn text<'a>(&self, form: &'a FormState) -> Option<&'a str> {
        match self.focus {
            Field::Date => Some(&form.draft.date),
            Field::Item => Some(&form.draft.item),
            _ => None,
        }
    }

    fn set_text(&self, text: String) -> Option<Message> {
        let action = match self.focus {
            Field::Date => FormAction::SetDate(text),
            Field::Item => FormAction::SetItem(text),
            _ => return None,
        };
        Some(Message::Dispatch(TaskListAction::Form(action)))
    }

    fn grapheme_index(&self, text: &str) -> usize {
        let len = grapheme_count(text);
        self.cursor.map_or(len, |c| c.min(len))
    }

    fn on_text_key(&mut self, text: &str, key: KeyEvent) -> Option<Message> {
        let index = self.grapheme_index(text);
        match key.code {
            KeyCode::Left => {
                self.cursor = Some(index.saturating_sub(1));
                Some(Message::Handled)
            },
            KeyCode::Right => {
                self.cursor = Some(index + 1);
                Some(Message::Handled)
            },
            KeyCode::Home => {
                self.cursor = Some(0);
                Some(Message::Handled)
            },
            KeyCode::End => {
                self.cursor = None;
                Some(Message::Handled)
            },
            KeyCode::Backspace if index > 0 => {
                let mut v = text.to_string();
                let range = byte_range_of_grapheme_at(&v, index - 1)?;
                v.replace_range(range, "");
                self.cursor = Some(index - 1);
                self.set_text(v)
            },
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut v = text.to_string();
                let at = byte_index_of_grapheme(&v, index);
                v.insert(at, c);
                // A combining mark joins the cluster before it
                self.cursor = Some(grapheme_count(&v[..at + c.len_utf8()]));
                self.set_text(v)
            },
            _ => None,
        }
    }

    fn on_picker_key(key: KeyEvent) -> Option<Message> {
        let action = match key.code {
            KeyCode::Left => DatePickerAction::MoveDays(-1),
            KeyCode::Right => DatePickerAction::MoveDays(1),
            KeyCode::Up => DatePickerAction::MoveDays(-7),
            KeyCode::Down => DatePickerAction::MoveDays(7),
            KeyCode::PageUp => DatePickerAction::MoveMonths(-1),
            KeyCode::PageDown => DatePickerAction::MoveMonths(1),
            KeyCode::Enter | KeyCode::Char(' ') => DatePickerAction::SelectCursor,
            KeyCode::Backspace | KeyCode::Delete => DatePickerAction::Select(None),
            KeyCode::Esc => DatePickerAction::Close,
            _ => return Some(Message::Handled),
        };
        Some(Message::Dispatch(TaskListAction::Form(FormAction::Picker(action))))
    }

    fn render_field(&self, field: Field, form: &FormState, area: Rect, buf: &mut Buffer) {
        let focused = self.focus == field;
        let missing = field.required().is_some_and(|f| form.missing.contains(&f));
        let color = match (focused, missing) {
            (_, true) => Color::Red,
            (true, false) => Color::Blue,
            (false, false) => Color::Gray,
        };

        let marker = if focused { S_STEP_ACTIVE } else { S_STEP_INACTIVE };
        Line::from(vec![
            Span::styled(marker, Style::new().fg(color)),
            Span::raw(" "),
            Span::styled(
                format!("{:<width$}", field.label(), width = usize::from(LABEL_WIDTH)),
                Style::new().fg(color).bold(),
            ),
            value_span(field, form, focused),
        ])
        .render(area, buf);
    }

    fn render_submit(&self, area: Rect, buf: &mut Buffer) {
        let style = if self.focus == Field::Submit {
            Style::new().reversed().bold()
        } else {
            Style::new().bold()
        };
        Line::styled(format!("[ {SUBMIT_LABEL} ]"), style)
            .right_aligned()
            .render(area, buf);
    }
}

fn value_span(field: Field, form: &FormState, focused: bool) -> Span<'static> {
    let select = |text: &str, style: Style| {
        if focused {
            Span::styled(format!("‹ {text} ›"), style.bold())
        } else {
            Span::styled(format!("  {text}"), style)
        }
    };

    match field {
        Field::Date => Span::raw(form.draft.date.clone()),
        Field::Item => Span::raw(form.draft.item.clone()),
        Field::Deadline => {
            let style = if form.picker.selected.is_some() {
                Style::new()
            } else {
                Style::new().dark_gray()
            };
            Span::styled(format!("▦ {}", form.picker.label()), style)
        },
        Field::Priority => select(form.draft.priority.as_str(), priority_style(form.draft.priority)),
        Field::Status => select(form.draft.status.as_str(), status_style(form.draft.status)),
        Field::Submit => Span::raw(""),
    }
}

impl Default for EntryDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for EntryDialog {
    fn render(&self, state: &TaskListState, area: Rect, buf: &mut Buffer) {
        let form = &state.form;
        let dialog = Self::area(area);
        let block = Self::block();
        let inner = block.inner(dialog);

        Clear.render(dialog, buf);
        block.render(dialog, buf);

        Paragraph::new(DESCRIPTION)
            .dark_gray()
            .wrap(Wrap { trim: true })
            .render(Self::row_area(inner, 0), buf);

        for (field, row) in Field::ALL.iter().zip(FIELD_ROW) {
            self.render_field(*field, form, Self::row_area(inner, row), buf);
        }
        self.render_submit(Self::row_area(inner, SUBMIT_ROW), buf);

        if form.picker.open {
            let anchor = Self::row_area(inner, FIELD_ROW[Field::Deadline.index()]);
            let popover = Rect::new(
                Self::value_x(inner),
                anchor.y + 1,
                calendar::WIDTH,
                calendar::HEIGHT,
            )
            .intersection(area);
            calendar::render(&form.picker, popover, buf);
        }
    }

    fn cursor_position(&self, state: &TaskListState, area: Rect) -> Option<(u16, u16)> {
        if state.form.picker.open {
            return None;
        }
        let text = self.text(&state.form)?;
        let inner = Self::block().inner(Self::area(area));
        let row = FIELD_ROW.get(self.focus.index())?;
        let width = unicode_width_of_slice(text, self.grapheme_index(text));
        let x = Self::value_x(inner) + u16::try_from(width).unwrap_or(u16::MAX);
        Some((x.min(inner.right().saturating_sub(1)), inner.y + row))
    }

    fn on_key(&mut self, state: &TaskListState, key: KeyEvent) -> Option<Message> {
        let form = &state.form;
        if form.picker.open {
            return Self::on_picker_key(key);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            return Some(Message::Dispatch(TaskListAction::SubmitForm));
        }

        match key.code {
            KeyCode::Esc => return Some(Message::Dispatch(TaskListAction::Form(FormAction::Dismiss))),
            KeyCode::Tab | KeyCode::Down => return self.navigate(1),
            KeyCode::BackTab | KeyCode::Up => return self.navigate(-1),
            _ => {},
        }

        if let Some(text) = self.text(form) {
            return match key.code {
                KeyCode::Enter => self.navigate(1),
                _ => self.on_text_key(text, key),
            };
        }

        let action = match (self.focus, key.code) {
            (Field::Deadline, KeyCode::Enter | KeyCode::Char(' ')) => {
                TaskListAction::Form(FormAction::Picker(DatePickerAction::Toggle))
            },
            (Field::Priority, KeyCode::Right) => TaskListAction::Form(FormAction::NextPriority),
            (Field::Priority, KeyCode::Left) => TaskListAction::Form(FormAction::PreviousPriority),
            (Field::Status, KeyCode::Right) => TaskListAction::Form(FormAction::NextStatus),
            (Field::Status, KeyCode::Left) => TaskListAction::Form(FormAction::PreviousStatus),
            (Field::Submit, KeyCode::Enter | KeyCode::Char(' ')) => TaskListAction::SubmitForm,
            _ => return None,
        };
        Some(Message::Dispatch(action))
    }
}

fn instructions() -> Line<'static> {
    Line::from(vec![
        " Next ".into(),
        "<Tab>".blue().bold(),
        " Add ".into(),
        "<Ctrl-S>".blue().bold(),
        " Close ".into(),
        "<Esc> ".blue().bold(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::util::testing::{buffer_lines, row_of};
    use chrono::NaiveDate;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn open_state() -> TaskListState {
        let mut state = TaskListState::new();
        state.form.open = true;
        state.form.draft.date = "2/1/2024".to_string();
        state
    }

    fn dispatched(message: Option<Message>) -> TaskListAction {
        match message {
            Some(Message::Dispatch(action)) => action,
            other => unreachable!("expected a dispatch, got {other:?}"),
        }
    }

    #[test]
    fn renders_title_fields_and_button() {
        let state = open_state();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);

        EntryDialog::new().render(&state, area, &mut buf);
        let lines = buffer_lines(&buf);

        assert!(row_of(&lines, TITLE).is_some());
        assert!(row_of(&lines, DESCRIPTION).is_some());
        let date = row_of(&lines, "Date").unwrap();
        assert!(lines[date].contains("2/1/2024"));
        assert!(lines[row_of(&lines, "Deadline").unwrap()].contains("Pick a date"));
        assert!(lines[row_of(&lines, "Priority").unwrap()].contains("High"));
        assert!(lines[row_of(&lines, "Status").unwrap()].contains("Pending"));
        assert!(row_of(&lines, "[ Add Entry ]").is_some());
    }

    #[test]
    fn typing_inserts_at_cursor() {
        let mut state = open_state();
        let mut dialog = EntryDialog::new();
        dialog.on_key(&state, key(KeyCode::Tab));
        assert_eq!(dialog.focus(), Field::Item);

        state.form.draft.item = "ac".to_string();
        dialog.on_key(&state, key(KeyCode::Left));
        let action = dispatched(dialog.on_key(&state, key(KeyCode::Char('b'))));

        assert_eq!(action, TaskListAction::Form(FormAction::SetItem("abc".to_string())));
    }

    #[test]
    fn backspace_removes_previous_char() {
        let state = open_state();
        let mut dialog = EntryDialog::new();

        let action = dispatched(dialog.on_key(&state, key(KeyCode::Backspace)));

        assert_eq!(action, TaskListAction::Form(FormAction::SetDate("2/1/202".to_string())));
    }

    #[test]
    fn backspace_removes_whole_grapheme() {
        let mut state = open_state();
        state.form.draft.item = "cafe\u{301}".to_string();
        let mut dialog = EntryDialog::new();
        dialog.on_key(&state, key(KeyCode::Tab));

        let action = dispatched(dialog.on_key(&state, key(KeyCode::Backspace)));

        assert_eq!(action, TaskListAction::Form(FormAction::SetItem("caf".to_string())));
    }

    #[test]
    fn combining_mark_keeps_cursor_after_cluster() {
        let mut state = open_state();
        state.form.draft.item = "cafe".to_string();
        let mut dialog = EntryDialog::new();
        dialog.on_key(&state, key(KeyCode::Tab));

        let action = dispatched(dialog.on_key(&state, key(KeyCode::Char('\u{301}'))));
        assert_eq!(
            action,
            TaskListAction::Form(FormAction::SetItem("cafe\u{301}".to_string()))
        );

        state.form.draft.item = "cafe\u{301}".to_string();
        let action = dispatched(dialog.on_key(&state, key(KeyCode::Char('s'))));
        assert_eq!(
            action,
            TaskListAction::Form(FormAction::SetItem("cafe\u{301}s".to_string()))
        );
    }

    #[test]
    fn focus_wraps_around() {
        let state = open_state();
        let mut dialog = EntryDialog::new();

        dialog.on_key(&state, key(KeyCode::BackTab));
        assert_eq!(dialog.focus(), Field::Submit);
        dialog.on_key(&state, key(KeyCode::Tab));
        assert_eq!(dialog.focus(), Field::Date);
    }

    #[test]
    fn selects_cycle_with_arrows() {
        let state = open_state();
        let mut dialog = EntryDialog::new();
        for _ in 0..3 {
            dialog.on_key(&state, key(KeyCode::Tab));
        }
        assert_eq!(dialog.focus(), Field::Priority);

        assert_eq!(
            dispatched(dialog.on_key(&state, key(KeyCode::Right))),
            TaskListAction::Form(FormAction::NextPriority)
        );
        dialog.on_key(&state, key(KeyCode::Tab));
        assert_eq!(
            dispatched(dialog.on_key(&state, key(KeyCode::Left))),
            TaskListAction::Form(FormAction::PreviousStatus)
        );
    }

    #[test]
    fn enter_on_deadline_toggles_picker() {
        let state = open_state();
        let mut dialog = EntryDialog::new();
        dialog.on_key(&state, key(KeyCode::Tab));
        dialog.on_key(&state, key(KeyCode::Tab));

        assert_eq!(
            dispatched(dialog.on_key(&state, key(KeyCode::Enter))),
            TaskListAction::Form(FormAction::Picker(DatePickerAction::Toggle))
        );
    }

    #[test]
    fn submit_from_button_or_ctrl_s() {
        let state = open_state();
        let mut dialog = EntryDialog::new();

        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(dispatched(dialog.on_key(&state, ctrl_s)), TaskListAction::SubmitForm);

        dialog.on_key(&state, key(KeyCode::BackTab));
        assert_eq!(
            dispatched(dialog.on_key(&state, key(KeyCode::Enter))),
            TaskListAction::SubmitForm
        );
    }

    #[test]
    fn escape_dismisses() {
        let state = open_state();
        assert_eq!(
            dispatched(EntryDialog::new().on_key(&state, key(KeyCode::Esc))),
            TaskListAction::Form(FormAction::Dismiss)
        );
    }

    #[test]
    fn popover_keys() {
        let mut state = open_state();
        state.form.picker.open = true;
        state.form.picker.cursor = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let mut dialog = EntryDialog::new();

        let cases = [
            (KeyCode::Down, DatePickerAction::MoveDays(7)),
            (KeyCode::Left, DatePickerAction::MoveDays(-1)),
            (KeyCode::PageDown, DatePickerAction::MoveMonths(1)),
            (KeyCode::Enter, DatePickerAction::SelectCursor),
            (KeyCode::Backspace, DatePickerAction::Select(None)),
            (KeyCode::Esc, DatePickerAction::Close),
        ];
        for (code, expected) in cases {
            assert_eq!(
                dispatched(dialog.on_key(&state, key(code))),
                TaskListAction::Form(FormAction::Picker(expected))
            );
        }
        // Text fields do not receive keys while the popover is up
        assert_eq!(dialog.on_key(&state, key(KeyCode::Char('x'))), Some(Message::Handled));
    }

    #[test]
    fn popover_renders_below_deadline() {
        let mut state = open_state();
        state.form.picker.open = true;
        state.form.picker.cursor = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);

        EntryDialog::new().render(&state, area, &mut buf);
        let lines = buffer_lines(&buf);

        let deadline = row_of(&lines, "Deadline").unwrap();
        let month = row_of(&lines, "February 2024").unwrap();
        assert_eq!(month, deadline + 1);
    }

    #[test]
    fn cursor_follows_text() {
        let state = open_state();
        let area = Rect::new(0, 0, 80, 24);
        let dialog = EntryDialog::new();

        let (x, _) = dialog.cursor_position(&state, area).unwrap();
        let inner = EntryDialog::block().inner(EntryDialog::area(area));
        assert_eq!(x, EntryDialog::value_x(inner) + 8);
    }
}
