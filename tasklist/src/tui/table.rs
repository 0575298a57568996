use ratatui::prelude::*;
use ratatui::symbols::border;
use ratatui::widgets::{Block, Cell, Row, Table, TableState};

use crate::types::{Entry, EntryList, Priority, Status};

pub const HEADERS: [&str; 6] = ["Date", "Item", "Deadline", "Priority", "Status", "Actions"];
pub const ROW_ACTIONS: &str = "[v]iew [e]dit [d]elete";

/// Renders the entries, highlighting `selected` when given.
pub fn render(entries: &EntryList, selected: Option<usize>, area: Rect, buf: &mut Buffer) {
    let header = Row::new(HEADERS).bold().bottom_margin(1);
    let rows = entries.iter().map(entry_row);
    let widths = [
        Constraint::Length(12),
        Constraint::Fill(1),
        Constraint::Length(20),
        Constraint::Length(8),
        Constraint::Length(11),
        Constraint::Length(22),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::bordered().border_set(border::ROUNDED))
        .row_highlight_style(Style::new().reversed())
        .highlight_symbol("› ");

    let mut table_state = TableState::default().with_selected(selected);
    StatefulWidget::render(table, area, buf, &mut table_state);
}

fn entry_row(entry: &Entry) -> Row<'_> {
    Row::new([
        Cell::from(entry.date.as_str()),
        Cell::from(entry.item.as_str()),
        Cell::from(entry.deadline.as_str()),
        Cell::from(entry.priority.as_str()).style(priority_style(entry.priority)),
        Cell::from(entry.status.as_str()).style(status_style(entry.status)),
        Cell::from(ROW_ACTIONS).dark_gray(),
    ])
}

pub fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::High => Style::new().red(),
        Priority::Medium => Style::new().yellow(),
        Priority::Low => Style::new().green(),
    }
}

pub fn status_style(status: Status) -> Style {
    match status {
        Status::Pending => Style::new(),
        Status::Completed => Style::new().green(),
        Status::InProgress => Style::new().cyan(),
        Status::Cancelled => Style::new().dark_gray().crossed_out(),
    }
}
