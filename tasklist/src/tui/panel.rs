use ratatui::prelude::*;
use ratatui::symbols::border;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::selection::Selection;
use crate::tui::table::{priority_style, status_style};

pub const WIDTH: u16 = 44;
pub const HEIGHT: u16 = 9;
pub const EMPTY: &str = "No entry selected";

/// Renders the selected entry read-only, anchored to the bottom right of `area`.
pub fn render(selection: &Selection, area: Rect, buf: &mut Buffer) {
    let Some(mode) = selection.mode else {
        return;
    };

    let width = WIDTH.min(area.width);
    let height = HEIGHT.min(area.height);
    let panel = Rect::new(
        area.right().saturating_sub(width),
        area.bottom().saturating_sub(height),
        width,
        height,
    );

    let block = Block::bordered()
        .border_set(border::ROUNDED)
        .title(Line::from(format!(" {} ", mode.title()).bold()))
        .title_bottom(Line::from(vec![" Close ".into(), "<Esc> ".blue().bold()]).right_aligned())
        .yellow();

    let lines = selection.entry.as_ref().map_or_else(
        || vec![Line::from(EMPTY).dark_gray()],
        |entry| {
            vec![
                field("Id", Span::raw(format!("#{}", entry.id))),
                field("Date", Span::raw(entry.date.clone())),
                field("Item", Span::raw(entry.item.clone())),
                field("Deadline", Span::raw(entry.deadline.clone())),
                field(
                    "Priority",
                    Span::styled(entry.priority.as_str(), priority_style(entry.priority)),
                ),
                field(
                    "Status",
                    Span::styled(entry.status.as_str(), status_style(entry.status)),
                ),
            ]
        },
    );

    Clear.render(panel, buf);
    let inner = block.inner(panel);
    block.render(panel, buf);
    Paragraph::new(lines).reset().render(inner, buf);
}

fn field(label: &'static str, value: Span<'static>) -> Line<'static> {
    Line::from(vec![Span::raw(format!("{label:<10}")).bold(), value])
}
