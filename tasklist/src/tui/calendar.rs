use chrono::{Datelike, NaiveDate};
use ratatui::prelude::*;
use ratatui::symbols::border;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::date_picker::DatePickerState;

/// Outer width of the popover: seven 2-column days, six gaps, two borders.
pub const WIDTH: u16 = 7 * 2 + 6 + 2;
/// Outer height: borders, weekday row, and up to six weeks.
pub const HEIGHT: u16 = 2 + 1 + 6;

const WEEKDAYS: &str = "Su Mo Tu We Th Fr Sa";

/// Renders the month around the picker's cursor.
pub fn render(picker: &DatePickerState, area: Rect, buf: &mut Buffer) {
    let title = Line::from(format!(" {} ", picker.cursor.format("%B %Y")).bold());
    let block = Block::bordered()
        .border_set(border::ROUNDED)
        .title(title.centered())
        .blue();

    Clear.render(area, buf);
    let inner = block.inner(area);
    block.render(area, buf);
    Paragraph::new(month_lines(picker)).render(inner, buf);
}

fn month_lines(picker: &DatePickerState) -> Vec<Line<'static>> {
    let cursor = picker.cursor;
    let first = cursor.with_day(1).unwrap_or(cursor);
    let lead = first.weekday().num_days_from_sunday() as usize;

    let mut lines = vec![Line::from(WEEKDAYS).dark_gray()];
    let mut week: Vec<Span<'static>> = vec![Span::raw("   "); lead];

    for day in first.iter_days().take_while(|d| d.month() == first.month()) {
        week.push(day_span(day, picker));
        if day.weekday().num_days_from_sunday() == 6 {
            lines.push(Line::from(std::mem::take(&mut week)));
        } else {
            week.push(Span::raw(" "));
        }
    }
    if !week.is_empty() {
        lines.push(Line::from(week));
    }
    lines
}

fn day_span(day: NaiveDate, picker: &DatePickerState) -> Span<'static> {
    let mut style = Style::new().white();
    if picker.selected == Some(day) {
        style = style.bold().underlined();
    }
    if picker.cursor == day {
        style = style.reversed();
    }
    Span::styled(format!("{:>2}", day.day()), style)
}
