use std::ops::Range;

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Number of grapheme clusters in `s`.
pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Display width of the first `first_n_graphemes` grapheme clusters of `s`.
pub fn unicode_width_of_slice(s: &str, first_n_graphemes: usize) -> usize {
    s[..byte_index_of_grapheme(s, first_n_graphemes)].width()
}

/// Byte offset where the grapheme cluster at `g_idx` starts, or the end of `s`.
pub fn byte_index_of_grapheme(s: &str, g_idx: usize) -> usize {
    s.grapheme_indices(true).nth(g_idx).map_or(s.len(), |(i, _)| i)
}

/// Byte range of the grapheme cluster at `g_idx`, or `None` past the end.
pub fn byte_range_of_grapheme_at(s: &str, g_idx: usize) -> Option<Range<usize>> {
    s.grapheme_indices(true)
        .nth(g_idx)
        .map(|(start, g)| start..start + g.len())
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}
