//! Search bar component renderer.
//!
//! This module renders the search input box with a bordered frame, a search
//! glyph, and either the typed text or a placeholder.

use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

/// Renders the search input box at the specified row.
///
/// Displays a 3-line bordered box. The border uses the primary colour while
/// the bar has focus and the border colour otherwise. An empty query shows
/// the placeholder in the placeholder colour; a focused bar shows a cursor.
///
/// # Returns
///
/// The next available row position (row + 3, since search box uses 3 lines)
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────────────┐
/// [margin] │ ⌕ Find your restaurant   │
/// [margin] └──────────────────────────┘
/// ```
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border_color = if search.focused { &theme.colors.primary } else { &theme.colors.border };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let (text, text_color) = if search.query.is_empty() {
        (search.placeholder.as_str(), &theme.colors.placeholder)
    } else {
        (search.query.as_str(), &theme.colors.text)
    };
    let cursor = if search.focused { "▏" } else { "" };
    let prefix = " ⌕ ";
    let max_text = inner_width.saturating_sub(display_width(prefix) + 2);
    let text: String = text.chars().take(max_text).collect();
    let used = display_width(prefix) + display_width(&text) + display_width(cursor);
    let padding = inner_width.saturating_sub(used);

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.icon));
    print!("{prefix}");
    if search.focused && search.query.is_empty() {
        print!("{}", Theme::fg(&theme.colors.primary));
        print!("{cursor}");
        print!("{}", Theme::fg(text_color));
        print!("{text}");
    } else {
        print!("{}", Theme::fg(text_color));
        print!("{text}");
        print!("{}", Theme::fg(&theme.colors.primary));
        print!("{cursor}");
    }
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
