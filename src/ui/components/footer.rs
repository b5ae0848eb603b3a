//! Footer component renderer.
//!
//! This module renders the footer help bar with centered keybinding hints and
//! the status line that sits above it.

use crate::ui::helpers::{display_width, position_cursor, render_centered_line};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer help bar at the specified row.
///
/// Displays keybinding hints centered horizontally with dimmed styling. Pads
/// the line to fill the entire terminal width. Help text wider than the
/// terminal is truncated.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text: String = footer.keybindings.chars().take(cols).collect();

    let text_len = display_width(&help_text);
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_tertiary));
    print!("{}", " ".repeat(padding));
    print!("{help_text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the list status line: activity indicator on the left, position on the right.
pub fn render_status_line(row: usize, activity: Option<&str>, position: Option<&str>, theme: &Theme, cols: usize) -> usize {
    let Some(activity) = activity else {
        let position = position.unwrap_or_default();
        position_cursor(row, 1);
        print!("{}", " ".repeat(cols.saturating_sub(display_width(position) + 1)));
        print!("{}", Theme::fg(&theme.colors.text_tertiary));
        print!("{position} ");
        print!("{}", Theme::reset());
        return row + 1;
    };

    render_centered_line(row, activity, &theme.colors.primary, cols);
    row + 1
}
