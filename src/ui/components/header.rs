//! Header component renderer.
//!
//! This module renders the title bar with a centered title and an optional
//! right-aligned greeting.

use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header title bar at the specified row.
///
/// Displays the title centered horizontally with bold styling in the primary
/// colour. When a subtitle is present it is printed right-aligned as
/// `Hi, {subtitle}` and the title keeps its centered position as long as the
/// two do not overlap.
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Layout
///
/// ```text
/// [left padding] TITLE [padding] Hi, ana [1 space]
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = display_width(&header.title);
    let padding = (cols.saturating_sub(title_len)) / 2;

    let greeting = if header.subtitle.is_empty() {
        String::new()
    } else {
        format!("Hi, {} ", header.subtitle)
    };
    let greeting_len = display_width(&greeting);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.primary));
    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!("{}", Theme::reset());

    let used = padding + title_len;
    if used + greeting_len <= cols {
        print!("{}", " ".repeat(cols - used - greeting_len));
        print!("{}", Theme::fg(&theme.colors.text_secondary));
        print!("{greeting}");
        print!("{}", Theme::reset());
    }

    row + 1
}
