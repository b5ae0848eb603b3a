//! Empty state component renderer.

use crate::ui::helpers::render_centered_line;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the empty state message starting at `row`.
///
/// Displays a centered two-line message when the list has no restaurants:
/// the message in the secondary text colour and the hint below it in the
/// tertiary colour.
///
/// # Returns
///
/// The next available row position (row + 2)
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    render_centered_line(row, &empty.message, &theme.colors.text_secondary, cols);
    print!("{}", Theme::dim());
    render_centered_line(row + 1, &empty.subtitle, &theme.colors.text_tertiary, cols);
    row + 2
}
