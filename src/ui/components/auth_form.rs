//! Login / register form renderer.

use crate::ui::helpers::{center_padding, display_width, position_cursor, render_centered_line};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{AuthFormView, FormFieldView};

/// Width of the input boxes, capped by the terminal width.
const FIELD_WIDTH: usize = 40;

/// Renders the form starting at `row`.
///
/// # Layout
///
/// ```text
///                 Login
///        [server error, if any]
///
///   Email
///   ┌──────────────────────────────────────┐
///   │ ana@example.com                      │
///   └──────────────────────────────────────┘
///   [field error, if any]
///   ...
///               [ Login ]
///      Need an account? Register
/// ```
///
/// # Returns
///
/// The next available row position
pub fn render_auth_form(row: usize, form: &AuthFormView, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;

    print!("{}", Theme::bold());
    render_centered_line(current_row, &form.title, &theme.colors.text, cols);
    current_row += 1;

    if let Some(error) = &form.error {
        render_centered_line(current_row, error, &theme.colors.error, cols);
    }
    current_row += 2;

    let width = FIELD_WIDTH.min(cols.saturating_sub(4));
    let left = cols.saturating_sub(width) / 2 + 1;

    for field in &form.fields {
        current_row = render_field(current_row, left, width, field, theme);
    }

    current_row += 1;
    let button = format!("[ {} ]", form.submit_label);
    position_cursor(current_row, center_padding(&button, cols) + 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.selection_fg));
    print!("{}", Theme::bg(&theme.colors.primary));
    print!("{button}");
    print!("{}", Theme::reset());
    current_row += 2;

    render_centered_line(current_row, &form.toggle_hint, &theme.colors.primary, cols);
    current_row + 1
}

fn render_field(row: usize, left: usize, width: usize, field: &FormFieldView, theme: &Theme) -> usize {
    let inner = width.saturating_sub(2);
    let border = if field.error.is_some() {
        &theme.colors.error
    } else if field.focused {
        &theme.colors.primary
    } else {
        &theme.colors.border
    };

    position_cursor(row, left);
    print!("{}", Theme::fg(&theme.colors.text_secondary));
    print!("{}", field.label);
    print!("{}", Theme::reset());

    position_cursor(row + 1, left);
    print!("{}", Theme::fg(border));
    print!("┌{}┐", "─".repeat(inner));

    let value: String = field.value.chars().take(inner.saturating_sub(3)).collect();
    let cursor = if field.focused { "▏" } else { "" };
    position_cursor(row + 2, left);
    print!("│ ");
    print!("{}", Theme::fg(&theme.colors.text));
    print!("{value}");
    print!("{}", Theme::fg(&theme.colors.primary));
    print!("{cursor}");
    print!("{}", " ".repeat(inner.saturating_sub(1 + display_width(&value) + display_width(cursor))));
    print!("{}", Theme::fg(border));
    print!("│");

    position_cursor(row + 3, left);
    print!("└{}┘", "─".repeat(inner));
    print!("{}", Theme::reset());

    if let Some(error) = &field.error {
        position_cursor(row + 4, left);
        print!("{}", Theme::fg(&theme.colors.error));
        print!("{error}");
        print!("{}", Theme::reset());
        return row + 5;
    }
    row + 4
}
