//! Shared rendering utilities and helpers.
//!
//! Low-level rendering utilities used across multiple UI components: cursor
//! positioning, centered and padded lines, and fuzzy match highlighting with
//! proper ANSI escape sequence management. All widths are measured in
//! characters, not bytes.

use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H` to move the cursor.
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Character count of `text`.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Left padding that centers `text` in `cols`.
#[must_use]
pub fn center_padding(text: &str, cols: usize) -> usize {
    cols.saturating_sub(display_width(text)) / 2
}

/// Prints `text` centered on `row` in the given foreground colour, filling the line.
pub fn render_centered_line(row: usize, text: &str, color: &str, cols: usize) {
    let text_len = display_width(text).min(cols);
    let padding = center_padding(text, cols);

    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
}

/// Clears a row.
pub fn render_blank_line(row: usize, cols: usize) {
    position_cursor(row, 1);
    print!("{}", " ".repeat(cols));
}

/// Renders text with highlighted character ranges for fuzzy matches.
///
/// Splits the text into highlighted and normal sections based on the provided
/// character ranges. Ranges are `(start, end)` with exclusive end.
///
/// When `is_selected` is `true`, match highlighting is disabled to avoid
/// conflicting with the selected card's background. After each highlighted
/// run the card's normal text and background colours are restored.
///
/// # Example
///
/// ```rust
/// use dinedeck::ui::helpers::render_highlighted_text;
/// use dinedeck::ui::Theme;
///
/// let theme = Theme::default();
/// render_highlighted_text("Bistro Nove", &[(0, 3)], &theme, false);
/// ```
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        // Ranges arrive sorted; clamp so malformed input cannot slice out of bounds.
        let start = start.clamp(current_pos, chars.len());
        let end = end.clamp(start, chars.len());
        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text));
        print!("{}", Theme::bg(&theme.colors.card_background));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_count_characters() {
        assert_eq!(display_width("Café"), 4);
        assert_eq!(center_padding("abcd", 10), 3);
        assert_eq!(center_padding("too long for this", 4), 0);
    }
}
