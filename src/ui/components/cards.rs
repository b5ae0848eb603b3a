//! Restaurant card list renderer.
//!
//! Each card occupies three lines plus a spacer:
//!
//! ```text
//! ▌ Bistro Nove                                   $$
//!   Ilica 1
//!   ★ 4.3 (120)
//! ```
//!
//! The selected card gets the selection colours across its full width. Fuzzy
//! matches of the committed search term are highlighted in the name.

use crate::ui::helpers::{self, display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CardItem;

/// Left and right margin around each card.
const CARD_MARGIN: usize = 2;

/// Rows per card, spacer included.
pub const CARD_ROWS: usize = 4;

/// Renders cards from `row` without drawing past `max_row`.
///
/// # Returns
///
/// The next available row position
pub fn render_cards(row: usize, cards: &[CardItem], theme: &Theme, cols: usize, max_row: usize) -> usize {
    let mut current_row = row;
    for card in cards {
        if current_row + CARD_ROWS - 1 > max_row {
            break;
        }
        current_row = render_card(current_row, card, theme, cols);
    }
    current_row
}

fn begin_line(row: usize, card: &CardItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", " ".repeat(CARD_MARGIN));
    if card.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::bg(&theme.colors.card_background));
    }
    cols.saturating_sub(CARD_MARGIN * 2)
}

fn end_line(width: usize, used: usize) {
    print!("{}", " ".repeat(width.saturating_sub(used)));
    print!("{}", Theme::reset());
}

/// Foreground for secondary text; selection colours take precedence.
fn secondary<'a>(card: &CardItem, color: &'a str, theme: &'a Theme) -> &'a str {
    if card.is_selected {
        &theme.colors.selection_fg
    } else {
        color
    }
}

fn render_card(row: usize, card: &CardItem, theme: &Theme, cols: usize) -> usize {
    // Name and price.
    let width = begin_line(row, card, theme, cols);
    let marker = if card.is_selected { "▌ " } else { "  " };
    print!("{}", Theme::fg(secondary(card, &theme.colors.primary, theme)));
    print!("{marker}");
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(secondary(card, &theme.colors.text, theme)));
    helpers::render_highlighted_text(&card.name, &card.highlight_ranges, theme, card.is_selected);
    let name_len = display_width(marker) + display_width(&card.name);
    let price_len = display_width(&card.price);
    let gap = width.saturating_sub(name_len + price_len + 1);
    print!("{}", " ".repeat(gap));
    print!("{}", Theme::fg(secondary(card, &theme.colors.success, theme)));
    print!("{}", card.price);
    end_line(width, name_len + gap + price_len);

    // Address.
    let width = begin_line(row + 1, card, theme, cols);
    print!("{}", Theme::fg(secondary(card, &theme.colors.text_secondary, theme)));
    print!("  {}", card.address);
    end_line(width, 2 + display_width(&card.address));

    // Rating or closed overlay.
    let width = begin_line(row + 2, card, theme, cols);
    let used = if let Some(notice) = &card.closed_notice {
        print!("{}", Theme::fg(secondary(card, &theme.colors.error, theme)));
        print!("  ● {notice}");
        4 + display_width(notice)
    } else if let Some(rating) = &card.rating {
        print!("{}", Theme::fg(secondary(card, &theme.colors.warning, theme)));
        print!("  ★ ");
        print!("{}", Theme::fg(secondary(card, &theme.colors.text_secondary, theme)));
        print!("{rating}");
        4 + display_width(rating)
    } else {
        print!("{}", Theme::fg(secondary(card, &theme.colors.text_tertiary, theme)));
        print!("  No ratings yet");
        17
    };
    end_line(width, used);

    helpers::render_blank_line(row + 3, cols);
    row + CARD_ROWS
}
