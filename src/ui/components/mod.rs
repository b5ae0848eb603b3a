//! Composable UI component renderers.
//!
//! Each component renders one part of the interface at a given row and
//! returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar with greeting
//! - [`footer`]: Keybinding hints and the list status line
//! - [`search`]: Search input box
//! - [`cards`]: Restaurant card list
//! - [`empty`]: Empty state message
//! - [`auth_form`]: Login / register form
//! - [`screens`]: Loading, profile and home screens
//!
//! # Layout
//!
//! Every screen shares the same frame:
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Body]
//! [Status line]     (Explore only)
//! [Border]
//! [Footer]
//! ```

mod auth_form;
mod cards;
mod empty;
mod footer;
mod header;
mod screens;
mod search;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, ExploreView, UIViewModel};

use auth_form::render_auth_form;
use cards::render_cards;
use empty::render_empty_state;
use footer::{render_footer, render_status_line};
use header::render_header;
use screens::{render_home, render_loading, render_profile};
use search::render_search_bar;

/// Renders a horizontal border line at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders a full frame for the view model.
pub fn render_frame(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let body_center = current_row + border_row.saturating_sub(current_row) / 3;

    match &vm.body {
        Body::Loading { message } => {
            render_loading(body_center, message, theme, cols);
        }
        Body::Explore(explore) => {
            render_explore(current_row, explore, theme, cols, border_row.saturating_sub(1));
        }
        Body::AuthForm(form) => {
            render_auth_form(current_row + 1, form, theme, cols);
        }
        Body::Profile(profile) => {
            render_profile(body_center, profile, theme, cols);
        }
        Body::Home(home) => {
            render_home(body_center, home, theme, cols);
        }
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}

/// Renders search bar, cards (or the empty state) and the status line.
///
/// `status_row` is the last row available to the list; the status line is
/// drawn there.
fn render_explore(row: usize, explore: &ExploreView, theme: &Theme, cols: usize, status_row: usize) {
    let mut current_row = render_search_bar(row, &explore.search_bar, theme, cols);
    current_row += 1;

    if let Some(empty) = &explore.empty_state {
        let empty_row = current_row + status_row.saturating_sub(current_row) / 3;
        render_empty_state(empty_row, empty, theme, cols);
    } else {
        render_cards(current_row, &explore.cards, theme, cols, status_row.saturating_sub(1));
    }

    let activity = if explore.refreshing {
        Some("Refreshing...")
    } else if explore.loading_more {
        Some("Loading more...")
    } else {
        None
    };
    render_status_line(status_row, activity, explore.position.as_deref(), theme, cols);
}
