//! Static screens: loading, profile and home.

use crate::ui::helpers::render_centered_line;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{HomeView, ProfileView};

pub fn render_loading(row: usize, message: &str, theme: &Theme, cols: usize) -> usize {
    render_centered_line(row, message, &theme.colors.primary, cols);
    row + 1
}

pub fn render_profile(row: usize, profile: &ProfileView, theme: &Theme, cols: usize) -> usize {
    print!("{}", Theme::bold());
    render_centered_line(row, &profile.greeting, &theme.colors.text, cols);
    render_centered_line(row + 2, &profile.logout_hint, &theme.colors.error, cols);
    row + 3
}

pub fn render_home(row: usize, home: &HomeView, theme: &Theme, cols: usize) -> usize {
    print!("{}", Theme::bold());
    render_centered_line(row, &home.title, &theme.colors.text, cols);
    render_centered_line(row + 1, &home.message, &theme.colors.text_secondary, cols);
    row + 2
}
