use crate::app::App;
use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};

use super::{articles, status};

/// Draw the whole screen: article list above a one-line status bar.
pub fn render(f: &mut Frame, app: &App) {
    let [list_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(f.area());

    articles::render(f, app, list_area);
    status::render(f, app, status_area);
}
