//! TUI widget modules

pub mod detail_popup;
pub mod header;
pub mod items;
pub mod packages;
pub mod shortcuts;
pub mod summary;
pub mod tips_popup;

pub use detail_popup::*;
pub use header::*;
pub use items::*;
pub use packages::*;
pub use shortcuts::*;
pub use summary::*;
pub use tips_popup::*;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
