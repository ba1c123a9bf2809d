use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Gauge},
    Frame,
};

use crate::AppState;

/// Package consumption and the selected row's share of the annual total.
pub struct PackagesWidget;

impl PackagesWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(3)])
            .split(area);

        let totals = state.totals();
        let packages = state
            .calculator
            .config()
            .pricing()
            .packages_for(totals.total_annual_units());
        let into_next = if packages.is_finite() { packages.fract() } else { 0.0 };

        let package_gauge = Gauge::default()
            .block(Block::bordered().title("Packages / year"))
            .gauge_style(Style::default().fg(Color::Blue))
            .ratio(into_next.clamp(0.0, 1.0))
            .label(format!(
                "{:.2} packages ({:.0}% into the next)",
                packages,
                into_next * 100.0
            ));

        frame.render_widget(package_gauge, chunks[0]);

        let share = if totals.total_annual_units() > 0.0 {
            state.row_units(state.selected) / totals.total_annual_units()
        } else {
            0.0
        };
        let share_gauge = Gauge::default()
            .block(Block::bordered().title("Selected share"))
            .gauge_style(if share > 0.8 {
                Style::default().fg(Color::Red)
            } else if share > 0.5 {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Green)
            })
            .ratio(share.clamp(0.0, 1.0))
            .label(format!("{:.1}%", share * 100.0));

        frame.render_widget(share_gauge, chunks[1]);
    }
}
