use credit_calculator_engine::format::{capitalize, format_cost, format_number};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::AppState;

pub struct SummaryWidget;

impl SummaryWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let config = state.calculator.config();
        let unit_title = capitalize(config.report().unit_label());
        let totals = state.totals();

        let value_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);

        let summary_text = vec![
            Line::from(vec![
                Span::styled(format!("Annual {}: ", unit_title), Style::default().fg(Color::White)),
                Span::styled(format_number(totals.total_annual_units()), value_style),
            ]),
            Line::from(vec![
                Span::styled(format!("Monthly {}: ", unit_title), Style::default().fg(Color::White)),
                Span::styled(format_number(totals.total_monthly_units()), value_style),
            ]),
            Line::from(vec![
                Span::styled(format!("Daily {}: ", unit_title), Style::default().fg(Color::White)),
                Span::styled(format_number(totals.total_daily_units()), value_style),
            ]),
            Line::from(vec![
                Span::styled("Estimated Annual Cost: ", Style::default().fg(Color::White)),
                Span::styled(
                    format_cost(totals.estimated_cost(), config.pricing().currency_symbol()),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        let title = format!("Summary ({} active)", state.active_rows());
        let summary = Paragraph::new(summary_text)
            .block(Block::bordered().title(title))
            .alignment(Alignment::Left);

        frame.render_widget(summary, area);
    }
}
