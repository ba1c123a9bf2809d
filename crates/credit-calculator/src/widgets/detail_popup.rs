use credit_calculator_engine::format::{format_number, format_plain};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Wrap},
    Frame,
};

use super::centered_rect;
use crate::AppState;

/// Bucket breakdown for the selected row.
pub struct DetailPopupWidget;

impl DetailPopupWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let popup_area = centered_rect(60, 70, area);

        frame.render_widget(Clear, popup_area);

        let title = state
            .selected_item()
            .map(|item| item.name().to_string())
            .unwrap_or_else(|| "Details".to_string());

        let popup = Paragraph::new(Self::create_detail_text(state))
            .block(
                Block::bordered()
                    .title(title)
                    .title_alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Cyan)),
            )
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });

        frame.render_widget(popup, popup_area);
    }

    fn field<'a>(label: &'a str, value: String, color: Color) -> Line<'a> {
        Line::from(vec![
            Span::styled(label, Style::default().fg(Color::White)),
            Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ])
    }

    fn create_detail_text(state: &AppState) -> Vec<Line<'_>> {
        let (Some(row), Some(item)) = (state.selected_row(), state.selected_item()) else {
            return vec![Line::from("No item selected")];
        };

        let unit_label = state.calculator.config().report().unit_label();
        let entry = row.entry();

        let mut detail_text = vec![
            Line::from(Span::styled(
                item.description(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(" "),
            Self::field("Unit: ", item.unit().to_string(), Color::White),
            Self::field(
                "Multiplier: ",
                format!("{} {} per unit", format_plain(item.unit_multiplier()), unit_label),
                Color::White,
            ),
            Self::field(
                "Volume: ",
                format!("{} × {}", format_number(entry.volume()), item.unit()),
                Color::Yellow,
            ),
            Self::field("Frequency: ", entry.frequency().label().to_string(), Color::Yellow),
            Line::from(" "),
        ];

        match state.calculator.calculate(&entry) {
            Some(result) if entry.has_volume() => {
                let share = {
                    let total = state.totals().total_annual_units();
                    if total > 0.0 {
                        result.annual_units() / total * 100.0
                    } else {
                        0.0
                    }
                };
                detail_text.extend(vec![
                    Self::field(
                        "Per occurrence: ",
                        format_number(result.units_per_occurrence()),
                        Color::Green,
                    ),
                    Self::field("Annual: ", format_number(result.annual_units()), Color::Green),
                    Self::field("Monthly: ", format_number(result.monthly_units()), Color::Green),
                    Self::field("Daily: ", format_number(result.daily_units()), Color::Green),
                    Self::field("Share of total: ", format!("{:.1}%", share), Color::Cyan),
                ]);
            }
            _ => detail_text.push(Line::from(Span::styled(
                "Enter a volume to see the breakdown.",
                Style::default().fg(Color::DarkGray),
            ))),
        }

        detail_text.extend(vec![
            Line::from(" "),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "d",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to close", Style::default().fg(Color::Gray)),
            ]),
        ]);

        detail_text
    }
}
