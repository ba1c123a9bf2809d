use credit_calculator_engine::format::format_number;
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Cell, Row, Table, TableState},
    Frame,
};

use crate::AppState;

/// The editable catalog, one row per item grouped under section headers.
pub struct ItemsWidget;

impl ItemsWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let unit_label = state.calculator.config().report().unit_label();
        let mut rows = Vec::with_capacity(state.rows.len() + 2);
        let mut selected_display_row = None;
        let mut index = 0;

        for section in state.calculator.config().catalog().sections() {
            rows.push(Row::new(vec![Cell::from(Span::styled(
                section.title().to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))]));

            for item in section.items() {
                let Some(input) = state.rows.get(index) else {
                    break;
                };
                let is_selected = index == state.selected;
                if is_selected {
                    selected_display_row = Some(rows.len());
                }

                // empty inputs show what they measure, like a placeholder
                let volume = if is_selected {
                    Span::raw(format!("{}_", input.input))
                } else if input.input.is_empty() {
                    Span::styled(
                        item.volume_hint().to_string(),
                        Style::default().fg(Color::DarkGray),
                    )
                } else {
                    Span::raw(input.input.clone())
                };

                let units = state.row_units(index);
                let units_style = if units > 0.0 {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };

                rows.push(Row::new(vec![
                    Cell::from(format!("  {}", item.name())),
                    Cell::from(Line::from(volume).alignment(Alignment::Right)),
                    Cell::from(Span::styled(
                        item.unit().to_string(),
                        Style::default().fg(Color::Gray),
                    )),
                    Cell::from(input.frequency.label()),
                    Cell::from(
                        Line::from(Span::styled(format_number(units), units_style))
                            .alignment(Alignment::Right),
                    ),
                ]));
                index += 1;
            }
        }

        let header = Row::new(vec![
            Cell::from("Service"),
            Cell::from(Line::from("Volume").alignment(Alignment::Right)),
            Cell::from("Unit"),
            Cell::from("Frequency"),
            Cell::from(
                Line::from(format!("Annual {}", unit_label)).alignment(Alignment::Right),
            ),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD));

        let widths = [
            Constraint::Min(30),
            Constraint::Length(14),
            Constraint::Length(18),
            Constraint::Length(10),
            Constraint::Length(16),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::bordered().title("Services"))
            .row_highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");

        let mut table_state = TableState::default().with_selected(selected_display_row);
        frame.render_stateful_widget(table, area, &mut table_state);
    }
}
