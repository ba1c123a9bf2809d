use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::AppState;

pub struct HeaderWidget;

impl HeaderWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let title = state.calculator.config().report().title().to_string();

        let mut spans = vec![Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )];

        match &state.status {
            Some(status) => {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    status.text.clone(),
                    Style::default().fg(if status.is_error {
                        Color::Red
                    } else {
                        Color::Green
                    }),
                ));
            }
            None => {
                spans.push(Span::styled(
                    format!("  exports to {}", state.export_dir.display()),
                    Style::default().fg(Color::DarkGray),
                ));
            }
        }

        let header = Paragraph::new(Line::from(spans))
            .block(Block::bordered().title("Credit Calculator"))
            .alignment(Alignment::Center);

        frame.render_widget(header, area);
    }
}
