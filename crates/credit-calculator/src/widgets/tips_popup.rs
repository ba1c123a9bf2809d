use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Wrap},
    Frame,
};

use super::centered_rect;
use crate::AppState;

pub struct TipsPopupWidget;

impl TipsPopupWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let popup_area = centered_rect(70, 80, area);

        frame.render_widget(Clear, popup_area);

        let mut tips_text = Vec::new();
        for tip in state.calculator.config().tips() {
            tips_text.push(Line::from(Span::styled(
                tip.category(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
            tips_text.push(Line::from(Span::styled(
                tip.tip(),
                Style::default().fg(Color::White),
            )));
            tips_text.push(Line::from(" "));
        }

        if tips_text.is_empty() {
            tips_text.push(Line::from("No tips configured."));
            tips_text.push(Line::from(" "));
        }

        tips_text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "t",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to close", Style::default().fg(Color::Gray)),
        ]));

        let popup = Paragraph::new(tips_text)
            .block(
                Block::bordered()
                    .title("Optimization Tips")
                    .title_alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Cyan)),
            )
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });

        frame.render_widget(popup, popup_area);
    }
}
