use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::AppState;

const SHORTCUTS: [(&str, &str); 8] = [
    ("↑↓", "select"),
    ("0-9 .", "volume"),
    ("f", "frequency"),
    ("del", "clear"),
    ("e/x", "export html/text"),
    ("d", "details"),
    ("t", "tips"),
    ("q", "quit"),
];

pub struct ShortcutsWidget;

impl ShortcutsWidget {
    pub fn render(frame: &mut Frame, area: Rect, _state: &AppState) {
        let mut spans = Vec::with_capacity(SHORTCUTS.len() * 3);
        for (i, (key, action)) in SHORTCUTS.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", Style::default().fg(Color::Gray)));
            }
            spans.push(Span::styled(
                *key,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(" {}", action),
                Style::default().fg(Color::Gray),
            ));
        }

        let shortcuts = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);

        frame.render_widget(shortcuts, area);
    }
}
