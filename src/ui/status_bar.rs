use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Theme;
use crate::ui::Keybinding;

/// Bottom bar showing the active screen's key hints.
pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, theme: &Theme, keybindings: &[Keybinding]) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type())
            .border_style(Style::default().fg(theme.border()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let key_style = Style::default()
            .fg(theme.peach())
            .add_modifier(Modifier::BOLD);
        let label_style = Style::default().fg(theme.subtext0());

        let mut spans = Vec::with_capacity(keybindings.len() * 3);
        for (i, binding) in keybindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", label_style));
            }
            spans.push(Span::styled(format!("<{}>", binding.key), key_style));
            spans.push(Span::styled(format!(" {}", binding.action), label_style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    }
}
