use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::Theme;
use crate::ui::{Component, Handled, Result};

/// Closed-set selector rendered as a form field, cycled with ←/→.
///
/// The unselected state is a real position before the first option, shown
/// as the placeholder text; moving left from the first option returns to
/// it.
pub struct Select<T: Copy + PartialEq> {
    label: &'static str,
    placeholder: &'static str,
    options: Vec<(T, &'static str)>,
    selected: Option<usize>,
    required: bool,
    focused: bool,
}

impl<T: Copy + PartialEq> Select<T> {
    pub fn new(label: &'static str, placeholder: &'static str) -> Self {
        Self {
            label,
            placeholder,
            options: Vec::new(),
            selected: None,
            required: false,
            focused: false,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: impl IntoIterator<Item = (T, &'static str)>) -> Self {
        self.options = options.into_iter().collect();
        self
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn value(&self) -> Option<T> {
        self.selected.and_then(|i| self.options.get(i)).map(|(v, _)| *v)
    }

    pub fn set_value(&mut self, value: Option<T>) {
        self.selected = value.and_then(|v| self.options.iter().position(|(o, _)| *o == v));
    }

    pub const fn clear(&mut self) {
        self.selected = None;
    }

    pub const fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn select_previous(&mut self) {
        self.selected = match self.selected {
            Some(0) | None => None,
            Some(i) => Some(i - 1),
        };
    }

    fn select_next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.selected = match self.selected {
            None => Some(0),
            Some(i) => Some((i + 1).min(self.options.len() - 1)),
        };
    }
}

impl<T: Copy + PartialEq> Component for Select<T> {
    type Output = ();

    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<Self::Output>> {
        Ok(match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.select_previous();
                Handled::Consumed
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                self.select_next();
                Handled::Consumed
            }
            _ => Handled::Ignored,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [label_area, value_area] =
            Layout::horizontal([Constraint::Length(28), Constraint::Min(10)]).areas(area);

        let marker = if self.required { " *" } else { "" };
        let label_style = if self.focused {
            Style::default().fg(theme.mauve()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.subtext0())
        };
        let label = Paragraph::new(Line::from(vec![
            Span::styled(self.label, label_style),
            Span::styled(marker, Style::default().fg(theme.red())),
        ]));
        frame.render_widget(label, label_area);

        let arrow_style = if self.focused {
            Style::default().fg(theme.peach())
        } else {
            Style::default().fg(theme.overlay0())
        };
        let value_span = match self.selected.and_then(|i| self.options.get(i)) {
            Some((_, text)) => Span::styled(*text, Style::default().fg(theme.text())),
            None => Span::styled(self.placeholder, Style::default().fg(theme.overlay1())),
        };
        let line = Line::from(vec![
            Span::styled("‹ ", arrow_style),
            value_span,
            Span::styled(" ›", arrow_style),
        ]);
        frame.render_widget(Paragraph::new(line), value_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn select() -> Select<u8> {
        Select::new("pick", "none").with_options([(1, "one"), (2, "two")])
    }

    #[test]
    fn starts_unselected_and_cycles() {
        let mut s = select();
        assert_eq!(s.value(), None);

        s.handle_key(key(KeyCode::Right)).unwrap();
        assert_eq!(s.value(), Some(1));

        s.handle_key(key(KeyCode::Right)).unwrap();
        s.handle_key(key(KeyCode::Right)).unwrap();
        assert_eq!(s.value(), Some(2));
    }

    #[test]
    fn left_returns_to_unselected() {
        let mut s = select();
        s.handle_key(key(KeyCode::Right)).unwrap();
        s.handle_key(key(KeyCode::Left)).unwrap();
        assert_eq!(s.value(), None);
    }

    #[test]
    fn set_value_resolves_known_options_only() {
        let mut s = select();
        s.set_value(Some(2));
        assert_eq!(s.value(), Some(2));
        s.set_value(Some(9));
        assert_eq!(s.value(), None);
    }
}
