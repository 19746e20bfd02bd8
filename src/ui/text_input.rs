use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::Theme;
use crate::ui::{Component, Handled, Result};

/// Whole-value accept filter for a text input.
///
/// The filter is tested against the complete candidate value after the
/// edit, not against single characters, so a paste containing one bad
/// character is rejected in its entirety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFilter {
    #[default]
    Any,
    /// Accept only values made entirely of ASCII digits.
    Digits,
}

impl InputFilter {
    #[must_use]
    pub fn accepts(self, candidate: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Digits => candidate.chars().all(|c| c.is_ascii_digit()),
        }
    }
}

/// Single-line labeled text input rendered as a form field.
///
/// The cursor is tracked as a character index so multi-byte input (Thai
/// names) edits correctly.
pub struct TextInput {
    label: &'static str,
    value: String,
    cursor: usize,
    filter: InputFilter,
    required: bool,
    focused: bool,
}

impl TextInput {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            cursor: 0,
            filter: InputFilter::Any,
            required: false,
            focused: false,
        }
    }

    pub const fn with_filter(mut self, filter: InputFilter) -> Self {
        self.filter = filter;
        self
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub const fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Insert text at the cursor if the resulting value passes the filter.
    ///
    /// Returns whether the value changed. A rejected insertion leaves the
    /// value untouched.
    pub fn insert_str(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let at = self.byte_index();
        let mut candidate = self.value.clone();
        candidate.insert_str(at, text);
        if !self.filter.accepts(&candidate) {
            return false;
        }
        self.cursor += text.chars().count();
        self.value = candidate;
        true
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    fn delete_char_before_cursor(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index();
            self.value.remove(at);
        }
    }

    fn delete_char_at_cursor(&mut self) {
        let at = self.byte_index();
        if at < self.value.len() {
            self.value.remove(at);
        }
    }

    const fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn move_cursor_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    const fn move_cursor_start(&mut self) {
        self.cursor = 0;
    }

    fn move_cursor_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    fn clear_line(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

impl Component for TextInput {
    type Output = ();

    fn handle_key(&mut self, key: KeyEvent) -> Result<Handled<Self::Output>> {
        Ok(match (key.code, key.modifiers) {
            // Enter and Esc belong to the parent (submit / navigate back)
            (KeyCode::Enter | KeyCode::Esc, _) => Handled::Ignored,

            (KeyCode::Backspace, _) => {
                self.delete_char_before_cursor();
                Handled::Consumed
            }
            (KeyCode::Delete, _) => {
                self.delete_char_at_cursor();
                Handled::Consumed
            }

            (KeyCode::Left, _) => {
                self.move_cursor_left();
                Handled::Consumed
            }
            (KeyCode::Right, _) => {
                self.move_cursor_right();
                Handled::Consumed
            }
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.move_cursor_start();
                Handled::Consumed
            }
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.move_cursor_end();
                Handled::Consumed
            }

            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.clear_line();
                Handled::Consumed
            }

            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.insert_char(c);
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

        let input_style = Style::default().fg(theme.text());
        let line = if self.focused {
            let at = self.byte_index();
            let (before, after) = self.value.split_at(at);
            let cursor_char = after.chars().next().unwrap_or(' ');
            let rest: String = after.chars().skip(1).collect();
            let cursor_style = Style::default()
                .fg(theme.base())
                .bg(theme.text())
                .add_modifier(Modifier::BOLD);
            Line::from(vec![
                Span::styled(before.to_string(), input_style),
                Span::styled(cursor_char.to_string(), cursor_style),
                Span::styled(rest, input_style),
            ])
        } else {
            Line::from(Span::styled(self.value.clone(), input_style))
        };
        frame.render_widget(Paragraph::new(line), value_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn digits_filter_rejects_whole_candidate() {
        let mut input = TextInput::new("phone").with_filter(InputFilter::Digits);
        input.handle_key(key(KeyCode::Char('0'))).unwrap();
        input.handle_key(key(KeyCode::Char('8'))).unwrap();
        input.handle_key(key(KeyCode::Char('x'))).unwrap();
        assert_eq!(input.value(), "08");
    }

    #[test]
    fn digits_filter_rejects_mixed_paste_entirely() {
        let mut input = TextInput::new("phone").with_filter(InputFilter::Digits);
        input.set_value("081");
        assert!(!input.insert_str("23a4"));
        assert_eq!(input.value(), "081");
        assert!(input.insert_str("2345678"));
        assert_eq!(input.value(), "0812345678");
    }

    #[test]
    fn any_filter_accepts_everything() {
        let mut input = TextInput::new("name");
        input.insert_str("สมชาย S.");
        assert_eq!(input.value(), "สมชาย S.");
    }

    #[test]
    fn multibyte_editing_is_char_aware() {
        let mut input = TextInput::new("name");
        input.insert_str("สมชาย");
        input.handle_key(key(KeyCode::Backspace)).unwrap();
        assert_eq!(input.value(), "สมชา");

        input.handle_key(key(KeyCode::Home)).unwrap();
        input.handle_key(key(KeyCode::Delete)).unwrap();
        assert_eq!(input.value(), "มชา");
    }

    #[test]
    fn removal_is_always_allowed_on_filtered_fields() {
        let mut input = TextInput::new("age").with_filter(InputFilter::Digits);
        input.set_value("30");
        input.handle_key(key(KeyCode::Backspace)).unwrap();
        assert_eq!(input.value(), "3");
    }
}
