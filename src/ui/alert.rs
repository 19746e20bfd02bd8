use std::time::{Duration, Instant};

use crossterm::event::MouseEvent;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Theme;
use crate::ui::Component;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug)]
struct Alert {
    severity: Severity,
    message: String,
    raised_at: Instant,
}

/// Single-slot transient notification for one screen.
///
/// Raising a new alert replaces the current one and restarts its
/// lifetime. The alert closes on explicit dismiss or after the slot's
/// time-to-live; a stray mouse click must never clear it.
pub struct AlertSlot {
    ttl: Duration,
    current: Option<Alert>,
}

impl AlertSlot {
    pub const fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.raise(Severity::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.raise(Severity::Error, message);
    }

    fn raise(&mut self, severity: Severity, message: impl Into<String>) {
        self.current = Some(Alert {
            severity,
            message: message.into(),
            raised_at: Instant::now(),
        });
    }

    /// Explicit close action.
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Incidental mouse activity. Kept as an explicit no-op: the message
    /// must survive clicks that were not aimed at it.
    pub fn handle_mouse(&mut self, _mouse: &MouseEvent) {}

    pub const fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn severity(&self) -> Option<Severity> {
        self.current.as_ref().map(|a| a.severity)
    }

    pub fn message(&self) -> Option<&str> {
        self.current.as_ref().map(|a| a.message.as_str())
    }

    #[cfg(test)]
    fn backdate(&mut self, by: Duration) {
        if let Some(alert) = &mut self.current {
            if let Some(earlier) = alert.raised_at.checked_sub(by) {
                alert.raised_at = earlier;
            }
        }
    }
}

impl Component for AlertSlot {
    type Output = ();

    fn on_tick(&mut self) {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|alert| alert.raised_at.elapsed() >= self.ttl);
        if expired {
            self.current = None;
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(alert) = &self.current else {
            return;
        };

        let width = (alert.message.chars().count() as u16 + 8)
            .clamp(24, area.width.saturating_sub(4));
        let [alert_area] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        let alert_area = Rect {
            y: area.y + 1,
            height: 3.min(area.height),
            ..alert_area
        };

        let (border_color, icon) = match alert.severity {
            Severity::Success => (theme.green(), "✓"),
            Severity::Error => (theme.red(), "!"),
        };

        frame.render_widget(Clear, alert_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type())
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(theme.surface0()));
        let inner = block.inner(alert_area);
        frame.render_widget(block, alert_area);

        let text = format!("{icon} {}  [x]", alert.message);
        let paragraph = Paragraph::new(text)
            .style(
                Style::default()
                    .fg(theme.text())
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{MouseButton, MouseEventKind};

    fn slot() -> AlertSlot {
        AlertSlot::new(Duration::from_secs(3))
    }

    fn click() -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: crossterm::event::KeyModifiers::NONE,
        }
    }

    #[test]
    fn raising_replaces_the_visible_alert() {
        let mut alert = slot();
        alert.error("first");
        alert.success("second");
        assert_eq!(alert.severity(), Some(Severity::Success));
        assert_eq!(alert.message(), Some("second"));
    }

    #[test]
    fn clickaway_leaves_the_alert_open() {
        let mut alert = slot();
        alert.success("saved");
        alert.handle_mouse(&click());
        assert!(alert.is_open());
    }

    #[test]
    fn explicit_dismiss_closes() {
        let mut alert = slot();
        alert.success("saved");
        alert.dismiss();
        assert!(!alert.is_open());
    }

    #[test]
    fn expires_after_ttl() {
        let mut alert = slot();
        alert.success("saved");
        alert.on_tick();
        assert!(alert.is_open());

        alert.backdate(Duration::from_secs(3));
        alert.on_tick();
        assert!(!alert.is_open());
    }
}
