//! UI building blocks for the TUI.
//!
//! This module defines the core UI abstractions and the reusable widgets
//! built on top of them:
//! - [`Component`] - Reusable, interactive UI building blocks
//! - [`Handled`] - Result of handling an input event
//! - widgets: table, text input, select, confirm dialog, alert, spinner

mod alert;
mod component;
mod confirm_dialog;
mod select;
mod spinner;
mod status_bar;
mod table;
mod text_input;

pub use alert::{AlertSlot, Severity};
pub use component::Component;
pub use confirm_dialog::{ConfirmDialog, ConfirmEvent};
pub use select::Select;
pub use spinner::Spinner;
pub use status_bar::StatusBar;
pub use table::{ColumnDef, TableRow, TableView};
pub use text_input::{InputFilter, TextInput};

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Result type alias for UI operations.
pub type Result<T> = std::result::Result<T, color_eyre::Report>;

/// A key hint shown in the status bar.
#[derive(Debug, Clone, Copy)]
pub struct Keybinding {
    pub key: &'static str,
    pub action: &'static str,
}

impl Keybinding {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Result of handling an input event.
///
/// - `Ignored` - The handler didn't recognize or handle this input
/// - `Consumed` - The input was handled but produced no event
/// - `Event(E)` - The input was handled and produced an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handled<E> {
    /// Input was not handled, parent should process it.
    Ignored,
    /// Input was consumed but produced no event.
    Consumed,
    /// Input was consumed and produced an event.
    Event(E),
}

impl<E> Handled<E> {
    /// Returns true if the input was consumed (not ignored).
    pub const fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }

    /// Returns the event if present.
    pub fn event(self) -> Option<E> {
        match self {
            Self::Event(e) => Some(e),
            _ => None,
        }
    }

    /// Maps the event type using the provided function.
    pub fn map<F, U>(self, f: F) -> Handled<U>
    where
        F: FnOnce(E) -> U,
    {
        match self {
            Self::Ignored => Handled::Ignored,
            Self::Consumed => Handled::Consumed,
            Self::Event(e) => Handled::Event(f(e)),
        }
    }
}

impl<E> From<E> for Handled<E> {
    fn from(event: E) -> Self {
        Self::Event(event)
    }
}

/// Center a rect of the given size constraints within `area`.
#[must_use]
pub fn centered(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area] = Layout::horizontal([horizontal]).flex(Flex::Center).areas(area);
    let [area] = Layout::vertical([vertical]).flex(Flex::Center).areas(area);
    area
}
