//! Full-page views and the navigation contract between them.
//!
//! Screens own their state, their alert slot, and their message channel.
//! The App calls methods in this order:
//!
//! 1. `init()` - once when the screen becomes active
//! 2. For each event: `on_tick()` / `handle_key()` / `handle_mouse()` /
//!    `handle_paste()`, then `update()`
//! 3. When a command completes, its message lands in the screen's channel
//!    and is picked up by the next `update()`

pub mod form;
pub mod home;

pub use form::FormScreen;
pub use home::HomeScreen;

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::Theme;
use crate::command::Command;
use crate::ui::Keybinding;
use crate::users::model::UserId;

/// Client-side routes.
#[derive(Debug, Clone)]
pub enum Route {
    /// The list view at the root.
    Home,
    /// The creation form.
    Register,
    /// The edit form for one record.
    Edit(UserId),
}

/// Result of a screen's update step.
pub enum ScreenMsg {
    /// No action needed
    Idle,
    /// Run one or more commands
    Run(Vec<Box<dyn Command>>),
    /// Replace the active screen
    Navigate(Route),
    /// Leave the application
    Quit,
}

/// A full-page view.
pub trait Screen {
    /// Queue startup message(s) when the screen becomes active.
    fn init(&mut self) {}

    /// Handle a tick event for animations and alert expiry.
    fn on_tick(&mut self) {}

    /// Handle a key event. Returns whether the key was consumed.
    fn handle_key(&mut self, key: KeyEvent) -> bool;

    /// Handle a mouse event.
    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        _ = mouse;
    }

    /// Handle pasted text.
    fn handle_paste(&mut self, text: &str) {
        _ = text;
    }

    /// Process all queued messages and return the result.
    ///
    /// # Errors
    /// Returns an error if message processing fails; the App surfaces it
    /// and the screen may be in an inconsistent state.
    fn update(&mut self) -> color_eyre::Result<ScreenMsg>;

    /// Render the screen to the frame.
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Key hints for the status bar.
    fn keybindings(&self) -> Vec<Keybinding> {
        vec![]
    }
}
