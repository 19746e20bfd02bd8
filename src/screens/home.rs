use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::warn;

use crate::Theme;
use crate::command::Command;
use crate::screens::{Route, Screen, ScreenMsg};
use crate::ui::{
    AlertSlot, ColumnDef, Component, ConfirmDialog, ConfirmEvent, Handled, Keybinding, Spinner,
    TableRow, TableView,
};
use crate::users::UserApi;
use crate::users::command::{DeleteUserCmd, FetchUsersCmd};
use crate::users::message::HomeMsg;
use crate::users::model::{User, UserId, gender_icon};

const ALERT_TTL: Duration = Duration::from_millis(3000);
const DESCRIPTION_COLUMN_CHARS: usize = 24;

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

impl TableRow for User {
    fn columns() -> &'static [ColumnDef] {
        static COLUMNS: &[ColumnDef] = &[
            ColumnDef::new("Name", Constraint::Min(12)),
            ColumnDef::new("Last Name", Constraint::Min(12)),
            ColumnDef::new("Age", Constraint::Length(5)),
            ColumnDef::new("Gender", Constraint::Length(14)),
            ColumnDef::new("Phone", Constraint::Length(14)),
            ColumnDef::new("Interests", Constraint::Min(16)),
            ColumnDef::new("Description", Constraint::Min(18)),
        ];
        COLUMNS
    }

    fn render_cells(&self, theme: &Theme) -> Vec<Cell<'static>> {
        let gender = if self.gender.is_empty() {
            "-".to_string()
        } else {
            format!("{} {}", gender_icon(&self.gender), self.gender)
        };
        let interests = {
            let labels = self.interest_labels();
            if labels.is_empty() {
                "-".to_string()
            } else {
                labels.join(" · ")
            }
        };
        let description = if self.description.is_empty() {
            "-".to_string()
        } else {
            truncate_chars(&self.description, DESCRIPTION_COLUMN_CHARS)
        };

        vec![
            Cell::from(self.firstname.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from(self.lastname.clone()),
            Cell::from(self.age.to_string()),
            Cell::from(gender),
            Cell::from(Line::from(vec![
                Span::styled("✆ ", Style::default().fg(theme.subtext0())),
                Span::raw(self.phone.clone()),
            ])),
            Cell::from(interests),
            Cell::from(description),
        ]
    }
}

/// The list (home) screen.
///
/// Owns the authoritative snapshot of the collection for its lifetime.
/// Mutations never patch the snapshot in place; the source of truth is
/// always re-fetched.
pub struct HomeScreen {
    api: UserApi,
    table: TableView<User>,
    loading: bool,
    spinner: Spinner,
    alert: AlertSlot,
    delete_dialog: Option<(UserId, ConfirmDialog)>,
    msg_tx: UnboundedSender<HomeMsg>,
    msg_rx: UnboundedReceiver<HomeMsg>,
}

impl HomeScreen {
    pub fn new(api: UserApi) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            api,
            table: TableView::new(Vec::new()).with_title(" Users "),
            loading: false,
            spinner: Spinner::new(),
            alert: AlertSlot::new(ALERT_TTL),
            delete_dialog: None,
            msg_tx,
            msg_rx,
        }
    }

    /// Queue a message to be processed by update().
    fn queue(&self, msg: HomeMsg) {
        let _ = self.msg_tx.send(msg);
    }

    fn refresh(&mut self) -> ScreenMsg {
        self.loading = true;
        self.spinner.set_label("Loading users...");
        ScreenMsg::Run(vec![Box::new(FetchUsersCmd::new(
            self.api.clone(),
            self.msg_tx.clone(),
        ))])
    }

    fn process_message(&mut self, msg: HomeMsg) -> ScreenMsg {
        match msg {
            HomeMsg::Refresh => self.refresh(),

            HomeMsg::UsersLoaded(users) => {
                self.loading = false;
                self.table.set_items(users);
                ScreenMsg::Idle
            }

            HomeMsg::FetchFailed(error) => {
                warn!(%error, "Fetching users failed");
                self.loading = false;
                self.table.set_items(Vec::new());
                self.alert.error("Failed to fetch users");
                ScreenMsg::Idle
            }

            HomeMsg::RequestDelete(id) => {
                let dialog = ConfirmDialog::new(
                    "Are you sure you want to delete this user? This action cannot be undone.",
                )
                .with_title("Confirm Deletion")
                .with_confirm_text("Delete")
                .with_cancel_text("Cancel")
                .danger();
                self.delete_dialog = Some((id, dialog));
                ScreenMsg::Idle
            }

            HomeMsg::ConfirmDelete => match self.delete_dialog.take() {
                Some((id, _)) => ScreenMsg::Run(vec![Box::new(DeleteUserCmd::new(
                    self.api.clone(),
                    id,
                    self.msg_tx.clone(),
                ))]),
                None => ScreenMsg::Idle,
            },

            HomeMsg::CancelDelete => {
                self.delete_dialog = None;
                ScreenMsg::Idle
            }

            HomeMsg::UserDeleted => {
                self.alert.success("User deleted successfully!");
                self.refresh()
            }

            HomeMsg::DeleteFailed(error) => {
                warn!(%error, "Deleting user failed");
                self.alert.error("Failed to delete user");
                ScreenMsg::Idle
            }

            HomeMsg::OpenRegister => ScreenMsg::Navigate(Route::Register),
            HomeMsg::OpenEdit(id) => ScreenMsg::Navigate(Route::Edit(id)),
            HomeMsg::Quit => ScreenMsg::Quit,

            HomeMsg::DismissAlert => {
                self.alert.dismiss();
                ScreenMsg::Idle
            }
        }
    }

    fn render_empty_state(frame: &mut Frame, area: Rect, theme: &Theme) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No users found",
                Style::default().fg(theme.subtext0()),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(theme.overlay1())),
                Span::styled(
                    "<a>",
                    Style::default()
                        .fg(theme.peach())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    " to add your first user",
                    Style::default().fg(theme.overlay1()),
                ),
            ]),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type())
            .border_style(Style::default().fg(theme.border()))
            .title(" Users ")
            .title_style(Style::default().fg(theme.mauve()).add_modifier(Modifier::BOLD));
        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}

impl Screen for HomeScreen {
    fn init(&mut self) {
        self.queue(HomeMsg::Refresh);
    }

    fn on_tick(&mut self) {
        if self.loading {
            self.spinner.on_tick();
        }
        self.alert.on_tick();
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // An open dialog captures everything
        if let Some((_, dialog)) = &mut self.delete_dialog {
            match dialog.handle_key(key) {
                Ok(Handled::Event(ConfirmEvent::Confirmed)) => self.queue(HomeMsg::ConfirmDelete),
                Ok(Handled::Event(ConfirmEvent::Cancelled)) => self.queue(HomeMsg::CancelDelete),
                _ => {}
            }
            return true;
        }

        match self.table.handle_key(key) {
            Ok(Handled::Event(user)) => {
                self.queue(HomeMsg::OpenEdit(user.id));
                return true;
            }
            Ok(Handled::Consumed) => return true,
            _ => {}
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('r'), _) => self.queue(HomeMsg::Refresh),
            (KeyCode::Char('a') | KeyCode::Char('n'), _) => self.queue(HomeMsg::OpenRegister),
            (KeyCode::Char('e'), _) => match self.table.selected() {
                Some(user) => self.queue(HomeMsg::OpenEdit(user.id.clone())),
                None => return true,
            },
            (KeyCode::Char('d') | KeyCode::Delete, _) => match self.table.selected() {
                Some(user) => self.queue(HomeMsg::RequestDelete(user.id.clone())),
                None => return true,
            },
            (KeyCode::Char('x'), KeyModifiers::NONE | KeyModifiers::CONTROL) => {
                self.queue(HomeMsg::DismissAlert);
            }
            (KeyCode::Char('q'), _) => self.queue(HomeMsg::Quit),
            _ => return false,
        }
        true
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        // Clickaway must not clear the message
        self.alert.handle_mouse(mouse);
    }

    fn update(&mut self) -> color_eyre::Result<ScreenMsg> {
        let mut commands: Vec<Box<dyn Command>> = Vec::new();

        while let Ok(msg) = self.msg_rx.try_recv() {
            match self.process_message(msg) {
                ScreenMsg::Idle => {}
                ScreenMsg::Run(cmds) => commands.extend(cmds),
                other => return Ok(other),
            }
        }

        if commands.is_empty() {
            Ok(ScreenMsg::Idle)
        } else {
            Ok(ScreenMsg::Run(commands))
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [header_area, content_area, detail_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        let header = Line::from(vec![
            Span::styled(
                "👤 User Management",
                Style::default()
                    .fg(theme.blue())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} users", self.table.len()),
                Style::default().fg(theme.overlay1()),
            ),
        ]);
        frame.render_widget(Paragraph::new(header), header_area);

        if self.loading {
            self.spinner.render(frame, content_area, theme);
        } else if self.table.is_empty() {
            Self::render_empty_state(frame, content_area, theme);
        } else {
            self.table.render(frame, content_area, theme);

            // Hover-equivalent: the selected row's full description
            if let Some(user) = self.table.selected() {
                if !user.description.is_empty() {
                    let detail = Line::from(vec![
                        Span::styled("รายละเอียด: ", Style::default().fg(theme.subtext0())),
                        Span::styled(
                            user.description.clone(),
                            Style::default().fg(theme.subtext1()),
                        ),
                    ]);
                    frame.render_widget(Paragraph::new(detail), detail_area);
                }
            }
        }

        if let Some((_, dialog)) = &mut self.delete_dialog {
            dialog.render(frame, area, theme);
        }

        self.alert.render(frame, area, theme);
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        vec![
            Keybinding::new("j/k", "move"),
            Keybinding::new("enter", "edit"),
            Keybinding::new("a", "add"),
            Keybinding::new("d", "delete"),
            Keybinding::new("r", "refresh"),
            Keybinding::new("x", "dismiss alert"),
            Keybinding::new("q", "quit"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Severity;
    use crate::users::model::UserId;

    fn screen() -> HomeScreen {
        HomeScreen::new(UserApi::new("http://localhost:8000").unwrap())
    }

    fn user(id: &str, firstname: &str) -> User {
        User {
            id: UserId::new(id),
            firstname: firstname.to_string(),
            lastname: String::new(),
            age: 30,
            gender: "ชาย".to_string(),
            phone: "0812345678".to_string(),
            interests: String::new(),
            description: String::new(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn command_names(msg: &ScreenMsg) -> Vec<String> {
        match msg {
            ScreenMsg::Run(cmds) => cmds.iter().map(|c| c.name()).collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn init_triggers_a_fetch() {
        let mut screen = screen();
        screen.init();
        let msg = screen.update().unwrap();
        assert_eq!(command_names(&msg), vec!["Loading users"]);
        assert!(screen.loading);
    }

    #[test]
    fn loaded_snapshot_replaces_the_table() {
        let mut screen = screen();
        screen.queue(HomeMsg::UsersLoaded(vec![user("1", "Somchai")]));
        assert!(matches!(screen.update().unwrap(), ScreenMsg::Idle));
        assert_eq!(screen.table.len(), 1);
        assert!(!screen.loading);
    }

    #[test]
    fn fetch_failure_clears_snapshot_and_raises_error() {
        let mut screen = screen();
        screen.queue(HomeMsg::UsersLoaded(vec![user("1", "Somchai")]));
        screen.update().unwrap();

        screen.queue(HomeMsg::FetchFailed("connection refused".to_string()));
        screen.update().unwrap();
        assert!(screen.table.is_empty());
        assert_eq!(screen.alert.severity(), Some(Severity::Error));
        assert_eq!(screen.alert.message(), Some("Failed to fetch users"));
    }

    #[test]
    fn delete_flow_confirms_then_refreshes() {
        let mut screen = screen();
        screen.queue(HomeMsg::UsersLoaded(vec![user("7", "Somchai")]));
        screen.update().unwrap();

        // d opens the dialog, nothing is deleted yet
        assert!(screen.handle_key(key(KeyCode::Char('d'))));
        screen.update().unwrap();
        assert!(screen.delete_dialog.is_some());

        // y confirms; the delete command runs and the dialog closes
        assert!(screen.handle_key(key(KeyCode::Char('y'))));
        let msg = screen.update().unwrap();
        assert_eq!(command_names(&msg), vec!["Deleting user 7"]);
        assert!(screen.delete_dialog.is_none());

        // success raises the alert and re-fetches; no client-side patching
        screen.queue(HomeMsg::UserDeleted);
        let msg = screen.update().unwrap();
        assert_eq!(command_names(&msg), vec!["Loading users"]);
        assert_eq!(screen.alert.message(), Some("User deleted successfully!"));
        assert_eq!(screen.alert.severity(), Some(Severity::Success));
    }

    #[test]
    fn cancel_delete_closes_without_a_call() {
        let mut screen = screen();
        screen.queue(HomeMsg::UsersLoaded(vec![user("7", "Somchai")]));
        screen.update().unwrap();

        screen.handle_key(key(KeyCode::Char('d')));
        screen.update().unwrap();
        screen.handle_key(key(KeyCode::Char('n')));
        let msg = screen.update().unwrap();
        assert!(matches!(msg, ScreenMsg::Idle));
        assert!(screen.delete_dialog.is_none());
    }

    #[test]
    fn delete_failure_keeps_screen_usable() {
        let mut screen = screen();
        screen.queue(HomeMsg::DeleteFailed("500".to_string()));
        screen.update().unwrap();
        assert_eq!(screen.alert.message(), Some("Failed to delete user"));
        assert!(screen.delete_dialog.is_none());
    }

    #[test]
    fn enter_opens_edit_for_the_selected_user() {
        let mut screen = screen();
        screen.queue(HomeMsg::UsersLoaded(vec![user("9", "Somchai")]));
        screen.update().unwrap();

        screen.handle_key(key(KeyCode::Enter));
        let msg = screen.update().unwrap();
        match msg {
            ScreenMsg::Navigate(Route::Edit(id)) => assert_eq!(id.as_str(), "9"),
            _ => panic!("expected navigation to the edit screen"),
        }
    }

    #[test]
    fn q_quits_and_a_opens_register() {
        let mut screen = screen();
        screen.handle_key(key(KeyCode::Char('a')));
        assert!(matches!(
            screen.update().unwrap(),
            ScreenMsg::Navigate(Route::Register)
        ));

        screen.handle_key(key(KeyCode::Char('q')));
        assert!(matches!(screen.update().unwrap(), ScreenMsg::Quit));
    }

    #[test]
    fn truncation_is_char_aware() {
        assert_eq!(truncate_chars("short", 24), "short");
        let long = "รายละเอียดยาวมาก ๆ ที่เกินความกว้างของคอลัมน์";
        let cut = truncate_chars(long, 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with('…'));
    }
}
