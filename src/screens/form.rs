use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::warn;

use crate::Theme;
use crate::command::Command;
use crate::screens::{Route, Screen, ScreenMsg};
use crate::ui::{
    AlertSlot, Component, Handled, InputFilter, Keybinding, Select, Spinner, TextInput,
};
use crate::users::UserApi;
use crate::users::command::{CreateUserCmd, FetchUserCmd, ReturnToListCmd, UpdateUserCmd};
use crate::users::draft::{FormField, MSG_REQUIRED_FIELDS, UserDraft};
use crate::users::message::FormMsg;
use crate::users::model::{Gender, UserId};

/// Pause before returning to the list after a successful edit, long
/// enough to read the confirmation.
const RETURN_DELAY: Duration = Duration::from_millis(1200);
const CREATE_ALERT_TTL: Duration = Duration::from_millis(3500);
const EDIT_ALERT_TTL: Duration = Duration::from_millis(2000);

const GENDER_PLACEHOLDER: &str = "เลือกเพศ";

#[derive(Debug, Clone)]
enum FormMode {
    Create,
    Edit(UserId),
}

/// The create/edit form screen.
///
/// Owns a single draft scoped to one session; the draft is discarded on
/// success or navigation away.
pub struct FormScreen {
    api: UserApi,
    mode: FormMode,
    focus: FormField,
    firstname: TextInput,
    lastname: TextInput,
    age: TextInput,
    gender: Select<Gender>,
    phone: TextInput,
    interests: TextInput,
    description: TextInput,
    loading: bool,
    saving: bool,
    spinner: Spinner,
    alert: AlertSlot,
    msg_tx: UnboundedSender<FormMsg>,
    msg_rx: UnboundedReceiver<FormMsg>,
}

impl FormScreen {
    /// Registration form with an empty draft.
    pub fn create(api: UserApi) -> Self {
        Self::new(api, FormMode::Create, CREATE_ALERT_TTL)
    }

    /// Edit form; the draft is pre-populated once the record loads.
    pub fn edit(api: UserApi, id: UserId) -> Self {
        Self::new(api, FormMode::Edit(id), EDIT_ALERT_TTL)
    }

    fn new(api: UserApi, mode: FormMode, alert_ttl: Duration) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let mut screen = Self {
            api,
            mode,
            focus: FormField::FirstName,
            firstname: TextInput::new(FormField::FirstName.label()).required(),
            lastname: TextInput::new(FormField::LastName.label()).required(),
            age: TextInput::new(FormField::Age.label())
                .with_filter(InputFilter::Digits)
                .required(),
            gender: Select::new(FormField::Gender.label(), GENDER_PLACEHOLDER)
                .with_options(Gender::ALL.map(|g| (g, g.as_wire())))
                .required(),
            phone: TextInput::new(FormField::Phone.label())
                .with_filter(InputFilter::Digits)
                .required(),
            interests: TextInput::new(FormField::Interests.label()),
            description: TextInput::new(FormField::Description.label()),
            loading: false,
            saving: false,
            spinner: Spinner::new(),
            alert: AlertSlot::new(alert_ttl),
            msg_tx,
            msg_rx,
        };
        screen.apply_focus();
        screen
    }

    fn queue(&self, msg: FormMsg) {
        let _ = self.msg_tx.send(msg);
    }

    fn input_mut(&mut self, field: FormField) -> Option<&mut TextInput> {
        match field {
            FormField::FirstName => Some(&mut self.firstname),
            FormField::LastName => Some(&mut self.lastname),
            FormField::Age => Some(&mut self.age),
            FormField::Gender => None,
            FormField::Phone => Some(&mut self.phone),
            FormField::Interests => Some(&mut self.interests),
            FormField::Description => Some(&mut self.description),
        }
    }

    fn apply_focus(&mut self) {
        let focus = self.focus;
        for field in FormField::ALL {
            if let Some(input) = self.input_mut(field) {
                input.set_focused(field == focus);
            }
        }
        self.gender.set_focused(focus == FormField::Gender);
    }

    fn move_focus(&mut self, forward: bool) {
        self.focus = if forward {
            self.focus.next()
        } else {
            self.focus.previous()
        };
        self.apply_focus();
    }

    /// The current draft, assembled from the field components.
    fn draft(&self) -> UserDraft {
        UserDraft {
            firstname: self.firstname.value().to_string(),
            lastname: self.lastname.value().to_string(),
            age: self.age.value().to_string(),
            gender: self.gender.value(),
            phone: self.phone.value().to_string(),
            interests: self.interests.value().to_string(),
            description: self.description.value().to_string(),
        }
    }

    fn set_draft(&mut self, draft: &UserDraft) {
        self.firstname.set_value(draft.firstname.clone());
        self.lastname.set_value(draft.lastname.clone());
        self.age.set_value(draft.age.clone());
        self.gender.set_value(draft.gender);
        self.phone.set_value(draft.phone.clone());
        self.interests.set_value(draft.interests.clone());
        self.description.set_value(draft.description.clone());
    }

    fn reset(&mut self) {
        self.firstname.clear();
        self.lastname.clear();
        self.age.clear();
        self.gender.clear();
        self.phone.clear();
        self.interests.clear();
        self.description.clear();
        self.focus = FormField::FirstName;
        self.apply_focus();
    }

    fn save_failed_message(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "เกิดข้อผิดพลาดในการสมัครสมาชิก",
            FormMode::Edit(_) => "เกิดข้อผิดพลาดในการแก้ไข",
        }
    }

    fn submit(&mut self) -> ScreenMsg {
        if self.saving {
            return ScreenMsg::Idle;
        }
        // Validation runs fully before any I/O; a failure makes no call.
        let Some(payload) = self.draft().validate() else {
            self.alert.error(MSG_REQUIRED_FIELDS);
            return ScreenMsg::Idle;
        };
        self.saving = true;
        let command: Box<dyn Command> = match &self.mode {
            FormMode::Create => Box::new(CreateUserCmd::new(
                self.api.clone(),
                payload,
                self.msg_tx.clone(),
            )),
            FormMode::Edit(id) => Box::new(UpdateUserCmd::new(
                self.api.clone(),
                id.clone(),
                payload,
                self.msg_tx.clone(),
            )),
        };
        ScreenMsg::Run(vec![command])
    }

    fn process_message(&mut self, msg: FormMsg) -> ScreenMsg {
        match msg {
            FormMsg::Load(id) => {
                self.loading = true;
                self.spinner.set_label("Loading user...");
                ScreenMsg::Run(vec![Box::new(FetchUserCmd::new(
                    self.api.clone(),
                    id,
                    self.msg_tx.clone(),
                ))])
            }

            FormMsg::Loaded(user) => {
                self.loading = false;
                self.set_draft(&UserDraft::from_user(&user));
                ScreenMsg::Idle
            }

            FormMsg::LoadFailed(error) => {
                // The empty form stays usable; only the message changes
                warn!(%error, "Loading user for edit failed");
                self.loading = false;
                self.alert.error("ไม่พบข้อมูลผู้ใช้");
                ScreenMsg::Idle
            }

            FormMsg::Submit => self.submit(),

            FormMsg::Created(user) => {
                self.saving = false;
                tracing::info!(id = %user.id, "User created");
                self.alert.success("สมัครสมาชิกสำเร็จ!");
                self.reset();
                ScreenMsg::Idle
            }

            FormMsg::Updated(user) => {
                self.saving = false;
                tracing::info!(id = %user.id, "User updated");
                self.alert.success("แก้ไขข้อมูลสำเร็จ!");
                ScreenMsg::Run(vec![Box::new(ReturnToListCmd::new(
                    RETURN_DELAY,
                    self.msg_tx.clone(),
                ))])
            }

            FormMsg::SaveFailed(error) => {
                warn!(%error, "Saving user failed");
                self.saving = false;
                self.alert.error(self.save_failed_message());
                ScreenMsg::Idle
            }

            FormMsg::ReturnToList => ScreenMsg::Navigate(Route::Home),
            FormMsg::Cancel => ScreenMsg::Navigate(Route::Home),

            FormMsg::DismissAlert => {
                self.alert.dismiss();
                ScreenMsg::Idle
            }
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let subtitle = match self.mode {
            FormMode::Create => "ฟอร์มสมัครสมาชิก",
            FormMode::Edit(_) => "แก้ไขข้อมูลผู้ใช้",
        };
        let lines = vec![
            Line::from(Span::styled(
                "ระบบจัดการผู้ใช้",
                Style::default()
                    .fg(theme.blue())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                subtitle,
                Style::default().fg(theme.subtext0()),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_fields(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut constraints = Vec::with_capacity(FormField::ALL.len() * 2 + 1);
        for _ in FormField::ALL {
            constraints.push(Constraint::Length(1));
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Length(1));
        let rows = Layout::vertical(constraints).split(area);

        for (i, field) in FormField::ALL.into_iter().enumerate() {
            let row = rows[i * 2];
            if field == FormField::Gender {
                self.gender.render(frame, row, theme);
            } else if let Some(input) = self.input_mut(field) {
                input.render(frame, row, theme);
            }
        }

        let submit_label = match self.mode {
            FormMode::Create => "สมัครสมาชิก",
            FormMode::Edit(_) => "บันทึก",
        };
        let submit = Line::from(vec![
            Span::styled(
                "<enter> ",
                Style::default()
                    .fg(theme.peach())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                submit_label,
                Style::default()
                    .fg(theme.green())
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(submit), rows[FormField::ALL.len() * 2]);
    }
}

impl Screen for FormScreen {
    fn init(&mut self) {
        if let FormMode::Edit(id) = &self.mode {
            self.queue(FormMsg::Load(id.clone()));
        }
    }

    fn on_tick(&mut self) {
        if self.loading {
            self.spinner.on_tick();
        }
        self.alert.on_tick();
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.loading {
            if key.code == KeyCode::Esc {
                self.queue(FormMsg::Cancel);
            }
            return true;
        }

        // The focused field gets the key first
        let handled = if self.focus == FormField::Gender {
            self.gender.handle_key(key)
        } else {
            match self.input_mut(self.focus) {
                Some(input) => input.handle_key(key),
                None => Ok(Handled::Ignored),
            }
        };
        if matches!(handled, Ok(Handled::Consumed | Handled::Event(()))) {
            return true;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => self.queue(FormMsg::Cancel),
            (KeyCode::Enter, _) => self.queue(FormMsg::Submit),
            (KeyCode::Tab | KeyCode::Down, _) => self.move_focus(true),
            (KeyCode::BackTab | KeyCode::Up, _) => self.move_focus(false),
            (KeyCode::Char('x'), KeyModifiers::CONTROL) => self.queue(FormMsg::DismissAlert),
            _ => return false,
        }
        true
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        // Clickaway must not clear the message
        self.alert.handle_mouse(mouse);
    }

    fn handle_paste(&mut self, text: &str) {
        let focus = self.focus;
        if let Some(input) = self.input_mut(focus) {
            input.insert_str(text);
        }
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
        let [header_area, _, fields_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(8),
        ])
        .areas(area);

        self.render_header(frame, header_area, theme);

        if self.loading {
            self.spinner.render(frame, fields_area, theme);
        } else {
            self.render_fields(frame, fields_area, theme);
        }

        self.alert.render(frame, area, theme);
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        vec![
            Keybinding::new("tab/↓", "next field"),
            Keybinding::new("←/→", "cursor / choose"),
            Keybinding::new("enter", "save"),
            Keybinding::new("esc", "back"),
            Keybinding::new("ctrl-x", "dismiss alert"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Severity;
    use crate::users::model::User;

    fn api() -> UserApi {
        UserApi::new("http://localhost:8000").unwrap()
    }

    fn filled(screen: &mut FormScreen) {
        screen.firstname.set_value("Somchai");
        screen.lastname.set_value("Srisuk");
        screen.age.set_value("30");
        screen.gender.set_value(Some(Gender::Male));
        screen.phone.set_value("0812345678");
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

    fn sample_user() -> User {
        User {
            id: UserId::new("7"),
            firstname: "Somchai".to_string(),
            lastname: "Srisuk".to_string(),
            age: 30,
            gender: "ชาย".to_string(),
            phone: "0812345678".to_string(),
            interests: "เกม".to_string(),
            description: "ทดสอบ".to_string(),
        }
    }

    #[test]
    fn incomplete_submit_makes_no_call_and_raises_the_fixed_message() {
        let mut screen = FormScreen::create(api());
        screen.queue(FormMsg::Submit);
        let msg = screen.update().unwrap();
        assert!(matches!(msg, ScreenMsg::Idle), "no command may run");
        assert_eq!(screen.alert.severity(), Some(Severity::Error));
        assert_eq!(screen.alert.message(), Some(MSG_REQUIRED_FIELDS));
    }

    #[test]
    fn whitespace_only_required_field_blocks_submit() {
        let mut screen = FormScreen::create(api());
        filled(&mut screen);
        screen.firstname.set_value("   ");
        screen.queue(FormMsg::Submit);
        assert!(matches!(screen.update().unwrap(), ScreenMsg::Idle));
        assert_eq!(screen.alert.message(), Some(MSG_REQUIRED_FIELDS));
    }

    #[test]
    fn valid_create_submits_once_until_resolved() {
        let mut screen = FormScreen::create(api());
        filled(&mut screen);
        screen.queue(FormMsg::Submit);
        let msg = screen.update().unwrap();
        assert_eq!(command_names(&msg), vec!["Creating user"]);

        // a second submit while the first is in flight is ignored
        screen.queue(FormMsg::Submit);
        assert!(matches!(screen.update().unwrap(), ScreenMsg::Idle));
    }

    #[test]
    fn create_success_resets_the_draft() {
        let mut screen = FormScreen::create(api());
        filled(&mut screen);
        screen.saving = true;
        screen.queue(FormMsg::Created(sample_user()));
        screen.update().unwrap();
        assert_eq!(screen.alert.severity(), Some(Severity::Success));
        assert_eq!(screen.alert.message(), Some("สมัครสมาชิกสำเร็จ!"));
        assert_eq!(screen.draft(), UserDraft::default());
        assert!(!screen.saving);
    }

    #[test]
    fn create_failure_keeps_the_draft() {
        let mut screen = FormScreen::create(api());
        filled(&mut screen);
        screen.saving = true;
        screen.queue(FormMsg::SaveFailed("500".to_string()));
        screen.update().unwrap();
        assert_eq!(
            screen.alert.message(),
            Some("เกิดข้อผิดพลาดในการสมัครสมาชิก")
        );
        assert_eq!(screen.draft().firstname, "Somchai");
    }

    #[test]
    fn edit_init_loads_the_record() {
        let mut screen = FormScreen::edit(api(), UserId::new("7"));
        screen.init();
        let msg = screen.update().unwrap();
        assert_eq!(command_names(&msg), vec!["Loading user 7"]);
        assert!(screen.loading);
    }

    #[test]
    fn edit_load_prefills_the_draft() {
        let mut screen = FormScreen::edit(api(), UserId::new("7"));
        screen.queue(FormMsg::Loaded(sample_user()));
        screen.update().unwrap();
        let draft = screen.draft();
        assert_eq!(draft.firstname, "Somchai");
        assert_eq!(draft.age, "30");
        assert_eq!(draft.gender, Some(Gender::Male));
    }

    #[test]
    fn edit_load_failure_leaves_an_empty_usable_form() {
        let mut screen = FormScreen::edit(api(), UserId::new("404"));
        screen.queue(FormMsg::LoadFailed("not found".to_string()));
        screen.update().unwrap();
        assert!(!screen.loading);
        assert_eq!(screen.alert.message(), Some("ไม่พบข้อมูลผู้ใช้"));
        assert_eq!(screen.draft(), UserDraft::default());
        // the form still accepts input
        screen.handle_key(key(KeyCode::Char('A')));
        assert_eq!(screen.draft().firstname, "A");
    }

    #[test]
    fn edit_success_schedules_the_delayed_return() {
        let mut screen = FormScreen::edit(api(), UserId::new("7"));
        screen.saving = true;
        screen.queue(FormMsg::Updated(sample_user()));
        let msg = screen.update().unwrap();
        assert_eq!(command_names(&msg), vec!["Returning to the user list"]);
        assert_eq!(screen.alert.message(), Some("แก้ไขข้อมูลสำเร็จ!"));

        screen.queue(FormMsg::ReturnToList);
        assert!(matches!(
            screen.update().unwrap(),
            ScreenMsg::Navigate(Route::Home)
        ));
    }

    #[test]
    fn phone_field_rejects_non_digit_keystrokes() {
        let mut screen = FormScreen::create(api());
        screen.focus = FormField::Phone;
        screen.apply_focus();
        screen.handle_key(key(KeyCode::Char('0')));
        screen.handle_key(key(KeyCode::Char('a')));
        screen.handle_key(key(KeyCode::Char('8')));
        assert_eq!(screen.draft().phone, "08");
    }

    #[test]
    fn pasted_text_with_non_digits_is_rejected_whole() {
        let mut screen = FormScreen::create(api());
        screen.focus = FormField::Phone;
        screen.apply_focus();
        screen.handle_paste("081-234-5678");
        assert_eq!(screen.draft().phone, "");
        screen.handle_paste("0812345678");
        assert_eq!(screen.draft().phone, "0812345678");
    }

    #[test]
    fn esc_returns_to_the_list() {
        let mut screen = FormScreen::create(api());
        screen.handle_key(key(KeyCode::Esc));
        assert!(matches!(
            screen.update().unwrap(),
            ScreenMsg::Navigate(Route::Home)
        ));
    }
}
