use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use tracing::debug;

use crate::Theme;
use crate::command::Command;
use crate::screens::{FormScreen, HomeScreen, Route, Screen, ScreenMsg};
use crate::tui::{Event, Tui};
use crate::ui::StatusBar;
use crate::users::UserApi;

const FRAME_RATE: f64 = 60.0;
const TICK_RATE: f64 = 4.0;

enum ActiveScreen {
    Home(HomeScreen),
    Form(FormScreen),
}

impl ActiveScreen {
    fn screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::Home(screen) => screen,
            Self::Form(screen) => screen,
        }
    }
}

/// Top-level application: owns the active screen, routes events to it,
/// and spawns the commands it returns.
///
/// Screen state is rebuilt from scratch on navigation; nothing is shared
/// across screens except the API client handle.
pub struct App {
    api: UserApi,
    theme: Theme,
    active: ActiveScreen,
    should_quit: bool,
    should_suspend: bool,
}

impl App {
    pub fn new(api: UserApi, theme: Theme) -> Self {
        let home = HomeScreen::new(api.clone());
        Self {
            api,
            theme,
            active: ActiveScreen::Home(home),
            should_quit: false,
            should_suspend: false,
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new(FRAME_RATE, TICK_RATE)?;
        tui.enter()?;

        self.active.screen_mut().init();
        self.drive()?;

        loop {
            let Some(event) = tui.next_event().await else {
                break;
            };

            match event {
                Event::Quit => self.should_quit = true,
                Event::Tick => self.active.screen_mut().on_tick(),
                Event::Render => self.draw(&mut tui)?,
                Event::Resize(width, height) => {
                    tui.resize(Rect::new(0, 0, width, height))?;
                    self.draw(&mut tui)?;
                }
                Event::Key(key) => self.handle_key(key),
                Event::Paste(text) => self.active.screen_mut().handle_paste(&text),
                Event::Mouse(mouse) => self.active.screen_mut().handle_mouse(&mouse),
                Event::Error(error) => tracing::error!(%error, "Terminal event error"),
                _ => {}
            }

            self.drive()?;

            if self.should_suspend {
                self.should_suspend = false;
                tui.suspend()?;
                tui.enter()?;
                tui.clear()?;
            } else if self.should_quit {
                break;
            }
        }

        tui.exit()?;
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.active.screen_mut().handle_key(key) {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('z') {
            self.should_suspend = true;
        }
    }

    /// Process screen messages until the screen settles, spawning any
    /// commands it produced along the way.
    fn drive(&mut self) -> color_eyre::Result<()> {
        loop {
            match self.active.screen_mut().update()? {
                ScreenMsg::Idle => break,
                ScreenMsg::Run(commands) => {
                    for command in commands {
                        Self::spawn(command);
                    }
                }
                ScreenMsg::Navigate(route) => self.navigate(route),
                ScreenMsg::Quit => {
                    self.should_quit = true;
                    break;
                }
            }
        }
        Ok(())
    }

    fn navigate(&mut self, route: Route) {
        debug!(?route, "Navigating");
        self.active = match route {
            Route::Home => ActiveScreen::Home(HomeScreen::new(self.api.clone())),
            Route::Register => ActiveScreen::Form(FormScreen::create(self.api.clone())),
            Route::Edit(id) => ActiveScreen::Form(FormScreen::edit(self.api.clone(), id)),
        };
        self.active.screen_mut().init();
    }

    fn spawn(command: Box<dyn Command>) {
        let name = command.name();
        debug!(%name, "Spawning command");
        tokio::spawn(async move {
            if let Err(error) = command.execute().await {
                tracing::error!(%error, %name, "Command failed");
            }
        });
    }

    fn draw(&mut self, tui: &mut Tui) -> color_eyre::Result<()> {
        let theme = self.theme;
        let screen = self.active.screen_mut();
        tui.draw(|frame| {
            let [content, status] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(frame.area());
            screen.render(frame, content, &theme);
            StatusBar::render(frame, status, &theme, &screen.keybindings());
        })?;
        Ok(())
    }
}
