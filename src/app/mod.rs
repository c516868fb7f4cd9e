use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::ListState;
use ratatui::Terminal;

use crate::board::ScheduleBoard;
use crate::config::AppConfig;
use crate::ui;

pub mod state;

pub use state::{AppState, FocusPane, ListRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Quit,
    CursorDown,
    CursorUp,
    CursorFirst,
    CursorLast,
    ToggleFocus,
    StartSearch,
    ClearSearch,
    OpenDetail,
    CloseDetail,
}

pub struct App {
    pub config: Arc<AppConfig>,
    state: AppState,
    list_state: ListState,
    should_quit: bool,
    poll_interval: Duration,
}

impl App {
    pub fn new(config: Arc<AppConfig>, board: ScheduleBoard) -> Self {
        tracing::info!(
            records = board.catalog().len(),
            day = %board.current_day(),
            "starting staff board session"
        );
        Self {
            config,
            state: AppState::new(board),
            list_state: ListState::default(),
            should_quit: false,
            poll_interval: Duration::from_millis(250),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal
                .draw(|frame| {
                    ui::draw_app(frame, &self.state, &self.config, &mut self.list_state);
                })
                .context("rendering frame")?;

            if self.should_quit {
                break;
            }

            if event::poll(self.poll_interval).context("polling for terminal events")? {
                match event::read().context("reading terminal event")? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => {
                        // next draw picks up the new size
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.state.is_search_active() && self.handle_search_key(key) {
            return;
        }

        if let Some(action) = map_key(key) {
            self.handle_action(action);
        }
    }

    /// Returns true when the key was consumed by the search prompt.
    fn handle_search_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.state.cancel_search();
                true
            }
            KeyCode::Enter => {
                self.state.finish_search();
                true
            }
            KeyCode::Backspace => {
                self.state.pop_search_grapheme();
                true
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.clear_search();
                true
            }
            KeyCode::Char(ch) if !has_command_modifier(key.modifiers) => {
                self.state.push_search_char(ch);
                true
            }
            _ => false,
        }
    }

    fn handle_action(&mut self, action: Action) {
        self.state.set_status_message(None::<String>);
        match action {
            Action::Quit => self.should_quit = true,
            Action::CursorDown => self.state.move_cursor(1),
            Action::CursorUp => self.state.move_cursor(-1),
            Action::CursorFirst => self.state.jump_first(),
            Action::CursorLast => self.state.jump_last(),
            Action::ToggleFocus => self.state.toggle_focus(),
            Action::StartSearch => self.state.begin_search(),
            Action::ClearSearch => self.state.clear_search(),
            Action::OpenDetail => {
                if let Err(err) = self.state.select_under_cursor() {
                    tracing::error!(%err, "failed to open staff details");
                    self.state.set_status_message(Some(err.to_string()));
                }
            }
            Action::CloseDetail => {
                if !self.state.clear_selection() && !self.state.search_query().is_empty() {
                    self.state.clear_search();
                }
            }
        }
    }
}

fn has_command_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
}

fn map_key(key: KeyEvent) -> Option<Action> {
    let plain = !has_command_modifier(key.modifiers);
    match key.code {
        KeyCode::Char('q') if plain => Some(Action::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::ClearSearch)
        }
        KeyCode::Char('j') | KeyCode::Down if plain => Some(Action::CursorDown),
        KeyCode::Char('k') | KeyCode::Up if plain => Some(Action::CursorUp),
        KeyCode::Char('g') | KeyCode::Home if plain => Some(Action::CursorFirst),
        KeyCode::Char('G') | KeyCode::End => Some(Action::CursorLast),
        KeyCode::Tab => Some(Action::ToggleFocus),
        KeyCode::Char('/') if plain => Some(Action::StartSearch),
        KeyCode::Enter => Some(Action::OpenDetail),
        KeyCode::Esc => Some(Action::CloseDetail),
        _ => None,
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen).context("switching to alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal backend")?;
    terminal.hide_cursor().context("hiding cursor")?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal.show_cursor().ok();
    disable_raw_mode().context("disabling raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("restoring screen state")?;
    Ok(())
}
