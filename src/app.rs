// The central application controller and event loop.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use std::time::{Duration, Instant};

pub mod classifier;
pub mod controller;
pub mod display;
pub mod model;
pub mod sc;
pub mod ui;

use controller::ToggleController;
use display::{Display, Panel};
use model::{Action, ToggleIntent};
use sc::ServiceControl;

/// How long to wait for input when no toggle is pending.
const IDLE_TICK: Duration = Duration::from_millis(250);

pub struct App<S: ServiceControl> {
    controller: ToggleController<S>,
    panel: Panel,
    elevated: bool,
    should_quit: bool,
}

impl<S: ServiceControl> App<S> {
    pub fn new(controller: ToggleController<S>, elevated: bool) -> Self {
        Self {
            controller,
            panel: Panel::new(),
            elevated,
            should_quit: false,
        }
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    /// Startup banner plus the initial status check.
    pub fn start(&mut self) {
        if !self.elevated {
            tracing::warn!("not running elevated; service commands will likely be denied");
        }
        self.panel
            .append_log("Program started. Waiting for button presses...".to_string());
        self.controller.refresh(&mut self.panel);
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.start();

        loop {
            let busy = self.controller.is_busy();
            terminal.draw(|f| ui::render(f, &mut self.panel, self.elevated, busy))?;

            // Wake up in time for a pending Fix 1 continuation.
            let timeout = self
                .controller
                .next_deadline()
                .map(|due| due.saturating_duration_since(Instant::now()))
                .unwrap_or(IDLE_TICK);

            if crossterm::event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, Instant::now());
                    }
                }
            }

            self.tick(Instant::now());

            if self.should_quit {
                tracing::info!("quitting");
                return Ok(());
            }
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, now: Instant) {
        match code {
            KeyCode::Char('j') => self.panel.scroll_down(),
            KeyCode::Char('k') => self.panel.scroll_up(),
            KeyCode::Char('G') => self.panel.resume_auto_scroll(),
            other => {
                if let Some(action) = action_for_key(other) {
                    self.dispatch(action, now);
                }
            }
        }
    }

    pub fn dispatch(&mut self, action: Action, now: Instant) {
        tracing::debug!("action {:?}", action);
        match action {
            Action::Panic => self.panel.append_log("PANIC button pressed!".to_string()),
            Action::Toggle(intent) => self.controller.apply(intent, &mut self.panel, now),
            Action::CheckStatus => self.controller.refresh(&mut self.panel),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Fires a pending continuation whose deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        self.controller.run_due(&mut self.panel, now);
    }
}

pub fn action_for_key(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Char('p') => Action::Panic,
        KeyCode::Char('1') => Action::Toggle(ToggleIntent::ApplyPrimary),
        KeyCode::Char('u') => Action::Toggle(ToggleIntent::UndoPrimary),
        KeyCode::Char('2') => Action::Toggle(ToggleIntent::ApplySecondary),
        KeyCode::Char('i') => Action::Toggle(ToggleIntent::UndoSecondary),
        KeyCode::Char('c') => Action::CheckStatus,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// Headless status check: one query, printed to stdout.
pub fn check_once<S: ServiceControl>(controller: &ToggleController<S>) {
    let mut panel = Panel::new();
    controller.refresh(&mut panel);
    for entry in panel.log.entries() {
        println!("{entry}");
    }
    println!("Fix 1 Status: {}", panel.status.label());
}
