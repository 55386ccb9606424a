//! Dashboard runtime - owns the terminal, runs the event loop, executes
//! effects.
//!
//! This is the boundary where side effects happen: the reducer stays pure and
//! produces effects; this module spawns the network calls and feeds their
//! results back through the inbox channel.

mod handlers;

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use runboard_core::client::ApiClient;
use runboard_core::config::Config;
use runboard_core::filter::FilterState;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskId, TaskKind};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Cadence of `Tick` events (notification expiry, auto-refresh countdown).
const TICK_INTERVAL: Duration = Duration::from_millis(250);
/// How long the loop blocks waiting for terminal input when idle.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Full-screen dashboard runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    pub state: AppState,
    client: ApiClient,
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    handle: tokio::runtime::Handle,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates a new runtime. Must be called from within a tokio runtime.
    pub fn new(config: Config, filter: FilterState, auto_refresh: bool) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let client = ApiClient::new(config.server_url.clone());
        let state = AppState::new(config, filter, auto_refresh);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let handle = tokio::runtime::Handle::current();

        Ok(Self {
            terminal,
            state,
            client,
            inbox_tx,
            inbox_rx,
            handle,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;

        // Kick off the initial load and paint the loading state right away.
        let effects = update::initial_effects(&mut self.state);
        self.execute_effects(effects);
        self.terminal
            .draw(|frame| render::render(&self.state, frame))?;

        let result = self.event_loop();

        let _ = terminal::disable_input_features();
        terminal::restore_terminal()?;
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        while !self.state.should_quit {
            let mut events = self.collect_events()?;

            if events.is_empty() {
                // Block briefly for the next terminal event; inbox results and
                // ticks get picked up on the following iteration.
                if crossterm::event::poll(POLL_INTERVAL)? {
                    events.push(UiEvent::Terminal(crossterm::event::read()?));
                } else {
                    continue;
                }
            }

            for event in events {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            self.terminal
                .draw(|frame| render::render(&self.state, frame))?;
        }

        Ok(())
    }

    /// Collects pending events without blocking: terminal input, async
    /// completions from the inbox, and the timer tick.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while crossterm::event::poll(Duration::ZERO)? {
            events.push(UiEvent::Terminal(crossterm::event::read()?));
        }

        while let Ok(event) = self.inbox_rx.try_recv() {
            events.push(event);
        }

        if self.last_tick.elapsed() >= TICK_INTERVAL {
            self.last_tick = Instant::now();
            events.push(UiEvent::Tick);
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::FetchEvents { task } => {
                let token = self.register_task(TaskKind::Events, task);
                let client = self.client.clone();
                let tx = self.inbox_tx.clone();
                self.handle.spawn(async move {
                    if let Some(event) = handlers::load_events(client, task, token).await {
                        let _ = tx.send(event);
                    }
                });
            }
            UiEffect::TriggerRefresh { task, trigger } => {
                let token = self.register_task(TaskKind::Refresh, task);
                let client = self.client.clone();
                let tx = self.inbox_tx.clone();
                self.handle.spawn(async move {
                    if let Some(event) =
                        handlers::trigger_refresh(client, task, trigger, token).await
                    {
                        let _ = tx.send(event);
                    }
                });
            }
            UiEffect::FetchStats { task, announce } => {
                let token = self.register_task(TaskKind::Stats, task);
                let client = self.client.clone();
                let tx = self.inbox_tx.clone();
                self.handle.spawn(async move {
                    if let Some(event) = handlers::load_stats(client, task, announce, token).await {
                        let _ = tx.send(event);
                    }
                });
            }
            UiEffect::CancelTask { token } => token.cancel(),
        }
    }

    /// Records the spawned task in the reducer's registry and returns its
    /// cancellation token.
    fn register_task(&mut self, kind: TaskKind, id: TaskId) -> CancellationToken {
        let token = CancellationToken::new();
        let effects = update::update(
            &mut self.state,
            UiEvent::TaskStarted {
                kind,
                id,
                cancel: token.clone(),
            },
        );
        debug_assert!(effects.is_empty());
        token
    }
}
