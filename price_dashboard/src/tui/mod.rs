//! Terminal front end: owns the event loop, the poll timer and one task per
//! in-flight request.

pub mod input;
pub mod render;
pub mod terminal;

use std::{
    collections::HashMap,
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event};
use ratatui::{Terminal, backend::Backend};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
    time::{MissedTickBehavior, interval, timeout},
};
use tracing::{debug, info, warn};

use crate::{
    api::request::{RequestKind, Response},
    config::DashboardConfig,
    controller::{Action, Controller, Ticket},
    errors::ClientError,
    tui::{
        input::{Command, Focus, map_key},
        render::ViewState,
    },
};

const INPUT_POLL: Duration = Duration::from_millis(50);

/// A finished request on its way back to the controller.
#[derive(Debug)]
pub struct Completion {
    pub ticket: Ticket,
    pub outcome: Result<Response, ClientError>,
}

pub struct App {
    controller: Controller,
    view: ViewState,
    tasks: HashMap<RequestKind, JoinHandle<()>>,
    completion_tx: UnboundedSender<Completion>,
    completion_rx: UnboundedReceiver<Completion>,
    poll_interval: Duration,
    teardown_grace: Duration,
    should_quit: bool,
}

impl App {
    pub fn new(controller: Controller, config: &DashboardConfig) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            view: ViewState::default(),
            tasks: HashMap::new(),
            completion_tx,
            completion_rx,
            poll_interval: config.poll_interval(),
            teardown_grace: config.teardown_grace(),
            should_quit: false,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sends `action`'s request on its own task. A still-running user action
    /// of the same kind is aborted; its answer would be discarded anyway.
    /// Polled refreshes are skipped instead while one is still running.
    pub fn dispatch(&mut self, action: Action) {
        let Some(request) = self.controller.prepare(action) else {
            return;
        };
        let kind = request.kind();
        if kind.polled() && self.controller.is_in_flight(kind) {
            debug!(?kind, "previous refresh still running, skipping");
            return;
        }
        let ticket = self.controller.issue(&request);

        if let Some(previous) = self.tasks.remove(&ticket.kind) {
            previous.abort();
        }

        let api = self.controller.api();
        let tx = self.completion_tx.clone();
        let handle = tokio::spawn(async move {
            let outcome = request.execute(api.as_ref()).await;
            let _ = tx.send(Completion { ticket, outcome });
        });
        self.tasks.insert(ticket.kind, handle);
    }

    fn apply(&mut self, completion: Completion) {
        let follow_ups = self
            .controller
            .complete(completion.ticket, completion.outcome);
        for action in follow_ups {
            self.dispatch(action);
        }
    }

    /// One tick of the status timer.
    pub fn poll_tick(&mut self) {
        self.dispatch(Action::CheckStatus);
    }

    /// Applies every completion that has already arrived.
    pub fn drain_completions(&mut self) {
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.apply(completion);
        }
    }

    /// Waits for the next completion and applies it.
    pub async fn process_next(&mut self) -> bool {
        match self.completion_rx.recv().await {
            Some(completion) => {
                self.apply(completion);
                true
            }
            None => false,
        }
    }

    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Quit => self.should_quit = true,
            Command::Run(action) => {
                if self.controller.is_enabled(action) {
                    self.dispatch(action);
                } else {
                    debug!(?action, "ignoring disabled control");
                }
            }
            Command::ClearLogs => self.controller.clear_logs(),
            Command::FocusNext => self.view.focus = self.view.focus.next(),
            Command::FocusPrev => self.view.focus = self.view.focus.prev(),
            Command::Cycle(forward) => {
                match self.view.focus {
                    Focus::Symbol => self.controller.cycle_symbol(forward),
                    Focus::Timeframe => self.controller.cycle_timeframe(forward),
                    Focus::Path | Focus::Chart => false,
                };
            }
            Command::Type(c) => self.controller.path_input_mut().push(c),
            Command::Backspace => {
                self.controller.path_input_mut().pop();
            }
            Command::Cursor(step) => self.move_cursor(step),
        }
    }

    fn move_cursor(&mut self, step: isize) {
        let len = self.controller.chart().points().len();
        if len == 0 {
            self.view.cursor = None;
            return;
        }
        let current = self.view.cursor.unwrap_or(len - 1);
        self.view.cursor = Some(current.saturating_add_signed(step).min(len - 1));
    }

    fn clamp_cursor(&mut self) {
        let len = self.controller.chart().points().len();
        self.view.cursor = match self.view.cursor {
            Some(_) if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => None,
        };
    }

    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let (tick_tx, mut tick_rx) = mpsc::unbounded_channel::<()>();
        let period = self.poll_interval;
        let ticker = tokio::spawn(async move {
            let mut ticks = interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticks.tick().await;
                if tick_tx.send(()).is_err() {
                    break;
                }
            }
        });

        let result = self.event_loop(terminal, &mut tick_rx).await;
        ticker.abort();
        self.shutdown().await;
        result
    }

    async fn event_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        ticks: &mut UnboundedReceiver<()>,
    ) -> io::Result<()> {
        while !self.should_quit {
            while ticks.try_recv().is_ok() {
                self.poll_tick();
            }
            self.drain_completions();
            self.controller.expire_toast(Instant::now());
            self.clamp_cursor();

            terminal.draw(|f| render::draw(f, &self.controller, self.view))?;

            if event::poll(INPUT_POLL)? {
                if let Event::Key(key) = event::read()? {
                    if let Some(command) = map_key(key, self.view.focus) {
                        self.handle(command);
                    }
                }
            }
            tokio::task::yield_now().await;
        }
        Ok(())
    }

    /// Aborts outstanding requests and, if a recording is active, gives the
    /// backend a bounded chance to stop it.
    pub async fn shutdown(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }

        let Some(request) = self.controller.teardown() else {
            return;
        };
        let api = self.controller.api();
        match timeout(self.teardown_grace, request.execute(api.as_ref())).await {
            Ok(Ok(_)) => info!("recording stopped on exit"),
            Ok(Err(e)) => warn!(error = %e, "failed to stop recording on exit"),
            Err(_) => warn!(
                grace_ms = self.teardown_grace.as_millis() as u64,
                "gave up stopping recording on exit"
            ),
        }
    }
}
