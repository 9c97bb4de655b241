//! Event loop for the terminal client.
//!
//! Terminal input and backend results both end up in the `App` reducer. Each
//! effect it returns runs as its own tokio task and reports back through the
//! inbox channel, so the loop never waits on the network.

pub mod terminal;

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;

use crate::{
    app::{App, AppEvent, Effect},
    services::api_client::ChatApi,
    ui,
};
use terminal::Tui;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const TICK_EVERY: u32 = 6;

/// Performs one effect against the backend and returns its result event.
pub async fn execute<A: ChatApi + ?Sized>(api: &A, effect: Effect) -> AppEvent {
    match effect {
        Effect::LoadSessions { seq } => AppEvent::SessionsLoaded {
            seq,
            result: api.list_sessions().await,
        },
        Effect::LoadHistory(ticket) => {
            let result = api.get_history(&ticket.session_id).await;
            AppEvent::HistoryLoaded { ticket, result }
        }
        Effect::SendMessage(req) => {
            let result = api
                .send_message(&req.content, req.ticket.session_id.as_deref())
                .await;
            AppEvent::MessageSent {
                ticket: req.ticket,
                result,
            }
        }
        Effect::DeleteSession { session_id } => {
            let result = api.delete_session(&session_id).await;
            AppEvent::SessionDeleted { session_id, result }
        }
        Effect::CreateSession { name } => AppEvent::SessionCreated(api.create_session(&name).await),
    }
}

pub struct Runtime {
    app: App,
    api: Arc<dyn ChatApi>,
    inbox_tx: mpsc::UnboundedSender<AppEvent>,
    inbox_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl Runtime {
    pub fn new(app: App, api: Arc<dyn ChatApi>) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            app,
            api,
            inbox_tx,
            inbox_rx,
        }
    }

    /// Runs until the user quits.
    pub fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        let effects = self.app.initialize();
        self.execute_effects(effects);

        let mut dirty = true;
        let mut polls: u32 = 0;
        while !self.app.should_quit() {
            if dirty {
                terminal.draw(|frame| ui::render(frame, &self.app))?;
                dirty = false;
            }

            while let Ok(event) = self.inbox_rx.try_recv() {
                let effects = self.app.apply(event);
                self.execute_effects(effects);
                dirty = true;
            }

            if event::poll(POLL_INTERVAL)? {
                dirty |= self.handle_terminal_event(event::read()?);
            }

            polls = polls.wrapping_add(1);
            if self.app.pane().is_typing() && polls % TICK_EVERY == 0 {
                self.app.on_tick();
                dirty = true;
            }
        }

        tracing::info!("exiting");
        Ok(())
    }

    fn handle_terminal_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let effects = self.app.handle_key(key);
                self.execute_effects(effects);
                true
            }
            Event::Paste(text) => {
                self.app.handle_paste(&text);
                true
            }
            Event::Resize(_, _) => true,
            _ => false,
        }
    }

    fn execute_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            self.spawn_effect(effect);
        }
    }

    fn spawn_effect(&self, effect: Effect) {
        tracing::trace!(?effect, "spawning effect");
        let api = Arc::clone(&self.api);
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let event = execute(api.as_ref(), effect).await;
            // The receiver only goes away on shutdown.
            let _ = tx.send(event);
        });
    }
}
