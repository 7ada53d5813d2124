//! Session controller task
//!
//! The controller owns the [`Session`] and drains the command queue one
//! command at a time, so toggle, split and reset never interleave with each
//! other. Readers only see the view it publishes after each command.

use std::{
    path::PathBuf,
    sync::Arc,
    time::Instant,
};
use chrono::Local;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    services::{default_destination, export_run, KeybindStore, RunDataStore},
    state::{Action, AppState, ClockStatus, Command, KeyId, KeybindMap, Session, SessionView},
    ui::Prompter,
    utils::format::format_time,
};
use super::keybind_config::keybind_dialog;

/// Whether the controller keeps running after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Stores the controller writes to
#[derive(Debug, Clone)]
pub struct Stores {
    pub run_data: RunDataStore,
    pub keybinds: KeybindStore,
    pub export_dir: PathBuf,
}

pub struct SessionController<P> {
    state: Arc<AppState>,
    session: Session,
    keybinds: KeybindMap,
    stores: Stores,
    prompter: P,
}

impl<P> SessionController<P>
where
    P: Prompter + Clone + 'static,
{
    pub fn new(
        state: Arc<AppState>,
        session: Session,
        keybinds: KeybindMap,
        stores: Stores,
        prompter: P,
    ) -> Self {
        Self {
            state,
            session,
            keybinds,
            stores,
            prompter,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn keybinds(&self) -> &KeybindMap {
        &self.keybinds
    }

    /// Publish the current session view
    pub fn publish(&self) {
        self.state
            .publish(SessionView::from_session(&self.session, &self.keybinds));
    }

    pub async fn handle(&mut self, command: Command) -> Flow {
        self.handle_at(command, Instant::now()).await
    }

    /// Apply one command with `now` as the current instant
    pub async fn handle_at(&mut self, command: Command, now: Instant) -> Flow {
        // a new command dismisses the previous notice
        self.state.set_notice(None);

        match command {
            Command::Trigger(Action::StartPause) => {
                let status = self.session.toggle(now);
                info!("Stopwatch {}", status.label());
            }
            Command::Trigger(Action::Split) => match self.session.split(now) {
                Some(segment) => info!(
                    "Split {}: {} (total {})",
                    segment.index,
                    format_time(segment.segment_duration),
                    format_time(segment.cumulative_duration)
                ),
                None => debug!("Split ignored while {}", self.session.status().label()),
            },
            Command::Trigger(Action::Reset) => self.reset(now).await,
            Command::ClearSegments => self.clear_segments().await,
            Command::Configure => {
                tokio::spawn(keybind_dialog(Arc::clone(&self.state), self.prompter.clone()));
            }
            Command::Rebind { action, key } => self.rebind(action, key),
            Command::Quit => {
                self.close();
                return Flow::Quit;
            }
        }

        self.publish();
        Flow::Continue
    }

    async fn reset(&mut self, now: Instant) {
        if let Some(pending) = self.session.begin_reset(now) {
            // show the frozen time while the prompts are up
            self.publish();
            let final_duration = pending.final_duration;
            info!("Run finished at {}", format_time(final_duration));

            if pending.best_candidate {
                let question = match self.session.personal_best() {
                    Some(best) => format!(
                        "Your time of {} beats your PB of {}! Set as new personal best?",
                        format_time(final_duration),
                        format_time(best)
                    ),
                    None => format!(
                        "Set {} as your personal best?",
                        format_time(final_duration)
                    ),
                };
                if self.prompter.confirm(&question).await && self.session.adopt_best(final_duration) {
                    info!("New personal best: {}", format_time(final_duration));
                    self.stores
                        .run_data
                        .save(self.session.title(), &self.session.run_record());
                }
            }

            if self.prompter.confirm("Would you like to save this run?").await {
                self.export(final_duration);
            }
        }

        self.session.finish_reset();
        debug!("Stopwatch reset");
    }

    fn export(&self, final_duration: f64) {
        let at = Local::now();
        let destination =
            default_destination(&self.stores.export_dir, self.session.title().as_str(), at);
        match export_run(&destination, &self.session.snapshot(final_duration), at) {
            Ok(()) => self
                .prompter
                .notify(&format!("Run saved to {}", destination.display())),
            Err(e) => {
                warn!("{}", e);
                self.prompter.notify(&format!("Failed to save file: {}", e));
            }
        }
    }

    async fn clear_segments(&mut self) {
        if self.session.stopwatch().segments().is_empty() {
            return;
        }
        if self
            .prompter
            .confirm("Are you sure you want to clear all segments?")
            .await
        {
            let removed = self.session.clear_segments();
            info!("Cleared {} segments", removed);
        }
    }

    fn rebind(&mut self, action: Action, key: KeyId) {
        info!("Rebinding {} to {}", action, key);
        self.keybinds.set(action, key);
        self.stores.keybinds.save(&self.keybinds);
        self.state.hotkeys.rearm(&self.keybinds);
    }

    /// Best-effort save of the run record and keybinds before leaving
    pub fn close(&self) {
        info!(
            "Closing session for {} after {}",
            self.session.title(),
            self.state.get_uptime()
        );
        self.stores
            .run_data
            .save(self.session.title(), &self.session.run_record());
        self.stores.keybinds.save(&self.keybinds);
    }
}

/// Drain the command queue until quit or until every sender is gone
pub async fn session_controller_task<P>(
    mut controller: SessionController<P>,
    mut commands: mpsc::UnboundedReceiver<Command>,
) where
    P: Prompter + Clone + 'static,
{
    info!("Starting session controller for {}", controller.session().title());
    controller.publish();

    let mut closed = false;
    while let Some(command) = commands.recv().await {
        debug!("Controller received {:?}", command);
        if controller.handle(command).await == Flow::Quit {
            closed = true;
            break;
        }
    }

    if !closed {
        controller.close();
    }
    if controller.session().status() == ClockStatus::Running {
        debug!("Stopwatch was still running at exit");
    }
    info!("Session controller stopped");
}
