//! Session loop background task
//!
//! The session controller lives inside this single task. Start requests,
//! ticks, visibility changes and queries all arrive on one command queue and
//! are handled one at a time.

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use crate::{
    controller::{SessionController, SessionError, SessionSettings, TickHandle, Transition},
    services::{
        ChannelPresenter, NotificationLog, RequestPrompt, StartAnswers, StatusLine, TokioTicker,
    },
    state::{FocusTime, SessionSnapshot},
};

const COMMAND_QUEUE_SIZE: usize = 64;

/// Commands handled by the session loop
pub enum SessionCommand {
    Start {
        answers: StartAnswers,
        reply: oneshot::Sender<Result<SessionSnapshot, SessionError>>,
    },
    Tick(TickHandle),
    Visibility {
        focused: bool,
        reply: oneshot::Sender<SessionSnapshot>,
    },
    ReportFocusTime {
        reply: oneshot::Sender<FocusTime>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

/// Endpoints the rest of the daemon uses to talk to the session loop
#[derive(Debug, Clone)]
pub struct SessionChannels {
    pub commands: mpsc::Sender<SessionCommand>,
    pub snapshot_rx: watch::Receiver<SessionSnapshot>,
    pub status_rx: watch::Receiver<StatusLine>,
    pub notifications: NotificationLog,
}

pub struct SessionLoop {
    controller: SessionController<TokioTicker, ChannelPresenter>,
    commands: mpsc::Receiver<SessionCommand>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl SessionLoop {
    /// Build the controller with its tokio-backed collaborators
    pub fn new(settings: &SessionSettings) -> (Self, SessionChannels) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_QUEUE_SIZE);
        let (status_tx, status_rx) = watch::channel(StatusLine::default());
        let notifications = NotificationLog::default();

        let presenter = ChannelPresenter::new(status_tx, notifications.clone());
        let ticker = TokioTicker::new(command_tx.clone());
        let controller = SessionController::new(settings, ticker, presenter);

        let (snapshot_tx, snapshot_rx) = watch::channel(SessionSnapshot::new(
            controller.state(),
            controller.is_ticking(),
        ));

        let session_loop = Self {
            controller,
            commands: command_rx,
            snapshot_tx,
        };
        let channels = SessionChannels {
            commands: command_tx,
            snapshot_rx,
            status_rx,
            notifications,
        };
        (session_loop, channels)
    }

    /// Handle commands until a shutdown command arrives
    pub async fn run(mut self) {
        info!("Starting session loop");

        while let Some(command) = self.commands.recv().await {
            match command {
                SessionCommand::Start { answers, reply } => {
                    let mut prompt = RequestPrompt::new(answers);
                    let started = self.controller.start(&mut prompt).map(|_| ());
                    let result = started.map(|()| self.snapshot());
                    if reply.send(result).is_err() {
                        warn!("Start requester went away before the reply");
                    }
                }
                SessionCommand::Tick(handle) => {
                    if let Some(transition) = self.controller.handle_tick(handle) {
                        log_transition(transition);
                    }
                }
                SessionCommand::Visibility { focused, reply } => {
                    debug!("Visibility changed: focused={}", focused);
                    self.controller.visibility_changed(focused);
                    let _ = reply.send(self.snapshot());
                }
                SessionCommand::ReportFocusTime { reply } => {
                    let _ = reply.send(self.controller.report_focus_time());
                }
                SessionCommand::Shutdown { reply } => {
                    info!("Tearing down session");
                    self.controller.teardown();
                    self.publish();
                    let _ = reply.send(());
                    break;
                }
            }

            self.publish();
        }

        info!("Session loop stopped");
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(self.controller.state(), self.controller.is_ticking())
    }

    fn publish(&self) {
        self.snapshot_tx.send_if_modified(|current| {
            let next = self.snapshot();
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }
}

fn log_transition(transition: Transition) {
    match transition {
        Transition::BreakStarted { session } => debug!("Session {} entered break", session),
        Transition::SessionStarted { session } => debug!("Session {} entered focus", session),
        Transition::Completed { sessions } => debug!("Run of {} sessions finished", sessions),
    }
}
