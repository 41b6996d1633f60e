//! Tick source built on tokio interval tasks

use std::{collections::HashMap, time::Duration};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::debug;

use crate::{
    controller::{TickHandle, TickSource},
    tasks::SessionCommand,
};

/// Spawns one interval task per started handle, each feeding ticks into the
/// session command queue
pub struct TokioTicker {
    commands: mpsc::Sender<SessionCommand>,
    next_id: u64,
    tasks: HashMap<u64, JoinHandle<()>>,
}

impl TokioTicker {
    pub fn new(commands: mpsc::Sender<SessionCommand>) -> Self {
        Self {
            commands,
            next_id: 0,
            tasks: HashMap::new(),
        }
    }

    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }
}

impl TickSource for TokioTicker {
    fn start(&mut self, period: Duration) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle::new(self.next_id);
        let commands = self.commands.clone();

        let task = tokio::spawn(async move {
            let mut interval = interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;
                if commands.send(SessionCommand::Tick(handle)).await.is_err() {
                    debug!("Session queue closed, stopping tick task {}", handle.id());
                    break;
                }
            }
        });

        debug!("Started tick task {} every {:?}", handle.id(), period);
        self.tasks.insert(handle.id(), task);
        handle
    }

    fn stop(&mut self, handle: TickHandle) {
        if let Some(task) = self.tasks.remove(&handle.id()) {
            task.abort();
            debug!("Stopped tick task {}", handle.id());
        }
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
