//! Supervised "cast and serve" invocations.
//!
//! `catt cast <local file>` serves the file itself and only returns once playback
//! ends, so it cannot be awaited inline. The caster spawns it as a tokio task,
//! waits a short grace period for an early failure, and keeps the final outcome
//! observable through [`BackgroundCaster::status`].

use crate::{ControlError, ControllerConfig, Result};
use parking_lot::Mutex;
use serde::Serialize;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CastStatus {
    Idle,
    Running { target: String },
    Finished { target: String },
    Failed { target: String, message: String },
}

struct Supervised {
    status: CastStatus,
    task: Option<JoinHandle<()>>,
    generation: u64,
}

#[derive(Clone)]
pub struct BackgroundCaster {
    program: String,
    device: String,
    grace: Duration,
    inner: Arc<Mutex<Supervised>>,
}

impl BackgroundCaster {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            program: config.program.clone(),
            device: config.device.clone(),
            grace: config.grace,
            inner: Arc::new(Mutex::new(Supervised {
                status: CastStatus::Idle,
                task: None,
                generation: 0,
            })),
        }
    }

    pub fn status(&self) -> CastStatus {
        self.inner.lock().status.clone()
    }

    /// Terminate the supervised process, if any.
    pub fn cancel(&self) {
        let mut inner = self.inner.lock();
        if let Some(task) = inner.task.take() {
            task.abort();
            info!("background cast cancelled");
        }
        inner.generation += 1;
        inner.status = CastStatus::Idle;
    }

    /// Start `cast <target>` in the background, replacing any running cast.
    ///
    /// Returns an error if the process cannot be spawned or exits non-zero
    /// within the grace period.
    pub async fn cast(&self, target: &str) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-d")
            .arg(&self.device)
            .arg("cast")
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|e| ControlError::Spawn {
            program: self.program.clone(),
            message: e.to_string(),
        })?;

        let (tx, rx) = oneshot::channel::<std::result::Result<(), String>>();
        let generation = {
            let mut inner = self.inner.lock();
            if let Some(previous) = inner.task.take() {
                previous.abort();
            }
            inner.generation += 1;
            inner.status = CastStatus::Running {
                target: target.to_string(),
            };
            inner.generation
        };

        let shared = Arc::clone(&self.inner);
        let target_owned = target.to_string();
        let task = tokio::spawn(async move {
            let outcome = match child.wait_with_output().await {
                Ok(out) if out.status.success() => Ok(()),
                Ok(out) => {
                    let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
                    if stderr.is_empty() {
                        Err(format!("exit code {}", out.status.code().unwrap_or(1)))
                    } else {
                        Err(stderr)
                    }
                }
                Err(e) => Err(e.to_string()),
            };

            {
                let mut inner = shared.lock();
                if inner.generation == generation {
                    inner.status = match &outcome {
                        Ok(()) => CastStatus::Finished {
                            target: target_owned.clone(),
                        },
                        Err(message) => CastStatus::Failed {
                            target: target_owned.clone(),
                            message: message.clone(),
                        },
                    };
                    inner.task = None;
                }
            }
            match &outcome {
                Ok(()) => info!(media = %target_owned, "background cast finished"),
                Err(message) => warn!(media = %target_owned, "background cast failed: {message}"),
            }
            let _ = tx.send(outcome);
        });

        {
            let mut inner = self.inner.lock();
            if inner.generation != generation {
                // Superseded by cancel() or a newer cast before the handle was stored.
                task.abort();
            } else if let CastStatus::Running { .. } = inner.status {
                inner.task = Some(task);
            }
        }

        match tokio::time::timeout(self.grace, rx).await {
            Ok(Ok(Err(message))) => Err(ControlError::CastFailed(message)),
            // Exited cleanly, was replaced, or is still serving after the grace period.
            Ok(Ok(Ok(()))) | Ok(Err(_)) | Err(_) => Ok(()),
        }
    }
}
