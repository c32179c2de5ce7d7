use crate::{CommandOutput, ControlError, ControllerConfig, DeviceController, Result};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Controller backed by the `catt` command-line tool (or anything with the same CLI).
pub struct CattController {
    config: ControllerConfig,
}

impl CattController {
    pub fn new(config: ControllerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    async fn exec(&self, command: &str, args: &[&str], timeout: Duration) -> Result<CommandOutput> {
        let mut cmd = Command::new(&self.config.program);
        cmd.arg("-d")
            .arg(&self.config.device)
            .arg(command)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        // Dropping the `output()` future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(timeout, cmd.output()).await {
            Err(_) => return Err(ControlError::Timeout(timeout)),
            Ok(res) => res.map_err(|e| ControlError::Spawn {
                program: self.config.program.clone(),
                message: e.to_string(),
            })?,
        };

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code().unwrap_or(1),
            timed_out: false,
        })
    }
}

#[async_trait]
impl DeviceController for CattController {
    fn device(&self) -> &str {
        &self.config.device
    }

    fn default_timeout(&self) -> Duration {
        self.config.timeout
    }

    async fn run_with_timeout(
        &self,
        command: &str,
        args: &[&str],
        timeout: Duration,
    ) -> CommandOutput {
        match self.exec(command, args, timeout).await {
            Ok(out) => {
                debug!(command, code = out.code, "controller finished");
                out
            }
            Err(e) => {
                warn!(command, "controller invocation failed: {e}");
                CommandOutput::from_error(&e)
            }
        }
    }
}
