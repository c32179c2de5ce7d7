use crate::{clamp_volume, CommandOutput, VOLUME_STEP};
use async_trait::async_trait;
use std::time::Duration;

/// A device controller invoked as `<tool> -d <device> <command> [args...]`.
///
/// Invocations never fail at the type level: spawn errors and timeouts are folded
/// into a non-zero [`CommandOutput`] so callers can report them as `success: false`.
#[async_trait]
pub trait DeviceController: Send + Sync {
    /// Name of the device this controller targets.
    fn device(&self) -> &str;

    /// Timeout applied by [`DeviceController::run`].
    fn default_timeout(&self) -> Duration;

    /// Run one command with an explicit timeout.
    async fn run_with_timeout(
        &self,
        command: &str,
        args: &[&str],
        timeout: Duration,
    ) -> CommandOutput;

    /// Run one command with the default timeout.
    async fn run(&self, command: &str, args: &[&str]) -> CommandOutput {
        self.run_with_timeout(command, args, self.default_timeout())
            .await
    }

    async fn info(&self) -> CommandOutput {
        self.run("info", &[]).await
    }

    async fn play(&self) -> CommandOutput {
        self.run("play", &[]).await
    }

    async fn pause(&self) -> CommandOutput {
        self.run("pause", &[]).await
    }

    async fn stop(&self) -> CommandOutput {
        self.run("stop", &[]).await
    }

    async fn skip(&self) -> CommandOutput {
        self.run("skip", &[]).await
    }

    async fn seek(&self, time: &str) -> CommandOutput {
        self.run("seek", &[time]).await
    }

    /// Set absolute volume. Returns the clamped level actually forwarded.
    async fn set_volume(&self, requested: i64) -> (u8, CommandOutput) {
        let level = clamp_volume(requested);
        let level_arg = level.to_string();
        let out = self.run("volume", &[level_arg.as_str()]).await;
        (level, out)
    }

    async fn volume_up(&self) -> CommandOutput {
        let step = VOLUME_STEP.to_string();
        self.run("volumeup", &[step.as_str()]).await
    }

    async fn volume_down(&self) -> CommandOutput {
        let step = VOLUME_STEP.to_string();
        self.run("volumedown", &[step.as_str()]).await
    }

    /// Ask the device to fetch and play `url`.
    async fn cast(&self, url: &str, timeout: Duration) -> CommandOutput {
        self.run_with_timeout("cast", &[url], timeout).await
    }
}
