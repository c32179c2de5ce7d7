use crate::ControlError;
use serde::Serialize;
use std::time::Duration;

/// Step used by `volumeup` / `volumedown`.
pub const VOLUME_STEP: u8 = 10;

/// Clamp a requested volume into `0..=100`.
pub fn clamp_volume(requested: i64) -> u8 {
    requested.clamp(0, 100) as u8
}

/// Captured result of one controller invocation.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub code: i32,
    /// Set when the invocation was killed by its timeout.
    pub timed_out: bool,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            ..Self::default()
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stderr: stderr.into(),
            code,
            ..Self::default()
        }
    }

    /// Render an invocation error the way the controller contract expects:
    /// empty stdout, the error on stderr, exit code 1.
    pub fn from_error(err: &ControlError) -> Self {
        match err {
            ControlError::Timeout(_) => Self {
                stderr: "Timeout".to_string(),
                code: 1,
                timed_out: true,
                ..Self::default()
            },
            other => Self::failed(1, other.to_string()),
        }
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Human-readable message: `ok_message` on success, otherwise stderr.
    pub fn message(&self, ok_message: &str) -> String {
        if self.success() {
            ok_message.to_string()
        } else if self.stderr.trim().is_empty() {
            format!("command failed with exit code {}", self.code)
        } else {
            self.stderr.trim().to_string()
        }
    }
}

#[derive(Clone, Debug)]
pub struct ControllerConfig {
    /// Controller executable, `catt` unless overridden.
    pub program: String,
    /// Target device name passed with `-d`.
    pub device: String,
    /// Timeout for ordinary invocations.
    pub timeout: Duration,
    /// Timeout for casts that resolve remote media first (videos).
    pub cast_timeout: Duration,
    /// How long a background cast must survive before it counts as started.
    pub grace: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            program: "catt".to_string(),
            device: "Familienzimmer".to_string(),
            timeout: Duration::from_secs(10),
            cast_timeout: Duration::from_secs(30),
            grace: Duration::from_secs(2),
        }
    }
}
