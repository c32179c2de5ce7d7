use crate::{CommandOutput, DeviceController};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

/// A recorded controller call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invocation {
    pub command: String,
    pub args: Vec<String>,
}

/// In-process controller that records calls and replays scripted outputs.
///
/// Commands without a scripted response succeed with empty output.
pub struct MockController {
    device: String,
    responses: Mutex<HashMap<String, CommandOutput>>,
    calls: Mutex<Vec<Invocation>>,
}

impl MockController {
    pub fn new() -> Self {
        Self {
            device: "mock".to_string(),
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(self, command: &str, output: CommandOutput) -> Self {
        self.set_response(command, output);
        self
    }

    pub fn set_response(&self, command: &str, output: CommandOutput) {
        self.responses.lock().insert(command.to_string(), output);
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl Default for MockController {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceController for MockController {
    fn device(&self) -> &str {
        &self.device
    }

    fn default_timeout(&self) -> Duration {
        Duration::from_secs(10)
    }

    async fn run_with_timeout(
        &self,
        command: &str,
        args: &[&str],
        _timeout: Duration,
    ) -> CommandOutput {
        self.calls.lock().push(Invocation {
            command: command.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        });
        self.responses
            .lock()
            .get(command)
            .cloned()
            .unwrap_or_default()
    }
}
