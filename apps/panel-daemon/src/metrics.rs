use cast_control::CommandOutput;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct PanelMetrics {
    pub registry: Registry,
    pub commands: IntCounterVec,
    pub command_failures: IntCounterVec,
    pub chats: IntCounter,
    pub degraded_chats: IntCounter,
}

impl PanelMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let commands = IntCounterVec::new(
            Opts::new("panel_controller_commands_total", "Controller invocations"),
            &["command"],
        )?;
        let command_failures = IntCounterVec::new(
            Opts::new(
                "panel_controller_failures_total",
                "Controller invocations that failed or timed out",
            ),
            &["command"],
        )?;
        let chats = IntCounter::new("panel_chats_total", "Assistant conversations")?;
        let degraded_chats = IntCounter::new(
            "panel_chats_degraded_total",
            "Assistant conversations answered with the fallback reply",
        )?;
        registry.register(Box::new(commands.clone()))?;
        registry.register(Box::new(command_failures.clone()))?;
        registry.register(Box::new(chats.clone()))?;
        registry.register(Box::new(degraded_chats.clone()))?;
        Ok(Self {
            registry,
            commands,
            command_failures,
            chats,
            degraded_chats,
        })
    }

    pub fn observe(&self, command: &str, out: &CommandOutput) {
        self.commands.with_label_values(&[command]).inc();
        if !out.success() {
            self.command_failures.with_label_values(&[command]).inc();
        }
    }

    pub fn encode_text(&self) -> String {
        let mut buf = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buf) {
            return format!("error encoding metrics: {e}");
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}
