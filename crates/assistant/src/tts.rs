//! Speech synthesis through the `edge-tts` command line tool.

use crate::{AssistantError, Result, SpeechSynthesizer};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Swiss German female neural voice
pub const DEFAULT_VOICE: &str = "de-CH-LeniNeural";

#[derive(Debug, Clone)]
pub struct EdgeTtsConfig {
    pub program: String,
    pub voice: String,
    pub timeout: Duration,
}

impl Default for EdgeTtsConfig {
    fn default() -> Self {
        Self {
            program: "edge-tts".to_string(),
            voice: DEFAULT_VOICE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct EdgeTtsSynth {
    config: EdgeTtsConfig,
}

impl EdgeTtsSynth {
    pub fn new(config: EdgeTtsConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SpeechSynthesizer for EdgeTtsSynth {
    async fn synthesize(&self, text: &str, out_path: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.config.program);
        cmd.arg("--voice")
            .arg(&self.config.voice)
            .arg("--text")
            .arg(text)
            .arg("--write-media")
            .arg(out_path)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.config.timeout, cmd.output())
            .await
            .map_err(|_| AssistantError::SpeechTimeout(self.config.timeout))?
            .map_err(|e| AssistantError::Speech(format!("{}: {e}", self.config.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AssistantError::Speech(format!(
                "{} exited with {}: {stderr}",
                self.config.program,
                output.status.code().unwrap_or(-1)
            )));
        }
        if tokio::fs::metadata(out_path).await.is_err() {
            return Err(AssistantError::Speech(format!(
                "no audio written to {}",
                out_path.display()
            )));
        }
        tracing::debug!("synthesized {} chars to {}", text.chars().count(), out_path.display());
        Ok(())
    }

    fn voice(&self) -> &str {
        &self.config.voice
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn synth(program: &str, timeout: Duration) -> EdgeTtsSynth {
        EdgeTtsSynth::new(EdgeTtsConfig {
            program: program.to_string(),
            timeout,
            ..EdgeTtsConfig::default()
        })
    }

    #[tokio::test]
    async fn missing_program_is_a_speech_error() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let result = synth("/nonexistent/edge-tts", Duration::from_secs(1))
            .synthesize("Hoi", &dir.path().join("a.mp3"))
            .await;
        assert!(matches!(result, Err(AssistantError::Speech(_))));
        Ok(())
    }

    #[tokio::test]
    async fn success_without_output_file_is_an_error() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let result = synth("true", Duration::from_secs(1))
            .synthesize("Hoi", &dir.path().join("a.mp3"))
            .await;
        assert!(matches!(result, Err(AssistantError::Speech(msg)) if msg.contains("no audio")));
        Ok(())
    }

    #[tokio::test]
    async fn non_zero_exit_is_an_error() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let result = synth("false", Duration::from_secs(1))
            .synthesize("Hoi", &dir.path().join("a.mp3"))
            .await;
        assert!(matches!(result, Err(AssistantError::Speech(msg)) if msg.contains("exited")));
        Ok(())
    }

    #[test]
    fn default_voice() {
        assert_eq!(synth("edge-tts", Duration::from_secs(1)).voice(), "de-CH-LeniNeural");
    }
}
