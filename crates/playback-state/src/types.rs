use serde::{Deserialize, Serialize};
use std::fmt;

/// Player state as reported by the device.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlayerState {
    #[default]
    Idle,
    Playing,
    Paused,
    Buffering,
    /// Anything else the device reports, carried verbatim.
    Other(String),
}

impl PlayerState {
    pub fn as_str(&self) -> &str {
        match self {
            PlayerState::Idle => "IDLE",
            PlayerState::Playing => "PLAYING",
            PlayerState::Paused => "PAUSED",
            PlayerState::Buffering => "BUFFERING",
            PlayerState::Other(raw) => raw,
        }
    }
}

impl From<&str> for PlayerState {
    fn from(raw: &str) -> Self {
        match raw {
            "IDLE" => PlayerState::Idle,
            "PLAYING" => PlayerState::Playing,
            "PAUSED" => PlayerState::Paused,
            "BUFFERING" => PlayerState::Buffering,
            other => PlayerState::Other(other.to_string()),
        }
    }
}

impl From<String> for PlayerState {
    fn from(raw: String) -> Self {
        PlayerState::from(raw.as_str())
    }
}

impl From<PlayerState> for String {
    fn from(state: PlayerState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of device playback, rebuilt on every status query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaybackInfo {
    pub playing: bool,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Seconds.
    pub current_time: f64,
    /// Seconds.
    pub duration: f64,
    /// Always within `0..=100`.
    pub volume: u8,
    pub volume_muted: bool,
    pub player_state: PlayerState,
    pub app: String,
    pub image_url: String,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            playing: false,
            title: String::new(),
            artist: String::new(),
            album: String::new(),
            current_time: 0.0,
            duration: 0.0,
            volume: 50,
            volume_muted: false,
            player_state: PlayerState::Idle,
            app: String::new(),
            image_url: String::new(),
        }
    }
}

/// Logical source we believe is playing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    None,
    Radio,
    Youtube,
    Assistant,
}

/// `name` is only ever set together with a kind other than `None`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SourceState {
    #[serde(rename = "type")]
    pub kind: SourceKind,
    pub name: Option<String>,
}
