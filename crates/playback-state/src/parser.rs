//! Best-effort scrape of the controller's `info` dump.
//!
//! The dump is newline-separated `key: value` pairs plus a Python-literal-style
//! mapping after `media_metadata:`. It is not a grammar we own, so nothing here
//! returns an error: unknown keys are ignored and bad values keep their defaults.

use crate::{PlaybackInfo, PlayerState};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Controller stderr when the device has no media session.
pub const NOTHING_PLAYING: &str = "Nothing is currently playing";

const METADATA_MARKER: &str = "media_metadata:";

fn cached(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

fn metadata_block() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached(&RE, r"(?s)media_metadata:\s*(\{.*?\})\s*(?:subtitle|$)")
}

fn quoted_field(cell: &'static OnceLock<Option<Regex>>, key: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(&format!(r#"'{key}':\s*['"]([^'"]+)['"]"#)).ok())
        .as_ref()
}

fn title_field() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    quoted_field(&RE, "title")
}

fn artist_field() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    quoted_field(&RE, "artist")
}

fn album_field() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    quoted_field(&RE, "albumName")
}

fn url_field() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    quoted_field(&RE, "url")
}

/// Parse a status dump into a [`PlaybackInfo`], falling back to defaults.
pub fn parse_status(output: &str) -> PlaybackInfo {
    let mut info = PlaybackInfo::default();
    if output.trim().is_empty() {
        return info;
    }

    for line in output.trim().lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "player_state" => {
                info.player_state = PlayerState::from(value);
                info.playing = info.player_state == PlayerState::Playing;
            }
            "current_time" => {
                if let Ok(v) = value.parse::<f64>() {
                    info.current_time = v;
                }
            }
            "duration" => {
                if let Ok(v) = value.parse::<f64>() {
                    info.duration = v;
                }
            }
            "volume_level" => {
                if let Ok(v) = value.parse::<f64>() {
                    if v.is_finite() {
                        info.volume = (v * 100.0).clamp(0.0, 100.0) as u8;
                    }
                }
            }
            "volume_muted" => info.volume_muted = value == "True",
            "display_name" => info.app = value.to_string(),
            _ => {}
        }
    }

    if output.contains(METADATA_MARKER) {
        apply_metadata(output, &mut info);
    }

    info
}

fn apply_metadata(output: &str, info: &mut PlaybackInfo) {
    let Some(block) = metadata_block()
        .and_then(|re| re.captures(output))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
    else {
        debug!("media_metadata present but no mapping found");
        return;
    };

    let extract = |re: Option<&'static Regex>| {
        re.and_then(|re| re.captures(block))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    };

    if let Some(title) = extract(title_field()) {
        info.title = title;
    }
    if let Some(artist) = extract(artist_field()) {
        info.artist = artist;
    }
    if let Some(album) = extract(album_field()) {
        info.album = album;
    }
    if let Some(url) = extract(url_field()) {
        info.image_url = url;
    }
}
