//! Category a stored memory is filed under

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryKind {
    /// Appointments, dates, things happening at a time
    Event,
    /// Likes and dislikes
    Preference,
    /// Names and relationships
    Person,
    /// Anything else
    Fact,
}

impl MemoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryKind::Event => "event",
            MemoryKind::Preference => "preference",
            MemoryKind::Person => "person",
            MemoryKind::Fact => "fact",
        }
    }
}

const EVENT: &str = r"\b(termin|treffen|meeting|appointment|geburtstag|birthday|montag|dienstag|mittwoch|donnerstag|freitag|samstag|sonntag|morgen|übermorgen|nächste\s+woche|\d{1,2}\s*uhr)\b";
const PREFERENCE: &str = r"\b(mag|mögen|liebe|lieblings\w*|bevorzuge|hasse|gern|gerne|prefer|like|favou?rite)\b";
const PERSON: &str = r"\b(heisse|heiße|heisst|heißt|mein\s+name|meine?\s+(frau|mann|tochter|sohn|mutter|vater|schwester|bruder|freundin|freund))\b";

fn rules() -> &'static [(MemoryKind, Regex)] {
    static RULES: OnceLock<Vec<(MemoryKind, Regex)>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            (MemoryKind::Event, EVENT),
            (MemoryKind::Preference, PREFERENCE),
            (MemoryKind::Person, PERSON),
        ]
        .into_iter()
        .filter_map(|(kind, pattern)| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .ok()
                .map(|re| (kind, re))
        })
        .collect()
    })
}

/// Pick a category for memory content. Rules are checked in order; the first hit wins.
pub fn classify_memory_kind(content: &str) -> MemoryKind {
    rules()
        .iter()
        .find(|(_, re)| re.is_match(content))
        .map(|(kind, _)| *kind)
        .unwrap_or(MemoryKind::Fact)
}
