//! Fixed pattern tables. All patterns are matched case-insensitively against
//! the trimmed utterance.

/// Anchored at the start of the utterance. Order matters for content
/// extraction: the first match wins, so longer phrasings come first.
pub(crate) const STORE_TRIGGERS: &[&str] = &[
    r"^bitte\s+merke?\s+dir\b\s*:?",
    r"^merke?\s+dir\s+bitte\b\s*:?",
    r"^merke?\s+dir\b\s*:?",
    r"^vergiss\s+nicht\b\s*:?",
    r"^notiere?(\s+dir)?\b\s*:?",
    r"^speichere?\s*:",
    r"^wichtig\s*:",
    r"^remember(\s+that)?\b\s*:?",
    r"^note\s*:",
];

pub(crate) const RECALL_TRIGGERS: &[&str] = &[
    r"erinnerst\s+du\s+dich",
    r"wei(ss|ß)t\s+du\s+noch",
    r"was\s+wei(ss|ß)t\s+du\s+(über|von)",
    r"hab(e)?\s+ich\s+(dir\s+)?(gesagt|erzählt)",
    r"kennst\s+du\s+(mein|meine|meinen)\b",
    r"do\s+you\s+remember",
    r"what\s+do\s+you\s+know\s+about",
];

pub(crate) const SKIP_PATTERNS: &[&str] = &[
    // greetings
    r"^(hallo|hi|hey|hoi|salü|servus|grüezi|guten\s+(morgen|tag|abend))\b",
    // thanks and acknowledgements on their own
    r"^(danke|merci|vielen\s+dank|ok|okay|alles\s+klar|super|cool|genau|ja|nein|tschüss|ciao|adieu|bis\s+später)\b[\s!.?]*$",
    // clock and calendar small talk
    r"\b(wie\s+spät|wie\s*viel\s+uhr|welcher\s+tag\s+ist\s+heute|what\s+time\s+is\s+it)\b",
    // transport commands
    r"^(stopp?|pause|weiter|lauter|leiser)\b",
    r"^test(ing)?\b[\s\d!.?]*$",
];
