use regex::Regex;
use std::sync::LazyLock;

/// Lowest tempo accepted from a filename.
pub const MIN_TEMPO: u32 = 60;
/// Highest tempo accepted from a filename.
pub const MAX_TEMPO: u32 = 200;

// Tempo pattern 1: number before the "bpm" tag
// e.g., Groove_128bpm.wav, loop 90 bpm.wav, kit-140-BPM.aif
static TEMPO_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?P<bpm>[0-9]{2,3})[ _-]?bpm").unwrap());

// Tempo pattern 2: number after the "bpm" tag
// e.g., bpm140_hats.wav, BPM_95 vox.mp3
static TEMPO_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)bpm[ _-]?(?P<bpm>[0-9]{2,3})").unwrap());

// Tempo pattern 3: bare number fenced by underscores
// e.g., drums_95_dry.wav
static TEMPO_UNDERSCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_(?P<bpm>[0-9]{2,3})_").unwrap());

// Key: pitch letter, optional accidental, optional mode token.
// Mode alternatives are listed longest-first so "Abmaj" reads as Ab + maj.
// A lower-case "b" after the letter is always taken as a flat, so "Bbass"
// reads as Bb and "Ebm" as Eb minor.
static KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<root>[A-G][#b]?)(?P<mode>major|maj|min|m)?").unwrap()
});

/// Mode suffixes stripped to get a key's pitch-class root, longest first.
const MODE_SUFFIXES: [&str; 4] = ["major", "maj", "min", "m"];

/// Infer a tempo from a filename.
///
/// Patterns are tried in order and only the leftmost match of the first
/// pattern that hits is considered. A hit outside `MIN_TEMPO..=MAX_TEMPO`
/// yields `None` without falling through to later patterns.
pub fn extract_tempo(filename: &str) -> Option<u32> {
    let patterns: [&Regex; 3] = [&TEMPO_SUFFIX_RE, &TEMPO_PREFIX_RE, &TEMPO_UNDERSCORE_RE];
    let caps = patterns.iter().find_map(|re| re.captures(filename))?;

    let bpm: u32 = caps.name("bpm")?.as_str().parse().ok()?;
    (MIN_TEMPO..=MAX_TEMPO).contains(&bpm).then_some(bpm)
}

/// Infer a musical key label from a filename.
///
/// Returns the root (`"F#"`, `"Ab"`) for major or unspecified keys and the root
/// plus a trailing `m` for minor ones (`"Cm"`). Only the first candidate in the
/// filename is used.
pub fn extract_key(filename: &str) -> Option<String> {
    let caps = KEY_RE.captures(filename)?;
    let root = caps.name("root")?.as_str();

    match caps.name("mode").map(|m| m.as_str()) {
        Some("m") | Some("min") => Some(format!("{root}m")),
        _ => Some(root.to_string()),
    }
}

/// Strip a trailing mode suffix from a key label, leaving the pitch-class root.
pub fn key_root(key: &str) -> &str {
    for suffix in MODE_SUFFIXES {
        if let Some(root) = key.strip_suffix(suffix) {
            if !root.is_empty() {
                return root;
            }
        }
    }
    key
}
