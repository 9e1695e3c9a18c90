use crate::models::Sample;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum KeyParseError {
    #[error("Unknown key \"{0}\" (expected All or one of C, C#, D, D#, E, F, F#, G, G#, A, A#, B)")]
    Unknown(String),
}

/// The twelve pitch classes offered as key selectors, spelled with sharps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        Self::C,
        Self::CSharp,
        Self::D,
        Self::DSharp,
        Self::E,
        Self::F,
        Self::FSharp,
        Self::G,
        Self::GSharp,
        Self::A,
        Self::ASharp,
        Self::B,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::C => "C",
            Self::CSharp => "C#",
            Self::D => "D",
            Self::DSharp => "D#",
            Self::E => "E",
            Self::F => "F",
            Self::FSharp => "F#",
            Self::G => "G",
            Self::GSharp => "G#",
            Self::A => "A",
            Self::ASharp => "A#",
            Self::B => "B",
        }
    }

    /// Flat spelling treated as the same key, for the five black keys only.
    pub fn enharmonic(&self) -> Option<&'static str> {
        match self {
            Self::CSharp => Some("Db"),
            Self::DSharp => Some("Eb"),
            Self::FSharp => Some("Gb"),
            Self::GSharp => Some("Ab"),
            Self::ASharp => Some("Bb"),
            _ => None,
        }
    }

    /// Whether a key root (`"C#"`, `"Db"`, `"E"`) names this pitch class.
    pub fn matches_root(&self, root: &str) -> bool {
        root == self.as_str() || self.enharmonic() == Some(root)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PitchClass {
    type Err = KeyParseError;

    /// Accepts the sharp names and, as aliases, the five flat spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s || p.enharmonic() == Some(s))
            .ok_or_else(|| KeyParseError::Unknown(s.to_string()))
    }
}

/// Key constraint chosen by the user.
///
/// Parsing accepts the flat spellings `Db`, `Eb`, `Gb`, `Ab` and `Bb` as
/// aliases of the matching sharp, so `"Db"` yields `Pitch(PitchClass::CSharp)`
/// and matches both `C#` and `Db` roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeySelector {
    #[default]
    Any,
    Pitch(PitchClass),
}

impl KeySelector {
    /// Selector labels in display order, "All" first.
    pub fn choices() -> Vec<String> {
        std::iter::once(Self::Any)
            .chain(PitchClass::ALL.into_iter().map(Self::Pitch))
            .map(|k| k.to_string())
            .collect()
    }
}

impl fmt::Display for KeySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("All"),
            Self::Pitch(p) => fmt::Display::fmt(p, f),
        }
    }
}

impl FromStr for KeySelector {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") || s.eq_ignore_ascii_case("any") {
            return Ok(Self::Any);
        }
        s.parse().map(Self::Pitch)
    }
}

/// Active filter state. Empty text and `None` bounds are inactive clauses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub text: String,
    pub min_tempo: Option<i64>,
    pub max_tempo: Option<i64>,
    pub key: KeySelector,
}

impl FilterCriteria {
    /// Build criteria from raw user input. Bounds that don't parse as integers
    /// are dropped rather than reported.
    pub fn from_inputs(text: &str, min_tempo: &str, max_tempo: &str, key: KeySelector) -> Self {
        Self {
            text: text.to_string(),
            min_tempo: parse_bound(min_tempo),
            max_tempo: parse_bound(max_tempo),
            key,
        }
    }

    pub fn has_tempo_bound(&self) -> bool {
        self.min_tempo.is_some() || self.max_tempo.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && !self.has_tempo_bound() && self.key == KeySelector::Any
    }
}

/// Parse a tempo bound typed by the user. Blank or malformed input is `None`.
pub fn parse_bound(input: &str) -> Option<i64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    match input.parse() {
        Ok(v) => Some(v),
        Err(e) => {
            log::debug!("Ignoring tempo bound {:?}: {}", input, e);
            None
        }
    }
}

/// Whether a single record passes every active clause.
pub fn matches(sample: &Sample, criteria: &FilterCriteria) -> bool {
    if !criteria.text.is_empty()
        && !sample
            .filename
            .to_lowercase()
            .contains(&criteria.text.to_lowercase())
    {
        return false;
    }

    match sample.tempo {
        None if criteria.has_tempo_bound() => return false,
        None => {}
        Some(tempo) => {
            let tempo = i64::from(tempo);
            if criteria.min_tempo.is_some_and(|min| tempo < min) {
                return false;
            }
            if criteria.max_tempo.is_some_and(|max| tempo > max) {
                return false;
            }
        }
    }

    match criteria.key {
        KeySelector::Any => true,
        KeySelector::Pitch(pitch) => sample.key_root().is_some_and(|root| pitch.matches_root(root)),
    }
}

/// Narrow `samples` to those matching `criteria`, keeping input order.
pub fn filter<'a>(samples: &'a [Sample], criteria: &FilterCriteria) -> Vec<&'a Sample> {
    samples.iter().filter(|s| matches(s, criteria)).collect()
}
