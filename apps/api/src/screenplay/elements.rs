//! Screenplay element classification.
//!
//! Each element kind has an independent detection predicate and an emit function,
//! so every row of the classification table can be tested on its own. `classify`
//! applies the predicates in priority order:
//!
//! blank → scene header → character cue → parenthetical → dialogue → action
//!
//! The cue heuristic is purely lexical. A short ALL-CAPS action line such as
//! `THE END` is classified as a character cue.

use once_cell::sync::Lazy;
use regex::Regex;

/// Indent applied to character cues so they sit roughly centered on the page.
pub const CUE_INDENT: usize = 20;
/// Indent applied to parentheticals.
pub const PARENTHETICAL_INDENT: usize = 15;
/// Indent applied to dialogue lines.
pub const DIALOGUE_INDENT: usize = 10;
/// Character cues must be strictly shorter than this (in chars).
pub const MAX_CUE_LEN: usize = 30;

const RESERVED_CUE_PREFIXES: &[&str] = &["INT.", "EXT.", "FADE"];

/// Matched against the upper-cased line. Prefix match only: trailing text after the
/// time of day is allowed and kept.
static SCENE_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(INT\.|EXT\.|INT/EXT\.)\s+(.+?)\s*-\s*(DAY|NIGHT|CONTINUOUS|LATER)")
        .expect("scene header pattern is valid")
});

static CLOSING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^FADE OUT\.?$").expect("closing pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    SceneHeader,
    CharacterCue,
    Parenthetical,
    Dialogue,
    Action,
    BlankLine,
}

/// Dialogue mode carried from one line to the next.
///
/// A cue opens dialogue mode; exactly one following line is captured as dialogue,
/// after which the state returns to `Neutral`. Parentheticals and blank lines leave
/// the state untouched, scene headers reset it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogueState {
    #[default]
    Neutral,
    AfterCue(String),
}

impl DialogueState {
    pub fn speaker(&self) -> Option<&str> {
        match self {
            DialogueState::Neutral => None,
            DialogueState::AfterCue(name) => Some(name.as_str()),
        }
    }
}

/// Classifies one trimmed line given the current dialogue state.
pub fn classify(line: &str, state: &DialogueState) -> ElementKind {
    if line.is_empty() {
        ElementKind::BlankLine
    } else if is_scene_header(line) {
        ElementKind::SceneHeader
    } else if is_character_cue(line) {
        ElementKind::CharacterCue
    } else if is_parenthetical(line) {
        ElementKind::Parenthetical
    } else if state.speaker().is_some_and(|name| !name.is_empty()) {
        ElementKind::Dialogue
    } else {
        ElementKind::Action
    }
}

/// Returns the state after a line of the given kind has been emitted.
pub fn next_state(kind: ElementKind, line: &str, state: DialogueState) -> DialogueState {
    match kind {
        ElementKind::SceneHeader | ElementKind::Dialogue => DialogueState::Neutral,
        ElementKind::CharacterCue => DialogueState::AfterCue(line.to_string()),
        ElementKind::Parenthetical | ElementKind::BlankLine | ElementKind::Action => state,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Predicates
// ────────────────────────────────────────────────────────────────────────────

/// `INT. <location> - <DAY|NIGHT|CONTINUOUS|LATER>`, case-insensitive.
pub fn is_scene_header(line: &str) -> bool {
    SCENE_HEADER_RE.is_match(&line.to_uppercase())
}

/// Upper-case, shorter than 30 chars, no parentheses, no reserved prefix.
pub fn is_character_cue(line: &str) -> bool {
    is_upper(line)
        && line.chars().count() < MAX_CUE_LEN
        && !line.contains(['(', ')'])
        && !RESERVED_CUE_PREFIXES
            .iter()
            .any(|prefix| line.starts_with(prefix))
}

pub fn is_parenthetical(line: &str) -> bool {
    line.starts_with('(') && line.ends_with(')')
}

/// A `FADE OUT` line. The enforcer always appends its own, so these are dropped.
pub fn is_closing_announcement(line: &str) -> bool {
    CLOSING_RE.is_match(line)
}

/// At least one cased character and no lower-case characters.
fn is_upper(line: &str) -> bool {
    let mut has_cased = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

// ────────────────────────────────────────────────────────────────────────────
// Emitters
// ────────────────────────────────────────────────────────────────────────────

pub fn scene_header(line: &str) -> String {
    line.to_uppercase()
}

pub fn character_cue(line: &str) -> String {
    indent(CUE_INDENT, line)
}

pub fn parenthetical(line: &str) -> String {
    indent(PARENTHETICAL_INDENT, line)
}

pub fn dialogue(line: &str) -> String {
    indent(DIALOGUE_INDENT, line)
}

fn indent(width: usize, line: &str) -> String {
    format!("{}{}", " ".repeat(width), line)
}
