//! Format Enforcer: coerces arbitrary generated text into canonical screenplay layout.
//!
//! # Pipeline
//! 1. Preprocess: unwrap markdown code fences, trim, drop `FADE IN` announcement lines.
//! 2. Classify each trimmed line (see `elements`) in a single pass, threading an explicit
//!    `DialogueState` from line to line, and emit it with its kind's layout rule.
//! 3. Assemble: `FADE IN:` block, synthetic scene header if none was classified, body,
//!    closing `FADE OUT.`, then collapse every run of blank lines to a single blank line.
//!
//! `enforce` is total. Empty or content-free input yields the canned minimal screenplay,
//! so the output always carries the opening, a scene header and the closing.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::screenplay::elements::{
    character_cue, classify, dialogue, is_closing_announcement, next_state, parenthetical,
    scene_header, DialogueState, ElementKind,
};
use crate::screenplay::fallback::{self, DEFAULT_SCENE_HEADER};
use crate::screenplay::wrap::{wrap_action, ACTION_WIDTH};

const OPENING: &str = "FADE IN:";
const CLOSING: &str = "FADE OUT.";

/// Non-greedy across lines. An info string (```` ```text ````) on the opening fence is
/// dropped with the marker; the fenced content is kept.
static FENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:[\w-]*[ \t]*\r?\n)?(.*?)```").expect("fence pattern is valid")
});

static FADE_IN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*FADE IN[^\n]*(?:\n|$)").expect("fade-in pattern is valid")
});

static BLANK_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n\s*\n+").expect("blank-run pattern is valid"));

/// Formats `text` as a screenplay. Never fails.
pub fn enforce(text: &str) -> String {
    if text.is_empty() {
        return fallback::no_content();
    }

    let body = layout(&preprocess(text));
    if !body.has_content() {
        return fallback::no_content();
    }

    assemble(body)
}

fn preprocess(text: &str) -> String {
    let unfenced = FENCE_RE.replace_all(text, "$1");
    FADE_IN_RE.replace_all(unfenced.trim(), "").into_owned()
}

/// Emitted body lines, excluding the opening and closing announcements.
#[derive(Debug, Default)]
struct Body {
    lines: Vec<String>,
    has_scene_header: bool,
}

impl Body {
    /// Appends a blank line unless the body is empty or already ends with one.
    fn blank(&mut self) {
        if self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(String::new());
        }
    }

    fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    fn has_content(&self) -> bool {
        self.lines.iter().any(|l| !l.is_empty())
    }
}

fn layout(content: &str) -> Body {
    let mut body = Body::default();
    let mut state = DialogueState::Neutral;

    for line in content.split('\n').map(str::trim) {
        if is_closing_announcement(line) {
            continue;
        }

        let kind = classify(line, &state);
        match kind {
            ElementKind::BlankLine => body.blank(),
            ElementKind::SceneHeader => {
                body.blank();
                body.push(scene_header(line));
                body.blank();
                body.has_scene_header = true;
            }
            ElementKind::CharacterCue => body.push(character_cue(line)),
            ElementKind::Parenthetical => body.push(parenthetical(line)),
            ElementKind::Dialogue => {
                body.push(dialogue(line));
                body.blank();
            }
            ElementKind::Action => {
                body.lines.extend(wrap_action(line, ACTION_WIDTH));
                body.blank();
            }
        }
        state = next_state(kind, line, state);
    }

    body
}

fn assemble(body: Body) -> String {
    let mut lines = vec![OPENING.to_string(), String::new()];

    if !body.has_scene_header {
        lines.push(DEFAULT_SCENE_HEADER.to_string());
        lines.push(String::new());
    }

    lines.extend(body.lines);

    if lines.last().is_some_and(|l| !l.is_empty()) {
        lines.push(String::new());
    }
    lines.push(CLOSING.to_string());

    collapse_blank_runs(&lines.join("\n"))
}

fn collapse_blank_runs(text: &str) -> String {
    BLANK_RUN_RE.replace_all(text, "\n\n").into_owned()
}
