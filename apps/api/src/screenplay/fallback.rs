//! Canned screenplay-shaped responses.
//!
//! Callers never receive a bare error string: every failure path is rendered as a
//! minimal one-scene screenplay carrying a short message.

/// Scene header inserted when the input has none.
pub const DEFAULT_SCENE_HEADER: &str = "EXT. LOCATION - NIGHT";

pub fn fallback_screenplay(scene_header: &str, message: &str) -> String {
    format!("FADE IN:\n\n{scene_header}\n\n{message}\n\nFADE OUT.")
}

/// Returned by the enforcer for empty or content-free input.
pub fn no_content() -> String {
    fallback_screenplay(DEFAULT_SCENE_HEADER, "No content.")
}

pub fn missing_prompt() -> String {
    fallback_screenplay("EXT. OFFICE - DAY", "Please provide a story idea.")
}

pub fn nothing_generated() -> String {
    fallback_screenplay("EXT. OFFICE - DAY", "No screenplay generated.")
}

pub fn generation_failed() -> String {
    fallback_screenplay("EXT. ERROR - NIGHT", "An error occurred.")
}

pub fn invalid_messages() -> String {
    fallback_screenplay("EXT. ERROR - DAY", "Invalid input: messages must be a list.")
}
