//! Property-based tests for the format enforcer.
//!
//! These check the output guarantees for arbitrary input:
//!
//! - the output is never empty and is always framed by `FADE IN:` / `FADE OUT.`
//! - at least one scene header is present
//! - no run of more than one blank line
//! - action lines stay within the wrap width and keep their words in order
//! - canonical screenplays are a fixed point

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::screenplay::elements::is_scene_header;
    use crate::screenplay::enforce;
    use crate::screenplay::wrap::ACTION_WIDTH;

    // Lines that exercise every classification rule.
    fn script_line() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just("INT. ROOM - DAY".to_string()),
            Just("ext. park - night".to_string()),
            Just("JOHN".to_string()),
            Just("THE END".to_string()),
            Just("(beat)".to_string()),
            Just("```".to_string()),
            Just("```text".to_string()),
            Just("FADE IN:".to_string()),
            Just("FADE OUT.".to_string()),
            Just("   ".to_string()),
            "[a-zA-Z .,!?']{0,140}",
            "\\PC{0,40}",
        ]
    }

    fn script() -> impl Strategy<Value = String> {
        prop::collection::vec(script_line(), 0..40).prop_map(|lines| lines.join("\n"))
    }

    fn any_text() -> impl Strategy<Value = String> {
        prop_oneof![any::<String>(), script()]
    }

    // Short sentence that cannot be mistaken for a cue, a header or a fade.
    fn short_sentence() -> impl Strategy<Value = String> {
        "[A-EG-Z][a-z]{2,10}( [a-z]{1,8}){0,5}\\."
    }

    fn canonical_block() -> impl Strategy<Value = String> {
        prop_oneof![
            "(INT|EXT)\\. [A-Z]{3,10} - (DAY|NIGHT)",
            short_sentence(),
            (
                prop_oneof![Just("JOHN"), Just("MARY"), Just("DR. ALEX")],
                prop::option::of("\\([a-z]{3,10}\\)"),
                short_sentence(),
            )
                .prop_map(|(name, paren, line)| match paren {
                    Some(p) => format!("{name}\n{p}\n{line}"),
                    None => format!("{name}\n{line}"),
                }),
        ]
    }

    fn canonical_script() -> impl Strategy<Value = String> {
        prop::collection::vec(canonical_block(), 1..20).prop_map(|blocks| blocks.join("\n\n"))
    }

    proptest! {
        /// The enforcer never panics and never returns an empty string.
        #[test]
        fn enforce_is_total(text in any_text()) {
            let out = enforce(&text);
            prop_assert!(!out.is_empty());
        }

        #[test]
        fn output_is_framed(text in any_text()) {
            let out = enforce(&text);
            prop_assert!(out.starts_with("FADE IN:"), "bad opening: {:?}", out);
            prop_assert!(out.ends_with("FADE OUT."), "bad closing: {:?}", out);
        }

        #[test]
        fn output_has_a_scene_header(text in any_text()) {
            let out = enforce(&text);
            prop_assert!(
                out.lines().any(is_scene_header),
                "no scene header in {:?}",
                out
            );
        }

        #[test]
        fn output_has_no_blank_runs(text in any_text()) {
            let out = enforce(&text);
            prop_assert!(!out.contains("\n\n\n"), "blank run in {:?}", out);
        }

        /// Lower-case prose is always action: every body line fits the width
        /// and the words come back in order.
        #[test]
        fn action_lines_fit_width(
            words in prop::collection::vec("[a-z]{1,12}", 1..80)
        ) {
            let line = words.join(" ");
            prop_assume!(!line.starts_with("fade in") && line != "fade out");
            let out = enforce(&line);

            let body: Vec<&str> = out
                .lines()
                .filter(|l| !l.is_empty())
                .filter(|l| *l != "FADE IN:" && *l != "FADE OUT." && !is_scene_header(l))
                .collect();

            prop_assert!(body.iter().all(|l| l.chars().count() <= ACTION_WIDTH));
            prop_assert_eq!(body.join(" "), line);
        }

        #[test]
        fn canonical_output_is_a_fixed_point(text in canonical_script()) {
            let once = enforce(&text);
            let twice = enforce(&once);
            prop_assert_eq!(twice, once);
        }
    }
}
