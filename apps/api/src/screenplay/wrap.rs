//! Greedy word wrap for action lines.

/// Maximum width of an action line, in chars.
pub const ACTION_WIDTH: usize = 60;

/// Wraps `line` on word boundaries into lines of at most `width` chars.
///
/// Lines that already fit are returned unchanged. Words are never split: a single
/// word wider than `width` is placed alone on its own line.
pub fn wrap_action(line: &str, width: usize) -> Vec<String> {
    if line.chars().count() <= width {
        return vec![line.to_string()];
    }

    let mut wrapped = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > width {
            wrapped.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        wrapped.push(current);
    }

    wrapped
}
