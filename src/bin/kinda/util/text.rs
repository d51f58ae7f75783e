/// Greedy word wrap; words longer than `width` get a line of their own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    lines.push(current);
    lines
}

/// Shortens `s` to at most `max_chars` characters, marking the cut with `…`.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    match max_chars {
        0 => String::new(),
        n => s.chars().take(n - 1).chain(std::iter::once('…')).collect(),
    }
}

/// Compact scientific notation for table cells.
pub fn sci(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value:.2e}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_keeps_short_messages_on_one_line() {
        assert_eq!(wrap("no reaction matched", 40), vec!["no reaction matched"]);
    }

    #[test]
    fn wrap_breaks_between_words() {
        assert_eq!(
            wrap("unknown resting set 'R9' referenced", 20),
            vec!["unknown resting set", "'R9' referenced"]
        );
    }

    #[test]
    fn wrap_empty_text_yields_one_blank_line() {
        assert_eq!(wrap("   ", 10), vec![String::new()]);
    }

    #[test]
    fn truncate_marks_the_cut() {
        assert_eq!(truncate("Gate + Input -> Output", 10), "Gate + In…");
        assert_eq!(truncate("R1", 10), "R1");
        assert_eq!(truncate("R1", 0), "");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("α→β→γ→δ", 4), "α→β…");
    }

    #[test]
    fn sci_formats_rates() {
        assert_eq!(sci(0.0), "0");
        assert_eq!(sci(3e6), "3.00e6");
        assert_eq!(sci(0.015), "1.50e-2");
    }
}
