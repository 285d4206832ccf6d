pub(super) fn wrap_text_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for raw in text.split('\n') {
        if raw.is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut buffer = String::new();
        let mut count = 0usize;
        for ch in raw.chars() {
            buffer.push(ch);
            count += 1;
            if count >= width {
                lines.push(std::mem::take(&mut buffer));
                count = 0;
            }
        }
        if !buffer.is_empty() {
            lines.push(buffer);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Replaces control characters so API-supplied strings cannot move the cursor.
pub(super) fn sanitize_text_for_tui(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\n' => '\n',
            '\r' | '\t' => ' ',
            _ if ch.is_control() => ' ',
            _ => ch,
        })
        .collect()
}

pub(super) fn display_width(text: &str) -> usize {
    text.chars().count()
}

pub(super) fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    let chars = text.chars();
    let count = chars.clone().count();
    if count <= max_len {
        return text.to_string();
    }
    if max_len <= 3 {
        return chars.take(max_len).collect();
    }
    let keep = max_len - 3;
    let mut out: String = chars.take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_width_and_keeps_blank_lines() {
        assert_eq!(
            wrap_text_lines("abcdef\n\nxy", 4),
            vec!["abcd", "ef", "", "xy"]
        );
        assert_eq!(wrap_text_lines("", 10), vec![""]);
    }

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("Northwind Traders", 9), "Northw...");
        assert_eq!(truncate_with_ellipsis("short", 9), "short");
        assert_eq!(truncate_with_ellipsis("abcdef", 2), "ab");
    }

    #[test]
    fn strips_control_characters() {
        assert_eq!(sanitize_text_for_tui("a\u{1b}[31mb\tc"), "a [31mb c");
    }
}
