pub fn trimmed_char_len(text: &str) -> usize {
    text.trim().chars().count()
}

pub fn escape_markup(word: &str) -> String {
    let mut escaped = String::with_capacity(word.len());
    for ch in word.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(trimmed_char_len("  café  "), 4);
        assert_eq!(trimmed_char_len("\n\t"), 0);
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_markup("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
        assert_eq!(escape_markup("plain"), "plain");
    }
}
