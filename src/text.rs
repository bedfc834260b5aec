/// Returns at most `max` characters of `s`, cut on a char boundary.
pub(crate) fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
/// Digits and punctuation break runs, so `2021abc` becomes `2021Abc`.
pub(crate) fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Collapses newlines so a value stays on one line of a numbered list.
pub(crate) fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_string_unchanged() {
        assert_eq!(truncate_chars("pigeon", 10), "pigeon");
        assert_eq!(truncate_chars("pigeon", 6), "pigeon");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("informação", 9), "informaçã");
        assert_eq!(truncate_chars("编程编程", 2), "编程");
    }

    #[test]
    fn title_case_matches_expected_forms() {
        assert_eq!(title_case("foo bar baz.pdf"), "Foo Bar Baz.Pdf");
        assert_eq!(title_case("MADEIRA report"), "Madeira Report");
        assert_eq!(title_case("2021abc"), "2021Abc");
    }

    #[test]
    fn single_line_collapses_whitespace() {
        assert_eq!(single_line("line1\nline2\r\n  line3"), "line1 line2 line3");
        assert_eq!(single_line("no newlines"), "no newlines");
    }
}
