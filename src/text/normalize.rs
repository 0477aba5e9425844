//! Whitespace clean-up for extracted text.

/// Collapses runs of whitespace inside a line to single spaces.
#[must_use]
pub fn collapse_inline_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Tidies extracted text for prompting.
///
/// Each line has its inline whitespace collapsed, runs of blank lines are
/// reduced to a single blank line, and the result is trimmed.
///
/// # Examples
///
/// ```
/// use paper_digest::text::tidy_text;
///
/// assert_eq!(tidy_text("  a   b \n\n\n\n c \n"), "a b\n\nc");
/// ```
#[must_use]
pub fn tidy_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0usize;

    for line in text.lines() {
        let line = collapse_inline_whitespace(line);
        if line.is_empty() {
            blank_run += 1;
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
            if blank_run > 0 {
                out.push('\n');
            }
        }
        blank_run = 0;
        out.push_str(&line);
    }

    out
}

/// Keeps only non-blank lines, each with collapsed inline whitespace.
///
/// # Examples
///
/// ```
/// use paper_digest::text::squeeze_lines;
///
/// assert_eq!(squeeze_lines("\n a  b \n\n\n c"), "a b\nc");
/// ```
#[must_use]
pub fn squeeze_lines(text: &str) -> String {
    text.lines()
        .map(collapse_inline_whitespace)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
