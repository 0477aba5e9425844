//! HTML to readable text conversion.
//!
//! Not a full HTML parser: markup is stripped with a handful of regexes,
//! which is enough for article and abstract pages.

use crate::text::squeeze_lines;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Which regex to use for a conversion pass.
#[derive(Debug, Clone, Copy)]
enum Pattern {
    /// Elements whose content is never readable text.
    Invisible,
    Comment,
    /// Tags that start a new line.
    Block,
    AnyTag,
    Entity,
}

impl Pattern {
    #[allow(clippy::expect_used)]
    fn regex(self) -> &'static Regex {
        macro_rules! static_regex {
            ($name:ident, $pattern:expr) => {{
                static $name: OnceLock<Regex> = OnceLock::new();
                $name.get_or_init(|| Regex::new($pattern).expect("valid regex"))
            }};
        }

        match self {
            Self::Invisible => static_regex!(
                INVISIBLE,
                r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>|<noscript\b.*?</noscript\s*>|<svg\b.*?</svg\s*>|<head\b.*?</head\s*>|<template\b.*?</template\s*>"
            ),
            Self::Comment => static_regex!(COMMENT, r"(?s)<!--.*?-->"),
            Self::Block => static_regex!(
                BLOCK,
                r"(?i)</?(?:p|div|br|hr|h[1-6]|li|ul|ol|dl|dt|dd|tr|table|section|article|header|footer|nav|aside|main|blockquote|pre|figure|figcaption|caption)\b[^>]*>"
            ),
            Self::AnyTag => static_regex!(ANY_TAG, r"(?s)<[^>]*>"),
            Self::Entity => static_regex!(ENTITY, r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});"),
        }
    }
}

/// Converts an HTML document into plain text.
///
/// Scripts, styles, and other invisible elements are dropped, block-level
/// tags become line breaks, common entities are decoded, and blank lines
/// are dropped.
///
/// # Examples
///
/// ```
/// use paper_digest::extract::html_to_text;
///
/// let html = "<html><head><title>t</title></head><body><h1>Title</h1><p>A &amp; B</p></body></html>";
/// assert_eq!(html_to_text(html), "Title\nA & B");
/// ```
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let text = Pattern::Invisible.regex().replace_all(html, " ");
    let text = Pattern::Comment.regex().replace_all(&text, " ");
    let text = Pattern::Block.regex().replace_all(&text, "\n");
    let text = Pattern::AnyTag.regex().replace_all(&text, "");
    let text = decode_entities(&text);
    squeeze_lines(&text)
}

/// Decodes named and numeric character references.
///
/// Unknown named entities are left untouched.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    Pattern::Entity
        .regex()
        .replace_all(text, |caps: &Captures<'_>| {
            let name = &caps[1];
            decode_entity(name).map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }
    if let Some(dec) = name.strip_prefix('#') {
        return dec.parse::<u32>().ok().and_then(char::from_u32);
    }
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "ndash" => '–',
        "mdash" => '—',
        "hellip" => '…',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "copy" => '©',
        "deg" => '°',
        "times" => '×',
        "middot" => '·',
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_scripts_and_styles() {
        let html = r"<p>keep</p><script type='x'>var a = '<p>no</p>';</script><STYLE>p{}</STYLE><p>this</p>";
        assert_eq!(html_to_text(html), "keep\nthis");
    }

    #[test]
    fn test_drops_head_and_comments() {
        let html = "<head><title>Ignored</title></head><!-- hidden <p>x</p> --><div>Body</div>";
        assert_eq!(html_to_text(html), "Body");
    }

    #[test]
    fn test_block_tags_break_lines() {
        let html = "<h2>Abstract</h2><p>First line<br>second line</p><ul><li>one</li><li>two</li></ul>";
        assert_eq!(
            html_to_text(html),
            "Abstract\nFirst line\nsecond line\none\ntwo"
        );
    }

    #[test]
    fn test_inline_tags_do_not_break_words() {
        let html = "<p>Trans<em>former</em> <a href='/x'>models</a></p>";
        assert_eq!(html_to_text(html), "Transformer models");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &lt;b&gt; &amp; c"), "a <b> & c");
        assert_eq!(decode_entities("&#65;&#x42;&#X43;"), "ABC");
        assert_eq!(decode_entities("&unknown; stays"), "&unknown; stays");
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
    }

    #[test]
    fn test_nbsp_is_collapsed() {
        assert_eq!(html_to_text("<p>a&nbsp;&nbsp;b</p>"), "a b");
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(html_to_text("no markup at all"), "no markup at all");
    }
}
