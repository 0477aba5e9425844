//! Server-rendered main page.

use crate::core::SummaryLevel;
use std::fmt::Write;

/// Values shown on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageView {
    /// URL of the summarized document.
    pub paper_url: Option<String>,
    /// Level the summary was generated at.
    pub level: Option<SummaryLevel>,
    /// Generated summary.
    pub summary: Option<String>,
    /// Message shown instead of a summary.
    pub error: Option<String>,
}

impl PageView {
    /// A page showing only an error.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// A page showing a summary.
    #[must_use]
    pub fn summary(paper_url: impl Into<String>, level: SummaryLevel, summary: impl Into<String>) -> Self {
        Self {
            paper_url: Some(paper_url.into()),
            level: Some(level),
            summary: Some(summary.into()),
            error: None,
        }
    }
}

/// Escapes text for HTML element content and quoted attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const HEAD: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Paper Digest</title>
<style>
body { font-family: system-ui, sans-serif; max-width: 52rem; margin: 2rem auto; padding: 0 1rem; color: #222; }
form.summarize { display: flex; gap: .5rem; flex-wrap: wrap; }
form.summarize input[type=url] { flex: 1 1 24rem; padding: .4rem; }
.error { color: #a40000; background: #fff0f0; padding: .6rem; border-radius: 4px; }
.summary { white-space: pre-wrap; line-height: 1.5; background: #f7f7f9; padding: 1rem; border-radius: 4px; }
#chat-log { border: 1px solid #ddd; min-height: 6rem; padding: .5rem; margin-bottom: .5rem; }
#chat-log .user { font-weight: 600; margin-top: .5rem; }
#chat-log .model { white-space: pre-wrap; }
#chat-form { display: flex; gap: .5rem; }
#chat-form input { flex: 1; padding: .4rem; }
</style>
</head>
<body>
<h1>Paper Digest</h1>
"#;

const CHAT_SCRIPT: &str = r"<script>
(function () {
  const form = document.getElementById('chat-form');
  const log = document.getElementById('chat-log');
  const input = document.getElementById('chat-message');
  const url = document.getElementById('chat-panel').dataset.url;

  function add(role, text) {
    const div = document.createElement('div');
    div.className = role;
    div.textContent = text;
    log.appendChild(div);
    log.scrollTop = log.scrollHeight;
  }

  form.addEventListener('submit', async function (event) {
    event.preventDefault();
    const message = input.value.trim();
    if (!message) { return; }
    input.value = '';
    add('user', message);
    try {
      const res = await fetch('/chat', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        credentials: 'same-origin',
        body: JSON.stringify({ paper_url: url, message: message })
      });
      const data = await res.json();
      add(data.ok ? 'model' : 'error', data.ok ? data.answer : data.error);
    } catch (err) {
      add('error', String(err));
    }
  });
})();
</script>
";

/// Renders the page.
#[must_use]
pub fn render(view: &PageView) -> String {
    let mut html = String::from(HEAD);
    let selected = view.level.unwrap_or_default();
    let url = view.paper_url.as_deref().unwrap_or_default();

    let _ = write!(
        html,
        "<form class=\"summarize\" method=\"post\" action=\"/summarize\">\n\
         <input type=\"url\" name=\"paper_url\" placeholder=\"https://arxiv.org/abs/...\" value=\"{}\" required>\n\
         <select name=\"complexity\">\n",
        escape_html(url)
    );
    for level in SummaryLevel::ALL {
        let _ = writeln!(
            html,
            "<option value=\"{level}\"{}>{level}</option>",
            if level == selected { " selected" } else { "" }
        );
    }
    html.push_str("</select>\n<button type=\"submit\">Summarize</button>\n</form>\n");

    if let Some(error) = &view.error {
        let _ = writeln!(html, "<p class=\"error\">{}</p>", escape_html(error));
    }

    if let Some(summary) = &view.summary {
        let _ = write!(
            html,
            "<h2>Summary ({selected})</h2>\n<div class=\"summary\">{}</div>\n\
             <section id=\"chat-panel\" data-url=\"{}\">\n\
             <h2>Ask about this paper</h2>\n\
             <div id=\"chat-log\"></div>\n\
             <form id=\"chat-form\"><input id=\"chat-message\" autocomplete=\"off\" placeholder=\"Ask a question\">\
             <button type=\"submit\">Send</button></form>\n\
             </section>\n",
            escape_html(summary),
            escape_html(url)
        );
        html.push_str(CHAT_SCRIPT);
    }

    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_empty_page_has_form_without_chat() {
        let html = render(&PageView::default());
        assert!(html.contains("action=\"/summarize\""));
        assert!(html.contains("<option value=\"LOW\" selected>"));
        assert!(!html.contains("chat-panel"));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_error_is_escaped() {
        let html = render(&PageView::error("Error: <boom>"));
        assert!(html.contains("<p class=\"error\">Error: &lt;boom&gt;</p>"));
    }

    #[test]
    fn test_summary_page_shows_chat() {
        let html = render(&PageView::summary(
            "https://arxiv.org/abs/1?a=1&b=2",
            SummaryLevel::High,
            "Great <results>",
        ));
        assert!(html.contains("Great &lt;results&gt;"));
        assert!(html.contains("<option value=\"HIGH\" selected>"));
        assert!(html.contains("data-url=\"https://arxiv.org/abs/1?a=1&amp;b=2\""));
        assert!(html.contains("fetch('/chat'"));
    }
}
