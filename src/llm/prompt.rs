//! System prompts and message builders for summarization and chat.
//!
//! Prompts are kept as constants so they can be reviewed in one place.
//! Builders wrap document content in tags so the model can tell
//! instructions from material.

use crate::core::SummaryLevel;
use std::fmt::Write;

/// System prompt for the map step.
pub const MAP_SYSTEM_PROMPT: &str = r"You are reading one section of a longer document, usually a research paper. Write dense notes that a later step will merge into a summary of the whole document.

Capture:
- the problem or question the section addresses
- definitions, methods, models, and datasets it introduces
- concrete results: numbers, comparisons, named baselines
- stated limitations, assumptions, and open questions

Rules:
- Use short bullet points.
- Keep numbers, units, and names exactly as written.
- Do not speculate or add facts that are not in the section.
- If the section has no substantive content (for example only references or boilerplate), reply with nothing.";

/// Reduce prompt for [`SummaryLevel::Low`].
pub const LOW_SYSTEM_PROMPT: &str = r"You summarize documents for a general audience. Write a short plain-language overview of the document described by the material you are given.

- Two or three short paragraphs at most.
- Explain what the work is about, what was done, and why it matters.
- Avoid jargon; when a technical term is unavoidable, explain it in a few words.
- Do not invent details that are not in the material.";

/// Reduce prompt for [`SummaryLevel::Medium`].
pub const MEDIUM_SYSTEM_PROMPT: &str = r"You summarize documents for technically literate readers who are not specialists in the field. Write a structured summary of the document described by the material you are given.

Use these markdown sections:
## Problem
## Approach
## Key Results
## Limitations

Be specific: name methods, datasets, and headline numbers. Do not invent details that are not in the material.";

/// Reduce prompt for [`SummaryLevel::High`].
pub const HIGH_SYSTEM_PROMPT: &str = r"You summarize documents for domain experts. Write a detailed technical summary of the document described by the material you are given.

Use these markdown sections:
## Contribution
## Method
## Experimental Setup
## Results
## Limitations and Open Questions

Include model and algorithm details, hyperparameters, datasets, baselines, metrics, and exact reported numbers where available. Point out weaknesses in the evaluation when the material supports it. Do not invent details that are not in the material.";

/// System prompt template for chat. `{document}` is replaced with the text.
const CHAT_SYSTEM_TEMPLATE: &str = r"You are a helpful assistant answering questions about a single document. Answer only from the document below. If the document does not contain the answer, say so plainly instead of guessing. Quote or cite the relevant passage when it helps. Keep answers concise.

<document>
{document}
</document>";

/// Returns the reduce-step system prompt for a level.
#[must_use]
pub const fn level_system_prompt(level: SummaryLevel) -> &'static str {
    match level {
        SummaryLevel::Low => LOW_SYSTEM_PROMPT,
        SummaryLevel::Medium => MEDIUM_SYSTEM_PROMPT,
        SummaryLevel::High => HIGH_SYSTEM_PROMPT,
    }
}

/// Builds the user message for one map call.
#[must_use]
pub fn build_map_prompt(section: &str, part: usize, total: usize) -> String {
    format!(
        "<section part=\"{part}\" of=\"{total}\">\n{section}\n</section>\n\n\
         Write the notes for this section."
    )
}

/// Builds the user message summarizing a document that fit in one chunk.
#[must_use]
pub fn build_direct_prompt(text: &str) -> String {
    format!("<document>\n{text}\n</document>\n\nSummarize this document.")
}

/// Builds the user message for the reduce call from per-section notes.
#[must_use]
pub fn build_reduce_prompt(notes: &[String]) -> String {
    let mut prompt = String::from("<notes>\n");
    for (idx, note) in notes.iter().enumerate() {
        let _ = write!(
            prompt,
            "<section part=\"{part}\">\n{note}\n</section>\n",
            part = idx + 1,
        );
    }
    prompt.push_str("</notes>\n\nThese are notes taken section by section from one document. Summarize the document.");
    prompt
}

/// Builds the chat system prompt around the (already truncated) document.
#[must_use]
pub fn build_chat_system_prompt(document: &str) -> String {
    CHAT_SYSTEM_TEMPLATE.replace("{document}", document)
}
