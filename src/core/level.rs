//! Summary detail levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How much detail a summary should carry.
///
/// Parsing is lenient: input is trimmed and upper-cased, and anything that
/// is not a known level falls back to [`SummaryLevel::Low`].
///
/// # Examples
///
/// ```
/// use paper_digest::core::SummaryLevel;
///
/// assert_eq!(SummaryLevel::parse(" medium "), SummaryLevel::Medium);
/// assert_eq!(SummaryLevel::parse("extreme"), SummaryLevel::Low);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SummaryLevel {
    /// Short plain-language overview.
    #[default]
    Low,
    /// Structured summary for a technically literate reader.
    Medium,
    /// Detailed expert summary.
    High,
}

impl SummaryLevel {
    /// All levels, in increasing order of detail.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Parses a level from free-form input, defaulting to `Low`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "MEDIUM" => Self::Medium,
            "HIGH" => Self::High,
            _ => Self::Low,
        }
    }

    /// Returns the canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for SummaryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
