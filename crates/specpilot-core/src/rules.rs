//! Policy rules listed under `rules:` in `project.yaml`.
//!
//! Rules are free text on disk. The canonical mandates are recognised when a
//! rule is parsed; anything else is kept verbatim as [`Rule::Custom`] and only
//! pattern-matched when a check needs it.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

pub const PROMPT_TRACKING_MANDATE: &str =
    "MANDATE: Update .specs/prompts.md with ALL AI interactions and development prompts by default";
pub const CHRONOLOGY_MANDATE: &str =
    "MANDATE: Maintain chronological prompt history for complete development traceability";
pub const RELEASE_CONSENT_MANDATE: &str =
    "MANDATE: Never commit, push, tag, or publish releases without explicit user approval";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Rule {
    PromptTrackingMandate,
    ChronologyMandate,
    ReleaseConsentMandate,
    Custom(String),
}

static PROMPT_MANDATE_RE: OnceLock<Regex> = OnceLock::new();

fn prompt_mandate_re() -> &'static Regex {
    PROMPT_MANDATE_RE.get_or_init(|| {
        Regex::new(r"(?i)MANDATE.*prompt.*tracking|MANDATE.*prompts\.md")
            .expect("prompt mandate pattern is valid")
    })
}

impl Rule {
    /// Mandates appended by the `add-mandates` fix, in order.
    pub fn canonical_mandates() -> [Rule; 2] {
        [Rule::PromptTrackingMandate, Rule::ChronologyMandate]
    }

    pub fn parse(text: &str) -> Rule {
        match text.trim() {
            PROMPT_TRACKING_MANDATE => Rule::PromptTrackingMandate,
            CHRONOLOGY_MANDATE => Rule::ChronologyMandate,
            RELEASE_CONSENT_MANDATE => Rule::ReleaseConsentMandate,
            other => Rule::Custom(other.to_string()),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Rule::PromptTrackingMandate => PROMPT_TRACKING_MANDATE,
            Rule::ChronologyMandate => CHRONOLOGY_MANDATE,
            Rule::ReleaseConsentMandate => RELEASE_CONSENT_MANDATE,
            Rule::Custom(text) => text,
        }
    }

    /// Whether this rule requires AI prompts to be logged in `prompts.md`.
    pub fn is_prompt_tracking(&self) -> bool {
        match self {
            Rule::PromptTrackingMandate => true,
            Rule::Custom(text) => prompt_mandate_re().is_match(text),
            _ => false,
        }
    }

    /// Loose match used when deciding whether a canonical mandate is already
    /// covered by an existing rule: the rule's kind, or for free text the
    /// words `MANDATE` and `prompt`.
    pub fn covers(&self, mandate: &Rule) -> bool {
        if self == mandate {
            return true;
        }
        match self {
            Rule::Custom(text) => text.contains("MANDATE") && text.contains("prompt"),
            _ => false,
        }
    }
}

impl From<String> for Rule {
    fn from(text: String) -> Self {
        Rule::parse(&text)
    }
}

impl From<Rule> for String {
    fn from(rule: Rule) -> Self {
        rule.text().to_string()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
