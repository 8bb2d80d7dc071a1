use regex::Regex;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Built-in terms
// ---------------------------------------------------------------------------

/// Subjective phrases that make a completion criterion unverifiable.
pub const DEFAULT_TERMS: &[&str] = &[
    "works",
    "working",
    "done",
    "ready",
    "complete",
    "completed",
    "finished",
    "good",
    "fine",
    "ok",
    "okay",
    "stable",
    "correct",
    "polished",
];

static WORD_RE: OnceLock<Regex> = OnceLock::new();

fn word_re() -> &'static Regex {
    WORD_RE.get_or_init(|| Regex::new(r"[A-Za-z0-9]+").unwrap())
}

fn word_tokens(text: &str) -> Vec<String> {
    word_re()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

// ---------------------------------------------------------------------------
// Denylist
// ---------------------------------------------------------------------------

/// Case-insensitive set of vague terms, checked against criterion text.
///
/// A criterion matches when its token sequence equals a term's, or when a
/// term occurs as a whole word and the criterion has at most three tokens.
/// Substantive sentences that merely contain a term are left alone.
#[derive(Debug, Clone)]
pub struct Denylist {
    terms: Vec<String>,
}

impl Default for Denylist {
    fn default() -> Self {
        Self::new(DEFAULT_TERMS.iter().map(|s| s.to_string()))
    }
}

impl Denylist {
    pub fn new(terms: impl IntoIterator<Item = String>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let terms = terms
            .into_iter()
            .map(|t| word_tokens(&t).join(" "))
            .filter(|t| !t.is_empty() && seen.insert(t.clone()))
            .collect();
        Self { terms }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the matched term if `criterion` is vague, `None` otherwise.
    pub fn matches(&self, criterion: &str) -> Option<&str> {
        let tokens = word_tokens(criterion);
        let normalized = tokens.join(" ");
        for term in &self.terms {
            if normalized == *term {
                return Some(term);
            }
            if tokens.len() <= 3 {
                let term_tokens: Vec<&str> = term.split(' ').collect();
                if tokens
                    .windows(term_tokens.len())
                    .any(|w| w.iter().map(String::as_str).eq(term_tokens.iter().copied()))
                {
                    return Some(term);
                }
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
