//! Typed intents and intent classification parsing
//!
//! The coordinator model is asked only to classify the user's request and
//! extract arguments, returning strict JSON. Parsing that JSON, and the
//! keyword fallback used when the model's output is malformed, live here as
//! ordinary code.

use serde::Deserialize;

/// What the user wants this turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Fetch hot posts from a subreddit
    Fetch {
        subreddit: Option<String>,
        limit: Option<u64>,
    },
    /// Summarize the most recent fetch
    Summarize,
    /// Read the latest summary (or raw list) aloud
    Speak,
    /// Anything else: answer directly, no delegation
    Other,
}

/// JSON contract the classifier model is instructed to emit
#[derive(Debug, Deserialize)]
struct Classification {
    intent: String,
    #[serde(default)]
    subreddit: Option<String>,
    #[serde(default)]
    limit: Option<u64>,
}

/// Parse the classifier model's JSON output into an intent.
///
/// Returns `None` when the output does not follow the contract, in which
/// case the keyword fallback decides.
pub fn parse_classification(raw: &str) -> Option<Intent> {
    let trimmed = strip_code_fence(raw.trim());
    let parsed: Classification = serde_json::from_str(trimmed).ok()?;

    match parsed.intent.as_str() {
        "fetch" => Some(Intent::Fetch {
            subreddit: parsed
                .subreddit
                .map(|s| normalize_subreddit(&s))
                .filter(|s| !s.is_empty()),
            limit: parsed.limit,
        }),
        "summarize" => Some(Intent::Summarize),
        "speak" => Some(Intent::Speak),
        "other" => Some(Intent::Other),
        _ => None,
    }
}

/// Deterministic fallback classifier over the raw user text
pub fn classify_keywords(input: &str) -> Intent {
    let lower = input.to_lowercase();

    if lower.contains("summar") {
        return Intent::Summarize;
    }

    if lower.contains("speak")
        || lower.contains("read it")
        || lower.contains("read that")
        || lower.contains("aloud")
        || lower.contains("say it")
    {
        return Intent::Speak;
    }

    if lower.contains("hot post") || lower.contains("hot thread") || lower.contains("r/") {
        return Intent::Fetch {
            subreddit: extract_subreddit(&lower),
            limit: None,
        };
    }

    Intent::Other
}

/// Pull a subreddit name out of an "r/name" mention
fn extract_subreddit(lower: &str) -> Option<String> {
    let start = lower.find("r/")? + 2;
    let name: String = lower[start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Drop an "r/" prefix the model may have kept
fn normalize_subreddit(name: &str) -> String {
    let trimmed = name.trim();
    trimmed
        .strip_prefix("r/")
        .or_else(|| trimmed.strip_prefix("/r/"))
        .unwrap_or(trimmed)
        .to_string()
}

/// Strip a surrounding markdown code fence, if present
fn strip_code_fence(raw: &str) -> &str {
    let without_open = raw
        .strip_prefix("```json")
        .or_else(|| raw.strip_prefix("```"))
        .unwrap_or(raw);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}
