//! Prompt text and content-length management for email summaries.

use std::borrow::Cow;

/// System instruction sent with every summarization request.
pub const SYSTEM_PROMPT: &str = "You are a helpful email summarization assistant. Provide clear, concise summaries that capture the essential information and any required actions.";

/// Character budget for subject + sender + body (roughly 4 characters per token).
pub const MAX_INPUT_CHARS: usize = 12_000;

/// Room reserved for the prompt template around the email fields.
pub const PROMPT_OVERHEAD_CHARS: usize = 200;

/// Below this many characters of subject + body the email is summarized
/// without calling a model.
pub const MIN_CONTENT_CHARS: usize = 10;

/// Result of the cheap checks run before any model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentCheck {
    /// Enough content for a model summary.
    Summarize,
    /// Neither subject nor body has any content.
    Missing,
    /// Too short to be worth a model call; carries the synthesized summary.
    Brief(String),
}

#[must_use]
pub fn check_content(subject: &str, sender: &str, body: &str) -> ContentCheck {
    if subject.trim().is_empty() && body.trim().is_empty() {
        return ContentCheck::Missing;
    }

    let combined = format!("{subject} {body}");
    let combined = combined.trim();
    if combined.chars().count() < MIN_CONTENT_CHARS {
        return ContentCheck::Brief(format!("Brief email from {sender}: {combined}"));
    }

    ContentCheck::Summarize
}

/// Truncates `body` so that subject, sender and body together fit
/// [`MAX_INPUT_CHARS`]. The truncated body ends with a marker recording the
/// original length. Subject and sender are never touched.
#[must_use]
pub fn fit_body_to_budget<'a>(subject: &str, sender: &str, body: &'a str) -> Cow<'a, str> {
    let subject_chars = subject.chars().count();
    let sender_chars = sender.chars().count();
    let body_chars = body.chars().count();

    // Fields are joined by single spaces when measuring.
    let total = subject_chars + sender_chars + body_chars + 2;
    if total <= MAX_INPUT_CHARS {
        return Cow::Borrowed(body);
    }

    let overhead = subject_chars + sender_chars + PROMPT_OVERHEAD_CHARS;
    let Some(max_body_chars) = MAX_INPUT_CHARS.checked_sub(overhead).filter(|n| *n > 0) else {
        return Cow::Borrowed(body);
    };

    let kept: String = body.chars().take(max_body_chars).collect();
    Cow::Owned(format!(
        "{kept}\n\n[Content truncated - original: {body_chars} chars]"
    ))
}

/// Builds the user prompt for one email.
#[must_use]
pub fn build_summary_prompt(subject: &str, sender: &str, body: &str) -> String {
    format!(
        "Please provide a concise summary of this email. Focus on the main purpose, key information, and any required actions.

Subject: {subject}
Sender: {sender}
Email Body: {body}

Please summarize this email in 2-3 clear sentences that capture:
1. The main purpose or reason for the email
2. Key information or important details
3. Any actions required or deadlines mentioned

Summary:"
    )
}
