use email_reader::ai::prompt_builder::{
    ContentCheck, MAX_INPUT_CHARS, SYSTEM_PROMPT, build_summary_prompt, check_content,
    fit_body_to_budget,
};

#[test]
fn test_summary_prompt_template() {
    let prompt = build_summary_prompt("Lunch", "amy@example.com", "Are we still on for noon?");
    let expected = "Please provide a concise summary of this email. Focus on the main purpose, key information, and any required actions.\n\
\n\
Subject: Lunch\n\
Sender: amy@example.com\n\
Email Body: Are we still on for noon?\n\
\n\
Please summarize this email in 2-3 clear sentences that capture:\n\
1. The main purpose or reason for the email\n\
2. Key information or important details\n\
3. Any actions required or deadlines mentioned\n\
\n\
Summary:";
    assert_eq!(prompt, expected);
}

#[test]
fn test_system_prompt() {
    assert!(SYSTEM_PROMPT.starts_with("You are a helpful email summarization assistant."));
}

#[test]
fn test_brief_email_is_summarized_locally() {
    assert_eq!(
        check_content("Hi", "a@b.com", "ok"),
        ContentCheck::Brief("Brief email from a@b.com: Hi ok".to_string())
    );
}

#[test]
fn test_regular_email_needs_model() {
    assert_eq!(
        check_content("Invoice", "billing@example.com", "Your invoice for March is attached."),
        ContentCheck::Summarize
    );
}

#[test]
fn test_long_body_is_truncated_within_budget() {
    let subject = "Quarterly report";
    let sender = "cfo@example.com";
    let body = "x".repeat(20_000);

    let fitted = fit_body_to_budget(subject, sender, &body);

    assert!(fitted.ends_with("\n\n[Content truncated - original: 20000 chars]"));
    let total = subject.chars().count() + sender.chars().count() + fitted.chars().count() + 2;
    assert!(total <= MAX_INPUT_CHARS, "total {total} exceeds budget");

    let kept = fitted.trim_end_matches("\n\n[Content truncated - original: 20000 chars]");
    assert_eq!(kept.len(), MAX_INPUT_CHARS - (subject.len() + sender.len() + 200));
}

#[test]
fn test_body_within_budget_is_untouched() {
    let body = "y".repeat(MAX_INPUT_CHARS - 100);
    assert_eq!(fit_body_to_budget("S", "s@x.io", &body), body);
}
