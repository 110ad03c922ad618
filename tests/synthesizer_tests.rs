mod common;

use common::{MockSpeechBackend, Reply, synthesizer};
use email_reader::errors::{ConfigError, SpeechError};
use email_reader::tts::{AudioFormat, ChannelType, SpeechSynthesizer};

#[test]
fn test_blank_api_key_is_rejected() {
    let err = SpeechSynthesizer::new("  ", "en-US-natalie", MockSpeechBackend::with_url("x"))
        .err()
        .unwrap();
    assert!(matches!(err, ConfigError::MissingCredential("MURF_API_KEY")));
}

#[tokio::test]
async fn test_default_voice_and_fixed_settings() {
    let backend = MockSpeechBackend::with_url("https://cdn.example.com/summary.mp3");
    let synthesizer = synthesizer(backend.clone());
    assert_eq!(synthesizer.default_voice(), "en-US-natalie");

    let result = synthesizer
        .synthesize("The review moved to Thursday.", None)
        .await
        .unwrap();
    assert_eq!(result.audio_reference, "https://cdn.example.com/summary.mp3");

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].text, "The review moved to Thursday.");
    assert_eq!(calls[0].voice_id, "en-US-natalie");
    assert_eq!(calls[0].settings.format, AudioFormat::Mp3);
    assert_eq!(calls[0].settings.channel_type, ChannelType::Stereo);
    assert_eq!(calls[0].settings.sample_rate, 44_100);
}

#[tokio::test]
async fn test_explicit_voice_overrides_default() {
    let backend = MockSpeechBackend::with_url("https://cdn.example.com/b.mp3");
    let synthesizer = synthesizer(backend.clone());

    synthesizer
        .synthesize("Hello there.", Some("en-UK-hazel"))
        .await
        .unwrap();

    assert_eq!(backend.calls()[0].voice_id, "en-UK-hazel");
}

#[tokio::test]
async fn test_missing_audio_reference_is_an_error() {
    let synthesizer = synthesizer(MockSpeechBackend::without_audio());
    let err = synthesizer.synthesize("Some summary.", None).await.unwrap_err();
    assert_eq!(err, SpeechError::EmptyResult);

    let synthesizer = synthesizer_with_blank_url();
    let err = synthesizer.synthesize("Some summary.", None).await.unwrap_err();
    assert_eq!(err, SpeechError::EmptyResult);
}

fn synthesizer_with_blank_url() -> SpeechSynthesizer {
    synthesizer(MockSpeechBackend::with_url("   "))
}

#[tokio::test]
async fn test_backend_error_keeps_original_message() {
    let backend = MockSpeechBackend::new(vec![Reply::api(401, "Invalid api-key")]);
    let synthesizer = synthesizer(backend.clone());

    let err = synthesizer.synthesize("Some summary.", None).await.unwrap_err();

    match err {
        SpeechError::Backend(message) => assert!(message.contains("Invalid api-key")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn test_transient_errors_are_retried_when_enabled() {
    let backend = MockSpeechBackend::new(vec![
        Reply::Transport("timed out".to_string()),
        Reply::text("https://cdn.example.com/retry.mp3"),
    ]);
    let synthesizer = synthesizer(backend.clone()).with_max_retries(1);

    let result = synthesizer.synthesize("Some summary.", None).await.unwrap();

    assert_eq!(result.audio_reference, "https://cdn.example.com/retry.mp3");
    assert_eq!(backend.call_count(), 2);
}
