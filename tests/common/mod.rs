//! Deterministic in-memory backends shared by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use email_reader::ai::{EmailSummarizer, GenerationParams, ModelProvider, SummarizationBackend};
use email_reader::errors::BackendError;
use email_reader::pipeline::SummarizationPipeline;
use email_reader::tts::{AudioSettings, SpeechBackend, SpeechSynthesizer};

#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Api(u16, String),
    Transport(String),
    Panic(String),
}

impl Reply {
    pub fn text(s: &str) -> Self {
        Reply::Text(s.to_string())
    }

    pub fn api(status: u16, message: &str) -> Self {
        Reply::Api(status, message.to_string())
    }
}

/// Replies are consumed in order; the last one repeats forever.
fn next_reply(replies: &Mutex<VecDeque<Reply>>) -> Reply {
    let mut replies = replies.lock().unwrap();
    if replies.len() > 1 {
        replies.pop_front().unwrap()
    } else {
        replies.front().cloned().expect("mock needs at least one reply")
    }
}

#[derive(Debug, Clone)]
pub struct RecordedPrompt {
    pub system: String,
    pub user: String,
    pub params: GenerationParams,
}

pub struct MockSummaryBackend {
    model: String,
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<RecordedPrompt>>,
}

impl MockSummaryBackend {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            model: "mock-model".to_string(),
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::new(vec![Reply::text(text)])
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<RecordedPrompt> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SummarizationBackend for MockSummaryBackend {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn invoke(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, BackendError> {
        self.calls.lock().unwrap().push(RecordedPrompt {
            system: system_prompt.to_string(),
            user: user_prompt.to_string(),
            params: *params,
        });

        match next_reply(&self.replies) {
            Reply::Text(text) => Ok(text),
            Reply::Api(status, message) => Err(BackendError::Api { status, message }),
            Reply::Transport(message) => Err(BackendError::Http(message)),
            Reply::Panic(message) => panic!("{message}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedSpeech {
    pub text: String,
    pub voice_id: String,
    pub settings: AudioSettings,
}

pub struct MockSpeechBackend {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<RecordedSpeech>>,
    no_audio: bool,
}

impl MockSpeechBackend {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
            no_audio: false,
        })
    }

    pub fn with_url(url: &str) -> Arc<Self> {
        Self::new(vec![Reply::text(url)])
    }

    /// Backend that answers successfully but without an audio reference.
    pub fn without_audio() -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(vec![Reply::text("")].into()),
            calls: Mutex::new(Vec::new()),
            no_audio: true,
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<RecordedSpeech> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechBackend for MockSpeechBackend {
    async fn generate(
        &self,
        text: &str,
        voice_id: &str,
        settings: &AudioSettings,
    ) -> Result<Option<String>, BackendError> {
        self.calls.lock().unwrap().push(RecordedSpeech {
            text: text.to_string(),
            voice_id: voice_id.to_string(),
            settings: *settings,
        });

        if self.no_audio {
            return Ok(None);
        }

        match next_reply(&self.replies) {
            Reply::Text(url) => Ok(Some(url)),
            Reply::Api(status, message) => Err(BackendError::Api { status, message }),
            Reply::Transport(message) => Err(BackendError::Http(message)),
            Reply::Panic(message) => panic!("{message}"),
        }
    }
}

pub fn summarizer(provider: ModelProvider, backend: Arc<MockSummaryBackend>) -> EmailSummarizer {
    EmailSummarizer::with_backend(provider, backend)
}

pub fn synthesizer(backend: Arc<MockSpeechBackend>) -> SpeechSynthesizer {
    SpeechSynthesizer::new("test-murf-key", "en-US-natalie", backend).unwrap()
}

pub fn pipeline(
    summary_backend: Arc<MockSummaryBackend>,
    speech_backend: Arc<MockSpeechBackend>,
) -> SummarizationPipeline {
    SummarizationPipeline::new(
        summarizer(ModelProvider::Gemini, summary_backend),
        synthesizer(speech_backend),
    )
}

pub const LONG_BODY: &str = "Hi team, the quarterly review moved to Thursday at 3pm. \
    Please send your slides to Dana by Wednesday noon so they can be merged.";
