use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::BackendError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AudioFormat {
    #[default]
    Mp3,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChannelType {
    #[default]
    Stereo,
}

/// Output encoding requested from the speech backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSettings {
    pub format: AudioFormat,
    pub channel_type: ChannelType,
    pub sample_rate: u32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            format: AudioFormat::Mp3,
            channel_type: ChannelType::Stereo,
            sample_rate: 44_100,
        }
    }
}

/// A text-to-speech endpoint that renders text and returns a reference
/// (usually a URL) to the produced audio.
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    /// Returns `Ok(None)` when the backend answered without an audio reference.
    ///
    /// # Errors
    ///
    /// Returns the backend's raw failure.
    async fn generate(
        &self,
        text: &str,
        voice_id: &str,
        settings: &AudioSettings,
    ) -> Result<Option<String>, BackendError>;
}
