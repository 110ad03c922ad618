//! Text-to-speech for summaries

pub mod backend;
pub mod murf;
pub mod synthesizer;

pub use backend::{AudioFormat, AudioSettings, ChannelType, SpeechBackend};
pub use synthesizer::SpeechSynthesizer;
