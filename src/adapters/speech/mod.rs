//! Speech adapters: Watson STT/TTS, mocks, and an unconfigured stand-in.

mod config;
mod mock_speech;
mod unconfigured;
mod watson_stt;
mod watson_tts;

pub use config::WatsonSpeechConfig;
pub use mock_speech::{MockSpeechSynthesizer, MockTranscriber};
pub use unconfigured::UnconfiguredSpeech;
pub use watson_stt::WatsonSttTranscriber;
pub use watson_tts::WatsonTtsSynthesizer;
