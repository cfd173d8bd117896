//! Voice command handlers.

mod synthesize_speech;
mod transcribe_audio;

pub use synthesize_speech::{
    SynthesizeSpeechCommand, SynthesizeSpeechError, SynthesizeSpeechHandler,
    SynthesizeSpeechResult,
};
pub use transcribe_audio::{
    TranscribeAudioCommand, TranscribeAudioError, TranscribeAudioHandler, TranscribeAudioResult,
};
