//! Voice and speech-model catalog.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::conversation::DEFAULT_LANGUAGE;

/// Transcription model used when the language model is rejected.
pub const TELEPHONY_FALLBACK_MODEL: &str = "en-US_Telephony";

const DEFAULT_STT_MODEL: &str = "en-US_Multimedia";

static STT_MODELS: &[(&str, &str)] = &[
    ("English", "en-US_Multimedia"),
    ("Spanish", "es-ES_Multimedia"),
    ("French", "fr-FR_Multimedia"),
    ("Hindi", "hi-IN_Multimedia"),
    ("German", "de-DE_Multimedia"),
    ("Portuguese", "pt-BR_Multimedia"),
    ("Italian", "it-IT_Multimedia"),
    ("Japanese", "ja-JP_Multimedia"),
    ("Korean", "ko-KR_Multimedia"),
    ("Chinese", "zh-CN_Multimedia"),
    ("Arabic", "ar-MS_Multimedia"),
    ("Dutch", "nl-NL_Multimedia"),
];

/// Transcription model for a display language, English when unknown.
pub fn stt_model(language: &str) -> &'static str {
    STT_MODELS
        .iter()
        .find(|(lang, _)| lang.eq_ignore_ascii_case(language.trim()))
        .map(|(_, model)| *model)
        .unwrap_or(DEFAULT_STT_MODEL)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceGender {
    #[default]
    Female,
    Male,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Voice {
    pub id: &'static str,
    pub gender: VoiceGender,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageVoices {
    pub language: &'static str,
    pub voices: Vec<Voice>,
}

const fn female(id: &'static str, description: &'static str) -> Voice {
    Voice {
        id,
        gender: VoiceGender::Female,
        description,
    }
}

const fn male(id: &'static str, description: &'static str) -> Voice {
    Voice {
        id,
        gender: VoiceGender::Male,
        description,
    }
}

/// Synthesis voices per display language. English comes first and its first
/// voice is the fallback voice.
pub static VOICE_CATALOG: Lazy<Vec<LanguageVoices>> = Lazy::new(|| {
    vec![
        LanguageVoices {
            language: "English",
            voices: vec![
                female("en-US_AllisonV3Voice", "American English - Allison"),
                male("en-US_MichaelV3Voice", "American English - Michael"),
                female("en-US_EmilyV3Voice", "American English - Emily"),
                male("en-US_HenryV3Voice", "American English - Henry"),
                female("en-GB_CharlotteV3Voice", "British English - Charlotte"),
                male("en-GB_JamesV3Voice", "British English - James"),
            ],
        },
        LanguageVoices {
            language: "Spanish",
            voices: vec![
                female("es-ES_LauraV3Voice", "Castilian Spanish - Laura"),
                male("es-ES_EnriqueV3Voice", "Castilian Spanish - Enrique"),
                female("es-LA_SofiaV3Voice", "Latin American Spanish - Sofia"),
            ],
        },
        LanguageVoices {
            language: "French",
            voices: vec![
                female("fr-FR_ReneeV3Voice", "French - Renee"),
                male("fr-FR_NicolasV3Voice", "French - Nicolas"),
            ],
        },
        LanguageVoices {
            language: "German",
            voices: vec![
                female("de-DE_BirgitV3Voice", "German - Birgit"),
                male("de-DE_DieterV3Voice", "German - Dieter"),
            ],
        },
        LanguageVoices {
            language: "Italian",
            voices: vec![female("it-IT_FrancescaV3Voice", "Italian - Francesca")],
        },
        LanguageVoices {
            language: "Portuguese",
            voices: vec![female("pt-BR_IsabelaV3Voice", "Brazilian Portuguese - Isabela")],
        },
        LanguageVoices {
            language: "Japanese",
            voices: vec![female("ja-JP_EmiV3Voice", "Japanese - Emi")],
        },
        LanguageVoices {
            language: "Korean",
            voices: vec![female("ko-KR_JinV3Voice", "Korean - Jin")],
        },
        LanguageVoices {
            language: "Dutch",
            voices: vec![female("nl-NL_MerelV3Voice", "Dutch - Merel")],
        },
        LanguageVoices {
            language: "Chinese",
            voices: vec![
                female("zh-CN_LiNaVoice", "Chinese - LiNa"),
                male("zh-CN_WangWeiVoice", "Chinese - WangWei"),
            ],
        },
        LanguageVoices {
            language: "Hindi",
            voices: vec![female("en-US_AllisonV3Voice", "Hindi (via English voice)")],
        },
    ]
});

fn voices_for(language: &str) -> &'static [Voice] {
    let catalog = &*VOICE_CATALOG;
    catalog
        .iter()
        .find(|entry| entry.language.eq_ignore_ascii_case(language.trim()))
        .or_else(|| catalog.first())
        .map(|entry| entry.voices.as_slice())
        .unwrap_or(&[])
}

/// The English voice used when a language-specific voice fails.
pub fn fallback_voice() -> &'static str {
    voices_for(DEFAULT_LANGUAGE)
        .first()
        .map(|v| v.id)
        .unwrap_or("en-US_AllisonV3Voice")
}

/// Picks a voice for the language, preferring the requested gender.
pub fn select_voice(language: &str, gender: VoiceGender) -> &'static str {
    let voices = voices_for(language);
    voices
        .iter()
        .find(|v| v.gender == gender)
        .or_else(|| voices.first())
        .map(|v| v.id)
        .unwrap_or_else(fallback_voice)
}

/// Audio container requested from the synthesis collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Mp3,
    Wav,
    Ogg,
    Webm,
    Flac,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 5] = [Self::Mp3, Self::Wav, Self::Ogg, Self::Webm, Self::Flac];

    /// Value for the collaborator's `accept` parameter.
    pub fn accept(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mp3",
            Self::Wav => "audio/wav",
            Self::Ogg => "audio/ogg;codecs=opus",
            Self::Webm => "audio/webm;codecs=opus",
            Self::Flac => "audio/flac",
        }
    }

    /// Response `Content-Type` (accept value without codec parameters).
    pub fn content_type(&self) -> &'static str {
        self.accept().split(';').next().unwrap_or("audio/mp3")
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Ogg => "ogg",
            Self::Webm => "webm",
            Self::Flac => "flac",
        }
    }
}
