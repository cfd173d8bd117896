//! Channel-aware rendering of assessments, chat replies and commands.
//!
//! Every function here is pure: the same input always renders the same text.

use serde::{Deserialize, Serialize};

use crate::domain::safety::{bulleted_lines, handle_quick_reply, numbered_lines};
use crate::domain::triage::{Assessment, ChatReply};

use super::messages::{CHAT_FOLLOWUP, NO_ASSESSMENT_MESSAGE, NO_REMEDIES_MESSAGE};
use super::urgency::{urgency_action, urgency_emoji, urgency_indicator};

/// Delivery channel for a rendered reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Web,
    WhatsApp,
}

const QUICK_REPLY_LEGEND: &str = "*Reply:* 1=Details | 2=Meds | 3=Warning signs | new=Reset";

/// Renders a full assessment.
///
/// A voice transcript, when present, is echoed first so the user can confirm
/// what was heard. WhatsApp output ends with the quick-reply legend.
pub fn format_assessment(
    assessment: &Assessment,
    channel: Channel,
    voice_transcript: Option<&str>,
) -> String {
    let mut out = String::new();
    if let Some(transcript) = voice_transcript {
        out.push_str(&format!("🎤 _\"{}\"_\n\n", transcript));
    }

    out.push_str(&format!(
        "{} *Health Assessment*\n\n",
        urgency_emoji(assessment.urgency_level)
    ));
    out.push_str(&format!("*Summary:*\n{}\n\n", assessment.analysis));
    if !assessment.probable_causes.is_empty() {
        out.push_str(&format!(
            "*Possible Causes:*\n{}\n\n",
            numbered_lines(&assessment.probable_causes)
        ));
    }

    match channel {
        Channel::WhatsApp => out.push_str(&format!(
            "*Urgency:* {}\n\n",
            urgency_indicator(assessment.urgency_level)
        )),
        Channel::Web => out.push_str(&format!(
            "*Urgency:* {} ({})\n\n",
            urgency_indicator(assessment.urgency_level),
            urgency_action(assessment.urgency_level)
        )),
    }

    if !assessment.home_remedies.is_empty() {
        out.push_str(&format!(
            "*Home Care:*\n{}\n\n",
            bulleted_lines(&assessment.home_remedies)
        ));
    }
    if !assessment.medical_advice.is_empty() {
        out.push_str(&format!("*Medical Advice:*\n{}\n\n", assessment.medical_advice));
    }

    if channel == Channel::WhatsApp {
        out.push_str("---\n");
        out.push_str(QUICK_REPLY_LEGEND);
        out.push_str("\n\n");
    }

    out.push_str(&format!("_{}_", assessment.disclaimer));
    out
}

/// Renders a follow-up question from the engine.
pub fn format_chat_reply(reply: &ChatReply, channel: Channel, voice_transcript: Option<&str>) -> String {
    let prefix = voice_transcript
        .map(|t| format!("🎤 _Voice: \"{}\"_\n\n", t))
        .unwrap_or_default();
    match channel {
        Channel::WhatsApp => format!("{}{}{}", prefix, reply.reply, CHAT_FOLLOWUP),
        Channel::Web => format!("{}{}", prefix, reply.reply),
    }
}

/// Renders quick reply `n`, or the fixed no-assessment message.
pub fn format_quick_reply(n: u8, last: Option<&Assessment>) -> String {
    handle_quick_reply(n, last).unwrap_or_else(|| NO_ASSESSMENT_MESSAGE.to_string())
}

/// Detailed view of the last assessment, or the no-assessment message.
pub fn format_more_details(last: Option<&Assessment>) -> String {
    let Some(a) = last else {
        return NO_ASSESSMENT_MESSAGE.to_string();
    };
    format!(
        "📚 *Detailed Assessment*\n\n*Analysis:*\n{}\n\n*Causes:*\n{}\n\n*Home Remedies:*\n{}\n\n*When to see a doctor:*\n{}\n\n_Ask me any follow-up questions!_",
        a.analysis,
        numbered_lines(&a.probable_causes),
        bulleted_lines(&a.home_remedies),
        a.medical_advice
    )
}

/// Numbered remedy list from the last assessment, or the no-remedies message.
pub fn format_remedies(last: Option<&Assessment>) -> String {
    match last {
        Some(a) if !a.home_remedies.is_empty() => format!(
            "🌿 *Home Remedies*\n\n{}\n\n_See a doctor if symptoms persist beyond 3-5 days._",
            numbered_lines(&a.home_remedies)
        ),
        _ => NO_REMEDIES_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::triage::UrgencyLevel;
    use proptest::prelude::*;

    fn assessment() -> Assessment {
        Assessment {
            analysis: "Likely a viral throat infection.".to_string(),
            probable_causes: vec!["Viral pharyngitis".to_string(), "Strep throat".to_string()],
            urgency_level: UrgencyLevel::Medium,
            home_remedies: vec!["Warm salt water gargle".to_string(), "Rest".to_string()],
            medical_advice: "See a doctor within 2-3 days if no improvement.".to_string(),
            disclaimer: "This is not a diagnosis.".to_string(),
        }
    }

    mod assessment_template {
        use super::*;

        #[test]
        fn whatsapp_layout_has_all_sections_and_legend() {
            let text = format_assessment(&assessment(), Channel::WhatsApp, None);
            assert!(text.starts_with("🟡 *Health Assessment*"));
            assert!(text.contains("*Possible Causes:*\n1. Viral pharyngitis\n2. Strep throat"));
            assert!(text.contains("*Urgency:* 🟡 MEDIUM"));
            assert!(text.contains("*Home Care:*\n• Warm salt water gargle\n• Rest"));
            assert!(text.contains("*Medical Advice:*"));
            assert!(text.contains("1=Details | 2=Meds | 3=Warning signs"));
            assert!(text.ends_with("_This is not a diagnosis._"));
        }

        #[test]
        fn web_layout_has_no_legend() {
            let text = format_assessment(&assessment(), Channel::Web, None);
            assert!(!text.contains("1=Details"));
            assert!(text.contains("(Monitor closely)"));
        }

        #[test]
        fn voice_transcript_is_echoed_first() {
            let text = format_assessment(&assessment(), Channel::WhatsApp, Some("sore throat"));
            assert!(text.starts_with("🎤 _\"sore throat\"_\n\n🟡"));
        }

        #[test]
        fn empty_lists_are_omitted() {
            let a = Assessment::degraded("raw text");
            let text = format_assessment(&a, Channel::WhatsApp, None);
            assert!(!text.contains("*Possible Causes:*"));
            assert!(!text.contains("*Home Care:*"));
            assert!(text.contains("*Summary:*\nraw text"));
        }
    }

    mod commands {
        use super::*;

        #[test]
        fn quick_reply_without_assessment_is_fixed_message() {
            assert_eq!(format_quick_reply(2, None), NO_ASSESSMENT_MESSAGE);
        }

        #[test]
        fn more_details_renders_full_view() {
            let a = assessment();
            let text = format_more_details(Some(&a));
            assert!(text.starts_with("📚 *Detailed Assessment*"));
            assert!(text.contains("*When to see a doctor:*"));
            assert_eq!(format_more_details(None), NO_ASSESSMENT_MESSAGE);
        }

        #[test]
        fn remedies_are_numbered() {
            let a = assessment();
            let text = format_remedies(Some(&a));
            assert!(text.contains("1. Warm salt water gargle\n2. Rest"));
            assert_eq!(format_remedies(Some(&Assessment::degraded("x"))), NO_REMEDIES_MESSAGE);
        }
    }

    #[test]
    fn chat_reply_on_whatsapp_gets_footer_and_voice_prefix() {
        let reply = ChatReply::new("How long has it hurt?");
        let text = format_chat_reply(&reply, Channel::WhatsApp, Some("my back hurts"));
        assert_eq!(
            text,
            format!("🎤 _Voice: \"my back hurts\"_\n\nHow long has it hurt?{}", CHAT_FOLLOWUP)
        );
        assert_eq!(format_chat_reply(&reply, Channel::Web, None), "How long has it hurt?");
    }

    proptest! {
        #[test]
        fn format_assessment_is_idempotent(
            analysis in "\\PC{1,60}",
            causes in proptest::collection::vec("\\PC{1,20}", 0..4),
            remedies in proptest::collection::vec("\\PC{1,20}", 0..4),
            level in 0usize..4,
            whatsapp in any::<bool>(),
        ) {
            let a = Assessment {
                analysis,
                probable_causes: causes,
                urgency_level: UrgencyLevel::ALL[level],
                home_remedies: remedies,
                medical_advice: "See a doctor.".to_string(),
                disclaimer: "Not a diagnosis.".to_string(),
            };
            let channel = if whatsapp { Channel::WhatsApp } else { Channel::Web };
            prop_assert_eq!(
                format_assessment(&a, channel, None),
                format_assessment(&a, channel, None)
            );
        }
    }
}
