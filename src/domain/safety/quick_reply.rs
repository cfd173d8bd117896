//! Quick-reply templates over the last assessment.

use crate::domain::reply::urgency_emoji;
use crate::domain::triage::Assessment;

/// Expands quick reply `n` against `last`. `None` when there is no
/// assessment yet or `n` is not 1, 2 or 3.
pub fn handle_quick_reply(n: u8, last: Option<&Assessment>) -> Option<String> {
    let a = last?;
    match n {
        1 => Some(format!(
            "📚 *Details*\n\n*Condition:*\n{}\n\n*Causes:*\n{}\n\n_Any questions?_",
            a.analysis,
            numbered_lines(&a.probable_causes)
        )),
        2 => Some(format!(
            "💊 *Treatment Tips*\n\n⚠️ Always consult a doctor before taking medications.\n\n\
             *Recommended:*\n{}\n\n\
             *OTC options:* Ask your pharmacist about suitable pain relievers or symptom-specific medications.\n\n\
             _Need more info?_",
            bulleted_lines(&a.home_remedies)
        )),
        3 => Some(format!(
            "⚠️ *Warning Signs*\n\n*Seek immediate care if:*\n\
             • Difficulty breathing\n\
             • Chest pain\n\
             • High fever (>103°F/39.4°C)\n\
             • Confusion\n\
             • Symptoms rapidly worsen\n\n\
             *Your urgency:* {} {}\n\n_How are you feeling now?_",
            urgency_emoji(a.urgency_level),
            a.urgency_level
        )),
        _ => None,
    }
}

pub(crate) fn numbered_lines(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn bulleted_lines(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}
