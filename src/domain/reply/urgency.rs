//! Urgency markers shared by every template.

use crate::domain::triage::UrgencyLevel;

pub fn urgency_emoji(level: UrgencyLevel) -> &'static str {
    match level {
        UrgencyLevel::Emergency => "🚨",
        UrgencyLevel::High => "⚠️",
        UrgencyLevel::Medium => "🟡",
        UrgencyLevel::Low => "🟢",
    }
}

pub fn urgency_indicator(level: UrgencyLevel) -> &'static str {
    match level {
        UrgencyLevel::Emergency => "🔴 EMERGENCY",
        UrgencyLevel::High => "🟠 HIGH",
        UrgencyLevel::Medium => "🟡 MEDIUM",
        UrgencyLevel::Low => "🟢 LOW",
    }
}

/// Short action phrase for the web view.
pub fn urgency_action(level: UrgencyLevel) -> &'static str {
    match level {
        UrgencyLevel::Emergency => "Seek help NOW",
        UrgencyLevel::High => "See doctor soon",
        UrgencyLevel::Medium => "Monitor closely",
        UrgencyLevel::Low => "Self-care should help",
    }
}
