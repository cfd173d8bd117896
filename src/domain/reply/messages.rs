//! Fixed reply texts. None of these require a model call.

pub const WELCOME_MESSAGE: &str = "🏥 *Health Assistant*

Hi! I can help you understand your symptoms.

*How to use:*
• Type your symptoms
• Or send a voice message 🎤

*Example:*
_\"I have a headache and fever for 2 days\"_

*Commands:* help | new | 1 | 2 | 3";

pub const HELP_MESSAGE: &str = "ℹ️ *Help*

*Describe your symptoms with:*
• What you feel
• How long (hours/days)
• Severity (mild/moderate/severe)

*Example:* _\"Sore throat and runny nose for 2 days, moderate severity\"_

*Commands:*
• *new* - Start over
• *more* - More details
• *1* - Detailed info
• *2* - Medication tips
• *3* - Warning signs

🚨 Emergency? Call 911 (US) / 112 (India/EU)";

pub const EMERGENCY_MESSAGE: &str = "🚨 *EMERGENCY*

This sounds serious. Please call emergency services NOW:

🇺🇸 USA: *911*
🇮🇳 India: *112*
🇬🇧 UK: *999*

Do not wait.

_If not an emergency, describe your symptoms again._";

pub const CONVERSATION_CLEARED: &str = "🔄 *Conversation cleared!*

Describe your symptoms and I'll help.";

pub const GOODBYE_MESSAGE: &str = "👋 Take care! Type *hi* to chat again.";

pub const NO_ASSESSMENT_MESSAGE: &str = "ℹ️ No assessment yet. Describe your symptoms first.";

pub const NO_REMEDIES_MESSAGE: &str = "ℹ️ No remedies available yet.\n\nDescribe your symptoms first.";

pub const VOICE_UNCLEAR_MESSAGE: &str =
    "🎤 Couldn't understand the audio clearly.\n\nTry speaking clearly or type your symptoms instead.";

pub const NO_MESSAGE_RECEIVED: &str =
    "ℹ️ No message received. Describe your symptoms or send a voice message.";

pub const ERROR_MESSAGE: &str = "❌ Something went wrong. Try again or type *new* to start over.";

pub const CHAT_FOLLOWUP: &str = "\n\n_Ask me anything else about your health!_";

pub const VOICE_ERROR_MESSAGE: &str =
    "🎤 Couldn't process your voice message.\n\nPlease type your symptoms instead.";
