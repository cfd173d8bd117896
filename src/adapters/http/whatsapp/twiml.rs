//! TwiML rendering for webhook replies.

use quick_xml::escape::escape;

pub const TWIML_CONTENT_TYPE: &str = "text/xml";

/// Wraps a reply in a single TwiML `<Message>`.
pub fn message_response(text: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>{}</Message></Response>",
        escape(text)
    )
}
