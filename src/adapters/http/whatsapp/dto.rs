//! Twilio webhook form payload.

use serde::Deserialize;

/// Form fields Twilio posts for an inbound WhatsApp message.
///
/// Only the first media item is considered.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WhatsAppWebhook {
    #[serde(rename = "Body", default)]
    pub body: String,

    #[serde(rename = "From", default)]
    pub from: String,

    #[serde(rename = "NumMedia", default)]
    pub num_media: Option<String>,

    #[serde(rename = "MediaUrl0", default)]
    pub media_url: Option<String>,

    #[serde(rename = "MediaContentType0", default)]
    pub media_content_type: Option<String>,
}

impl WhatsAppWebhook {
    /// Media url and content type of the first attachment, if any.
    pub fn first_media(&self) -> Option<(&str, &str)> {
        let count: u32 = self
            .num_media
            .as_deref()
            .and_then(|n| n.trim().parse().ok())
            .unwrap_or(0);
        if count == 0 {
            return None;
        }
        let url = self.media_url.as_deref().filter(|u| !u.trim().is_empty())?;
        let content_type = self
            .media_content_type
            .as_deref()
            .unwrap_or("application/octet-stream");
        Some((url, content_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn webhook(num_media: &str, url: Option<&str>) -> WhatsAppWebhook {
        WhatsAppWebhook {
            body: String::new(),
            from: "whatsapp:+15550001111".into(),
            num_media: Some(num_media.into()),
            media_url: url.map(String::from),
            media_content_type: Some("audio/ogg".into()),
        }
    }

    #[test]
    fn media_requires_positive_count_and_url() {
        assert!(webhook("0", Some("https://api.twilio.com/m/1")).first_media().is_none());
        assert!(webhook("1", None).first_media().is_none());
        assert_eq!(
            webhook("1", Some("https://api.twilio.com/m/1")).first_media(),
            Some(("https://api.twilio.com/m/1", "audio/ogg"))
        );
    }

    #[test]
    fn unparseable_count_means_no_media() {
        assert!(webhook("many", Some("https://x")).first_media().is_none());
    }
}
