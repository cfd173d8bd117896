//! Media download adapters.

mod mock_media;
mod twilio_media;

pub use mock_media::MockMediaFetcher;
pub use twilio_media::{TwilioMediaFetcher, UnconfiguredMediaFetcher};
