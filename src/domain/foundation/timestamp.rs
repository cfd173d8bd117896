//! UTC instants used for conversation activity and expiry.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A UTC instant. Ordered, so the later of two activity times is `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Unix seconds to an instant. Values chrono cannot represent map to the epoch.
    pub fn from_unix_secs(secs: u64) -> Self {
        let secs = i64::try_from(secs).unwrap_or(i64::MAX);
        Self(Utc.timestamp_opt(secs, 0).single().unwrap_or_default())
    }

    pub fn as_unix_secs(&self) -> u64 {
        self.0.timestamp().max(0) as u64
    }

    pub fn plus_secs(&self, secs: u64) -> Self {
        Self(self.0 + Duration::seconds(secs.min(i64::MAX as u64) as i64))
    }

    /// Time elapsed from `earlier` to `self`; negative when `earlier` is later.
    pub fn elapsed_since(&self, earlier: Timestamp) -> Duration {
        self.0.signed_duration_since(earlier.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_seconds_survive_conversion() {
        assert_eq!(Timestamp::from_unix_secs(1_705_276_800).as_unix_secs(), 1_705_276_800);
    }

    #[test]
    fn elapsed_is_signed() {
        let start = Timestamp::from_unix_secs(1_000);
        let later = start.plus_secs(90);
        assert_eq!(later.elapsed_since(start), Duration::seconds(90));
        assert_eq!(start.elapsed_since(later), Duration::seconds(-90));
    }

    #[test]
    fn max_picks_the_later_instant() {
        let a = Timestamp::from_unix_secs(10);
        let b = Timestamp::from_unix_secs(20);
        assert_eq!(a.max(b), b);
        assert_eq!(b.max(a), b);
    }

    #[test]
    fn serializes_as_rfc3339() {
        let json = serde_json::to_string(&Timestamp::from_unix_secs(0)).unwrap();
        assert_eq!(json, "\"1970-01-01T00:00:00Z\"");
    }
}
