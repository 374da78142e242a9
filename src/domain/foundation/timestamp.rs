//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_since_is_signed() {
        let earlier = Timestamp::from_datetime(DateTime::from_timestamp(1704326400, 0).unwrap());
        let later = Timestamp::from_datetime(DateTime::from_timestamp(1704326460, 0).unwrap());

        assert_eq!(later.duration_since(&earlier), Duration::seconds(60));
        assert_eq!(earlier.duration_since(&later), Duration::seconds(-60));
    }

    #[test]
    fn displays_as_rfc3339() {
        let ts = Timestamp::from_datetime(DateTime::from_timestamp(1704326400, 0).unwrap());
        assert_eq!(ts.to_string(), "2024-01-04T00:00:00+00:00");
    }
}
