use chrono::{DateTime, SubsecRound, Utc};

/// Current UTC time at the precision documents are stored with.
///
/// Aggregates stamped with this value compare equal to their persisted
/// form after a round trip.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
