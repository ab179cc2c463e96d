//! Age classification of the working-memory document, shared by the state
//! verifier and the alert evaluator.

use chrono::{DateTime, Duration, Utc};
use config::StalenessConfig;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    Missing,
    /// Updated within the warning window. Carries whole hours since update.
    Fresh(i64),
    /// Older than the warning threshold, not yet critical.
    Warning(i64),
    Critical(i64)
}

impl Staleness {
    /// Classify by elapsed time. Both boundaries are exclusive: exactly
    /// `warning_hours` old is still fresh.
    pub fn classify(
        modified_at: DateTime<Utc>,
        now: DateTime<Utc>,
        thresholds: &StalenessConfig
    ) -> Self {
        let age = now - modified_at;
        let hours = age.num_hours();
        if age > Duration::hours(i64::from(thresholds.critical_hours)) {
            Staleness::Critical(hours)
        } else if age > Duration::hours(i64::from(thresholds.warning_hours)) {
            Staleness::Warning(hours)
        } else {
            Staleness::Fresh(hours)
        }
    }

    /// Classify the file at `path`; an absent or unreadable file is
    /// [`Staleness::Missing`].
    pub fn of_file(path: &Path, now: DateTime<Utc>, thresholds: &StalenessConfig) -> Self {
        let modified = std::fs::metadata(path).and_then(|m| m.modified());
        match modified {
            Ok(time) => Self::classify(time.into(), now, thresholds),
            Err(e) => {
                tracing::debug!("{} unavailable: {}", path.display(), e);
                Staleness::Missing
            }
        }
    }
}
