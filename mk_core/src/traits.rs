//! Core traits for the memory engine

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use errors::SchedulerError;

use crate::types::CronJobSnapshot;

/// Source of the current instant and the timezone notes are dated in.
///
/// Components never read the system clock directly; every date comparison
/// goes through [`Clock::today`].
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn offset(&self) -> FixedOffset;

    /// Short zone label appended to human-readable timestamps.
    fn label(&self) -> &str;

    fn local_now(&self) -> DateTime<FixedOffset> {
        self.now().with_timezone(&self.offset())
    }

    fn today(&self) -> NaiveDate {
        self.local_now().date_naive()
    }

    /// `MM/DD/YYYY HH:MM:SS <label>`
    fn display_timestamp(&self) -> String {
        format!(
            "{} {}",
            self.local_now().format("%m/%d/%Y %H:%M:%S"),
            self.label()
        )
    }
}

/// One strategy for reading the scheduler's job inventory.
#[async_trait]
pub trait InventoryProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self) -> Result<Vec<CronJobSnapshot>, SchedulerError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Pinned;

    impl Clock for Pinned {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2026, 10, 17, 3, 30, 0).unwrap()
        }

        fn offset(&self) -> FixedOffset {
            FixedOffset::west_opt(5 * 3600).unwrap()
        }

        fn label(&self) -> &str {
            "EST"
        }
    }

    #[test]
    fn test_today_follows_offset_not_utc() {
        assert_eq!(Pinned.today(), NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
    }

    #[test]
    fn test_display_timestamp_format() {
        assert_eq!(Pinned.display_timestamp(), "10/16/2026 22:30:00 EST");
    }
}
