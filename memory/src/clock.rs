//! Wall clock pinned to the configured note timezone.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use config::ClockConfig;
use mk_core::Clock;

/// The real clock, reporting dates in a fixed UTC offset.
#[derive(Debug, Clone)]
pub struct SystemClock {
    offset: FixedOffset,
    label: String
}

impl SystemClock {
    pub fn from_config(config: &ClockConfig) -> Self {
        let offset = FixedOffset::east_opt(config.utc_offset_minutes * 60).unwrap_or_else(|| {
            tracing::warn!(
                "UTC offset {} minutes out of range, using UTC",
                config.utc_offset_minutes
            );
            Utc.fix()
        });
        Self {
            offset,
            label: config.label.clone()
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }

    fn label(&self) -> &str {
        &self.label
    }
}
