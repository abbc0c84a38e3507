//! Time windows for filtering readings by recency

use crate::time::Timestamp;

const SECOND_MS: u64 = 1_000;
const MINUTE_MS: u64 = 60 * SECOND_MS;
const HOUR_MS: u64 = 60 * MINUTE_MS;
const DAY_MS: u64 = 24 * HOUR_MS;

/// Named relative duration used to filter readings by recency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    /// Trailing 60 seconds
    Last60Seconds,
    /// Trailing hour
    LastHour,
    /// Trailing 24 hours
    Last24Hours,
    /// Trailing 7 days
    LastWeek,
    /// Trailing 30 days
    Last30Days,
    /// No recency filtering
    #[default]
    All,
}

impl TimeWindow {
    /// Parse a window tag.
    ///
    /// Unrecognized tags fall back to [`TimeWindow::All`], i.e. no
    /// filtering. Callers wanting strict parsing can match on the tag
    /// themselves first.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "last60Seconds" => Self::Last60Seconds,
            "lastHour" => Self::LastHour,
            "last24Hours" => Self::Last24Hours,
            "lastWeek" => Self::LastWeek,
            "last30Days" => Self::Last30Days,
            _ => Self::All,
        }
    }

    /// The canonical tag for this window.
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Last60Seconds => "last60Seconds",
            Self::LastHour => "lastHour",
            Self::Last24Hours => "last24Hours",
            Self::LastWeek => "lastWeek",
            Self::Last30Days => "last30Days",
            Self::All => "all",
        }
    }

    /// Human-readable name, suitable for picker widgets.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Last60Seconds => "Last 60 Seconds",
            Self::LastHour => "Last Hour",
            Self::Last24Hours => "Last 24 Hours",
            Self::LastWeek => "Last Week",
            Self::Last30Days => "Last 30 Days",
            Self::All => "All",
        }
    }

    /// Window length in milliseconds; `None` means unbounded.
    pub const fn duration_ms(&self) -> Option<u64> {
        match self {
            Self::Last60Seconds => Some(60 * SECOND_MS),
            Self::LastHour => Some(HOUR_MS),
            Self::Last24Hours => Some(DAY_MS),
            Self::LastWeek => Some(7 * DAY_MS),
            Self::Last30Days => Some(30 * DAY_MS),
            Self::All => None,
        }
    }

    /// Earliest timestamp still inside the window, given the current time.
    ///
    /// `None` means everything is inside. Saturates at the epoch for
    /// windows longer than the clock's history.
    pub fn cutoff(&self, now: Timestamp) -> Option<Timestamp> {
        self.duration_ms().map(|d| now.saturating_sub(d))
    }

    /// All selectable windows, in picker order.
    pub const fn all() -> [TimeWindow; 6] {
        [
            Self::Last60Seconds,
            Self::LastHour,
            Self::Last24Hours,
            Self::LastWeek,
            Self::Last30Days,
            Self::All,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_round_trip() {
        for window in TimeWindow::all() {
            assert_eq!(TimeWindow::from_tag(window.tag()), window);
        }
    }

    #[test]
    fn unknown_tag_falls_back_to_all() {
        assert_eq!(TimeWindow::from_tag("lastFortnight"), TimeWindow::All);
        assert_eq!(TimeWindow::from_tag(""), TimeWindow::All);
    }

    #[test]
    fn cutoffs() {
        let now = 100 * HOUR_MS;
        assert_eq!(TimeWindow::LastHour.cutoff(now), Some(99 * HOUR_MS));
        assert_eq!(TimeWindow::Last60Seconds.cutoff(now), Some(now - MINUTE_MS));
        assert_eq!(TimeWindow::All.cutoff(now), None);
    }

    #[test]
    fn cutoff_saturates_at_epoch() {
        assert_eq!(TimeWindow::Last30Days.cutoff(1000), Some(0));
    }
}
