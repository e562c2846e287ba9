//! Window specifiers: named presets and explicit `start,end` ranges.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use serde::Serialize;
use serde_with::{DeserializeFromStr, SerializeDisplay};

/// Output format for window bounds: second precision, always UTC.
pub const WINDOW_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Named windows offered by the dashboard window selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowPreset {
    Today,
    Yesterday,
    Last24h,
    Last48h,
    /// Week-to-date, weeks starting Sunday 00:00 UTC.
    Week,
    LastWeek,
    Last7d,
    Last14d,
}

impl WindowPreset {
    pub const ALL: [WindowPreset; 8] = [
        Self::Today,
        Self::Yesterday,
        Self::Last24h,
        Self::Last48h,
        Self::Week,
        Self::LastWeek,
        Self::Last7d,
        Self::Last14d,
    ];

    pub fn from_code<S: AsRef<str>>(code: S) -> Option<Self> {
        match code.as_ref() {
            "today" => Some(Self::Today),
            "yesterday" => Some(Self::Yesterday),
            "24h" => Some(Self::Last24h),
            "48h" => Some(Self::Last48h),
            "week" => Some(Self::Week),
            "lastweek" => Some(Self::LastWeek),
            "7d" => Some(Self::Last7d),
            "14d" => Some(Self::Last14d),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::Last24h => "24h",
            Self::Last48h => "48h",
            Self::Week => "week",
            Self::LastWeek => "lastweek",
            Self::Last7d => "7d",
            Self::Last14d => "14d",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Yesterday => "Yesterday",
            Self::Last24h => "Last 24h",
            Self::Last48h => "Last 48h",
            Self::Week => "Week-to-date",
            Self::LastWeek => "Last week",
            Self::Last7d => "Last 7 days",
            Self::Last14d => "Last 14 days",
        }
    }

    /// Windows spanning several days are the ones young clusters lack data for.
    pub fn spans_multiple_days(&self) -> bool {
        matches!(
            self,
            Self::Last7d | Self::Last14d | Self::Week | Self::LastWeek
        )
    }
}

/// Half-open UTC interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// The block of equal length ending where this one starts.
    /// `None` only when the shift leaves chrono's representable range.
    pub fn preceding(&self) -> Option<TimeRange> {
        let start = self.start.checked_sub_signed(self.duration())?;
        Some(TimeRange::new(start, self.start))
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{}",
            self.start.format(WINDOW_TIME_FORMAT),
            self.end.format(WINDOW_TIME_FORMAT)
        )
    }
}

/// A window specifier as it travels through query strings.
///
/// Parsing never fails: anything that is neither a preset nor a well-formed
/// `start,end` pair is kept verbatim as [`WindowSpec::Unrecognized`] and resolves
/// to the seven-day fallback.
#[derive(Debug, Clone, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub enum WindowSpec {
    Preset(WindowPreset),
    Custom(TimeRange),
    Unrecognized(String),
}

impl WindowSpec {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        if let Some(preset) = WindowPreset::from_code(trimmed) {
            return Self::Preset(preset);
        }

        let parts: Vec<&str> = trimmed.split(',').collect();
        if let [start, end] = parts.as_slice() {
            if let (Some(start), Some(end)) = (parse_instant(start), parse_instant(end)) {
                if start <= end {
                    return Self::Custom(TimeRange::new(start, end));
                }
            }
        }

        Self::Unrecognized(raw.to_string())
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl FromStr for WindowSpec {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for WindowSpec {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<WindowPreset> for WindowSpec {
    fn from(value: WindowPreset) -> Self {
        Self::Preset(value)
    }
}

impl From<TimeRange> for WindowSpec {
    fn from(value: TimeRange) -> Self {
        Self::Custom(value)
    }
}

impl fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preset(preset) => f.write_str(preset.as_code()),
            Self::Custom(range) => range.fmt(f),
            Self::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

/// Accepts RFC 3339 timestamps, offset-less `YYYY-MM-DDTHH:MM:SS[.f]` (read as
/// UTC) and bare dates (midnight UTC).
fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}
