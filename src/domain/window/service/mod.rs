use chrono::{DateTime, Datelike, NaiveTime, TimeDelta, Utc};
use tracing::{debug, warn};

use crate::domain::window::model::{TimeRange, WindowPreset, WindowSpec};

/// Midnight UTC of the day containing `now`.
pub fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Sunday 00:00 UTC of the week containing `now`.
pub fn start_of_week(now: DateTime<Utc>) -> DateTime<Utc> {
    let days_since_sunday = now.weekday().num_days_from_sunday() as i64;
    start_of_day(now) - TimeDelta::days(days_since_sunday)
}

/// Bounds of the window a spec selects at `now`.
pub fn resolve_window(spec: &WindowSpec, now: DateTime<Utc>) -> TimeRange {
    match spec {
        WindowSpec::Preset(preset) => resolve_preset(*preset, now),
        WindowSpec::Custom(range) => *range,
        WindowSpec::Unrecognized(raw) => {
            warn!("Unrecognized window {:?}, using last 7 days", raw);
            resolve_preset(WindowPreset::Last7d, now)
        }
    }
}

fn resolve_preset(preset: WindowPreset, now: DateTime<Utc>) -> TimeRange {
    let today = start_of_day(now);
    let week_start = start_of_week(now);

    match preset {
        WindowPreset::Today => TimeRange::new(today, today + TimeDelta::days(1)),
        WindowPreset::Yesterday => TimeRange::new(today - TimeDelta::days(1), today),
        WindowPreset::Last24h => TimeRange::new(now - TimeDelta::hours(24), now),
        WindowPreset::Last48h => TimeRange::new(now - TimeDelta::hours(48), now),
        WindowPreset::Week => TimeRange::new(week_start, now),
        WindowPreset::LastWeek => TimeRange::new(week_start - TimeDelta::days(7), week_start),
        WindowPreset::Last7d => TimeRange::new(now - TimeDelta::days(7), now),
        WindowPreset::Last14d => TimeRange::new(now - TimeDelta::days(14), now),
    }
}

/// Bounds of the equivalent period immediately before `spec`.
///
/// Every window's prior has the same length and ends where the current one
/// starts, so `week` ends on this week's Sunday and `lastweek` on last week's.
/// Unrecognized specs, and custom ranges too extreme to shift, fall back to
/// `[now - 14d, now - 7d)`.
pub fn prior_range(spec: &WindowSpec, now: DateTime<Utc>) -> TimeRange {
    let current = resolve_window(spec, now);

    let prior = current.preceding().unwrap_or_else(|| {
        warn!("Window {} cannot be shifted back, using last 7 days", spec);
        TimeRange::new(now - TimeDelta::days(14), now - TimeDelta::days(7))
    });

    debug!(window = %spec, prior = %prior, "Resolved prior window");
    prior
}

/// Prior-equivalent window, always as an explicit custom range.
pub fn prior_window(spec: &WindowSpec, now: DateTime<Utc>) -> WindowSpec {
    WindowSpec::Custom(prior_range(spec, now))
}

/// String form of [`prior_window`], for callers holding a raw query value.
pub fn prior_window_str(win: &str, now: DateTime<Utc>) -> String {
    prior_window(&WindowSpec::parse(win), now).to_string()
}
