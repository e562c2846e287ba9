//! Window API DTOs

use serde::{Deserialize, Serialize};

use crate::domain::window::model::{TimeRange, WindowPreset};

#[derive(Deserialize, Debug, Default)]
pub struct WindowQuery {
    /// Preset code or `start,end`. Defaults to `7d`.
    pub window: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WindowPresetDto {
    pub value: &'static str,
    pub label: &'static str,
    pub spans_multiple_days: bool,
}

impl From<WindowPreset> for WindowPresetDto {
    fn from(preset: WindowPreset) -> Self {
        Self {
            value: preset.as_code(),
            label: preset.label(),
            spans_multiple_days: preset.spans_multiple_days(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PriorWindowDto {
    /// The window as requested.
    pub window: String,
    /// False when the window fell back to the last 7 days.
    pub recognized: bool,
    pub current: TimeRange,
    /// Prior window in `start,end` form, ready to send to the cost backend.
    pub prior_window: String,
    pub prior: TimeRange,
}
