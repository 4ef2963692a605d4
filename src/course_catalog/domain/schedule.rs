use crate::shared::error::AdminError;
use crate::shared::Result;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use std::fmt;

/// Accepted input layouts for a course start, most specific first
const INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Layout of the date/time code appended to course SKUs (`YYYYMMDDHHMM`)
const SKU_CODE_FORMAT: &str = "%Y%m%d%H%M";

/// Layout of the human-readable start shown in product names
const LABEL_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Scheduled start of a course, minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CourseSchedule(NaiveDateTime);

impl CourseSchedule {
    /// Parses a start such as `2024-02-01T09:30` (seconds and a space separator are accepted).
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        INPUT_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
            .map(Self::from_datetime)
            .ok_or_else(|| {
                AdminError::invalid_input(
                    "start",
                    format!("'{}' is not a date/time like 2024-02-01T09:30", input),
                )
                .into()
            })
    }

    /// Truncates to whole minutes; SKU codes carry no seconds.
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        let truncated = datetime
            .with_second(0)
            .and_then(|dt| dt.with_nanosecond(0))
            .unwrap_or(datetime);
        Self(truncated)
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// `YYYYMMDDHHMM`, the suffix appended to a course SKU
    pub fn sku_code(&self) -> String {
        self.0.format(SKU_CODE_FORMAT).to_string()
    }

    /// `YYYY-MM-DD HH:MM`, the label used inside product names
    pub fn label(&self) -> String {
        self.0.format(LABEL_FORMAT).to_string()
    }
}

impl fmt::Display for CourseSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Schedule information recovered from the trailing SKU segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkuSchedule {
    /// 12-digit `YYYYMMDDHHMM` suffix
    DateTime(CourseSchedule),
    /// 8-digit `YYYYMMDD` suffix, no time of day
    DateOnly(NaiveDate),
    /// No recognizable suffix
    Unknown,
}

impl SkuSchedule {
    pub fn from_sku(sku: &str) -> Self {
        let Some((_, suffix)) = sku.rsplit_once('-') else {
            return SkuSchedule::Unknown;
        };
        if !suffix.chars().all(|c| c.is_ascii_digit()) {
            return SkuSchedule::Unknown;
        }

        match suffix.len() {
            12 => NaiveDateTime::parse_from_str(suffix, SKU_CODE_FORMAT)
                .map(|dt| SkuSchedule::DateTime(CourseSchedule(dt)))
                .unwrap_or(SkuSchedule::Unknown),
            8 => NaiveDate::parse_from_str(suffix, "%Y%m%d")
                .map(SkuSchedule::DateOnly)
                .unwrap_or(SkuSchedule::Unknown),
            _ => SkuSchedule::Unknown,
        }
    }

    pub fn label(&self) -> Option<String> {
        match self {
            SkuSchedule::DateTime(schedule) => Some(schedule.label()),
            SkuSchedule::DateOnly(date) => Some(format!("{} (no time)", date.format("%Y-%m-%d"))),
            SkuSchedule::Unknown => None,
        }
    }
}
