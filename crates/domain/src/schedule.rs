//! Schedule policy — turns the interval labels picked on the settings page
//! into a forecast lookahead and a cron recurrence.
//!
//! Both lookups are total: an unrecognised label falls back to the most
//! inclusive value (4 chunks, 60 minutes).

use serde::{Deserialize, Serialize};

/// Option ids offered for the forecast lookahead setting.
pub const FORECAST_INTERVAL_OPTIONS: [(&str, &str); 4] = [
    ("forecast-hours-3", "3 Hours"),
    ("forecast-hours-6", "6 Hours"),
    ("forecast-hours-9", "9 Hours"),
    ("forecast-hours-12", "12 Hours"),
];

/// Option ids offered for the schedule interval setting.
pub const SCHEDULE_INTERVAL_OPTIONS: [(&str, &str); 4] = [
    ("schedule-interval-15-minutes", "15 Minutes"),
    ("schedule-interval-30-minutes", "30 Minutes"),
    ("schedule-interval-45-minutes", "45 Minutes"),
    ("schedule-interval-60-minutes", "60 Minutes"),
];

/// Name given to the recurring schedule created for each installed app.
pub const SCHEDULE_NAME: &str = "weather-check-schedule";

/// Number of 3-hour forecast chunks to inspect, between 1 and 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCount(u8);

impl ChunkCount {
    /// Smallest lookahead: the next 3 hours.
    pub const MIN: Self = Self(1);
    /// Largest lookahead: the next 12 hours.
    pub const MAX: Self = Self(4);

    /// Build a chunk count, rejecting values outside `1..=4`.
    #[must_use]
    pub fn new(chunks: u8) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&chunks)
            .then_some(Self(chunks))
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Hours of forecast covered by this many chunks.
    #[must_use]
    pub fn hours(self) -> u8 {
        self.0 * 3
    }
}

impl std::fmt::Display for ChunkCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Resolve the forecast lookahead label to a chunk count.
#[must_use]
pub fn forecast_chunks_for(label: &str) -> ChunkCount {
    match label {
        "forecast-hours-3" => ChunkCount(1),
        "forecast-hours-6" => ChunkCount(2),
        "forecast-hours-9" => ChunkCount(3),
        _ => ChunkCount::MAX,
    }
}

/// How often the forecast is checked again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleRecurrence {
    Every15Minutes,
    Every30Minutes,
    Every45Minutes,
    Every60Minutes,
}

impl ScheduleRecurrence {
    #[must_use]
    pub fn minutes(self) -> u8 {
        match self {
            Self::Every15Minutes => 15,
            Self::Every30Minutes => 30,
            Self::Every45Minutes => 45,
            Self::Every60Minutes => 60,
        }
    }

    /// Cron schedule firing every [`minutes`](Self::minutes), in UTC.
    ///
    /// The schedule recurs, so the location's timezone is irrelevant.
    #[must_use]
    pub fn to_cron(self) -> CronSchedule {
        CronSchedule {
            name: SCHEDULE_NAME.to_string(),
            cron: CronExpression {
                expression: format!("0/{} * * * ? *", self.minutes()),
                timezone: "UTC".to_string(),
            },
        }
    }
}

/// Resolve the schedule interval label to a recurrence.
#[must_use]
pub fn recurrence_minutes_for(label: &str) -> ScheduleRecurrence {
    match label {
        "schedule-interval-15-minutes" => ScheduleRecurrence::Every15Minutes,
        "schedule-interval-30-minutes" => ScheduleRecurrence::Every30Minutes,
        "schedule-interval-45-minutes" => ScheduleRecurrence::Every45Minutes,
        _ => ScheduleRecurrence::Every60Minutes,
    }
}

/// Named cron schedule as accepted by the device cloud.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CronSchedule {
    pub name: String,
    pub cron: CronExpression,
}

/// Quartz-style cron expression with its timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CronExpression {
    pub expression: String,
    pub timezone: String,
}
