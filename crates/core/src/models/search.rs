use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::event::EventType;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Raw search parameters as they arrive from the query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub event_type: Option<String>,
    pub title: Option<String>,
    pub organizer_email: Option<String>,
    pub attendee_email: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Validated search criteria.
///
/// When `attendee_email` is set the stores answer through participant membership
/// and ignore `title`, `organizer_email` and `time_range`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    pub event_type: EventType,
    pub title: Option<String>,
    pub organizer_email: Option<String>,
    pub attendee_email: Option<String>,
    pub time_range: Option<TimeRange>,
}

impl EventFilter {
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            title: None,
            organizer_email: None,
            attendee_email: None,
            time_range: None,
        }
    }
}

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub size: u32,
}

impl Page {
    pub fn offset(&self) -> u64 {
        u64::from(self.number) * u64::from(self.size)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}
