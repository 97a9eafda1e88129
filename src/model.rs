use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// One commit as seen by the calendar: who authored it and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub author_email: String,
    pub timestamp: DateTime<FixedOffset>,
}

impl CommitRecord {
    pub fn new(author_email: impl Into<String>, timestamp: DateTime<FixedOffset>) -> Self {
        Self {
            author_email: author_email.into(),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRepo {
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayCount {
    pub date: NaiveDate,
    pub days_ago: u8,
    pub commits: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub as_of: NaiveDate,
    pub author_email: String,
    pub repositories_scanned: usize,
    pub skipped: Vec<SkippedRepo>,
    pub total_commits: u64,
    pub days: Vec<DayCount>,
}
