use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

/// Number of days the calendar covers, today included.
pub const DAYS_IN_WINDOW: usize = 183;

/// Whole local days before today, in `0..DAYS_IN_WINDOW`. Zero is today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayOffset(u8);

impl DayOffset {
    pub const TODAY: DayOffset = DayOffset(0);
    pub const OLDEST: DayOffset = DayOffset((DAYS_IN_WINDOW - 1) as u8);

    pub fn new(days: usize) -> Option<Self> {
        (days < DAYS_IN_WINDOW).then_some(DayOffset(days as u8))
    }

    pub fn days(self) -> usize {
        self.0 as usize
    }

    pub fn date(self, today: NaiveDate) -> NaiveDate {
        today - chrono::Duration::days(self.0 as i64)
    }
}

/// Calendar days from `day` up to `today`. Days after `today` count as zero.
pub fn days_between(day: NaiveDate, today: NaiveDate) -> u64 {
    today.signed_duration_since(day).num_days().max(0) as u64
}

/// Bucket a commit timestamp relative to `now`, or `None` when it is older than the window.
///
/// Both instants are reduced to their calendar day in `now`'s timezone first, so a commit
/// made at 23:59 yesterday is one day old no matter what offset it was recorded with.
pub fn offset_of<Tz: TimeZone>(timestamp: &DateTime<FixedOffset>, now: &DateTime<Tz>) -> Option<DayOffset> {
    let day = timestamp.with_timezone(&now.timezone()).date_naive();
    let days = days_between(day, now.date_naive());
    usize::try_from(days).ok().and_then(DayOffset::new)
}

/// Commit counts per day offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketCounts {
    buckets: [u32; DAYS_IN_WINDOW],
}

impl BucketCounts {
    pub fn new() -> Self {
        Self {
            buckets: [0; DAYS_IN_WINDOW],
        }
    }

    pub fn increment(&mut self, offset: DayOffset) {
        self.buckets[offset.days()] += 1;
    }

    pub fn get(&self, offset: DayOffset) -> u32 {
        self.buckets[offset.days()]
    }

    pub fn total(&self) -> u64 {
        self.buckets.iter().map(|&c| c as u64).sum()
    }

    /// `(offset, count)` pairs from today backwards.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (DayOffset, u32)> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .map(|(days, &count)| (DayOffset(days as u8), count))
    }

    pub fn merge(&mut self, other: &BucketCounts) {
        for (mine, theirs) in self.buckets.iter_mut().zip(other.buckets.iter()) {
            *mine += theirs;
        }
    }
}

impl Default for BucketCounts {
    fn default() -> Self {
        Self::new()
    }
}
