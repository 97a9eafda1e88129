use super::index::{BucketCounts, DayOffset};
use crate::util::{week_start, weekday_offset, weekday_row};
use chrono::{Duration, NaiveDate};

pub const WEEKS_IN_WINDOW: usize = 26;
/// Week columns drawn, wide enough for the partial weeks at both edges plus one.
pub const GRID_COLUMNS: usize = WEEKS_IN_WINDOW + 2;

/// Day counts of one Sunday-to-Saturday week.
///
/// Columns at the edges of the window are partial: the oldest one may start after
/// Sunday and the newest one ends today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekColumn {
    start: NaiveDate,
    first_row: u8,
    days: Vec<u32>,
}

impl WeekColumn {
    fn open(day: NaiveDate) -> Self {
        Self {
            start: week_start(day),
            first_row: weekday_row(day),
            days: Vec::with_capacity(7),
        }
    }

    fn empty(start: NaiveDate) -> Self {
        Self {
            start,
            first_row: 0,
            days: Vec::new(),
        }
    }

    /// Sunday of this week, even when the column starts later.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Count for weekday `row` (Sunday = 0), `None` outside the days this column covers.
    pub fn get(&self, row: u8) -> Option<u32> {
        let idx = row.checked_sub(self.first_row)? as usize;
        self.days.get(idx).copied()
    }

    pub fn total(&self) -> u64 {
        self.days.iter().map(|&c| c as u64).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    today: NaiveDate,
    weekday_offset: u8,
    /// Oldest first.
    columns: Vec<WeekColumn>,
}

impl CalendarGrid {
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn weekday_offset(&self) -> u8 {
        self.weekday_offset
    }

    pub fn today_row(&self) -> u8 {
        self.weekday_offset - 1
    }

    /// Columns in drawing order, oldest first.
    pub fn columns(&self) -> &[WeekColumn] {
        &self.columns
    }

    /// Week `index` counted back from the current week (0).
    pub fn week(&self, index: usize) -> Option<&WeekColumn> {
        self.columns.iter().rev().nth(index)
    }

    pub fn total(&self) -> u64 {
        self.columns.iter().map(WeekColumn::total).sum()
    }
}

/// Lay the day buckets out as week columns ending on `today`.
pub fn assemble(counts: &BucketCounts, today: NaiveDate) -> CalendarGrid {
    let mut columns: Vec<WeekColumn> = Vec::with_capacity(GRID_COLUMNS);
    let mut current: Option<WeekColumn> = None;

    for (offset, count) in counts.iter().rev() {
        let day = offset.date(today);
        let row = weekday_row(day);

        if row == 0 || current.is_none() {
            current = Some(WeekColumn::open(day));
        }
        if let Some(column) = current.as_mut() {
            column.days.push(count);
        }

        if row == 6 {
            columns.extend(current.take());
        }
    }
    columns.extend(current.take().filter(|c| !c.is_empty()));

    // 183 days span at most 27 weeks; pad the front up to the header width.
    let mut oldest = columns
        .first()
        .map(WeekColumn::start)
        .unwrap_or_else(|| week_start(DayOffset::OLDEST.date(today)));
    while columns.len() < GRID_COLUMNS {
        oldest -= Duration::days(7);
        columns.insert(0, WeekColumn::empty(oldest));
    }

    CalendarGrid {
        today,
        weekday_offset: weekday_offset(today),
        columns,
    }
}
