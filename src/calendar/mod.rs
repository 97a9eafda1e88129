pub mod aggregate;
pub mod exec;
pub mod grid;
pub mod index;
pub mod render;

pub use aggregate::{aggregate, aggregate_with_progress, Activity, CommitSource};
pub use exec::exec;
pub use grid::{assemble, CalendarGrid, WeekColumn, GRID_COLUMNS, WEEKS_IN_WINDOW};
pub use index::{days_between, offset_of, BucketCounts, DayOffset, DAYS_IN_WINDOW};
pub use render::{cell_style, cell_text, render, CellStyle, Palette};
