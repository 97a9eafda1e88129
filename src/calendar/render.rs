use super::grid::CalendarGrid;
use chrono::Datelike;
use console::Style;
use std::io::{self, Write};

const GUTTER: &str = "     ";

/// What a cell should look like, independent of the output backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    None,
    Low,
    Medium,
    High,
    Today,
}

pub fn cell_style(count: u32, is_today: bool) -> CellStyle {
    if is_today {
        return CellStyle::Today;
    }
    match count {
        0 => CellStyle::None,
        1..=4 => CellStyle::Low,
        5..=9 => CellStyle::Medium,
        _ => CellStyle::High,
    }
}

/// Fixed four column wide cell text.
pub fn cell_text(count: u32) -> String {
    if count == 0 {
        "  - ".to_string()
    } else {
        format!("{count:>3} ")
    }
}

fn weekday_label(row: u8) -> &'static str {
    match row {
        1 => " Mon ",
        3 => " Wed ",
        5 => " Fri ",
        _ => GUTTER,
    }
}

/// Terminal colors for each [`CellStyle`].
pub struct Palette {
    none: Style,
    low: Style,
    medium: Style,
    high: Style,
    today: Style,
    colored: bool,
}

impl Palette {
    pub fn ansi() -> Self {
        Self {
            none: Style::new().black().force_styling(true),
            low: Style::new().black().on_white().bold().force_styling(true),
            medium: Style::new().black().on_yellow().bold().force_styling(true),
            high: Style::new().black().on_green().bold().force_styling(true),
            today: Style::new().white().on_magenta().bold().force_styling(true),
            colored: true,
        }
    }

    pub fn plain() -> Self {
        Self {
            colored: false,
            ..Self::ansi()
        }
    }

    pub fn paint(&self, style: CellStyle, text: &str) -> String {
        if !self.colored {
            return text.to_string();
        }
        let s = match style {
            CellStyle::None => &self.none,
            CellStyle::Low => &self.low,
            CellStyle::Medium => &self.medium,
            CellStyle::High => &self.high,
            CellStyle::Today => &self.today,
        };
        s.apply_to(text).to_string()
    }
}

/// Write the month header and the seven weekday rows of `grid`.
pub fn render<W: Write>(grid: &CalendarGrid, palette: &Palette, out: &mut W) -> io::Result<()> {
    render_months(grid, out)?;

    let columns = grid.columns();
    let newest = columns.len().saturating_sub(1);

    for row in 0..7u8 {
        write!(out, "{}", weekday_label(row))?;
        for (i, column) in columns.iter().enumerate() {
            let count = column.get(row).unwrap_or(0);
            let is_today = i == newest && row == grid.today_row();
            let cell = palette.paint(cell_style(count, is_today), &cell_text(count));
            write!(out, "{cell}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn render_months<W: Write>(grid: &CalendarGrid, out: &mut W) -> io::Result<()> {
    write!(out, "{GUTTER}")?;
    let mut month = grid.columns().first().map(|c| c.start().month());
    for column in grid.columns() {
        let start = column.start();
        if Some(start.month()) != month {
            write!(out, "{:<4}", start.format("%b").to_string())?;
            month = Some(start.month());
        } else {
            write!(out, "    ")?;
        }
    }
    writeln!(out)
}
