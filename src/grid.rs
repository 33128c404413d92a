use chrono::{Datelike, NaiveDate};
use derive_more::Constructor;

use crate::cursor::local_today;
use crate::metadata::{DAYS_PER_WEEK, MONTHS_PER_YEAR};

pub const ROWS: usize = 6;
pub const CELLS: usize = ROWS * DAYS_PER_WEEK;

/// Which month a cell of the grid belongs to, relative to the displayed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    PreviousMonth,
    CurrentMonth,
    NextMonth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Constructor)]
pub struct DayCell {
    pub label: u8,
    pub origin: Origin,
    pub is_today: bool,
}

impl DayCell {
    pub fn is_current_month(&self) -> bool {
        self.origin == Origin::CurrentMonth
    }
}

/// The 6x7 cells of one month view, Sunday in the first column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    year: i32,
    month0: u32,
    cells: Vec<DayCell>,
    today: Option<usize>,
}

impl MonthGrid {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month0(&self) -> u32 {
        self.month0
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    /// Index of the cell marked as today, if today is on display.
    pub fn today(&self) -> Option<usize> {
        self.today
    }

    pub fn count(&self, origin: Origin) -> usize {
        self.cells.iter().filter(|c| c.origin == origin).count()
    }
}

/// Column (0 = Sunday) of the first day of the month in the proleptic
/// Gregorian calendar.
///
/// The weekday cycle repeats every 400 years, so any year is folded into
/// chrono's supported range first.
pub fn first_weekday(year: i32, month0: u32) -> u32 {
    let folded = 2000 + year.rem_euclid(400);
    NaiveDate::from_ymd_opt(folded, month0 + 1, 1)
        .expect("folded year and month0 in 0..=11 form a valid date")
        .weekday()
        .num_days_from_sunday()
}

/// Lays out the month `month0` of `year` using the local clock for today.
pub fn generate(year: i32, month0: u32, days_in_month: &[u8; MONTHS_PER_YEAR]) -> MonthGrid {
    generate_at(year, month0, days_in_month, local_today())
}

/// Lays out the month `month0` of `year`.
///
/// Days before the 1st are filled from the tail of the previous month and
/// days after the last from the start of the next month, with month lengths
/// taken from `days_in_month` only. February therefore never has a 29th
/// unless the table says so. Lengths are expected in `28..=31`, which
/// `CalendarMetadata` guarantees.
///
/// # Panics
///
/// If `month0` is not in `0..=11`.
pub fn generate_at(
    year: i32,
    month0: u32,
    days_in_month: &[u8; MONTHS_PER_YEAR],
    today: NaiveDate,
) -> MonthGrid {
    assert!(
        (month0 as usize) < MONTHS_PER_YEAR,
        "month index {} out of range 0..=11",
        month0
    );

    let prev_month0 = (month0 as usize + MONTHS_PER_YEAR - 1) % MONTHS_PER_YEAR;
    let month_len = i32::from(days_in_month[month0 as usize]);
    let prev_month_len = i32::from(days_in_month[prev_month0]);

    let first_shifted = 1 - first_weekday(year, month0) as i32;

    let cells: Vec<DayCell> = (first_shifted..first_shifted + CELLS as i32)
        .map(|shifted| {
            if shifted < 1 {
                DayCell::new((prev_month_len + shifted) as u8, Origin::PreviousMonth, false)
            } else if shifted > month_len {
                DayCell::new((shifted - month_len) as u8, Origin::NextMonth, false)
            } else {
                DayCell::new(shifted as u8, Origin::CurrentMonth, false)
            }
        })
        .collect();

    let mut grid = MonthGrid {
        year,
        month0,
        cells,
        today: None,
    };

    if year == today.year() && month0 == today.month0() {
        grid.today = grid
            .cells
            .iter()
            .position(|c| c.is_current_month() && u32::from(c.label) == today.day());
        if let Some(idx) = grid.today {
            grid.cells[idx].is_today = true;
        }
    }

    grid
}
