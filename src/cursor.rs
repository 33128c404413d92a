use chrono::{Datelike, Local, Month, NaiveDate};
use num_traits::FromPrimitive;
use std::fmt;

/// Today's date according to the local clock.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// The (year, month) pair currently on display.
///
/// `month0` is always in `0..=11`; stepping over either end of the year
/// rolls the year along with it. The year itself is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthCursor {
    year: i32,
    month0: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month0: u32) -> Self {
        assert!(month0 < 12, "month index {} out of range 0..=11", month0);
        MonthCursor { year, month0 }
    }

    pub fn current() -> Self {
        Self::current_from(local_today())
    }

    pub fn current_from(today: NaiveDate) -> Self {
        MonthCursor {
            year: today.year(),
            month0: today.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month0(&self) -> u32 {
        self.month0
    }

    pub fn month(&self) -> Month {
        Month::from_u32(self.month0 + 1).expect("month0 is kept in 0..=11")
    }

    pub fn set_to_current(&mut self) {
        self.set_to_current_from(local_today());
    }

    pub fn set_to_current_from(&mut self, today: NaiveDate) {
        *self = Self::current_from(today);
    }

    /// Jumps back to the current year, leaving the month untouched.
    pub fn set_year_to_current(&mut self) {
        self.set_year_to_current_from(local_today());
    }

    pub fn set_year_to_current_from(&mut self, today: NaiveDate) {
        self.year = today.year();
    }

    // The step operations return whether the cursor moved. Only the ends of
    // the `i32` year range stop them.

    pub fn next_month(&mut self) -> bool {
        if self.month0 < 11 {
            self.month0 += 1;
            true
        } else if self.next_year() {
            self.month0 = 0;
            true
        } else {
            false
        }
    }

    pub fn prev_month(&mut self) -> bool {
        if self.month0 > 0 {
            self.month0 -= 1;
            true
        } else if self.prev_year() {
            self.month0 = 11;
            true
        } else {
            false
        }
    }

    pub fn next_year(&mut self) -> bool {
        match self.year.checked_add(1) {
            Some(year) => {
                self.year = year;
                true
            }
            None => false,
        }
    }

    pub fn prev_year(&mut self) -> bool {
        match self.year.checked_sub(1) {
            Some(year) => {
                self.year = year;
                true
            }
            None => false,
        }
    }

    pub fn is_current_from(&self, today: NaiveDate) -> bool {
        self.year == today.year() && self.month0 == today.month0()
    }
}

impl Default for MonthCursor {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month0 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn starts_at_the_current_month() {
        let cursor = MonthCursor::current_from(date(2026, 10, 16));
        assert_eq!(cursor.year(), 2026);
        assert_eq!(cursor.month0(), 9);
        assert_eq!(cursor.month(), Month::October);
    }

    #[test]
    fn december_rolls_into_next_year() {
        let mut cursor = MonthCursor::new(2024, 11);
        cursor.next_month();
        assert_eq!(cursor, MonthCursor::new(2025, 0));
    }

    #[test]
    fn january_rolls_into_previous_year() {
        let mut cursor = MonthCursor::new(2024, 0);
        cursor.prev_month();
        assert_eq!(cursor, MonthCursor::new(2023, 11));
    }

    #[test]
    fn next_then_prev_is_identity() {
        for year in &[-1, 0, 1999, 2024] {
            for month0 in 0..12 {
                let start = MonthCursor::new(*year, month0);

                let mut cursor = start;
                cursor.next_month();
                cursor.prev_month();
                assert_eq!(cursor, start);

                cursor.prev_month();
                cursor.next_month();
                assert_eq!(cursor, start);
            }
        }
    }

    #[test]
    fn year_steps_keep_the_month() {
        let mut cursor = MonthCursor::new(1, 4);
        cursor.prev_year();
        cursor.prev_year();
        assert_eq!(cursor, MonthCursor::new(-1, 4));

        cursor.next_year();
        assert_eq!(cursor, MonthCursor::new(0, 4));
    }

    #[test]
    fn stops_at_the_ends_of_the_year_range() {
        let mut cursor = MonthCursor::new(i32::MAX, 11);
        assert!(!cursor.next_month());
        assert!(!cursor.next_year());
        assert_eq!(cursor, MonthCursor::new(i32::MAX, 11));

        assert!(cursor.prev_month());
        assert_eq!(cursor, MonthCursor::new(i32::MAX, 10));

        let mut cursor = MonthCursor::new(i32::MIN, 0);
        assert!(!cursor.prev_month());
        assert!(!cursor.prev_year());
        assert_eq!(cursor, MonthCursor::new(i32::MIN, 0));

        assert!(cursor.next_month());
        assert!(cursor.next_year());
        assert_eq!(cursor, MonthCursor::new(i32::MIN + 1, 1));
    }

    #[test]
    fn this_month_and_this_year() {
        let today = date(2026, 10, 16);

        let mut cursor = MonthCursor::new(1990, 2);
        cursor.set_year_to_current_from(today);
        assert_eq!(cursor, MonthCursor::new(2026, 2));

        cursor.set_to_current_from(today);
        assert_eq!(cursor, MonthCursor::new(2026, 9));
        assert!(cursor.is_current_from(today));
    }

    #[test]
    #[should_panic]
    fn rejects_month_out_of_range() {
        MonthCursor::new(2024, 12);
    }

    #[test]
    fn displays_as_year_month() {
        assert_eq!(MonthCursor::new(2024, 1).to_string(), "2024-02");
    }
}
