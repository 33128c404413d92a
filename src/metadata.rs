use serde::Deserialize;
use std::convert::TryFrom;
use std::str::FromStr;

use crate::error::{Error, ErrorKind, Result};

pub const MONTHS_PER_YEAR: usize = 12;
pub const DAYS_PER_WEEK: usize = 7;

const MONTH_LENGTHS: std::ops::RangeInclusive<u8> = 28..=31;

/// Calendar lookup tables as they arrive on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetadata {
    pub months: Vec<String>,
    pub days_in_month: Vec<u8>,
    pub week_days: Vec<String>,
}

/// Month names, weekday names and the days-in-month table.
///
/// February always has the length given in the table; there is no leap year
/// adjustment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMetadata {
    months: [String; MONTHS_PER_YEAR],
    days_in_month: [u8; MONTHS_PER_YEAR],
    week_days: [String; DAYS_PER_WEEK],
}

fn check_len<T>(field: &str, values: Vec<T>, expected: usize) -> Result<Vec<T>> {
    if values.len() == expected {
        Ok(values)
    } else {
        Err(Error::new(
            ErrorKind::InvalidMetadata,
            &format!(
                "'{}' must have {} entries, found {}",
                field,
                expected,
                values.len()
            ),
        ))
    }
}

fn check_names(field: &str, names: &[String]) -> Result<()> {
    match names.iter().position(|name| name.trim().is_empty()) {
        Some(idx) => Err(Error::new(
            ErrorKind::InvalidMetadata,
            &format!("'{}' entry {} is empty", field, idx),
        )),
        None => Ok(()),
    }
}

impl TryFrom<RawMetadata> for CalendarMetadata {
    type Error = Error;

    fn try_from(raw: RawMetadata) -> Result<Self> {
        let months = check_len("months", raw.months, MONTHS_PER_YEAR)?;
        let days_in_month = check_len("daysInMonth", raw.days_in_month, MONTHS_PER_YEAR)?;
        let week_days = check_len("weekDays", raw.week_days, DAYS_PER_WEEK)?;

        check_names("months", &months)?;
        check_names("weekDays", &week_days)?;

        if let Some(idx) = days_in_month
            .iter()
            .position(|d| !MONTH_LENGTHS.contains(d))
        {
            return Err(Error::new(
                ErrorKind::InvalidMetadata,
                &format!(
                    "'daysInMonth' entry {} is {}, expected 28..=31",
                    idx, days_in_month[idx]
                ),
            ));
        }

        let mut table = [0u8; MONTHS_PER_YEAR];
        table.copy_from_slice(&days_in_month);

        // Lengths were checked above, so the conversions cannot fail.
        Ok(CalendarMetadata {
            months: <[String; MONTHS_PER_YEAR]>::try_from(months)
                .map_err(|_| Error::from(ErrorKind::InvalidMetadata))?,
            days_in_month: table,
            week_days: <[String; DAYS_PER_WEEK]>::try_from(week_days)
                .map_err(|_| Error::from(ErrorKind::InvalidMetadata))?,
        })
    }
}

impl FromStr for CalendarMetadata {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let raw: RawMetadata = serde_json::from_str(s)?;
        CalendarMetadata::try_from(raw)
    }
}

impl CalendarMetadata {
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let raw: RawMetadata = serde_json::from_reader(reader)?;
        CalendarMetadata::try_from(raw)
    }

    pub fn month_name(&self, month0: u32) -> &str {
        &self.months[month0 as usize % MONTHS_PER_YEAR]
    }

    pub fn month_names(&self) -> &[String; MONTHS_PER_YEAR] {
        &self.months
    }

    pub fn days_in_month(&self, month0: u32) -> u8 {
        self.days_in_month[month0 as usize % MONTHS_PER_YEAR]
    }

    pub fn days_in_month_table(&self) -> &[u8; MONTHS_PER_YEAR] {
        &self.days_in_month
    }

    /// Full weekday names, Sunday first.
    pub fn weekday_names(&self) -> &[String; DAYS_PER_WEEK] {
        &self.week_days
    }

    /// The first two characters of each weekday name, as shown in the header.
    pub fn weekday_abbreviations(&self) -> Vec<String> {
        self.week_days
            .iter()
            .map(|name| name.chars().take(2).collect())
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const CALENDAR_JSON: &str = include_str!("../data/calendar.json");

    pub(crate) fn english() -> CalendarMetadata {
        CALENDAR_JSON
            .parse()
            .expect("bundled calendar data is valid")
    }

    #[test]
    fn parses_bundled_data() {
        let metadata = english();

        assert_eq!(metadata.month_name(0), "January");
        assert_eq!(metadata.month_name(11), "December");
        assert_eq!(metadata.days_in_month(1), 28);
        assert_eq!(
            metadata.days_in_month_table(),
            &[31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
        );
        assert_eq!(metadata.weekday_names()[0], "Sunday");
    }

    #[test]
    fn abbreviates_weekdays_to_two_chars() {
        assert_eq!(
            english().weekday_abbreviations(),
            vec!["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]
        );

        let json = CALENDAR_JSON.replace("\"Sunday\"", "\"Ñandú\"");
        let metadata: CalendarMetadata = json.parse().unwrap();
        assert_eq!(metadata.weekday_abbreviations()[0], "Ña");
    }

    #[test]
    fn rejects_wrong_lengths() {
        let json = r#"{
            "months": ["Jan", "Feb"],
            "daysInMonth": [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31],
            "weekDays": ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]
        }"#;

        let err = json.parse::<CalendarMetadata>().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidMetadata));
        assert_eq!(
            err.message.as_deref(),
            Some("'months' must have 12 entries, found 2")
        );

        let json = CALENDAR_JSON.replace("\"Saturday\"", "");
        let json = json.replace("\"Friday\",", "\"Friday\"");
        let err = json.parse::<CalendarMetadata>().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidMetadata));
    }

    #[test]
    fn rejects_missing_fields() {
        let json = r#"{ "months": [], "weekDays": [] }"#;
        let err = json.parse::<CalendarMetadata>().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MetadataParse));
    }

    #[test]
    fn rejects_impossible_month_lengths() {
        let json = CALENDAR_JSON.replace("[31, 28,", "[31, 0,");
        let err = json.parse::<CalendarMetadata>().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidMetadata));

        let json = CALENDAR_JSON.replace("[31, 28,", "[32, 28,");
        assert!(json.parse::<CalendarMetadata>().is_err());

        let json = CALENDAR_JSON.replace("[31, 28,", "[31, 29,");
        let metadata: CalendarMetadata = json.parse().unwrap();
        assert_eq!(metadata.days_in_month(1), 29);
    }

    #[test]
    fn rejects_blank_names() {
        let json = CALENDAR_JSON.replace("\"March\"", "\"  \"");
        let err = json.parse::<CalendarMetadata>().unwrap_err();
        assert_eq!(err.message.as_deref(), Some("'months' entry 2 is empty"));
    }
}
