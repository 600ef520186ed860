use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    InvalidMonth(i64),
    YearOutOfRange(i64),
    InconsistentGrid(MonthKey),
}

impl fmt::Display for CalendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarError::InvalidMonth(month) => {
                write!(f, "month {month} is outside 0..=11")
            }
            CalendarError::YearOutOfRange(year) => {
                write!(f, "year {year} is outside {MIN_YEAR}..={MAX_YEAR}")
            }
            CalendarError::InconsistentGrid(key) => {
                write!(f, "grid for {key} does not match its calendar")
            }
        }
    }
}

impl std::error::Error for CalendarError {}

pub type CalendarResult<T> = Result<T, CalendarError>;

/// Which weekday occupies the first column of a rendered grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn first_day(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// Column (0..6) of `weekday` in a grid starting on this day.
    pub fn column_of(self, weekday: Weekday) -> u32 {
        match self {
            WeekStart::Sunday => weekday.num_days_from_sunday(),
            WeekStart::Monday => weekday.num_days_from_monday(),
        }
    }

    /// Short header labels in column order.
    pub fn weekday_labels(self) -> [&'static str; 7] {
        match self {
            WeekStart::Sunday => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            WeekStart::Monday => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeekStart::Sunday => "sunday",
            WeekStart::Monday => "monday",
        }
    }
}

impl FromStr for WeekStart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sun" | "sunday" => Ok(WeekStart::Sunday),
            "mon" | "monday" => Ok(WeekStart::Monday),
            other => Err(format!("unknown week start '{other}' (expected sunday or monday)")),
        }
    }
}

/// A validated (year, zero-based month) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawMonthKey")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawMonthKey {
    year: i32,
    month: u32,
}

impl TryFrom<RawMonthKey> for MonthKey {
    type Error = CalendarError;

    fn try_from(raw: RawMonthKey) -> Result<Self, Self::Error> {
        MonthKey::new(raw.year, raw.month)
    }
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> CalendarResult<Self> {
        check_year(i64::from(year))?;
        if month > 11 {
            return Err(CalendarError::InvalidMonth(i64::from(month)));
        }
        Ok(Self { year, month })
    }

    /// Month containing `date`.
    pub fn containing<D: Datelike>(date: &D) -> CalendarResult<Self> {
        Self::new(date.year(), date.month0())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month (0 = January).
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[self.month as usize]
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month {
            1 if is_leap_year(self.year) => 29,
            1 => 28,
            3 | 5 | 8 | 10 => 30,
            _ => 31,
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        // Every validated key names a representable date.
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn first_weekday(&self, week_start: WeekStart) -> u32 {
        week_start.column_of(self.first_day().weekday())
    }

    /// Moves by `delta` months, failing if the result leaves the supported years.
    pub fn navigate(&self, delta: i32) -> CalendarResult<Self> {
        let (year, month) = normalize(i64::from(self.year), i64::from(self.month) + i64::from(delta));
        check_year(year)?;
        Ok(Self {
            year: year as i32,
            month,
        })
    }

    pub fn next(&self) -> CalendarResult<Self> {
        self.navigate(1)
    }

    pub fn prev(&self) -> CalendarResult<Self> {
        self.navigate(-1)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month + 1)
    }
}

/// Parses `YYYY-MM` with a one-based month.
impl FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year_s, month_s) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("invalid month '{s}' (expected YYYY-MM)"))?;
        let year: i32 = year_s
            .parse()
            .map_err(|_| format!("invalid year '{year_s}'"))?;
        let month: u32 = month_s
            .parse()
            .map_err(|_| format!("invalid month '{month_s}'"))?;
        if !(1..=12).contains(&month) {
            return Err(format!("invalid month '{month_s}' (expected 01-12)"));
        }
        MonthKey::new(year, month - 1).map_err(|e| e.to_string())
    }
}

fn check_year(year: i64) -> CalendarResult<()> {
    if year < i64::from(MIN_YEAR) || year > i64::from(MAX_YEAR) {
        return Err(CalendarError::YearOutOfRange(year));
    }
    Ok(())
}

fn normalize(year: i64, month: i64) -> (i64, u32) {
    let total = year * 12 + month;
    (total.div_euclid(12), total.rem_euclid(12) as u32)
}

#[inline]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn month_name(month: u32) -> CalendarResult<&'static str> {
    MONTH_NAMES
        .get(month as usize)
        .copied()
        .ok_or(CalendarError::InvalidMonth(i64::from(month)))
}

pub fn days_in_month(year: i32, month: u32) -> CalendarResult<u32> {
    MonthKey::new(year, month).map(|key| key.days_in_month())
}

pub fn first_weekday_of_month(year: i32, month: u32, week_start: WeekStart) -> CalendarResult<u32> {
    MonthKey::new(year, month).map(|key| key.first_weekday(week_start))
}

/// Adds `delta` months to (year, month), carrying into the year.
///
/// Any month value is accepted and normalized, so `(2024, -1, 0)` is
/// December 2023. The year is widened to `i64` so no input overflows; use
/// [`MonthKey::navigate`] when the result must be a supported year.
pub fn navigate_month(year: i32, month: i32, delta: i32) -> (i64, u32) {
    normalize(i64::from(year), i64::from(month) + i64::from(delta))
}

/// True when (year, month, day) is the calendar date of `now`.
pub fn is_today<D: Datelike>(year: i32, month: u32, day: u32, now: &D) -> bool {
    now.year() == year && now.month0() == month && now.day() == day
}

/// True for Saturday and Sunday, whatever column they are drawn in.
pub fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_handles_negative_months() {
        assert_eq!(normalize(2024, -1), (2023, 11));
        assert_eq!(normalize(2024, -13), (2022, 11));
        assert_eq!(normalize(2024, 24), (2026, 0));
    }

    #[test]
    fn check_year_bounds() {
        assert!(check_year(1).is_ok());
        assert!(check_year(9999).is_ok());
        assert_eq!(check_year(0), Err(CalendarError::YearOutOfRange(0)));
        assert_eq!(check_year(10000), Err(CalendarError::YearOutOfRange(10000)));
    }
}
