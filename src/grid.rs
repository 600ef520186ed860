use crate::calendar::{self, CalendarError, CalendarResult, MonthKey, WeekStart};
use crate::holiday::{HolidayTable, iso_key};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    day: u32,
    weekday: Weekday,
    is_weekend: bool,
    holiday: Option<String>,
    is_today: bool,
}

impl DayCell {
    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Weekday index with Sunday as 0.
    pub fn weekday_index(&self) -> u32 {
        self.weekday.num_days_from_sunday()
    }

    pub fn is_weekend(&self) -> bool {
        self.is_weekend
    }

    pub fn is_today(&self) -> bool {
        self.is_today
    }

    pub fn is_holiday(&self) -> bool {
        self.holiday.is_some()
    }

    pub fn holiday_name(&self) -> Option<&str> {
        self.holiday.as_deref()
    }
}

/// Render-ready classification of one month.
///
/// Only built by this module; deserialized grids must match what
/// [`build_month_grid`] would produce for the same key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMonthGrid")]
pub struct MonthGrid {
    key: MonthKey,
    week_start: WeekStart,
    leading_blanks: u32,
    cells: Vec<DayCell>,
}

#[derive(Deserialize)]
struct RawDayCell {
    day: u32,
    weekday: Weekday,
    is_weekend: bool,
    holiday: Option<String>,
    is_today: bool,
}

#[derive(Deserialize)]
struct RawMonthGrid {
    key: MonthKey,
    week_start: WeekStart,
    leading_blanks: u32,
    cells: Vec<RawDayCell>,
}

impl TryFrom<RawMonthGrid> for MonthGrid {
    type Error = CalendarError;

    fn try_from(raw: RawMonthGrid) -> Result<Self, Self::Error> {
        let key = raw.key;
        let holidays: HolidayTable = raw
            .cells
            .iter()
            .filter_map(|c| {
                c.holiday
                    .as_ref()
                    .map(|name| (iso_key(key.year(), key.month(), c.day), name.clone()))
            })
            .collect();
        let today = raw
            .cells
            .iter()
            .find(|c| c.is_today)
            .and_then(|c| NaiveDate::from_ymd_opt(key.year(), key.month() + 1, c.day))
            .unwrap_or(NaiveDate::MIN);
        let rebuilt = grid_for(key, raw.week_start, &holidays, &today);

        let cells: Vec<DayCell> = raw
            .cells
            .into_iter()
            .map(|c| DayCell {
                day: c.day,
                weekday: c.weekday,
                is_weekend: c.is_weekend,
                holiday: c.holiday,
                is_today: c.is_today,
            })
            .collect();
        if raw.leading_blanks != rebuilt.leading_blanks || cells != rebuilt.cells {
            return Err(CalendarError::InconsistentGrid(key));
        }
        Ok(rebuilt)
    }
}

impl MonthGrid {
    pub fn key(&self) -> MonthKey {
        self.key
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn leading_blanks(&self) -> u32 {
        self.leading_blanks
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub fn days_in_month(&self) -> u32 {
        self.cells.len() as u32
    }

    /// Blank cells needed after the last day to complete its week row.
    pub fn trailing_blanks(&self) -> u32 {
        let used = self.leading_blanks + self.days_in_month();
        (7 - used % 7) % 7
    }

    pub fn cell(&self, day: u32) -> Option<&DayCell> {
        day.checked_sub(1).and_then(|idx| self.cells.get(idx as usize))
    }

    /// Week rows of seven columns; `None` marks a blank cell.
    pub fn weeks(&self) -> Vec<[Option<&DayCell>; 7]> {
        let mut rows = Vec::new();
        let mut row: [Option<&DayCell>; 7] = [None; 7];
        let mut col = self.leading_blanks as usize;
        for cell in &self.cells {
            row[col] = Some(cell);
            col += 1;
            if col == 7 {
                rows.push(row);
                row = [None; 7];
                col = 0;
            }
        }
        if col > 0 {
            rows.push(row);
        }
        rows
    }

    pub fn holidays(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter(|cell| cell.is_holiday())
    }

    pub fn today(&self) -> Option<&DayCell> {
        self.cells.iter().find(|cell| cell.is_today)
    }
}

pub fn build_month_grid<D: Datelike>(
    year: i32,
    month: u32,
    week_start: WeekStart,
    holidays: &HolidayTable,
    now: &D,
) -> CalendarResult<MonthGrid> {
    let key = MonthKey::new(year, month)?;
    Ok(grid_for(key, week_start, holidays, now))
}

/// Twelve grids for `year`, January first.
pub fn build_year_grid<D: Datelike>(
    year: i32,
    week_start: WeekStart,
    holidays: &HolidayTable,
    now: &D,
) -> CalendarResult<Vec<MonthGrid>> {
    (0..12)
        .map(|month| build_month_grid(year, month, week_start, holidays, now))
        .collect()
}

pub(crate) fn grid_for<D: Datelike>(
    key: MonthKey,
    week_start: WeekStart,
    holidays: &HolidayTable,
    now: &D,
) -> MonthGrid {
    let first = key.first_day();
    let cells: Vec<DayCell> = (0..key.days_in_month())
        .map(|offset| {
            let date = first + Duration::days(i64::from(offset));
            let day = offset + 1;
            DayCell {
                day,
                weekday: date.weekday(),
                is_weekend: calendar::is_weekend(date.weekday()),
                holiday: holidays.name_on(date).map(str::to_owned),
                is_today: calendar::is_today(key.year(), key.month(), day, now),
            }
        })
        .collect();

    debug!(
        "built grid for {key}: {} days, {} holidays",
        cells.len(),
        cells.iter().filter(|c| c.is_holiday()).count()
    );

    MonthGrid {
        key,
        week_start,
        leading_blanks: key.first_weekday(week_start),
        cells,
    }
}
