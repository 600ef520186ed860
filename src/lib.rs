pub mod calendar;
pub mod config;
pub mod grid;
pub mod holiday;
pub mod persistence;

pub use calendar::{
    CalendarError, CalendarResult, MonthKey, WeekStart, days_in_month, first_weekday_of_month,
    is_leap_year, is_today, month_name, navigate_month,
};
pub use config::GridConfig;
pub use grid::{DayCell, MonthGrid, build_month_grid, build_year_grid};
pub use holiday::{HolidayTable, is_holiday};
pub use persistence::{
    PersistenceError, PersistenceResult, load_config_from_json, load_holidays,
    load_holidays_from_csv, load_holidays_from_json, save_config_to_json, save_holidays_to_csv,
    save_holidays_to_json,
};
