use crate::calendar::{CalendarResult, MonthKey, WeekStart};
use crate::grid::{self, MonthGrid};
use crate::holiday::HolidayTable;
use crate::persistence::{self, PersistenceResult};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV_VAR: &str = "MONTH_GRID_CONFIG";

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default)]
    pub week_start: WeekStart,
    #[serde(default = "default_true")]
    pub highlight_weekends: bool,
    #[serde(default)]
    pub holidays: HolidayTable,
    /// Extra tables to load, JSON or CSV by extension. Relative paths are
    /// resolved against the config file's directory.
    #[serde(default)]
    pub holiday_files: Vec<PathBuf>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            week_start: WeekStart::default(),
            highlight_weekends: true,
            holidays: HolidayTable::default(),
            holiday_files: Vec::new(),
        }
    }
}

impl GridConfig {
    /// Config file named by `explicit`, else by `MONTH_GRID_CONFIG`.
    pub fn locate(explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit.or_else(|| env::var(CONFIG_PATH_ENV_VAR).ok().map(PathBuf::from))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> PersistenceResult<Self> {
        let path = path.as_ref();
        let mut config = persistence::load_config_from_json(path)?;
        if let Some(base) = path.parent() {
            for file in config.holiday_files.iter_mut() {
                if file.is_relative() {
                    *file = base.join(&*file);
                }
            }
        }
        Ok(config)
    }

    /// Tables from `holiday_files` merged in order, then inline holidays.
    pub fn resolve_holidays(&self) -> PersistenceResult<HolidayTable> {
        let mut table = HolidayTable::new();
        for file in &self.holiday_files {
            table = table.merged(&persistence::load_holidays(file)?);
        }
        Ok(table.merged(&self.holidays))
    }

    pub fn month_grid<D: Datelike>(
        &self,
        key: MonthKey,
        holidays: &HolidayTable,
        now: &D,
    ) -> MonthGrid {
        grid::grid_for(key, self.week_start, holidays, now)
    }

    pub fn year_grid<D: Datelike>(
        &self,
        year: i32,
        holidays: &HolidayTable,
        now: &D,
    ) -> CalendarResult<Vec<MonthGrid>> {
        grid::build_year_grid(year, self.week_start, holidays, now)
    }
}
