use crate::HolidayTable;
use log::warn;
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    Csv(csv::Error),
    InvalidData(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Serialization(err) => Some(err),
            PersistenceError::Io(err) => Some(err),
            PersistenceError::Csv(err) => Some(err),
            PersistenceError::InvalidData(_) => None,
        }
    }
}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Logs keys that can never match a date. They stay in the table.
pub fn report_unmatchable_keys(table: &HolidayTable, source: &str) {
    for key in table.unmatchable_keys() {
        warn!("holiday key '{key}' in {source} is not a YYYY-MM-DD date and will never match");
    }
}

pub mod file;

pub use file::{
    load_config_from_json, load_holidays, load_holidays_from_csv, load_holidays_from_json,
    save_config_to_json, save_holidays_to_csv, save_holidays_to_json,
};
