use super::{PersistenceError, PersistenceResult, report_unmatchable_keys};
use crate::{GridConfig, HolidayTable};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

pub fn save_holidays_to_json<P: AsRef<Path>>(
    table: &HolidayTable,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, table)?;
    debug!("saved {} holidays to {}", table.len(), path.as_ref().display());
    Ok(())
}

pub fn load_holidays_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<HolidayTable> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table: HolidayTable = serde_json::from_reader(file)?;
    debug!("loaded {} holidays from {}", table.len(), path.display());
    report_unmatchable_keys(&table, &path.display().to_string());
    Ok(table)
}

#[derive(Serialize, Deserialize)]
struct HolidayCsvRecord {
    date: String,
    name: String,
}

pub fn save_holidays_to_csv<P: AsRef<Path>>(
    table: &HolidayTable,
    path: P,
) -> PersistenceResult<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for (date, name) in table.iter() {
        writer.serialize(HolidayCsvRecord {
            date: date.to_string(),
            name: name.to_string(),
        })?;
    }
    writer.flush()?;
    debug!("saved {} holidays to {}", table.len(), path.as_ref().display());
    Ok(())
}

pub fn load_holidays_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<HolidayTable> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;
    let mut seen = BTreeSet::new();
    let mut records = Vec::new();
    for record in reader.deserialize::<HolidayCsvRecord>() {
        let record = record?;
        let date = record.date.trim().to_string();
        if !seen.insert(date.clone()) {
            return Err(PersistenceError::InvalidData(format!(
                "duplicate holiday date {date}"
            )));
        }
        records.push((date, record.name));
    }
    let table: HolidayTable = records.into_iter().collect();
    debug!("loaded {} holidays from {}", table.len(), path.display());
    report_unmatchable_keys(&table, &path.display().to_string());
    Ok(table)
}

/// Loads a table, picking the format from the file extension.
pub fn load_holidays<P: AsRef<Path>>(path: P) -> PersistenceResult<HolidayTable> {
    let path = path.as_ref();
    match extension(path).as_deref() {
        Some("json") => load_holidays_from_json(path),
        Some("csv") => load_holidays_from_csv(path),
        _ => Err(PersistenceError::InvalidData(format!(
            "cannot tell holiday file format of {} (expected .json or .csv)",
            path.display()
        ))),
    }
}

pub fn save_config_to_json<P: AsRef<Path>>(config: &GridConfig, path: P) -> PersistenceResult<()> {
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}

pub fn load_config_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<GridConfig> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let config: GridConfig = serde_json::from_reader(file)?;
    debug!(
        "loaded config from {} (week start {}, {} inline holidays)",
        path.display(),
        config.week_start.as_str(),
        config.holidays.len()
    );
    report_unmatchable_keys(&config.holidays, &path.display().to_string());
    Ok(config)
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}
