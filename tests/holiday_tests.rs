use chrono::NaiveDate;
use month_grid::{CalendarError, HolidayTable, is_holiday};

fn new_year_table() -> HolidayTable {
    [("2024-01-01", "New Year's Day")].into_iter().collect()
}

#[test]
fn lookup_finds_exact_date() {
    let table = new_year_table();
    assert_eq!(is_holiday(2024, 0, 1, &table).unwrap(), Some("New Year's Day"));
    assert_eq!(is_holiday(2024, 0, 2, &table).unwrap(), None);
    assert_eq!(is_holiday(2025, 0, 1, &table).unwrap(), None);
}

#[test]
fn unpadded_keys_never_match() {
    let table = HolidayTable::new()
        .with_holiday("2024-1-1", "Unpadded")
        .with_holiday("2024/07/04", "Slashes");
    assert_eq!(is_holiday(2024, 0, 1, &table).unwrap(), None);
    assert_eq!(is_holiday(2024, 6, 4, &table).unwrap(), None);
    assert_eq!(table.unmatchable_keys(), vec!["2024-1-1", "2024/07/04"]);
}

#[test]
fn lookup_validates_month() {
    let table = new_year_table();
    assert_eq!(is_holiday(2024, 12, 1, &table), Err(CalendarError::InvalidMonth(12)));
}

#[test]
fn impossible_day_is_simply_absent() {
    let table = new_year_table().with_holiday("2024-02-30", "Nonexistent");
    assert_eq!(is_holiday(2024, 1, 30, &table).unwrap(), Some("Nonexistent"));
    assert_eq!(table.unmatchable_keys(), vec!["2024-02-30"]);
}

#[test]
fn name_on_date_and_merge() {
    let base = new_year_table().with_holiday("2024-12-25", "Christmas");
    let overrides = HolidayTable::new()
        .with_date(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(), "Christmas Day")
        .with_holiday("2024-07-04", "Independence Day");
    let merged = base.merged(&overrides);

    assert_eq!(merged.len(), 3);
    assert_eq!(
        merged.name_on(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()),
        Some("Christmas Day")
    );
    let keys: Vec<&str> = merged.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["2024-01-01", "2024-07-04", "2024-12-25"]);
}

#[test]
fn table_deserializes_from_plain_json_object() {
    let table: HolidayTable =
        serde_json::from_str(r#"{"2024-05-01": "Labor Day", "2024-07-04": "Independence Day"}"#)
            .unwrap();
    assert_eq!(table.get("2024-05-01"), Some("Labor Day"));
    assert!(!table.is_empty());
}
