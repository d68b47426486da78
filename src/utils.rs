use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
// Use dirs crate for platform data_dir

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn get_db_path() -> PathBuf {
    // Use OS data directory and the product name to unify the DB location
    let base_dir = dirs::data_dir().expect("Failed to get data dir");
    let app_dir = base_dir.join("GearBook");
    // Ensure directory exists
    fs::create_dir_all(&app_dir).expect("Failed to create app data dir");
    app_dir.join("gearbook.db")
}

pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
