pub mod department;
pub mod employee;

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer};

pub use department::{Department, NewDepartment};
pub use employee::{Employee, EmployeeUpdate, NewEmployee};

/// Accepts `2024-03-01` as well as full timestamps like `2024-03-01T00:00:00`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

pub(crate) fn flexible_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {}", raw)))
}
