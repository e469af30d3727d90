//! Client-side predicates and orderings.
//!
//! Server-side filters only narrow what gets transferred; the strict
//! predicate is always re-applied here so both backends agree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::Employee;

const DAYS_PER_YEAR: f64 = 365.25;

/// Whole years: `floor(days since birth / 365.25)`.
pub fn age_in_years(birth_date: NaiveDate, today: NaiveDate) -> i64 {
    let days = (today - birth_date).num_days();
    (days as f64 / DAYS_PER_YEAR).floor() as i64
}

/// Employees whose age is strictly above `years`, oldest first.
pub fn older_than(employees: Vec<Employee>, years: i64, today: NaiveDate) -> Vec<Employee> {
    let mut selected: Vec<Employee> = employees
        .into_iter()
        .filter(|e| age_in_years(e.birth_date, today) > years)
        .collect();
    selected.sort_by_key(|e| e.birth_date);
    selected
}

/// Salary strictly below `threshold`, lowest first.
pub fn salary_below(employees: Vec<Employee>, threshold: Decimal) -> Vec<Employee> {
    let mut selected: Vec<Employee> = employees
        .into_iter()
        .filter(|e| e.salary < threshold)
        .collect();
    selected.sort_by_key(|e| e.salary);
    selected
}

/// Salary strictly above `threshold`, highest first.
pub fn salary_above(employees: Vec<Employee>, threshold: Decimal) -> Vec<Employee> {
    let mut selected: Vec<Employee> = employees
        .into_iter()
        .filter(|e| e.salary > threshold)
        .collect();
    selected.sort_by(|a, b| b.salary.cmp(&a.salary));
    selected
}

pub fn salary_equal(employees: Vec<Employee>, value: Decimal) -> Vec<Employee> {
    employees.into_iter().filter(|e| e.salary == value).collect()
}

pub fn sorted_by_last_name(mut employees: Vec<Employee>) -> Vec<Employee> {
    employees.sort_by(|a, b| a.last_name.cmp(&b.last_name));
    employees
}

/// Last name, then first name.
pub fn sorted_by_full_name(mut employees: Vec<Employee>) -> Vec<Employee> {
    employees.sort_by(|a, b| {
        a.last_name
            .cmp(&b.last_name)
            .then_with(|| a.first_name.cmp(&b.first_name))
    });
    employees
}
