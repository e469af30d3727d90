//! Fixed-width console tables.
//!
//! Column widths and separators are kept stable so the output of repeated
//! runs can be diffed line by line.

use std::io::Write;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::AppError;
use crate::models::Employee;
use crate::workflows::filter::age_in_years;

const NARROW_RULE: usize = 80;
const WIDE_RULE: usize = 92;

fn date(value: NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Whole units with thousands separators, midpoints rounded away from zero:
/// `14999.5` becomes `15,000`.
pub fn format_grouped(amount: Decimal) -> String {
    format_grouped_dp(amount, 0)
}

/// Thousands separators and exactly `dp` decimal places: `12,345.60`.
pub fn format_grouped_dp(amount: Decimal, dp: u32) -> String {
    let rounded = amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let magnitude = rounded.abs();
    let whole = magnitude.trunc().to_u128().unwrap_or_default();
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };

    let mut text = format!("{}{}", sign, group_thousands(&whole.to_string()));
    if dp > 0 {
        let scale = Decimal::from(10u64.pow(dp));
        let fraction = (magnitude.fract() * scale).to_u128().unwrap_or_default();
        text.push_str(&format!(".{:0width$}", fraction, width = dp as usize));
    }
    text
}

/// `$12,345`, or `-$12,345` for negative amounts.
pub fn format_currency(amount: Decimal) -> String {
    let grouped = format_grouped(amount);
    match grouped.strip_prefix('-') {
        Some(positive) => format!("-${}", positive),
        None => format!("${}", grouped),
    }
}

pub fn write_rule<W: Write>(out: &mut W, width: usize) -> Result<(), AppError> {
    writeln!(out, "{}", "-".repeat(width))?;
    Ok(())
}

/// Name, department, age and birth date, tab separated.
pub fn write_age_table<W: Write>(
    out: &mut W,
    employees: &[Employee],
    today: NaiveDate,
) -> Result<(), AppError> {
    writeln!(out, "Name\t\t\t\tDepartment\t\tAge\tBirth Date")?;
    write_rule(out, NARROW_RULE)?;
    for employee in employees {
        writeln!(
            out,
            "{:<30}\t{:<15}\t{}\t{}",
            employee.full_name(),
            employee.department.name,
            age_in_years(employee.birth_date, today),
            date(employee.birth_date)
        )?;
    }
    Ok(())
}

pub fn write_salary_header<W: Write>(out: &mut W) -> Result<(), AppError> {
    writeln!(out, "Name\t\t\t\tDepartment\t\tCurrent Salary")?;
    write_rule(out, NARROW_RULE)
}

pub fn write_salary_rows<W: Write>(out: &mut W, employees: &[Employee]) -> Result<(), AppError> {
    for employee in employees {
        writeln!(
            out,
            "{:<30}\t{:<15}\t${}",
            employee.full_name(),
            employee.department.name,
            format_grouped(employee.salary)
        )?;
    }
    Ok(())
}

/// Name, department, salary, birth and hire dates in fixed columns.
pub fn write_wide_table<W: Write>(out: &mut W, employees: &[Employee]) -> Result<(), AppError> {
    writeln!(
        out,
        "{:<32}{:<18}{:>12}{:>15}{:>15}",
        "Name", "Department", "Salary", "Birth Date", "Hire Date"
    )?;
    write_rule(out, WIDE_RULE)?;
    for employee in employees {
        writeln!(
            out,
            "{:<32}{:<18}{:>12}{:>15}{:>15}",
            employee.full_name(),
            employee.department.name,
            format_currency(employee.salary),
            date(employee.birth_date),
            date(employee.hire_date)
        )?;
    }
    Ok(())
}
