use std::io::Write;

use rust_decimal::Decimal;

use super::filter::{salary_above, sorted_by_full_name};
use crate::errors::AppError;
use crate::models::Employee;
use crate::report::{self, format_currency};
use crate::store::{EmployeeFilter, EmployeeStore};

/// Every employee, by last then first name.
pub async fn select_all_employees<S, W>(
    store: &mut S,
    out: &mut W,
) -> Result<Vec<Employee>, AppError>
where
    S: EmployeeStore + ?Sized,
    W: Write,
{
    let employees = sorted_by_full_name(store.fetch_employees(&EmployeeFilter::all()).await?);

    report::write_wide_table(out, &employees)?;
    writeln!(out, "\nTotal: {} employees", employees.len())?;
    Ok(employees)
}

/// Employees earning strictly more than `threshold`, highest paid first.
pub async fn select_high_salary_employees<S, W>(
    store: &mut S,
    out: &mut W,
    threshold: Decimal,
) -> Result<Vec<Employee>, AppError>
where
    S: EmployeeStore + ?Sized,
    W: Write,
{
    let candidates = store
        .fetch_employees(&EmployeeFilter::min_salary(threshold))
        .await?;
    let employees = salary_above(candidates, threshold);

    report::write_wide_table(out, &employees)?;
    writeln!(
        out,
        "\nTotal: {} employees with salary > {}",
        employees.len(),
        format_currency(threshold)
    )?;
    Ok(employees)
}
