use std::io::Write;

use log::info;
use rust_decimal::Decimal;

use super::batch::{sweep, Mutation};
use super::filter::{salary_below, salary_equal, sorted_by_last_name};
use super::SweepSummary;
use crate::errors::AppError;
use crate::models::{Employee, EmployeeUpdate};
use crate::report::{self, format_grouped};
use crate::store::{EmployeeFilter, EmployeeStore};

/// Raises every salary below `minimum` to exactly `minimum`, then re-fetches
/// by the new value and lists what the backend now reports.
pub async fn update_low_salaries<S, W>(
    store: &mut S,
    out: &mut W,
    minimum: Decimal,
) -> Result<SweepSummary, AppError>
where
    S: EmployeeStore + ?Sized,
    W: Write,
{
    let label = format_grouped(minimum);

    // The server-side bound is inclusive; the strict comparison happens below.
    let candidates = store
        .fetch_employees(&EmployeeFilter::max_salary(minimum))
        .await?;
    info!("Fetched {} candidates from {}", candidates.len(), store.kind());
    let low = salary_below(candidates, minimum);

    writeln!(out, "Employees with salary < {}:", label)?;
    report::write_salary_header(out)?;
    report::write_salary_rows(out, &low)?;

    if low.is_empty() {
        writeln!(out, "No employees with salary < {} found", label)?;
        return Ok(SweepSummary::default());
    }

    writeln!(out, "\nFound {} employees with salary < {}", low.len(), label)?;
    writeln!(out, "Updating their salaries to {}...", label)?;

    let change = Mutation::Update(EmployeeUpdate::salary(minimum));
    let outcome = sweep(store, &low, &change, out).await?;
    writeln!(
        out,
        "Successfully updated {} employees to {} salary",
        outcome.succeeded, label
    )?;

    writeln!(out, "\nVerifying updated employees...")?;
    let verified = verify_salary(store, out, minimum).await?;

    Ok(SweepSummary {
        found: low.len(),
        outcome,
        verified,
    })
}

/// Observational only: lists employees now at `value`, by last name.
async fn verify_salary<S, W>(
    store: &mut S,
    out: &mut W,
    value: Decimal,
) -> Result<Vec<Employee>, AppError>
where
    S: EmployeeStore + ?Sized,
    W: Write,
{
    let fetched = store.fetch_employees(&EmployeeFilter::salary(value)).await?;
    let matching = sorted_by_last_name(salary_equal(fetched, value));

    writeln!(out, "Employees with updated salary ({}):", format_grouped(value))?;
    report::write_salary_rows(out, &matching)?;
    Ok(matching)
}
