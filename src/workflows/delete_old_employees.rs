use std::io::Write;

use chrono::NaiveDate;
use log::info;

use super::batch::{sweep, Mutation};
use super::filter::older_than;
use super::SweepSummary;
use crate::errors::AppError;
use crate::report;
use crate::store::{EmployeeFilter, EmployeeStore};

/// Lists every employee older than `max_age` whole years, oldest first, and
/// deletes them one at a time.
pub async fn delete_old_employees<S, W>(
    store: &mut S,
    out: &mut W,
    max_age: i64,
    today: NaiveDate,
) -> Result<SweepSummary, AppError>
where
    S: EmployeeStore + ?Sized,
    W: Write,
{
    let everyone = store.fetch_employees(&EmployeeFilter::all()).await?;
    info!("Fetched {} employees from {}", everyone.len(), store.kind());
    let old = older_than(everyone, max_age, today);

    writeln!(out, "Employees older than {} years:", max_age)?;
    report::write_age_table(out, &old, today)?;

    if old.is_empty() {
        writeln!(out, "No employees older than {} years found", max_age)?;
        return Ok(SweepSummary::default());
    }

    writeln!(out, "\nFound {} employees older than {} years", old.len(), max_age)?;
    writeln!(out, "Deleting these employees...")?;

    let outcome = sweep(store, &old, &Mutation::Delete, out).await?;
    writeln!(
        out,
        "Successfully deleted {} employees older than {} years",
        outcome.succeeded, max_age
    )?;

    Ok(SweepSummary {
        found: old.len(),
        outcome,
        verified: Vec::new(),
    })
}
