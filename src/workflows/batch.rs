//! Best-effort sweeps: one mutation per record, failures reported and skipped.

use std::io::Write;

use log::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Employee, EmployeeUpdate};
use crate::store::EmployeeStore;

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Delete,
    Update(EmployeeUpdate),
}

impl Mutation {
    fn action(&self) -> &'static str {
        match self {
            Mutation::Delete => "delete employee",
            Mutation::Update(_) => "update employee",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemFailure {
    pub id: Option<Uuid>,
    pub name: String,
    pub message: String,
}

/// Result of a sweep. Partial application is a normal outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub attempted: usize,
    pub succeeded: usize,
    pub failures: Vec<ItemFailure>,
}

impl BatchOutcome {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Counts one attempt. A failure is printed as
    /// `Failed to <action> <name>: <error>` and kept in the outcome.
    pub fn record<W: Write>(
        &mut self,
        out: &mut W,
        action: &str,
        id: Option<Uuid>,
        name: String,
        result: Result<(), AppError>,
    ) -> Result<(), AppError> {
        self.attempted += 1;
        match result {
            Ok(()) => self.succeeded += 1,
            Err(err) => {
                warn!("Failed to {} {} ({:?}): {}", action, name, id, err);
                writeln!(out, "Failed to {} {}: {}", action, name, err)?;
                self.failures.push(ItemFailure {
                    id,
                    name,
                    message: err.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Applies `mutation` to every target in order, never stopping early.
///
/// Only a failure to write the report itself is returned as an error.
pub async fn sweep<S, W>(
    store: &mut S,
    targets: &[Employee],
    mutation: &Mutation,
    out: &mut W,
) -> Result<BatchOutcome, AppError>
where
    S: EmployeeStore + ?Sized,
    W: Write,
{
    let mut outcome = BatchOutcome::default();
    for employee in targets {
        let result = match mutation {
            Mutation::Delete => store.delete_employee(employee.id).await,
            Mutation::Update(change) => store.update_employee(employee.id, change).await,
        };
        outcome.record(out, mutation.action(), Some(employee.id), employee.short_name(), result)?;
    }
    Ok(outcome)
}
