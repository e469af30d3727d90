//! The maintenance utilities, written once against [`EmployeeStore`].
//!
//! Every workflow fetches, filters in memory, prints a report to `out` and
//! optionally sweeps a mutation over the selected records. All round-trips
//! are sequential.
//!
//! [`EmployeeStore`]: crate::store::EmployeeStore

pub mod batch;
pub mod delete_old_employees;
pub mod filter;
pub mod seed;
pub mod select;
pub mod update_low_salaries;

use rust_decimal::Decimal;

use crate::models::Employee;
use batch::BatchOutcome;

pub use delete_old_employees::delete_old_employees;
pub use seed::{seed_database, SeedPlan, SeedSummary};
pub use select::{select_all_employees, select_high_salary_employees};
pub use update_low_salaries::update_low_salaries;

/// Employees strictly older than this many whole years are removed.
pub const RETIREMENT_AGE: i64 = 70;

pub fn high_salary_threshold() -> Decimal {
    Decimal::from(10_000)
}

/// Salaries below this are raised to exactly this value.
pub fn minimum_salary() -> Decimal {
    Decimal::from(15_000)
}

/// What a fetch-filter-mutate run did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepSummary {
    /// Records that matched the client-side predicate.
    pub found: usize,
    pub outcome: BatchOutcome,
    /// Records listed by the verification pass, if one ran.
    pub verified: Vec<Employee>,
}
