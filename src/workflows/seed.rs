//! Resets the dataset to fixed departments plus synthetic employees.

use std::io::Write;
use std::ops::Range;

use chrono::{Months, NaiveDate};
use log::{info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;

use super::batch::{sweep, BatchOutcome, Mutation};
use crate::errors::AppError;
use crate::models::{Department, NewDepartment, NewEmployee};
use crate::report::format_grouped_dp;
use crate::store::{EmployeeFilter, EmployeeStore};
use crate::utils::validation::validate_payload;

pub const DEPARTMENT_NAMES: [&str; 10] = [
    "HR", "IT", "Finance", "Marketing", "Sales", "Ops", "R&D", "CS", "Legal", "QA",
];

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Daniel", "Nancy", "Matthew", "Lisa", "Anthony", "Betty", "Mark", "Sandra",
    "Steven", "Ashley",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson",
];

const MIDDLE_NAME_PROBABILITY: f64 = 0.7;
const SAMPLE_SIZE: usize = 5;

/// How many employees to create and with what salaries.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedPlan {
    pub employee_count: usize,
    /// Salary range in cents, end exclusive.
    pub salary_cents: Range<i64>,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            employee_count: 100,
            salary_cents: 500_000..2_500_000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedSummary {
    pub cleared: BatchOutcome,
    pub departments: Vec<Department>,
    pub employees: BatchOutcome,
}

fn years_before(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(years * 12)).unwrap_or(NaiveDate::MIN)
}

fn random_date<R: Rng + ?Sized>(rng: &mut R, earliest: NaiveDate, latest: NaiveDate) -> NaiveDate {
    let span = (latest - earliest).num_days().max(0);
    earliest + chrono::Duration::days(rng.gen_range(0..=span))
}

fn pick<R: Rng + ?Sized>(rng: &mut R, names: &[&str]) -> String {
    names.choose(rng).copied().unwrap_or_default().to_string()
}

/// A random employee in one of `departments`, or `None` if there are none.
///
/// Birth dates fall between 90 and 18 years ago; hire dates between 20 years
/// and one month ago, never before the employee turned 18.
pub fn generate_employee<R: Rng + ?Sized>(
    rng: &mut R,
    departments: &[Department],
    today: NaiveDate,
    plan: &SeedPlan,
) -> Option<NewEmployee> {
    let department = departments.choose(rng)?;

    let first_name = pick(rng, FIRST_NAMES);
    let middle_name = if rng.gen_bool(MIDDLE_NAME_PROBABILITY) {
        Some(pick(rng, FIRST_NAMES))
    } else {
        None
    };
    let last_name = pick(rng, LAST_NAMES);

    let birth_date = random_date(rng, years_before(today, 90), years_before(today, 18));

    let latest_hire = today.checked_sub_months(Months::new(1))?;
    let adulthood = birth_date.checked_add_months(Months::new(18 * 12))?;
    let earliest_hire = years_before(today, 20).max(adulthood).min(latest_hire);
    let hire_date = random_date(rng, earliest_hire, latest_hire);

    let salary = Decimal::new(rng.gen_range(plan.salary_cents.clone()), 2);

    Some(NewEmployee {
        department_id: department.id,
        first_name,
        middle_name,
        last_name,
        birth_date,
        hire_date,
        salary,
    })
}

/// Clears employees and departments (best effort), then seeds the fixed
/// departments and `plan.employee_count` random employees.
///
/// A department that cannot be created aborts the run; employee creation
/// failures are reported per item.
pub async fn seed_database<S, W, R>(
    store: &mut S,
    out: &mut W,
    rng: &mut R,
    today: NaiveDate,
    plan: &SeedPlan,
) -> Result<SeedSummary, AppError>
where
    S: EmployeeStore + ?Sized,
    W: Write,
    R: Rng + ?Sized,
{
    writeln!(out, "Clearing existing data...")?;
    let existing = store.fetch_employees(&EmployeeFilter::all()).await?;
    let mut cleared = sweep(store, &existing, &Mutation::Delete, out).await?;

    for department in store.fetch_departments().await? {
        let result = store.delete_department(department.id).await;
        cleared.record(out, "delete department", Some(department.id), department.name, result)?;
    }
    writeln!(out, "Existing data cleared successfully!")?;

    writeln!(out, "Seeding departments...")?;
    let mut departments = Vec::with_capacity(DEPARTMENT_NAMES.len());
    for name in DEPARTMENT_NAMES {
        let command = NewDepartment::new(name);
        validate_payload(&command)?;
        let id = store.create_department(&command).await?;
        writeln!(out, "Created department: {} (ID: {})", name, id)?;
        departments.push(Department { id, name: name.to_string() });
    }
    writeln!(out, "Successfully seeded {} departments!", departments.len())?;

    writeln!(out, "Seeding employees...")?;
    let mut employees = BatchOutcome::default();
    for _ in 0..plan.employee_count {
        let Some(command) = generate_employee(rng, &departments, today, plan) else {
            warn!("No departments to assign employees to");
            break;
        };

        let result = match validate_payload(&command) {
            Ok(()) => store.create_employee(&command).await.map(|_| ()),
            Err(err) => Err(err),
        };
        let created = result.is_ok();
        employees.record(out, "create employee", None, command.short_name(), result)?;

        if created && employees.succeeded <= SAMPLE_SIZE {
            writeln!(
                out,
                "Created employee: {} - ${}",
                command.short_name(),
                format_grouped_dp(command.salary, 2)
            )?;
        }
    }
    writeln!(out, "Successfully seeded {} employees!", employees.succeeded)?;
    info!(
        "Seeded {} departments and {} employees ({} failed)",
        departments.len(),
        employees.succeeded,
        employees.failed()
    );

    Ok(SeedSummary {
        cleared,
        departments,
        employees,
    })
}
