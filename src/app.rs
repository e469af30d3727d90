//! Process entry shared by every binary.

use std::future::Future;
use std::io::Write;

use chrono::Local;
use env_logger::Env;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Settings;
use crate::db::SqlStore;
use crate::errors::AppError;
use crate::http::HttpStore;
use crate::store::EmployeeStore;
use crate::workflows::{self, SeedPlan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Http,
    Sql,
}

impl Backend {
    fn label(self) -> &'static str {
        match self {
            Backend::Http => "HTTP API",
            Backend::Sql => "SQL database",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utility {
    SeedDatabase,
    SelectAllEmployees,
    SelectHighSalaryEmployees,
    UpdateLowSalaries,
    DeleteOldEmployees,
}

impl Utility {
    fn start_message(self, backend: Backend) -> String {
        let action = match self {
            Utility::SeedDatabase => "Starting database seeding",
            Utility::SelectAllEmployees => "Retrieving all employees",
            Utility::SelectHighSalaryEmployees => "Retrieving high salary employees",
            Utility::UpdateLowSalaries => "Updating low salary employees",
            Utility::DeleteOldEmployees => "Deleting old employees",
        };
        format!("{} via {}...", action, backend.label())
    }

    fn completion_message(self) -> &'static str {
        match self {
            Utility::SeedDatabase => "Database seeding completed successfully!",
            Utility::SelectAllEmployees => "Select all employees operation completed successfully!",
            Utility::SelectHighSalaryEmployees => {
                "Select high salary employees operation completed successfully!"
            }
            Utility::UpdateLowSalaries => "Update low salaries operation completed successfully!",
            Utility::DeleteOldEmployees => "Delete old employees operation completed successfully!",
        }
    }
}

/// `warn` unless `RUST_LOG` says otherwise; reports go to stdout regardless.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("warn")).try_init();
}

/// Runs one utility to completion and prints its final status line.
///
/// Failures are reported as `Error: <message>`; the exit status is not used.
pub async fn run(backend: Backend, utility: Utility) {
    init_logging();
    dotenvy::dotenv().ok();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = execute(backend, utility, Settings::load, &mut out).await;
    if let Err(err) = &result {
        error!("{:?} via {:?} failed: {}", utility, backend, err);
    }
    let _ = write_status(&mut out, utility, &result);
}

/// `<Operation> operation completed successfully!` or `Error: <message>`.
pub fn write_status<W: Write>(
    out: &mut W,
    utility: Utility,
    result: &Result<(), AppError>,
) -> Result<(), AppError> {
    match result {
        Ok(()) => writeln!(out, "{}", utility.completion_message())?,
        Err(err) => writeln!(out, "Error: {}", err)?,
    }
    Ok(())
}

/// Prints the banner, resolves settings through `load`, opens the backend
/// and runs the utility against it.
pub async fn execute<W, L>(
    backend: Backend,
    utility: Utility,
    load: L,
    out: &mut W,
) -> Result<(), AppError>
where
    W: Write,
    L: FnOnce() -> Result<Settings, AppError>,
{
    writeln!(out, "{}", utility.start_message(backend))?;
    let settings = load()?;

    match backend {
        Backend::Http => {
            let mut store = HttpStore::from_settings(&settings);
            run_utility(&mut store, utility, out).await
        }
        Backend::Sql => {
            writeln!(
                out,
                "Connection string configured successfully from environment variables!"
            )?;
            let store = SqlStore::connect(&settings.database).await?;
            run_scoped(store, utility, out, SqlStore::close).await
        }
    }
}

/// Runs `utility` against `store`, then hands the store to `close` whether
/// or not the utility failed. The utility's error wins over a close error.
pub async fn run_scoped<S, W, C, F>(
    mut store: S,
    utility: Utility,
    out: &mut W,
    close: C,
) -> Result<(), AppError>
where
    S: EmployeeStore,
    W: Write,
    C: FnOnce(S) -> F,
    F: Future<Output = Result<(), AppError>>,
{
    let result = run_utility(&mut store, utility, out).await;
    let closed = close(store).await;
    info!("Store released after {:?}", utility);
    result.and(closed)
}

pub async fn run_utility<S, W>(
    store: &mut S,
    utility: Utility,
    out: &mut W,
) -> Result<(), AppError>
where
    S: EmployeeStore + ?Sized,
    W: Write,
{
    let today = Local::now().date_naive();
    match utility {
        Utility::SeedDatabase => {
            let mut rng = StdRng::from_entropy();
            workflows::seed_database(store, out, &mut rng, today, &SeedPlan::default()).await?;
        }
        Utility::SelectAllEmployees => {
            workflows::select_all_employees(store, out).await?;
        }
        Utility::SelectHighSalaryEmployees => {
            workflows::select_high_salary_employees(store, out, workflows::high_salary_threshold())
                .await?;
        }
        Utility::UpdateLowSalaries => {
            workflows::update_low_salaries(store, out, workflows::minimum_salary()).await?;
        }
        Utility::DeleteOldEmployees => {
            workflows::delete_old_employees(store, out, workflows::RETIREMENT_AGE, today).await?;
        }
    }
    Ok(())
}
