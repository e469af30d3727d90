//! The capability interface every backend provides.
//!
//! Workflows are written once against [`EmployeeStore`]; the HTTP API and the
//! SQL database each implement it.

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Department, Employee, EmployeeUpdate, NewDepartment, NewEmployee};

/// Server-side salary pre-filter. Bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeFilter {
    pub min_salary: Option<Decimal>,
    pub max_salary: Option<Decimal>,
    pub salary: Option<Decimal>,
}

impl EmployeeFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn min_salary(value: Decimal) -> Self {
        Self { min_salary: Some(value), ..Self::default() }
    }

    pub fn max_salary(value: Decimal) -> Self {
        Self { max_salary: Some(value), ..Self::default() }
    }

    pub fn salary(value: Decimal) -> Self {
        Self { salary: Some(value), ..Self::default() }
    }

    pub fn matches(&self, salary: Decimal) -> bool {
        self.min_salary.map_or(true, |min| salary >= min)
            && self.max_salary.map_or(true, |max| salary <= max)
            && self.salary.map_or(true, |exact| salary == exact)
    }
}

#[async_trait]
pub trait EmployeeStore: Send {
    /// Human-readable backend name for banners and logs.
    fn kind(&self) -> &'static str;

    async fn fetch_employees(&mut self, filter: &EmployeeFilter) -> Result<Vec<Employee>, AppError>;

    async fn fetch_departments(&mut self) -> Result<Vec<Department>, AppError>;

    async fn create_department(&mut self, department: &NewDepartment) -> Result<Uuid, AppError>;

    async fn create_employee(&mut self, employee: &NewEmployee) -> Result<Uuid, AppError>;

    async fn update_employee(&mut self, id: Uuid, change: &EmployeeUpdate) -> Result<(), AppError>;

    async fn delete_employee(&mut self, id: Uuid) -> Result<(), AppError>;

    async fn delete_department(&mut self, id: Uuid) -> Result<(), AppError>;
}
