//! In-memory store used by the unit tests.

use std::collections::HashSet;

use async_trait::async_trait;
use uuid::Uuid;

use super::{EmployeeFilter, EmployeeStore};
use crate::errors::AppError;
use crate::models::{Department, Employee, EmployeeUpdate, NewDepartment, NewEmployee};

#[derive(Debug, Default)]
pub struct MemoryStore {
    pub departments: Vec<Department>,
    pub employees: Vec<Employee>,
    /// Mutations against these ids fail with a simulated transport error.
    pub failing_ids: HashSet<Uuid>,
    /// Ids passed to `update_employee`/`delete_employee`, in call order.
    pub mutation_log: Vec<Uuid>,
    pub fail_fetch: bool,
}

impl MemoryStore {
    pub fn with_employees(employees: Vec<Employee>) -> Self {
        let mut departments: Vec<Department> = Vec::new();
        for employee in &employees {
            if !departments.iter().any(|d| d.id == employee.department.id) {
                departments.push(employee.department.clone());
            }
        }
        Self { departments, employees, ..Self::default() }
    }

    fn check(&mut self, id: Uuid) -> Result<(), AppError> {
        self.mutation_log.push(id);
        if self.failing_ids.contains(&id) {
            return Err(AppError::ApiError { status: 503, body: "connection reset".into() });
        }
        Ok(())
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn fetch_employees(
        &mut self,
        filter: &EmployeeFilter,
    ) -> Result<Vec<Employee>, AppError> {
        if self.fail_fetch {
            return Err(AppError::ApiError { status: 500, body: "fetch failed".into() });
        }
        Ok(self
            .employees
            .iter()
            .filter(|e| filter.matches(e.salary))
            .cloned()
            .collect())
    }

    async fn fetch_departments(&mut self) -> Result<Vec<Department>, AppError> {
        Ok(self.departments.clone())
    }

    async fn create_department(&mut self, department: &NewDepartment) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        self.departments.push(Department { id, name: department.name.clone() });
        Ok(id)
    }

    async fn create_employee(&mut self, employee: &NewEmployee) -> Result<Uuid, AppError> {
        let department = self
            .departments
            .iter()
            .find(|d| d.id == employee.department_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("department {}", employee.department_id)))?;
        let id = Uuid::new_v4();
        self.employees.push(Employee {
            id,
            department,
            first_name: employee.first_name.clone(),
            middle_name: employee.middle_name.clone(),
            last_name: employee.last_name.clone(),
            birth_date: employee.birth_date,
            hire_date: employee.hire_date,
            salary: employee.salary,
        });
        Ok(id)
    }

    async fn update_employee(&mut self, id: Uuid, change: &EmployeeUpdate) -> Result<(), AppError> {
        self.check(id)?;
        let employee = self
            .employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::NotFound(format!("employee {}", id)))?;
        if let Some(salary) = change.salary {
            employee.salary = salary;
        }
        if let Some(first_name) = &change.first_name {
            employee.first_name = first_name.clone();
        }
        if let Some(last_name) = &change.last_name {
            employee.last_name = last_name.clone();
        }
        Ok(())
    }

    async fn delete_employee(&mut self, id: Uuid) -> Result<(), AppError> {
        self.check(id)?;
        let before = self.employees.len();
        self.employees.retain(|e| e.id != id);
        if self.employees.len() == before {
            return Err(AppError::NotFound(format!("employee {}", id)));
        }
        Ok(())
    }

    async fn delete_department(&mut self, id: Uuid) -> Result<(), AppError> {
        self.departments.retain(|d| d.id != id);
        Ok(())
    }
}
