use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use log::debug;
use rust_decimal::Decimal;
use sqlx::{Connection, PgConnection, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::config::DatabaseSettings;
use crate::errors::AppError;
use crate::models::{Department, Employee, EmployeeUpdate, NewDepartment, NewEmployee};
use crate::store::{EmployeeFilter, EmployeeStore};

const SELECT_EMPLOYEES: &str = r#"
    SELECT
        e."Id",
        e."DepartmentId",
        d."Name" AS "DepartmentName",
        e."FirstName",
        e."MiddleName",
        e."LastName",
        e."BirthDate",
        e."HireDate",
        e."Salary"
    FROM "Employees" e
    INNER JOIN "Departments" d ON e."DepartmentId" = d."Id""#;

/// SQL backend over a single connection, owned for the whole run.
///
/// All values travel as bind parameters.
pub struct SqlStore {
    conn: PgConnection,
}

#[derive(sqlx::FromRow, Debug)]
struct EmployeeRow {
    #[sqlx(rename = "Id")]
    id: Uuid,
    #[sqlx(rename = "DepartmentId")]
    department_id: Uuid,
    #[sqlx(rename = "DepartmentName")]
    department_name: String,
    #[sqlx(rename = "FirstName")]
    first_name: String,
    #[sqlx(rename = "MiddleName")]
    middle_name: Option<String>,
    #[sqlx(rename = "LastName")]
    last_name: String,
    #[sqlx(rename = "BirthDate")]
    birth_date: NaiveDate,
    #[sqlx(rename = "HireDate")]
    hire_date: NaiveDate,
    #[sqlx(rename = "Salary")]
    salary: Decimal,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            department: Department {
                id: row.department_id,
                name: row.department_name,
            },
            first_name: row.first_name,
            middle_name: row.middle_name,
            last_name: row.last_name,
            birth_date: row.birth_date,
            hire_date: row.hire_date,
            salary: row.salary,
        }
    }
}

impl SqlStore {
    pub fn new(conn: PgConnection) -> Self {
        Self { conn }
    }

    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, AppError> {
        Ok(Self::new(super::connect(settings).await?))
    }

    /// Terminates the connection cleanly.
    pub async fn close(self) -> Result<(), AppError> {
        self.conn.close().await?;
        Ok(())
    }
}

fn employee_query(filter: &EmployeeFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SELECT_EMPLOYEES);
    let mut keyword = " WHERE ";

    if let Some(min) = filter.min_salary {
        builder.push(keyword).push(r#"e."Salary" >= "#).push_bind(min);
        keyword = " AND ";
    }
    if let Some(max) = filter.max_salary {
        builder.push(keyword).push(r#"e."Salary" <= "#).push_bind(max);
        keyword = " AND ";
    }
    if let Some(exact) = filter.salary {
        builder.push(keyword).push(r#"e."Salary" = "#).push_bind(exact);
    }

    builder.push(r#" ORDER BY e."LastName", e."FirstName""#);
    builder
}

fn update_query(id: Uuid, change: &EmployeeUpdate) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(r#"UPDATE "Employees" SET "#);
    {
        let mut fields = builder.separated(", ");
        if let Some(department_id) = change.department_id {
            fields.push(r#""DepartmentId" = "#).push_bind_unseparated(department_id);
        }
        if let Some(first_name) = &change.first_name {
            fields.push(r#""FirstName" = "#).push_bind_unseparated(first_name.clone());
        }
        if let Some(middle_name) = &change.middle_name {
            fields.push(r#""MiddleName" = "#).push_bind_unseparated(middle_name.clone());
        }
        if let Some(last_name) = &change.last_name {
            fields.push(r#""LastName" = "#).push_bind_unseparated(last_name.clone());
        }
        if let Some(birth_date) = change.birth_date {
            fields.push(r#""BirthDate" = "#).push_bind_unseparated(birth_date);
        }
        if let Some(hire_date) = change.hire_date {
            fields.push(r#""HireDate" = "#).push_bind_unseparated(hire_date);
        }
        if let Some(salary) = change.salary {
            fields.push(r#""Salary" = "#).push_bind_unseparated(salary);
        }
        fields.push(r#""UpdatedAt" = "#).push_bind_unseparated(Utc::now());
    }
    builder.push(r#" WHERE "Id" = "#).push_bind(id);
    builder
}

#[async_trait]
impl EmployeeStore for SqlStore {
    fn kind(&self) -> &'static str {
        "SQL"
    }

    async fn fetch_employees(
        &mut self,
        filter: &EmployeeFilter,
    ) -> Result<Vec<Employee>, AppError> {
        let mut query = employee_query(filter);
        debug!("{}", query.sql());
        let rows = query
            .build_query_as::<EmployeeRow>()
            .fetch_all(&mut self.conn)
            .await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn fetch_departments(&mut self) -> Result<Vec<Department>, AppError> {
        let departments = sqlx::query_as::<_, Department>(
            r#"SELECT "Id", "Name" FROM "Departments" ORDER BY "Name""#,
        )
        .fetch_all(&mut self.conn)
        .await?;
        Ok(departments)
    }

    async fn create_department(&mut self, department: &NewDepartment) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO "Departments" ("Id", "Name", "CreatedAt", "UpdatedAt")
            VALUES ($1, $2, $3, $3)
            "#,
        )
        .bind(id)
        .bind(&department.name)
        .bind(now)
        .execute(&mut self.conn)
        .await?;
        Ok(id)
    }

    async fn create_employee(&mut self, employee: &NewEmployee) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO "Employees"
                ("Id", "DepartmentId", "FirstName", "MiddleName", "LastName",
                 "BirthDate", "HireDate", "Salary", "CreatedAt", "UpdatedAt")
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            "#,
        )
        .bind(id)
        .bind(employee.department_id)
        .bind(&employee.first_name)
        .bind(&employee.middle_name)
        .bind(&employee.last_name)
        .bind(employee.birth_date)
        .bind(employee.hire_date)
        .bind(employee.salary)
        .bind(now)
        .execute(&mut self.conn)
        .await?;
        Ok(id)
    }

    async fn update_employee(&mut self, id: Uuid, change: &EmployeeUpdate) -> Result<(), AppError> {
        if change.is_empty() {
            return Ok(());
        }
        let result = update_query(id, change)
            .build()
            .execute(&mut self.conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("employee {}", id)));
        }
        Ok(())
    }

    async fn delete_employee(&mut self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(r#"DELETE FROM "Employees" WHERE "Id" = $1"#)
            .bind(id)
            .execute(&mut self.conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("employee {}", id)));
        }
        Ok(())
    }

    async fn delete_department(&mut self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(r#"DELETE FROM "Departments" WHERE "Id" = $1"#)
            .bind(id)
            .execute(&mut self.conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("department {}", id)));
        }
        Ok(())
    }
}
