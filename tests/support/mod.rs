//! In-process stand-in for the Departments/Employees REST API.
//!
//! Serves the same routes and envelope the real API does, backed by a
//! mutex-guarded dataset the tests can inspect and rig for failures.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredDepartment {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredEmployee {
    pub id: Uuid,
    pub department_id: Uuid,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub hire_date: NaiveDate,
    pub salary: Decimal,
}

#[derive(Debug, Default)]
pub struct Dataset {
    pub departments: Vec<StoredDepartment>,
    pub employees: Vec<StoredEmployee>,
    /// DELETE/PUT on these employee ids answers 500.
    pub failing_ids: HashSet<Uuid>,
    /// List requests answer 503.
    pub fail_listing: bool,
    /// Envelope and record keys in PascalCase instead of camelCase.
    pub pascal_case: bool,
    /// Query strings of every `GET /Employees`, in order.
    pub list_queries: Vec<String>,
}

impl Dataset {
    pub fn add_department(&mut self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.departments.push(StoredDepartment { id, name: name.to_string() });
        id
    }

    pub fn add_employee(
        &mut self,
        department_id: Uuid,
        last_name: &str,
        birth_date: NaiveDate,
        salary: &str,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.employees.push(StoredEmployee {
            id,
            department_id,
            first_name: "Fixture".into(),
            middle_name: None,
            last_name: last_name.into(),
            birth_date,
            hire_date: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
            salary: salary.parse().unwrap(),
        });
        id
    }

    fn department_name(&self, id: Uuid) -> String {
        self.departments
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.name.clone())
            .unwrap_or_default()
    }

    fn employee_json(&self, employee: &StoredEmployee) -> Value {
        let department = json!({
            "id": employee.department_id,
            "name": self.department_name(employee.department_id),
        });
        let record = json!({
            "id": employee.id,
            "department": department,
            "firstName": employee.first_name,
            "middleName": employee.middle_name,
            "lastName": employee.last_name,
            "birthDate": format!("{}T00:00:00", employee.birth_date),
            "hireDate": format!("{}T00:00:00", employee.hire_date),
            "salary": employee.salary.to_f64(),
        });
        self.cased(record)
    }

    fn cased(&self, value: Value) -> Value {
        if !self.pascal_case {
            return value;
        }
        match value {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| {
                        let mut chars = key.chars();
                        let pascal = match chars.next() {
                            Some(first) => first.to_uppercase().chain(chars).collect(),
                            None => key,
                        };
                        (pascal, self.cased(value))
                    })
                    .collect(),
            ),
            Value::Array(items) => Value::Array(items.into_iter().map(|v| self.cased(v)).collect()),
            other => other,
        }
    }
}

#[derive(Default)]
pub struct ApiState {
    dataset: Mutex<Dataset>,
}

impl ApiState {
    pub fn lock(&self) -> MutexGuard<'_, Dataset> {
        self.dataset.lock().unwrap()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EmployeeQueryParams {
    page: Option<u32>,
    limit: Option<u32>,
    min_salary: Option<Decimal>,
    max_salary: Option<Decimal>,
    salary: Option<Decimal>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct NewEmployee {
    department_id: Uuid,
    first_name: String,
    middle_name: Option<String>,
    last_name: String,
    birth_date: NaiveDate,
    hire_date: NaiveDate,
    salary: Decimal,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EmployeeUpdate {
    department_id: Option<Uuid>,
    first_name: Option<String>,
    middle_name: Option<String>,
    last_name: Option<String>,
    birth_date: Option<NaiveDate>,
    hire_date: Option<NaiveDate>,
    salary: Option<Decimal>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct NewDepartment {
    name: String,
}

async fn get_employees(
    req: HttpRequest,
    state: web::Data<ApiState>,
    query: web::Query<EmployeeQueryParams>,
) -> HttpResponse {
    let mut dataset = state.lock();
    dataset.list_queries.push(req.query_string().to_string());
    if dataset.fail_listing {
        return HttpResponse::ServiceUnavailable().body("listing disabled");
    }

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).max(1);

    let matching: Vec<&StoredEmployee> = dataset
        .employees
        .iter()
        .filter(|e| query.min_salary.map_or(true, |min| e.salary >= min))
        .filter(|e| query.max_salary.map_or(true, |max| e.salary <= max))
        .filter(|e| query.salary.map_or(true, |exact| e.salary == exact))
        .collect();

    let total_items = matching.len() as u32;
    let total_pages = total_items.div_ceil(limit);
    let data: Vec<Value> = matching
        .iter()
        .skip(((page - 1) * limit) as usize)
        .take(limit as usize)
        .map(|e| dataset.employee_json(e))
        .collect();

    let envelope = json!({
        "data": data,
        "currentPage": page,
        "perPage": limit,
        "totalItems": total_items,
        "totalPages": total_pages,
    });
    HttpResponse::Ok().json(dataset.cased(envelope))
}

async fn create_employee(
    state: web::Data<ApiState>,
    new_employee: web::Json<NewEmployee>,
) -> HttpResponse {
    let mut dataset = state.lock();
    if !dataset.departments.iter().any(|d| d.id == new_employee.department_id) {
        return HttpResponse::BadRequest().body("Invalid department ID");
    }

    let new_employee = new_employee.into_inner();
    let id = Uuid::new_v4();
    dataset.employees.push(StoredEmployee {
        id,
        department_id: new_employee.department_id,
        first_name: new_employee.first_name,
        middle_name: new_employee.middle_name,
        last_name: new_employee.last_name,
        birth_date: new_employee.birth_date,
        hire_date: new_employee.hire_date,
        salary: new_employee.salary,
    });
    HttpResponse::Created().json(id)
}

async fn update_employee(
    state: web::Data<ApiState>,
    employee_id: web::Path<Uuid>,
    updates: web::Json<EmployeeUpdate>,
) -> HttpResponse {
    let employee_id = employee_id.into_inner();
    let mut dataset = state.lock();
    if dataset.failing_ids.contains(&employee_id) {
        return HttpResponse::InternalServerError().body("simulated failure");
    }

    let Some(employee) = dataset.employees.iter_mut().find(|e| e.id == employee_id) else {
        return HttpResponse::NotFound().body("Employee not found");
    };

    let updates = updates.into_inner();
    if let Some(department_id) = updates.department_id {
        employee.department_id = department_id;
    }
    if let Some(first_name) = updates.first_name {
        employee.first_name = first_name;
    }
    if let Some(middle_name) = updates.middle_name {
        employee.middle_name = Some(middle_name);
    }
    if let Some(last_name) = updates.last_name {
        employee.last_name = last_name;
    }
    if let Some(birth_date) = updates.birth_date {
        employee.birth_date = birth_date;
    }
    if let Some(hire_date) = updates.hire_date {
        employee.hire_date = hire_date;
    }
    if let Some(salary) = updates.salary {
        employee.salary = salary;
    }
    HttpResponse::NoContent().finish()
}

async fn delete_employee(state: web::Data<ApiState>, employee_id: web::Path<Uuid>) -> HttpResponse {
    let employee_id = employee_id.into_inner();
    let mut dataset = state.lock();
    if dataset.failing_ids.contains(&employee_id) {
        return HttpResponse::InternalServerError().body("simulated failure");
    }

    let before = dataset.employees.len();
    dataset.employees.retain(|e| e.id != employee_id);
    if dataset.employees.len() == before {
        return HttpResponse::NotFound().body("Employee not found");
    }
    HttpResponse::NoContent().finish()
}

async fn get_departments(state: web::Data<ApiState>) -> HttpResponse {
    let dataset = state.lock();
    let departments: Vec<Value> = dataset
        .departments
        .iter()
        .map(|d| dataset.cased(json!({ "id": d.id, "name": d.name })))
        .collect();
    HttpResponse::Ok().json(departments)
}

async fn create_department(
    state: web::Data<ApiState>,
    new_department: web::Json<NewDepartment>,
) -> HttpResponse {
    let mut dataset = state.lock();
    if dataset.departments.iter().any(|d| d.name == new_department.name) {
        return HttpResponse::Conflict().body("Department name already exists");
    }
    let id = dataset.add_department(&new_department.name);
    HttpResponse::Created().json(id)
}

async fn delete_department(
    state: web::Data<ApiState>,
    department_id: web::Path<Uuid>,
) -> HttpResponse {
    let department_id = department_id.into_inner();
    let mut dataset = state.lock();
    if dataset.employees.iter().any(|e| e.department_id == department_id) {
        return HttpResponse::Conflict().body("Department still contains employees");
    }

    let before = dataset.departments.len();
    dataset.departments.retain(|d| d.id != department_id);
    if dataset.departments.len() == before {
        return HttpResponse::NotFound().body("Department not found");
    }
    HttpResponse::NoContent().finish()
}

pub struct FakeApi {
    pub base_url: String,
    pub state: web::Data<ApiState>,
}

impl FakeApi {
    /// Binds an ephemeral port and serves until the test runtime stops.
    /// Must be called from within an actix runtime (`#[actix_web::test]`).
    pub async fn start() -> FakeApi {
        let state = web::Data::new(ApiState::default());
        let app_state = state.clone();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .service(
                    web::resource("/Employees")
                        .route(web::get().to(get_employees))
                        .route(web::post().to(create_employee)),
                )
                .service(
                    web::resource("/Employees/{id}")
                        .route(web::put().to(update_employee))
                        .route(web::delete().to(delete_employee)),
                )
                .service(
                    web::resource("/Departments")
                        .route(web::get().to(get_departments))
                        .route(web::post().to(create_department)),
                )
                .service(
                    web::resource("/Departments/{id}")
                        .route(web::delete().to(delete_department)),
                )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();

        let address = server.addrs()[0];
        actix_web::rt::spawn(server.run());

        FakeApi {
            base_url: format!("http://{}", address),
            state,
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, Dataset> {
        self.state.lock()
    }
}
