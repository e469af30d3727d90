//! REST API backend.
//!
//! Wraps the Departments/Employees endpoints using [`reqwest`]. One client is
//! created per run and every request is awaited before the next is issued.

pub mod pagination;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::config::Settings;
use crate::errors::AppError;
use crate::models::{Department, Employee, EmployeeUpdate, NewDepartment, NewEmployee};
use crate::store::{EmployeeFilter, EmployeeStore};
use crate::utils::json::from_str_case_insensitive;
use pagination::{fetch_all_pages, Page, PageSource};

pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
    page_size: u32,
}

/// Query string of the list endpoints.
#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct ListQuery<'a> {
    page: u32,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_salary: Option<&'a Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_salary: Option<&'a Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    salary: Option<&'a Decimal>,
}

/// Pages through `GET /Employees` for one filter.
struct EmployeePages<'a> {
    client: &'a reqwest::Client,
    url: String,
    filter: &'a EmployeeFilter,
}

#[async_trait]
impl PageSource for EmployeePages<'_> {
    type Item = Employee;

    async fn fetch_page(&mut self, page: u32, limit: u32) -> Result<Page<Employee>, AppError> {
        let query = ListQuery {
            page,
            limit,
            min_salary: self.filter.min_salary.as_ref(),
            max_salary: self.filter.max_salary.as_ref(),
            salary: self.filter.salary.as_ref(),
        };
        debug!("GET {} {:?}", self.url, query);

        let response = self.client.get(&self.url).query(&query).send().await?;
        let body = check_status(response).await?.text().await?;
        from_str_case_insensitive(&body)
    }
}

impl HttpStore {
    /// * `base_url` - API root without a trailing slash, e.g. `http://host:3000`.
    pub fn new(base_url: impl Into<String>, page_size: u32) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, page_size)
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        page_size: u32,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            page_size,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.api_base_url.clone(), settings.page_size)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post_for_id<T>(&self, path: &str, body: &T) -> Result<Uuid, AppError>
    where
        T: Serialize + Sync,
    {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        let body = check_status(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn delete(&self, path: &str) -> Result<(), AppError> {
        debug!("DELETE {}", path);
        let response = self.client.delete(self.url(path)).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

#[async_trait]
impl EmployeeStore for HttpStore {
    fn kind(&self) -> &'static str {
        "HTTP API"
    }

    async fn fetch_employees(
        &mut self,
        filter: &EmployeeFilter,
    ) -> Result<Vec<Employee>, AppError> {
        let mut pages = EmployeePages {
            client: &self.client,
            url: self.url("Employees"),
            filter,
        };
        fetch_all_pages(&mut pages, self.page_size).await
    }

    async fn fetch_departments(&mut self) -> Result<Vec<Department>, AppError> {
        let response = self.client.get(self.url("Departments")).send().await?;
        let body = check_status(response).await?.text().await?;
        decode_departments(&body)
    }

    async fn create_department(&mut self, department: &NewDepartment) -> Result<Uuid, AppError> {
        self.post_for_id("Departments", department).await
    }

    async fn create_employee(&mut self, employee: &NewEmployee) -> Result<Uuid, AppError> {
        self.post_for_id("Employees", employee).await
    }

    async fn update_employee(&mut self, id: Uuid, change: &EmployeeUpdate) -> Result<(), AppError> {
        let response = self
            .client
            .put(self.url(&format!("Employees/{}", id)))
            .json(change)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn delete_employee(&mut self, id: Uuid) -> Result<(), AppError> {
        self.delete(&format!("Employees/{}", id)).await
    }

    async fn delete_department(&mut self, id: Uuid) -> Result<(), AppError> {
        self.delete(&format!("Departments/{}", id)).await
    }
}

/// `GET /Departments` is unpaginated and answers with a bare array.
fn decode_departments(body: &str) -> Result<Vec<Department>, AppError> {
    from_str_case_insensitive(body)
}

/// Turns a non-2xx status into [`AppError::ApiError`] carrying the body.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AppError::ApiError {
        status: status.as_u16(),
        body,
    })
}
