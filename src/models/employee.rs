use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::flexible_date;
use super::Department;

/// An employee as the list endpoints return it: joined with its department.
///
/// Field names are the lowercase forms of the API properties.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Employee {
    #[serde(rename = "id")]
    pub id: Uuid,
    #[serde(rename = "department")]
    pub department: Department,
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "middlename", default)]
    pub middle_name: Option<String>,
    #[serde(rename = "lastname")]
    pub last_name: String,
    #[serde(rename = "birthdate", deserialize_with = "flexible_date")]
    pub birth_date: NaiveDate,
    #[serde(rename = "hiredate", deserialize_with = "flexible_date")]
    pub hire_date: NaiveDate,
    #[serde(rename = "salary")]
    pub salary: Decimal,
}

impl Employee {
    /// First, middle and last name joined by single spaces. An absent middle
    /// name still contributes its separator, so the result has a double space.
    pub fn full_name(&self) -> String {
        format!(
            "{} {} {}",
            self.first_name,
            self.middle_name.as_deref().unwrap_or(""),
            self.last_name
        )
    }

    /// First and last name, used in failure messages.
    pub fn short_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Serialize, Validate, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
#[validate(schema(function = "validate_employment_dates"))]
pub struct NewEmployee {
    pub department_id: Uuid,
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub middle_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub hire_date: NaiveDate,
    #[validate(custom = "validate_salary")]
    #[serde(with = "rust_decimal::serde::float")]
    pub salary: Decimal,
}

impl NewEmployee {
    pub fn short_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Partial update. Absent fields are left untouched and omitted from the
/// request body.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<NaiveDate>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub salary: Option<Decimal>,
}

impl EmployeeUpdate {
    pub fn salary(value: Decimal) -> Self {
        Self {
            salary: Some(value),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn validate_salary(salary: &Decimal) -> Result<(), ValidationError> {
    if *salary < Decimal::ZERO {
        return Err(ValidationError::new("salary must not be negative"));
    }
    Ok(())
}

fn validate_employment_dates(employee: &NewEmployee) -> Result<(), ValidationError> {
    if employee.hire_date < employee.birth_date {
        return Err(ValidationError::new("hire date precedes birth date"));
    }
    Ok(())
}
