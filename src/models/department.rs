use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Keys are matched against lowercase names; HTTP payloads are key-folded
/// before decoding.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Department {
    #[sqlx(rename = "Id")]
    #[serde(rename = "id")]
    pub id: Uuid,
    #[sqlx(rename = "Name")]
    #[serde(rename = "name", default)]
    pub name: String,
}

#[derive(Serialize, Validate, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct NewDepartment {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

impl NewDepartment {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
