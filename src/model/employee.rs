use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::HrError;
use crate::model::{Attendance, Salary};
use crate::validation::{optional_text, required_text};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": "E100",
        "name": "A. Khan",
        "father_name": "M. Khan",
        "mother_name": null,
        "cnic": "35202-1234567-1",
        "designation": "CSR",
        "contact_number": "+923001234567",
        "address": null,
        "date_joined": "2024-01-01",
        "is_active": true
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "E100")]
    pub employee_id: String,

    #[schema(example = "A. Khan")]
    pub name: String,

    #[schema(nullable = true)]
    pub father_name: Option<String>,

    #[schema(nullable = true)]
    pub mother_name: Option<String>,

    #[schema(example = "35202-1234567-1", nullable = true)]
    pub cnic: Option<String>,

    #[schema(example = "CSR", nullable = true)]
    pub designation: Option<String>,

    #[schema(nullable = true)]
    pub contact_number: Option<String>,

    #[schema(nullable = true)]
    pub address: Option<String>,

    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub date_joined: NaiveDate,

    pub is_active: bool,
}

/// Employee form payload, used for both create and edit.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct EmployeeInput {
    #[schema(example = "E100")]
    pub employee_id: String,
    #[schema(example = "A. Khan")]
    pub name: String,
    #[serde(default)]
    pub father_name: Option<String>,
    #[serde(default)]
    pub mother_name: Option<String>,
    #[serde(default)]
    #[schema(example = "35202-1234567-1")]
    pub cnic: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Defaults to the day the record is created.
    #[serde(default)]
    #[schema(example = "2024-01-01", value_type = Option<String>, format = "date")]
    pub date_joined: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl EmployeeInput {
    pub fn new(employee_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            name: name.into(),
            father_name: None,
            mother_name: None,
            cnic: None,
            designation: None,
            contact_number: None,
            address: None,
            date_joined: None,
            is_active: true,
        }
    }

    pub fn validate(self, today: NaiveDate) -> Result<NewEmployee, HrError> {
        Ok(NewEmployee {
            employee_id: required_text("employee_id", &self.employee_id, Some(20))?,
            name: required_text("name", &self.name, Some(200))?,
            father_name: optional_text("father_name", self.father_name, Some(200))?,
            mother_name: optional_text("mother_name", self.mother_name, Some(200))?,
            cnic: optional_text("cnic", self.cnic, Some(30))?,
            designation: optional_text("designation", self.designation, Some(100))?,
            contact_number: optional_text("contact_number", self.contact_number, Some(30))?,
            address: optional_text("address", self.address, None)?,
            date_joined: self.date_joined.unwrap_or(today),
            is_active: self.is_active,
        })
    }
}

/// A validated employee, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub employee_id: String,
    pub name: String,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub cnic: Option<String>,
    pub designation: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub date_joined: NaiveDate,
    pub is_active: bool,
}

/// Natural-key lookup result.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct EmployeeDetails {
    #[schema(example = "A. Khan")]
    pub name: String,
    #[schema(example = "CSR", nullable = true)]
    pub designation: Option<String>,
    #[schema(example = "35202-1234567-1", nullable = true)]
    pub cnic: Option<String>,
}

/// An employee with the latest attendance and salary records.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EmployeeProfile {
    pub employee: Employee,
    pub recent_attendance: Vec<Attendance>,
    pub recent_salaries: Vec<Salary>,
}
