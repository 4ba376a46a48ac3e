use utoipa::OpenApi;

use crate::model::{
    Attendance, AttendanceEntry, AttendanceInput, Employee, EmployeeDetails, EmployeeInput,
    EmployeeProfile, Month, Salary, SalaryEntry, SalaryInput, SalaryStatus,
};
use crate::report::{Letter, LetterRequest, LetterType};
use crate::store::dashboard::DashboardSummary;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR Portal API",
        version = "1.0.0",
        description = r#"
## HR Portal

Internal records for a small organisation's HR office.

### Key Features
- **Employees**
  - Create, update, search and delete employee records
  - Deleting an employee removes their attendance and salary history
- **Attendance**
  - One record per employee per month, filterable by month and year
- **Salary**
  - One record per employee per month
  - Status is derived: fully received is `Paid`, anything less is `Unpaid`
- **Letters**
  - Offer, experience, resignation, termination and warning letters
- **Exports**
  - CSV downloads of employees, attendance and salary

### Response Format
- JSON for records, `text/csv` attachments for exports
- Errors carry a `message` and, where one applies, the offending `field`
"#,
    ),
    paths(
        crate::api::report::dashboard,

        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::employee_details,

        crate::api::attendance::list_attendance,
        crate::api::attendance::create_attendance,
        crate::api::attendance::get_attendance,
        crate::api::attendance::update_attendance,
        crate::api::attendance::delete_attendance,

        crate::api::salary::list_salaries,
        crate::api::salary::create_salary,
        crate::api::salary::get_salary,
        crate::api::salary::update_salary,
        crate::api::salary::delete_salary,

        crate::api::report::generate_letter,
        crate::api::report::export_employees,
        crate::api::report::export_attendance,
        crate::api::report::export_salary
    ),
    components(
        schemas(
            Employee,
            EmployeeInput,
            EmployeeDetails,
            EmployeeProfile,
            Attendance,
            AttendanceInput,
            AttendanceEntry,
            Salary,
            SalaryInput,
            SalaryEntry,
            SalaryStatus,
            Month,
            Letter,
            LetterRequest,
            LetterType,
            DashboardSummary
        )
    ),
    tags(
        (name = "Dashboard", description = "Current month summary"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Monthly attendance APIs"),
        (name = "Salary", description = "Monthly salary APIs"),
        (name = "Letters", description = "HR letter generation"),
        (name = "Export", description = "CSV exports"),
    )
)]
pub struct ApiDoc;
