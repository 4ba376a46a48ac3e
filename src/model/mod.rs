pub mod attendance;
pub mod employee;
pub mod month;
pub mod salary;

pub use attendance::{Attendance, AttendanceEntry, AttendanceInput, NewAttendance};
pub use employee::{Employee, EmployeeDetails, EmployeeInput, EmployeeProfile, NewEmployee};
pub use month::Month;
pub use salary::{NewSalary, Salary, SalaryEntry, SalaryInput, SalaryStatus};
