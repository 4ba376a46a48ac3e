//! Persistence for employees and their monthly attendance and salary records.
//!
//! Uniqueness of natural keys is left to the database's UNIQUE constraints;
//! violations surface as [`crate::error::HrError::Duplicate`].

pub mod attendance;
pub mod dashboard;
pub mod employee;
pub mod salary;
