pub mod dashboard;
pub mod employee;
