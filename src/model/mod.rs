pub mod employee;
pub mod region;
pub mod session;
