pub mod pipeline;
pub mod records;
pub mod session;
