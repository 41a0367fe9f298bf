pub mod field;
pub mod projection;
