pub mod catalog;
pub mod core;
