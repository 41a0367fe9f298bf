pub mod error;
pub mod params;
pub mod registration;
pub mod service;
