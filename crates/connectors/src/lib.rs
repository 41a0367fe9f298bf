pub mod error;
pub mod postgrest;
pub mod requests;
pub mod source;
