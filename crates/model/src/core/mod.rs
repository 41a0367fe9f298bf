pub mod identifiers;
pub mod profile;
