pub mod config;
pub mod source;

/// PostgREST error code for "JSON object requested, multiple (or no) rows returned".
pub const SINGLE_ROW_MISMATCH: &str = "PGRST116";

/// Media type asking PostgREST for a bare object instead of an array.
pub const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
