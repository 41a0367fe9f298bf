use crate::{
    error::ConnectorError,
    requests::{FetchOneRequest, InsertRequest, UpdateRequest},
};
use async_trait::async_trait;
use serde_json::Value;

/// The relational store behind profile reads and writes.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Reads exactly one row.
    ///
    /// `Ok(None)` means no row matched the filters. The record is returned as
    /// the backend produced it.
    async fn fetch_one(&self, request: &FetchOneRequest) -> Result<Option<Value>, ConnectorError>;

    async fn insert(&self, request: &InsertRequest) -> Result<(), ConnectorError>;

    async fn update(&self, request: &UpdateRequest) -> Result<(), ConnectorError>;

    /// Short human-readable name, used in logs.
    fn name(&self) -> String;
}
